mod common;
mod ctrl;
mod model;
mod view;
mod web;

pub use crate::{
    common::{Frame, Transform},
    model::{
        history::{Command, FnCommand, History, Status},
        Model,
    },
};
use crate::{ctrl::Controller, view::View};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    {
        let level = if cfg!(debug_assertions) {
            log::Level::Trace
        } else {
            log::Level::Info
        };
        console_log::init_with_level(level).expect("failed to initialize log");
    }

    log::debug!("initializing the view...");
    let view = match View::init() {
        Ok(view) => view,
        Err(err) => {
            log::error!("failed to initialize the view: {:#}", err);
            return;
        }
    };

    // a photo that failed to load is complete too; the model rejects its empty size
    if view.photo().is_complete() {
        boot(view);
    } else {
        log::debug!("waiting for the photo to load...");
        let photo = view.photo().clone();
        photo.on_error({
            let photo = photo.clone();
            move |_| log::error!("failed to load the photo from {:?}", photo.src())
        });
        let mut view = Some(view);
        photo.on_load(move |_| {
            if let Some(view) = view.take() {
                boot(view);
            }
        });
    }
}

fn boot(view: View) {
    log::debug!("loading the model...");
    let model = match Model::new(Frame::default(), view.photo().natural_size()) {
        Ok(model) => model,
        Err(err) => {
            log::error!("failed to load the photo: {:#}", err);
            return;
        }
    };
    let ctrl = Controller::new(model, view.clone());

    log::debug!("registering event listeners...");
    view.listen_events(ctrl);

    log::debug!("polaroid editor started");
}
