//! A view, which composites the polaroid and notifies the controller of received user events.

use crate::{
    common::{utils, Frame},
    ctrl::Controller,
    model::history::Status,
    web,
};
use derive_more::Display;
use enum_map::{enum_map, Enum, EnumMap};
use geo::{Coordinate, Rect};
use std::{cell::RefCell, rc::Rc};

const FRAME_COLOR: &str = "#fbfaf7";
const WINDOW_EDGE_COLOR: &str = "rgba(0,0,0,0.12)";

/// A button bound to a history operation. Displays as the element id of the button.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, Display)]
pub enum Action {
    #[display(fmt = "undo_button")]
    Undo,
    #[display(fmt = "redo_button")]
    Redo,
    #[display(fmt = "reset_button")]
    Reset,
}

#[derive(Clone, Debug)]
pub struct View {
    canvas: web::Canvas,
    photo: web::Image,
    buttons: EnumMap<Action, web_sys::HtmlButtonElement>,
}

impl View {
    pub fn init() -> anyhow::Result<Self> {
        let canvas = web::element_by_id::<web_sys::HtmlCanvasElement>("polaroid_canvas")?;
        let photo = web::element_by_id::<web_sys::HtmlImageElement>("polaroid_photo")?;
        let buttons: EnumMap<Action, web_sys::HtmlButtonElement> = enum_map! {
            action => web::element_by_id(&action.to_string())?,
        };
        Ok(Self {
            canvas: web::Canvas::try_from(canvas)?,
            photo: photo.into(),
            buttons,
        })
    }

    pub fn photo(&self) -> &web::Image {
        &self.photo
    }

    /// Canvas pixels per frame unit. The frame is fitted into the canvas.
    pub fn scale(&self, frame: &Frame) -> f64 {
        let size = self.canvas.size();
        f64::min(size.x / frame.size.x, size.y / frame.size.y)
    }

    /// Draws the frame with the photo placed at `photo_rect`, both in frame units.
    pub fn render(&self, frame: &Frame, photo_rect: Rect<f64>) {
        let scale = self.scale(frame);
        let frame_rect = utils::scale_rect(Rect::new(Coordinate::zero(), frame.size), scale);
        let window = utils::scale_rect(frame.window, scale);

        self.canvas.clear();
        self.canvas.set_fill_color(FRAME_COLOR);
        self.canvas.fill_rect(frame_rect);
        self.canvas.with_clip(window, |canvas| {
            if let Err(err) = canvas.draw_image(&self.photo, utils::scale_rect(photo_rect, scale)) {
                log::error!("{:#}", err);
            }
        });
        self.canvas.set_stroke_color(WINDOW_EDGE_COLOR);
        self.canvas.set_line_width(1.0);
        self.canvas.stroke_rect(window);
    }

    pub fn show_status(&self, status: Status) {
        self.buttons[Action::Undo].set_disabled(!status.can_undo);
        self.buttons[Action::Redo].set_disabled(!status.can_redo);
    }

    pub fn listen_events(self, ctrl: Controller) {
        let ctrl = Rc::new(RefCell::new(ctrl));

        web::DOCUMENT.with({
            let ctrl = Rc::clone(&ctrl);
            move |document| {
                web::listen_event(document, "keydown", move |event: web_sys::KeyboardEvent| {
                    ctrl.borrow_mut().on_key_down(event.into())
                });
            }
        });

        for (action, button) in &self.buttons {
            web::listen_event(button, "click", {
                let ctrl = Rc::clone(&ctrl);
                move |_: web_sys::MouseEvent| ctrl.borrow_mut().on_action(action)
            });
        }

        let canvas = self.canvas.elem();

        web::listen_event(canvas, "wheel", {
            let ctrl = Rc::clone(&ctrl);
            move |event: web_sys::WheelEvent| {
                event.prevent_default();
                ctrl.borrow_mut().on_wheel(event.delta_y())
            }
        });

        web::listen_event(canvas, "pointerdown", {
            let ctrl = Rc::clone(&ctrl);
            move |event: web_sys::MouseEvent| {
                ctrl.borrow_mut().on_pointer_down(
                    web::mouse_event_button(&event),
                    web::mouse_event_offset(&event),
                )
            }
        });

        web::listen_event(canvas, "pointermove", {
            let ctrl = Rc::clone(&ctrl);
            move |event: web_sys::MouseEvent| {
                ctrl.borrow_mut()
                    .on_pointer_move(web::mouse_event_offset(&event))
            }
        });

        web::listen_event(canvas, "pointerup", {
            let ctrl = Rc::clone(&ctrl);
            move |event: web_sys::MouseEvent| {
                ctrl.borrow_mut()
                    .on_pointer_up(web::mouse_event_button(&event))
            }
        });

        // A drag that leaves the canvas is committed where it left.
        web::listen_event(canvas, "pointerleave", {
            let ctrl = Rc::clone(&ctrl);
            move |_: web_sys::MouseEvent| ctrl.borrow_mut().on_pointer_leave()
        });
    }
}
