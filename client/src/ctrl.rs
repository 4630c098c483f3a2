use crate::{
    common::Transform,
    model::Model,
    view::{Action, View},
    web,
};
use geo::Coordinate;

/// Wheel distance, in pixels, that zooms by a factor of _e_.
const WHEEL_SENSITIVITY: f64 = 500.;

/// Drags the photo around, previewing it until the pointer is released.
#[derive(Debug)]
struct PanHandler {
    button: web::MouseButton,
    start_coord: Coordinate<f64>,
    start_offset: Coordinate<f64>,
    preview: Transform,
}

impl PanHandler {
    pub fn new(model: &Model, button: web::MouseButton, coord: Coordinate<f64>) -> Self {
        let transform = model.transform();
        Self {
            button,
            start_coord: coord,
            start_offset: transform.offset,
            preview: transform,
        }
    }

    pub fn move_to(&mut self, model: &Model, view: &View, coord: Coordinate<f64>) {
        let delta = (coord - self.start_coord) / view.scale(model.frame());
        self.preview.offset = model.clamp_offset(self.preview.zoom, self.start_offset + delta);
        view.render(model.frame(), model.photo_rect_with(&self.preview));
    }

    pub fn finish(self, model: &mut Model) -> anyhow::Result<()> {
        model.pan_to(self.preview.offset)
    }
}

pub struct Controller {
    model: Model,
    view: View,
    handler: Option<PanHandler>,
    /// Whether the last refresh redrew the canvas.
    rendered: bool,
}

impl Controller {
    pub fn new(model: Model, view: View) -> Self {
        let this = Self {
            model,
            view,
            handler: None,
            rendered: false,
        };
        this.view
            .render(this.model.frame(), this.model.photo_rect());
        this.view.show_status(this.model.status());
        this
    }

    /// Brings the view up to date with the model.
    fn refresh(&mut self) {
        self.rendered = self.model.take_transform_update().is_some();
        if self.rendered {
            self.view
                .render(self.model.frame(), self.model.photo_rect());
        }
        if let Some(status) = self.model.take_status_update() {
            self.view.show_status(status);
        }
    }

    fn run(&mut self, what: &str, f: impl FnOnce(&mut Model) -> anyhow::Result<()>) {
        if let Err(err) = f(&mut self.model) {
            log::error!("failed to {}: {:#}", what, err);
        }
        self.refresh();
    }

    fn undo(&mut self) {
        self.run("undo", |model| model.undo().map(drop));
    }

    fn redo(&mut self) {
        self.run("redo", |model| model.redo().map(drop));
    }

    pub fn on_action(&mut self, action: Action) {
        if self.handler.is_some() {
            return;
        }
        match action {
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
            Action::Reset => self.run("reset the framing", Model::reset_transform),
        }
    }

    pub fn on_key_down(&mut self, key_input: web::KeyInput) {
        if self.handler.is_some() || !key_input.with_ctrl() {
            return;
        }
        match key_input.key().to_lowercase().as_str() {
            "z" if key_input.with_shift() => {
                key_input.prevent_default();
                self.redo();
            }
            "z" => {
                key_input.prevent_default();
                self.undo();
            }
            "y" => {
                key_input.prevent_default();
                self.redo();
            }
            _ => {}
        }
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        if self.handler.is_some() {
            return;
        }
        let factor = (-delta_y / WHEEL_SENSITIVITY).exp();
        self.run("zoom", |model| model.zoom_by(factor));
    }

    pub fn on_pointer_down(&mut self, button: web::MouseButton, coord: Coordinate<f64>) {
        if self.handler.is_some() {
            return;
        }
        if button == web::MouseButton::Left {
            self.handler = Some(PanHandler::new(&self.model, button, coord));
        }
    }

    pub fn on_pointer_move(&mut self, coord: Coordinate<f64>) {
        if let Some(h) = &mut self.handler {
            h.move_to(&self.model, &self.view, coord);
        }
    }

    pub fn on_pointer_up(&mut self, button: web::MouseButton) {
        match self.handler.take() {
            Some(h) if h.button == button => self.finish_pan(h),
            h => self.handler = h,
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if let Some(h) = self.handler.take() {
            self.finish_pan(h);
        }
    }

    fn finish_pan(&mut self, h: PanHandler) {
        self.run("pan", |model| h.finish(model));
        if !self.rendered {
            // nothing was recorded, but the preview is still on the canvas
            self.view
                .render(self.model.frame(), self.model.photo_rect());
        }
    }
}
