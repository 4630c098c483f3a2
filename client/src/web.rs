use anyhow::anyhow;
use geo::{Coordinate, Rect};
use wasm_bindgen::{convert::FromWasmAbi, prelude::*, JsCast};

thread_local! {
    pub static WINDOW: web_sys::Window = web_sys::window().expect("window does not exist");
    pub static DOCUMENT: web_sys::Document =
        WINDOW.with(|window| window.document().expect("document does not exist"));
}

pub fn element_by_id<T: JsCast>(id: &str) -> anyhow::Result<T> {
    DOCUMENT
        .with(|document| document.get_element_by_id(id))
        .ok_or_else(|| anyhow!("element #{} not found", id))?
        .dyn_into::<T>()
        .map_err(|_| anyhow!("element #{} has an unexpected type", id))
}

/// Registers `f` as a listener for the lifetime of the page.
pub fn listen_event<E>(target: &web_sys::EventTarget, ty: &str, f: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(E)>);
    target
        .add_event_listener_with_callback(ty, closure.as_ref().unchecked_ref())
        .expect("exception thrown");
    closure.forget();
}

pub fn mouse_event_button(event: &web_sys::MouseEvent) -> MouseButton {
    match event.button() {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

pub fn mouse_event_offset(event: &web_sys::MouseEvent) -> Coordinate<f64> {
    Coordinate {
        x: event.offset_x().into(),
        y: event.offset_y().into(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MouseButton {
    Left,
    Middle,
    Other,
}

#[derive(Clone, Debug)]
pub struct KeyInput(web_sys::KeyboardEvent);

impl From<web_sys::KeyboardEvent> for KeyInput {
    fn from(event: web_sys::KeyboardEvent) -> Self {
        Self(event)
    }
}

impl KeyInput {
    pub fn key(&self) -> String {
        self.0.key()
    }

    /// Command on macOS counts as Ctrl.
    pub fn with_ctrl(&self) -> bool {
        self.0.ctrl_key() || self.0.meta_key()
    }

    pub fn with_shift(&self) -> bool {
        self.0.shift_key()
    }

    pub fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

#[derive(Clone, Debug)]
pub struct Image(web_sys::HtmlImageElement);

impl From<web_sys::HtmlImageElement> for Image {
    fn from(elem: web_sys::HtmlImageElement) -> Self {
        Self(elem)
    }
}

impl Image {
    /// Whether the browser is done with the image, including when it failed to load it.
    pub fn is_complete(&self) -> bool {
        self.0.complete()
    }

    pub fn natural_size(&self) -> Coordinate<f64> {
        Coordinate {
            x: self.0.natural_width().into(),
            y: self.0.natural_height().into(),
        }
    }

    pub fn on_load(&self, f: impl FnMut(web_sys::Event) + 'static) {
        listen_event(&self.0, "load", f);
    }

    pub fn on_error(&self, f: impl FnMut(web_sys::Event) + 'static) {
        listen_event(&self.0, "error", f);
    }

    pub fn src(&self) -> String {
        self.0.src()
    }
}

#[derive(Clone, Debug)]
pub struct Canvas {
    elem: web_sys::HtmlCanvasElement,
    ctx: web_sys::CanvasRenderingContext2d,
}

impl TryFrom<web_sys::HtmlCanvasElement> for Canvas {
    type Error = anyhow::Error;

    fn try_from(elem: web_sys::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = elem
            .get_context("2d")
            .map_err(|_| anyhow!("exception thrown while getting the rendering context"))?
            .ok_or_else(|| anyhow!("could not get rendering context"))?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("unexpected rendering context"))?;
        Ok(Self { elem, ctx })
    }
}

impl Canvas {
    pub fn elem(&self) -> &web_sys::HtmlCanvasElement {
        &self.elem
    }

    pub fn size(&self) -> Coordinate<f64> {
        Coordinate {
            x: self.elem.width().into(),
            y: self.elem.height().into(),
        }
    }

    pub fn clear(&self) {
        let size = self.size();
        self.ctx.clear_rect(0., 0., size.x, size.y);
    }

    pub fn set_fill_color(&self, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
    }

    pub fn set_stroke_color(&self, color: &str) {
        self.ctx.set_stroke_style(&JsValue::from_str(color));
    }

    pub fn set_line_width(&self, width: f64) {
        self.ctx.set_line_width(width);
    }

    pub fn fill_rect(&self, rect: Rect<f64>) {
        self.ctx
            .fill_rect(rect.min().x, rect.min().y, rect.width(), rect.height());
    }

    pub fn stroke_rect(&self, rect: Rect<f64>) {
        self.ctx
            .stroke_rect(rect.min().x, rect.min().y, rect.width(), rect.height());
    }

    /// Runs `f` with drawing restricted to `rect`.
    pub fn with_clip(&self, rect: Rect<f64>, f: impl FnOnce(&Self)) {
        self.ctx.save();
        self.ctx.begin_path();
        self.ctx
            .rect(rect.min().x, rect.min().y, rect.width(), rect.height());
        self.ctx.clip();
        f(self);
        self.ctx.restore();
    }

    pub fn draw_image(&self, image: &Image, rect: Rect<f64>) -> anyhow::Result<()> {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                &image.0,
                rect.min().x,
                rect.min().y,
                rect.width(),
                rect.height(),
            )
            .map_err(|err| anyhow!("failed to draw the photo: {:?}", err))
    }
}
