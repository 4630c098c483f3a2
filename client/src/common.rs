pub mod utils;

use geo::{Coordinate, Rect};

/// Geometry of a polaroid frame, in inches.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Frame {
    pub size: Coordinate<f64>,
    /// The area of the frame where the photo shows through.
    pub window: Rect<f64>,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Frame {
    /// The classic 3.5" x 4.2" instant print with a square 3.1" window.
    fn default() -> Self {
        Self {
            size: Coordinate { x: 3.5, y: 4.2 },
            window: Rect::new(Coordinate { x: 0.2, y: 0.2 }, Coordinate { x: 3.3, y: 3.3 }),
            min_zoom: 1.0,
            max_zoom: 5.0,
        }
    }
}

impl Frame {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.window.width() > 0.0 && self.window.height() > 0.0,
            "frame window is empty"
        );
        anyhow::ensure!(
            self.window.min().x >= 0.0
                && self.window.min().y >= 0.0
                && self.window.max().x <= self.size.x
                && self.window.max().y <= self.size.y,
            "frame window does not fit in the frame"
        );
        anyhow::ensure!(
            self.min_zoom >= 1.0 && self.min_zoom <= self.max_zoom,
            "invalid zoom range {}..={}",
            self.min_zoom,
            self.max_zoom
        );
        Ok(())
    }
}

/// How the customer framed the photo.
///
/// `offset` moves the photo's center away from the window's center, in frame units.
/// `zoom` is relative to the smallest size at which the photo covers the whole window.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Transform {
    pub offset: Coordinate<f64>,
    pub zoom: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            offset: Coordinate { x: 0.0, y: 0.0 },
            zoom: 1.0,
        }
    }
}
