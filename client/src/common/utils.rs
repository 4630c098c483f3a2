use super::{Frame, Transform};
use geo::{CoordNum, Coordinate, Rect};

pub fn coordinate_map<T, U>(coord: Coordinate<T>, mut f: impl FnMut(T) -> U) -> Coordinate<U>
where
    T: CoordNum,
    U: CoordNum,
{
    Coordinate {
        x: f(coord.x),
        y: f(coord.y),
    }
}

/// Compares coordinates with a tolerance that absorbs rounding in the layout math.
pub fn approx_eq(a: Coordinate<f64>, b: Coordinate<f64>) -> bool {
    const EPSILON: f64 = 1e-9;
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

pub fn rect_size<T>(rect: Rect<T>) -> Coordinate<T>
where
    T: CoordNum,
{
    Coordinate {
        x: rect.width(),
        y: rect.height(),
    }
}

pub fn scale_rect(rect: Rect<f64>, factor: f64) -> Rect<f64> {
    Rect::new(rect.min() * factor, rect.max() * factor)
}

/// The smallest scale at which a photo of size `photo` covers the whole `window`.
pub fn cover_scale(window: Coordinate<f64>, photo: Coordinate<f64>) -> f64 {
    f64::max(window.x / photo.x, window.y / photo.y)
}

fn photo_extent(frame: &Frame, photo: Coordinate<f64>, zoom: f64) -> Coordinate<f64> {
    let scale = cover_scale(rect_size(frame.window), photo) * zoom;
    photo * scale
}

/// Returns where the photo is drawn, in frame units.
pub fn photo_rect(frame: &Frame, photo: Coordinate<f64>, transform: &Transform) -> Rect<f64> {
    let extent = photo_extent(frame, photo, transform.zoom);
    let center = frame.window.center() + transform.offset;
    Rect::new(center - extent / 2., center + extent / 2.)
}

/// Limits `offset` so that the photo leaves no uncovered part in the window.
pub fn clamp_offset(
    frame: &Frame,
    photo: Coordinate<f64>,
    zoom: f64,
    offset: Coordinate<f64>,
) -> Coordinate<f64> {
    let slack = (photo_extent(frame, photo, zoom) - rect_size(frame.window)) / 2.;
    let slack = coordinate_map(slack, |d| d.max(0.));
    Coordinate {
        x: offset.x.clamp(-slack.x, slack.x),
        y: offset.y.clamp(-slack.y, slack.y),
    }
}
