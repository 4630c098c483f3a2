mod edit;
pub mod history;
mod recorder;

use self::{
    edit::{AnyEdit, Pan, ResetTransform, Zoom},
    history::{History, Status},
    recorder::Recorder,
};
use crate::common::{utils, Frame, Transform};
use delegate_attr::delegate;
use geo::{Coordinate, Rect};
use getset::{CopyGetters, Getters};

/// A photo placed in a polaroid frame, with an undoable history of how it was framed.
#[derive(Debug, Getters, CopyGetters)]
pub struct Model {
    #[getset(get = "pub")]
    frame: Frame,
    /// Natural size of the photo in pixels.
    #[getset(get_copy = "pub")]
    photo_size: Coordinate<f64>,
    transform: Recorder<Transform>,
    history: History<AnyEdit>,
}

#[delegate(self.history)]
#[rustfmt::skip]
impl Model {
    pub fn can_undo(&self) -> bool;
    pub fn can_redo(&self) -> bool;
    pub fn status(&self) -> Status;
}

impl Model {
    pub fn new(frame: Frame, photo_size: Coordinate<f64>) -> anyhow::Result<Self> {
        frame.validate()?;
        anyhow::ensure!(
            photo_size.x.is_finite()
                && photo_size.y.is_finite()
                && photo_size.x > 0.0
                && photo_size.y > 0.0,
            "invalid photo size {}x{}",
            photo_size.x,
            photo_size.y
        );
        log::debug!(
            "photo of {}x{} placed in a {}x{} frame",
            photo_size.x,
            photo_size.y,
            frame.size.x,
            frame.size.y
        );
        Ok(Self {
            frame,
            photo_size,
            transform: Recorder::new(Transform::default()),
            history: History::default(),
        })
    }

    pub fn transform(&self) -> Transform {
        *self.transform.get()
    }

    pub fn photo_rect(&self) -> Rect<f64> {
        self.photo_rect_with(self.transform.get())
    }

    /// Where the photo would be drawn under `transform`, which need not be the current one.
    pub fn photo_rect_with(&self, transform: &Transform) -> Rect<f64> {
        utils::photo_rect(&self.frame, self.photo_size, transform)
    }

    pub fn clamp_offset(&self, zoom: f64, offset: Coordinate<f64>) -> Coordinate<f64> {
        utils::clamp_offset(&self.frame, self.photo_size, zoom, offset)
    }

    pub fn pan_by(&mut self, delta: Coordinate<f64>) -> anyhow::Result<()> {
        let offset = self.transform.get().offset + delta;
        self.pan_to(offset)
    }

    pub fn pan_to(&mut self, offset: Coordinate<f64>) -> anyhow::Result<()> {
        anyhow::ensure!(
            offset.x.is_finite() && offset.y.is_finite(),
            "invalid offset ({}, {})",
            offset.x,
            offset.y
        );
        let from = self.transform.get().offset;
        let to = self.clamp_offset(self.transform.get().zoom, offset);
        if utils::approx_eq(from, to) {
            log::trace!("pan has no effect");
            return Ok(());
        }
        self.execute(Pan { from, to }.into())
    }

    pub fn zoom_by(&mut self, factor: f64) -> anyhow::Result<()> {
        anyhow::ensure!(
            factor.is_finite() && factor > 0.0,
            "invalid zoom factor {}",
            factor
        );
        let from = self.transform();
        let zoom = (from.zoom * factor).clamp(self.frame.min_zoom, self.frame.max_zoom);
        if zoom == from.zoom {
            log::trace!("zoom is already at its limit");
            return Ok(());
        }
        let to = Transform {
            offset: self.clamp_offset(zoom, from.offset),
            zoom,
        };
        self.execute(Zoom { from, to }.into())
    }

    pub fn reset_transform(&mut self) -> anyhow::Result<()> {
        let from = self.transform();
        if from == Transform::default() {
            return Ok(());
        }
        self.execute(ResetTransform { from }.into())
    }

    pub fn undo(&mut self) -> anyhow::Result<bool> {
        // checked here so that a no-op does not mark the transform as updated
        if !self.history.can_undo() {
            return Ok(false);
        }
        self.history.undo(self.transform.get_mut())?;
        log::debug!("undone, now at {:?}", self.transform.get());
        Ok(true)
    }

    pub fn redo(&mut self) -> anyhow::Result<bool> {
        if !self.history.can_redo() {
            return Ok(false);
        }
        self.history.redo(self.transform.get_mut())?;
        log::debug!("redone, now at {:?}", self.transform.get());
        Ok(true)
    }

    /// Forgets the editing history, keeping the current framing.
    pub fn reset_history(&mut self) {
        self.history.reset();
    }

    /// Returns the transform if it may have changed since the last call.
    pub fn take_transform_update(&mut self) -> Option<Transform> {
        self.transform.take_update().copied()
    }

    pub fn take_status_update(&mut self) -> Option<Status> {
        self.history.take_status_change()
    }

    fn execute(&mut self, edit: AnyEdit) -> anyhow::Result<()> {
        log::debug!("{:?}", edit);
        self.history.execute(self.transform.get_mut(), edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landscape() -> Model {
        // 3.1" window, 620x310 photo: covers at 1/100, extent 6.2" x 3.1"
        Model::new(Frame::default(), Coordinate { x: 620.0, y: 310.0 }).unwrap()
    }

    fn assert_close(a: Coordinate<f64>, b: Coordinate<f64>) {
        assert!(utils::approx_eq(a, b), "{:?} != {:?}", a, b);
    }

    #[test]
    fn rejects_bad_photo_size() {
        assert!(Model::new(Frame::default(), Coordinate { x: 0.0, y: 10.0 }).is_err());
        assert!(Model::new(Frame::default(), Coordinate { x: f64::NAN, y: 10.0 }).is_err());
    }

    #[test]
    fn transform_updates_are_reported_once() {
        let mut model = landscape();
        assert_eq!(model.take_transform_update(), None);
        model.zoom_by(2.0).unwrap();
        assert_eq!(model.take_transform_update().map(|t| t.zoom), Some(2.0));
        assert_eq!(model.take_transform_update(), None);
        model.undo().unwrap();
        assert_eq!(model.take_transform_update(), Some(Transform::default()));
    }

    #[test]
    fn idle_undo_and_redo_do_not_report_updates() {
        let mut model = landscape();
        assert!(!model.undo().unwrap());
        assert!(!model.redo().unwrap());
        assert_eq!(model.take_transform_update(), None);

        model.zoom_by(2.0).unwrap();
        model.take_transform_update();
        assert!(!model.redo().unwrap());
        assert_eq!(model.take_transform_update(), None);
    }

    #[test]
    fn broken_photo_is_rejected() {
        // what an <img> that failed to load reports as its natural size
        let err = Model::new(Frame::default(), Coordinate { x: 0.0, y: 0.0 }).unwrap_err();
        assert_eq!(err.to_string(), "invalid photo size 0x0");
    }

    #[test]
    fn pan_is_clamped_and_undoable() {
        let mut model = landscape();
        model.pan_by(Coordinate { x: 10.0, y: 1.0 }).unwrap();
        assert_close(model.transform().offset, Coordinate { x: 1.55, y: 0.0 });
        assert!(model.can_undo());

        assert!(model.undo().unwrap());
        assert_eq!(model.transform(), Transform::default());
        assert!(model.redo().unwrap());
        assert_close(model.transform().offset, Coordinate { x: 1.55, y: 0.0 });
    }

    #[test]
    fn noop_edits_are_not_recorded() {
        let mut model = landscape();
        model.pan_by(Coordinate { x: 0.0, y: 2.0 }).unwrap();
        model.zoom_by(0.5).unwrap();
        model.reset_transform().unwrap();
        assert!(!model.can_undo());
    }

    #[test]
    fn zoom_is_clamped_and_recenters() {
        let mut model = landscape();
        model.zoom_by(4.0).unwrap();
        model.pan_by(Coordinate { x: 0.0, y: 5.0 }).unwrap();
        assert_close(model.transform().offset, Coordinate { x: 0.0, y: 4.65 });

        model.zoom_by(100.0).unwrap();
        assert_eq!(model.transform().zoom, 5.0);

        model.zoom_by(0.01).unwrap();
        assert_eq!(model.transform().zoom, 1.0);
        assert_close(model.transform().offset, Coordinate::zero());

        model.undo().unwrap();
        assert_eq!(model.transform().zoom, 5.0);
        assert_close(model.transform().offset, Coordinate { x: 0.0, y: 4.65 });
    }

    #[test]
    fn rejects_bad_input() {
        let mut model = landscape();
        assert!(model.zoom_by(0.0).is_err());
        assert!(model.zoom_by(f64::INFINITY).is_err());
        assert!(model.pan_by(Coordinate { x: f64::NAN, y: 0.0 }).is_err());
        assert!(!model.can_undo());
    }

    #[test]
    fn reset_transform_is_undoable() {
        let mut model = landscape();
        model.zoom_by(2.0).unwrap();
        model.pan_by(Coordinate { x: -1.0, y: 0.5 }).unwrap();
        let framed = model.transform();

        model.reset_transform().unwrap();
        assert_eq!(model.transform(), Transform::default());
        model.undo().unwrap();
        assert_eq!(model.transform(), framed);
    }

    #[test]
    fn new_edit_after_undo_drops_redo() {
        let mut model = landscape();
        model.zoom_by(2.0).unwrap();
        model.zoom_by(1.5).unwrap();
        model.undo().unwrap();
        model.pan_by(Coordinate { x: 1.0, y: 0.0 }).unwrap();
        assert!(!model.can_redo());
        assert!(!model.redo().unwrap());
        assert_eq!(model.transform().zoom, 2.0);
    }

    #[test]
    fn status_updates_follow_history() {
        let mut model = landscape();
        assert_eq!(model.take_status_update(), None);
        model.zoom_by(2.0).unwrap();
        assert_eq!(
            model.take_status_update(),
            Some(Status {
                can_undo: true,
                can_redo: false,
            })
        );
        model.reset_history();
        assert_eq!(model.take_status_update(), Some(Status::default()));
        assert_eq!(model.transform().zoom, 2.0);
    }

    #[test]
    fn photo_rect_follows_transform() {
        let mut model = landscape();
        let rect = model.photo_rect();
        assert_close(rect.min(), Coordinate { x: -1.35, y: 0.2 });
        assert_close(rect.max(), Coordinate { x: 4.85, y: 3.3 });

        model.pan_by(Coordinate { x: 1.0, y: 0.0 }).unwrap();
        assert_close(model.photo_rect().center(), Coordinate { x: 2.75, y: 1.75 });
    }
}
