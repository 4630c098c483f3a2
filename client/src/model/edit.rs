//! Reversible edits of the photo framing.

use super::history::Command;
use crate::common::Transform;
use enum_dispatch::enum_dispatch;
use geo::Coordinate;

#[enum_dispatch]
pub(super) trait Edit {
    fn apply(&self, transform: &mut Transform);
    fn revert(&self, transform: &mut Transform);
}

#[enum_dispatch(Edit)]
#[derive(Clone, Debug)]
pub(super) enum AnyEdit {
    Pan(Pan),
    Zoom(Zoom),
    Reset(ResetTransform),
}

impl Command for AnyEdit {
    type Target = Transform;

    fn redo(&mut self, transform: &mut Transform) -> anyhow::Result<()> {
        log::trace!("applying {:?}", self);
        self.apply(transform);
        Ok(())
    }

    fn undo(&mut self, transform: &mut Transform) -> anyhow::Result<()> {
        log::trace!("reverting {:?}", self);
        self.revert(transform);
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub(super) struct Pan {
    pub from: Coordinate<f64>,
    pub to: Coordinate<f64>,
}

impl Edit for Pan {
    fn apply(&self, transform: &mut Transform) {
        transform.offset = self.to;
    }

    fn revert(&self, transform: &mut Transform) {
        transform.offset = self.from;
    }
}

/// Zooming also moves the photo back inside the window, so the whole transform is kept.
#[derive(Clone, Debug)]
pub(super) struct Zoom {
    pub from: Transform,
    pub to: Transform,
}

impl Edit for Zoom {
    fn apply(&self, transform: &mut Transform) {
        *transform = self.to;
    }

    fn revert(&self, transform: &mut Transform) {
        *transform = self.from;
    }
}

#[derive(Clone, Debug)]
pub(super) struct ResetTransform {
    pub from: Transform,
}

impl Edit for ResetTransform {
    fn apply(&self, transform: &mut Transform) {
        *transform = Transform::default();
    }

    fn revert(&self, transform: &mut Transform) {
        *transform = self.from;
    }
}
