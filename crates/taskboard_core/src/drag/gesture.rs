//! Host-side driver for one drag gesture.
//!
//! Reproduces the native event order: `dragstart` on the source, any number
//! of `dragover`/`dragleave` on targets, an optional `drop`, then `dragend`.
//! A drop is delivered only to a target whose last drag-over accepted the
//! payload by preventing the default action.

use crate::drag::event::{Anchor, DataTransfer, DragEvent, DragEventKind};

/// One in-flight drag gesture.
#[derive(Debug)]
pub struct DragGesture {
    source: Anchor,
    data_transfer: DataTransfer,
    accepted_by: Option<Anchor>,
}

impl DragGesture {
    /// Starts a gesture from `source`.
    ///
    /// Returns `None` when the anchor is not marked draggable.
    pub fn start(source: &Anchor) -> Option<Self> {
        if !source.is_draggable() {
            return None;
        }

        let mut event = DragEvent::new();
        source.dispatch(DragEventKind::DragStart, &mut event);
        Some(Self {
            source: source.clone(),
            data_transfer: event.into_data_transfer().unwrap_or_default(),
            accepted_by: None,
        })
    }

    pub fn data_transfer(&self) -> &DataTransfer {
        &self.data_transfer
    }

    /// Hovers over `target`; returns whether the target accepted the drag.
    pub fn over(&mut self, target: &Anchor) -> bool {
        let mut event = self.event();
        target.dispatch(DragEventKind::DragOver, &mut event);
        let accepted = event.is_default_prevented();
        self.accepted_by = accepted.then(|| target.clone());
        accepted
    }

    /// Leaves `target` without dropping.
    pub fn leave(&mut self, target: &Anchor) {
        let mut event = self.event();
        target.dispatch(DragEventKind::DragLeave, &mut event);
        if self
            .accepted_by
            .as_ref()
            .is_some_and(|accepted| accepted.same_as(target))
        {
            self.accepted_by = None;
        }
    }

    /// Releases over `target` and ends the gesture.
    ///
    /// Returns whether the drop handler ran.
    pub fn drop_on(mut self, target: &Anchor) -> bool {
        let accepted = self
            .accepted_by
            .take()
            .is_some_and(|accepted| accepted.same_as(target));
        if accepted {
            let mut event = self.event();
            target.dispatch(DragEventKind::Drop, &mut event);
        }
        self.end();
        accepted
    }

    /// Abandons the gesture outside any target.
    pub fn cancel(self) {
        self.end();
    }

    fn end(self) {
        let mut event = self.event();
        self.source.dispatch(DragEventKind::DragEnd, &mut event);
    }

    fn event(&self) -> DragEvent {
        DragEvent::with_data_transfer(self.data_transfer.clone())
    }
}

/// Runs a full hover-and-drop gesture from `source` onto `target`.
///
/// Returns whether the target received the drop.
pub fn drag_and_drop(source: &Anchor, target: &Anchor) -> bool {
    let Some(mut gesture) = DragGesture::start(source) else {
        return false;
    };
    gesture.over(target);
    gesture.drop_on(target)
}
