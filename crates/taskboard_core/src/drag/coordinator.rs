//! Drag-source and drop-target registration.
//!
//! # Responsibility
//! - Wire anchor events to the `Draggable` / `DragTarget` capability traits.
//! - Own the `droppable` marker on drop targets.
//! - Decode the plain-text project id payload for drop handlers.
//!
//! # Invariants
//! - Registration keeps no per-gesture state; every gesture is independent.
//! - Handlers hold capability objects weakly, so an object owning its own
//!   anchor is not kept alive by it.
//! - The marker is on only between a drag-over and the next leave/drop.

use crate::drag::event::{
    Anchor, DragEvent, DragEventKind, DROPPABLE_CLASS, PLAIN_TEXT_MEDIA_TYPE,
};
use crate::model::project::ProjectId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use uuid::Uuid;

/// Something that can be picked up and dragged.
pub trait Draggable {
    fn drag_anchor(&self) -> Anchor;
    /// Encodes the payload and allowed effect for the gesture.
    fn on_drag_start(&self, event: &mut DragEvent);
    fn on_drag_end(&self, event: &mut DragEvent);
}

/// Something that can receive dropped items.
pub trait DragTarget {
    fn drag_target_anchor(&self) -> Anchor;
    /// Must call `prevent_default` to accept the drag.
    fn on_drag_over(&self, event: &mut DragEvent);
    fn on_drag_leave(&self, event: &mut DragEvent);
    fn on_drop(&self, event: &mut DragEvent);
}

/// Drop payload decode errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropError {
    MissingDataTransfer,
    MissingPayload,
    InvalidProjectId(String),
}

impl Display for DropError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDataTransfer => write!(f, "drop event carries no data transfer"),
            Self::MissingPayload => {
                write!(f, "drop event carries no `{PLAIN_TEXT_MEDIA_TYPE}` payload")
            }
            Self::InvalidProjectId(value) => write!(f, "drop payload is not a project id: {value}"),
        }
    }
}

impl Error for DropError {}

/// Marks the source anchor draggable and forwards drag start/end.
pub fn configure_draggable<D>(source: &Rc<D>)
where
    D: Draggable + 'static,
{
    let anchor = source.drag_anchor();
    anchor.set_draggable(true);

    let weak = Rc::downgrade(source);
    anchor.add_listener(DragEventKind::DragStart, move |_, event| {
        if let Some(source) = weak.upgrade() {
            source.on_drag_start(event);
        }
    });

    let weak = Rc::downgrade(source);
    anchor.add_listener(DragEventKind::DragEnd, move |_, event| {
        if let Some(source) = weak.upgrade() {
            source.on_drag_end(event);
        }
    });
}

/// Forwards drag over/leave/drop to `target` and maintains the marker.
pub fn configure_target<T>(target: &Rc<T>)
where
    T: DragTarget + 'static,
{
    let anchor = target.drag_target_anchor();

    let weak = Rc::downgrade(target);
    anchor.add_listener(DragEventKind::DragOver, move |current, event| {
        current.add_class(DROPPABLE_CLASS);
        if let Some(target) = weak.upgrade() {
            target.on_drag_over(event);
        }
    });

    let weak = Rc::downgrade(target);
    anchor.add_listener(DragEventKind::DragLeave, move |current, event| {
        current.remove_class(DROPPABLE_CLASS);
        if let Some(target) = weak.upgrade() {
            target.on_drag_leave(event);
        }
    });

    let weak = Rc::downgrade(target);
    anchor.add_listener(DragEventKind::Drop, move |current, event| {
        current.remove_class(DROPPABLE_CLASS);
        if let Some(target) = weak.upgrade() {
            target.on_drop(event);
        }
    });
}

/// Whether the dragged payload is declared as plain text.
///
/// Only the first payload item is inspected.
pub fn accepts_plain_text(event: &DragEvent) -> bool {
    event
        .data_transfer()
        .and_then(|transfer| transfer.items().first())
        .is_some_and(|item| item.media_type == PLAIN_TEXT_MEDIA_TYPE)
}

/// Reads the dragged project id from the plain-text payload.
pub fn dragged_project_id(event: &DragEvent) -> Result<ProjectId, DropError> {
    let transfer = event
        .data_transfer()
        .ok_or(DropError::MissingDataTransfer)?;
    let payload = transfer
        .get_data(PLAIN_TEXT_MEDIA_TYPE)
        .ok_or(DropError::MissingPayload)?;
    Uuid::parse_str(payload.trim()).map_err(|_| DropError::InvalidProjectId(payload.to_string()))
}
