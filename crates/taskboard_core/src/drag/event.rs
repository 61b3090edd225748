//! Headless drag-and-drop event surface.
//!
//! `Anchor` stands in for the element a drag handler is attached to, and
//! `DragEvent` for the native event a host UI forwards to it. Hosts bridge
//! their real events into `Anchor::dispatch`.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Media type used for project id payloads.
pub const PLAIN_TEXT_MEDIA_TYPE: &str = "text/plain";
/// Class applied to a drop target while a drag hovers over it.
pub const DROPPABLE_CLASS: &str = "droppable";

/// Native drag events forwarded by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragEventKind {
    DragStart,
    DragEnd,
    DragOver,
    DragLeave,
    Drop,
}

/// Allowed effect declared by a drag source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Link,
    Move,
}

impl DropEffect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Copy => "copy",
            Self::Link => "link",
            Self::Move => "move",
        }
    }
}

/// One typed payload entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTransferItem {
    pub media_type: String,
    pub data: String,
}

/// Payload carried along with one drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    items: Vec<DataTransferItem>,
    pub effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `media_type`, replacing an existing entry of the
    /// same type in place.
    pub fn set_data(&mut self, media_type: &str, data: impl Into<String>) {
        let data = data.into();
        match self
            .items
            .iter_mut()
            .find(|item| item.media_type == media_type)
        {
            Some(item) => item.data = data,
            None => self.items.push(DataTransferItem {
                media_type: media_type.to_string(),
                data,
            }),
        }
    }

    pub fn get_data(&self, media_type: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.media_type == media_type)
            .map(|item| item.data.as_str())
    }

    pub fn items(&self) -> &[DataTransferItem] {
        &self.items
    }
}

/// Mutable view of one native drag event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEvent {
    data_transfer: Option<DataTransfer>,
    default_prevented: bool,
}

impl DragEvent {
    /// Event carrying an empty payload.
    pub fn new() -> Self {
        Self::with_data_transfer(DataTransfer::new())
    }

    pub fn with_data_transfer(data_transfer: DataTransfer) -> Self {
        Self {
            data_transfer: Some(data_transfer),
            default_prevented: false,
        }
    }

    /// Event with no payload at all, as hosts deliver for foreign drags.
    pub fn without_data_transfer() -> Self {
        Self {
            data_transfer: None,
            default_prevented: false,
        }
    }

    pub fn data_transfer(&self) -> Option<&DataTransfer> {
        self.data_transfer.as_ref()
    }

    pub fn data_transfer_mut(&mut self) -> Option<&mut DataTransfer> {
        self.data_transfer.as_mut()
    }

    pub fn into_data_transfer(self) -> Option<DataTransfer> {
        self.data_transfer
    }

    /// Suppresses the host's default action (for drag-over: rejecting the drop).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

type Handler = Rc<dyn Fn(&Anchor, &mut DragEvent)>;

struct AnchorState {
    id: String,
    draggable: bool,
    classes: BTreeSet<String>,
    handlers: Vec<(DragEventKind, Handler)>,
}

/// Shared handle to an event-attachment point.
///
/// Clones refer to the same underlying anchor.
#[derive(Clone)]
pub struct Anchor {
    state: Rc<RefCell<AnchorState>>,
}

impl Anchor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(AnchorState {
                id: id.into(),
                draggable: false,
                classes: BTreeSet::new(),
                handlers: Vec::new(),
            })),
        }
    }

    pub fn id(&self) -> String {
        self.state.borrow().id.clone()
    }

    pub fn set_draggable(&self, draggable: bool) {
        self.state.borrow_mut().draggable = draggable;
    }

    pub fn is_draggable(&self) -> bool {
        self.state.borrow().draggable
    }

    pub fn add_class(&self, class: &str) {
        self.state.borrow_mut().classes.insert(class.to_string());
    }

    pub fn remove_class(&self, class: &str) {
        self.state.borrow_mut().classes.remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.contains(class)
    }

    /// Attaches `handler` for `kind`. Handlers run in attachment order and
    /// receive the anchor they were dispatched on.
    pub fn add_listener<F>(&self, kind: DragEventKind, handler: F)
    where
        F: Fn(&Anchor, &mut DragEvent) + 'static,
    {
        let handler: Handler = Rc::new(handler);
        self.state.borrow_mut().handlers.push((kind, handler));
    }

    pub fn listener_count(&self, kind: DragEventKind) -> usize {
        self.state
            .borrow()
            .handlers
            .iter()
            .filter(|(handler_kind, _)| *handler_kind == kind)
            .count()
    }

    /// Runs every handler attached for `kind`; returns how many ran.
    pub fn dispatch(&self, kind: DragEventKind, event: &mut DragEvent) -> usize {
        let handlers: Vec<Handler> = self
            .state
            .borrow()
            .handlers
            .iter()
            .filter(|(handler_kind, _)| *handler_kind == kind)
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in &handlers {
            handler(self, &mut *event);
        }
        handlers.len()
    }

    /// Whether both handles point at the same anchor.
    pub fn same_as(&self, other: &Anchor) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Debug for Anchor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Anchor")
            .field("id", &state.id)
            .field("draggable", &state.draggable)
            .field("classes", &state.classes)
            .field("handlers", &state.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Anchor, DataTransfer, DragEvent, DragEventKind, PLAIN_TEXT_MEDIA_TYPE};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn set_data_replaces_entry_of_same_type() {
        let mut transfer = DataTransfer::new();
        transfer.set_data(PLAIN_TEXT_MEDIA_TYPE, "first");
        transfer.set_data("text/html", "<b>x</b>");
        transfer.set_data(PLAIN_TEXT_MEDIA_TYPE, "second");

        assert_eq!(transfer.items().len(), 2);
        assert_eq!(transfer.items()[0].media_type, PLAIN_TEXT_MEDIA_TYPE);
        assert_eq!(transfer.get_data(PLAIN_TEXT_MEDIA_TYPE), Some("second"));
        assert_eq!(transfer.get_data("application/json"), None);
    }

    #[test]
    fn dispatch_runs_only_matching_handlers_in_order() {
        let anchor = Anchor::new("list");
        let calls = Rc::new(RefCell::new(Vec::new()));

        for label in ["a", "b"] {
            let calls = Rc::clone(&calls);
            anchor.add_listener(DragEventKind::Drop, move |_, _| {
                calls.borrow_mut().push(label);
            });
        }
        let other = Rc::clone(&calls);
        anchor.add_listener(DragEventKind::DragOver, move |_, _| {
            other.borrow_mut().push("over");
        });

        let ran = anchor.dispatch(DragEventKind::Drop, &mut DragEvent::new());

        assert_eq!(ran, 2);
        assert_eq!(*calls.borrow(), vec!["a", "b"]);
        assert_eq!(anchor.listener_count(DragEventKind::DragOver), 1);
    }

    #[test]
    fn handlers_can_mutate_the_dispatching_anchor() {
        let anchor = Anchor::new("list");
        anchor.add_listener(DragEventKind::DragOver, |current, event| {
            current.add_class("hovered");
            event.prevent_default();
        });

        let mut event = DragEvent::new();
        anchor.dispatch(DragEventKind::DragOver, &mut event);

        assert!(anchor.has_class("hovered"));
        assert!(event.is_default_prevented());
    }

    #[test]
    fn payload_presence_depends_on_constructor() {
        let event = DragEvent::new();
        assert_eq!(event.data_transfer(), Some(&DataTransfer::new()));
        assert!(!event.is_default_prevented());

        let bare = DragEvent::without_data_transfer();
        assert!(bare.data_transfer().is_none());
        assert!(!bare.is_default_prevented());
    }
}
