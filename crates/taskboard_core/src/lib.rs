//! Core state and drag-and-drop coordination for the task board.
//! This crate is the single source of truth for project state.

pub mod app;
mod diagnostics;
pub mod drag;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

pub use app::Board;
pub use drag::coordinator::{
    accepts_plain_text, configure_draggable, configure_target, dragged_project_id, DragTarget,
    Draggable, DropError,
};
pub use drag::event::{
    Anchor, DataTransfer, DataTransferItem, DragEvent, DragEventKind, DropEffect,
    DROPPABLE_CLASS, PLAIN_TEXT_MEDIA_TYPE,
};
pub use drag::gesture::{drag_and_drop, DragGesture};
pub use logging::{
    default_log_level, init_logging, logging_status, LogConfig, LogTarget, LoggingError,
    LOG_DIR_ENV, LOG_LEVEL_ENV,
};
pub use model::project::{Project, ProjectId, ProjectStatus};
pub use state::observable::{ListenerFailure, ListenerId, Observable, PublishReport, Subscription};
pub use state::project_store::{ProjectStore, Snapshot};
pub use view::project_item::ProjectItem;
pub use view::project_list::ProjectList;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
