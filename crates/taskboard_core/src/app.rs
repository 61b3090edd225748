//! Board composition root.
//!
//! # Responsibility
//! - Own the one project store of a running board and inject it into views.
//! - Expose the form-facing submit entry point.
//!
//! # Invariants
//! - Exactly one store per board; every list shares it.
//! - Submitted fields are already validated by the form layer.

use crate::drag::gesture::drag_and_drop;
use crate::model::project::{ProjectId, ProjectStatus};
use crate::state::project_store::ProjectStore;
use crate::view::project_list::ProjectList;
use log::info;
use std::rc::Rc;

/// Active and finished lists wired to one store.
pub struct Board {
    store: Rc<ProjectStore>,
    active: Rc<ProjectList>,
    finished: Rc<ProjectList>,
}

impl Board {
    /// Builds a board around a fresh store.
    pub fn new() -> Self {
        Self::with_store(ProjectStore::new())
    }

    /// Builds a board around an existing store, e.g. `ProjectStore::instance()`.
    pub fn with_store(store: Rc<ProjectStore>) -> Self {
        let active = ProjectList::mount(&store, ProjectStatus::Active);
        let finished = ProjectList::mount(&store, ProjectStatus::Finished);
        info!(
            "event=board_mounted module=app status=ok projects={}",
            store.len()
        );
        Self {
            store,
            active,
            finished,
        }
    }

    pub fn store(&self) -> &Rc<ProjectStore> {
        &self.store
    }

    pub fn list(&self, status: ProjectStatus) -> &Rc<ProjectList> {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }

    /// Form submit entry point.
    pub fn submit_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people_count: u32,
    ) -> ProjectId {
        self.store.add_project(title, description, people_count)
    }

    /// Drags project `id` from whichever list shows it onto the `status` list.
    ///
    /// Returns `false` when no list currently renders the project or the
    /// target refused the drop.
    pub fn drag_project(&self, id: ProjectId, status: ProjectStatus) -> bool {
        let Some(item) = ProjectStatus::ALL
            .iter()
            .find_map(|candidate| self.list(*candidate).item(id))
        else {
            return false;
        };
        drag_and_drop(item.anchor(), self.list(status).anchor())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
