//! Observable project store.
//!
//! # Responsibility
//! - Own the canonical set of projects for one running board.
//! - Funnel every mutation through `add_project`, `remove_project` and
//!   `change_status`, publishing a full snapshot to listeners afterwards.
//!
//! # Invariants
//! - The internal map is the only writable copy of project state; callers
//!   only ever receive owned clones.
//! - Snapshot order is insertion order.
//! - `change_status` publishes only when a status actually changes.
//! - `remove_project` always publishes, even when nothing was removed.
//! - No map borrow is held while listeners run.
//! - Publishes never interleave: a mutation made by a listener is applied at
//!   once, but its snapshot goes out only after every listener has seen the
//!   current one.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::state::observable::{Observable, Subscription};
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Immutable, ordered copy of every project at publish time.
pub type Snapshot = Rc<[Project]>;

/// Single source of truth for task-board projects.
#[derive(Default)]
pub struct ProjectStore {
    projects: RefCell<IndexMap<ProjectId, Project>>,
    observable: Observable<Snapshot>,
    publishing: Cell<bool>,
    pending: Cell<bool>,
}

thread_local! {
    static INSTANCE: Rc<ProjectStore> = Rc::new(ProjectStore::default());
}

impl ProjectStore {
    /// Creates a standalone store, typically owned by `Board`.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Returns the shared store of the current thread, creating it on first use.
    ///
    /// Every call on the same thread returns the same instance.
    pub fn instance() -> Rc<Self> {
        INSTANCE.with(Rc::clone)
    }

    /// Registers `listener` for every future snapshot.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Snapshot) + 'static,
    {
        self.observable.subscribe(listener)
    }

    /// Creates an active project and publishes the new snapshot.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people_count: u32,
    ) -> ProjectId {
        let project = Project::new(title, description, people_count);
        let id = project.id();
        let total = {
            let mut projects = self.projects.borrow_mut();
            projects.insert(id, project);
            projects.len()
        };

        info!(
            "event=project_added module=store status=ok id={} people_count={} total={}",
            id, people_count, total
        );
        self.notify();
        id
    }

    /// Removes `project` by id and publishes, whether or not it was present.
    ///
    /// Returns `true` when an entry was deleted.
    pub fn remove_project(&self, project: &Project) -> bool {
        let removed = self
            .projects
            .borrow_mut()
            .shift_remove(&project.id())
            .is_some();

        if removed {
            info!(
                "event=project_removed module=store status=ok id={}",
                project.id()
            );
        } else {
            debug!(
                "event=project_removed module=store status=noop id={}",
                project.id()
            );
        }
        self.notify();
        removed
    }

    /// Moves project `id` to `status`.
    ///
    /// Unknown ids and unchanged statuses are no-ops without a publish.
    /// Returns `true` when the status changed.
    pub fn change_status(&self, id: ProjectId, status: ProjectStatus) -> bool {
        let previous = {
            let mut projects = self.projects.borrow_mut();
            let Some(project) = projects.get_mut(&id) else {
                debug!(
                    "event=status_changed module=store status=noop reason=not_found id={}",
                    id
                );
                return false;
            };
            if project.status() == status {
                debug!(
                    "event=status_changed module=store status=noop reason=unchanged id={} to={}",
                    id, status
                );
                return false;
            }
            let previous = project.status();
            project.set_status(status);
            previous
        };

        info!(
            "event=status_changed module=store status=ok id={} from={} to={}",
            id, previous, status
        );
        self.notify();
        true
    }

    /// Returns a fresh snapshot of all projects in insertion order.
    pub fn snapshot(&self) -> Snapshot {
        self.projects.borrow().values().cloned().collect()
    }

    pub fn get(&self, id: ProjectId) -> Option<Project> {
        self.projects.borrow().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.observable.listener_count()
    }

    fn notify(&self) {
        if self.publishing.get() {
            self.pending.set(true);
            debug!("event=snapshot_published module=store status=deferred");
            return;
        }

        self.publishing.set(true);
        loop {
            self.pending.set(false);
            let snapshot = self.snapshot();
            let report = self.observable.publish(&snapshot);
            if !report.is_clean() {
                warn!(
                    "event=snapshot_published module=store status=degraded projects={} notified={} failed={}",
                    snapshot.len(),
                    report.notified,
                    report.failures.len()
                );
            }
            if !self.pending.get() {
                break;
            }
        }
        self.publishing.set(false);
    }
}
