//! Status-filtered project list and drop target.
//!
//! # Responsibility
//! - Re-render its items from every store snapshot, keeping only projects in
//!   its own status.
//! - Accept plain-text drags and move the dropped project into its status.
//!
//! # Invariants
//! - Item order follows snapshot order.
//! - The list never mutates projects directly; drops go through
//!   `ProjectStore::change_status`.
//! - Dropping the list unsubscribes it from the store.

use crate::drag::coordinator::{
    accepts_plain_text, configure_target, dragged_project_id, DragTarget,
};
use crate::drag::event::{Anchor, DragEvent};
use crate::model::project::{ProjectId, ProjectStatus};
use crate::state::observable::Subscription;
use crate::state::project_store::{ProjectStore, Snapshot};
use crate::view::project_item::ProjectItem;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;

/// One board column.
pub struct ProjectList {
    status: ProjectStatus,
    store: Rc<ProjectStore>,
    anchor: Anchor,
    list_id: String,
    items: RefCell<Vec<Rc<ProjectItem>>>,
    subscription: RefCell<Option<Subscription>>,
}

impl ProjectList {
    /// Creates the list for `status`, registers it as a drop target and
    /// subscribes it to `store`.
    ///
    /// The list renders the store's current contents immediately.
    pub fn mount(store: &Rc<ProjectStore>, status: ProjectStatus) -> Rc<Self> {
        let list = Rc::new(Self {
            status,
            store: Rc::clone(store),
            anchor: Anchor::new(format!("{status}-projects")),
            list_id: format!("{status}-projects-list"),
            items: RefCell::new(Vec::new()),
            subscription: RefCell::new(None),
        });

        configure_target(&list);

        let weak = Rc::downgrade(&list);
        let subscription = store.subscribe(move |snapshot: &Snapshot| {
            if let Some(list) = weak.upgrade() {
                list.render(snapshot);
            }
        });
        *list.subscription.borrow_mut() = Some(subscription);

        list.render(&store.snapshot());
        list
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Id of the inner list element; items are rendered under it.
    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    /// Column title, e.g. `ACTIVE PROJECTS`.
    pub fn heading(&self) -> String {
        format!("{} PROJECTS", self.status.as_str().to_uppercase())
    }

    pub fn items(&self) -> Vec<Rc<ProjectItem>> {
        self.items.borrow().clone()
    }

    pub fn project_ids(&self) -> Vec<ProjectId> {
        self.items
            .borrow()
            .iter()
            .map(|item| item.project().id())
            .collect()
    }

    pub fn item(&self, id: ProjectId) -> Option<Rc<ProjectItem>> {
        self.items
            .borrow()
            .iter()
            .find(|item| item.project().id() == id)
            .cloned()
    }

    fn render(&self, snapshot: &Snapshot) {
        let items: Vec<Rc<ProjectItem>> = snapshot
            .iter()
            .filter(|project| project.status() == self.status)
            .map(|project| ProjectItem::render(project.clone(), &self.list_id))
            .collect();

        debug!(
            "event=list_rendered module=view status=ok list={} items={} total={}",
            self.list_id,
            items.len(),
            snapshot.len()
        );
        *self.items.borrow_mut() = items;
    }
}

impl DragTarget for ProjectList {
    fn drag_target_anchor(&self) -> Anchor {
        self.anchor.clone()
    }

    fn on_drag_over(&self, event: &mut DragEvent) {
        if accepts_plain_text(event) {
            event.prevent_default();
        }
    }

    fn on_drag_leave(&self, _event: &mut DragEvent) {}

    fn on_drop(&self, event: &mut DragEvent) {
        match dragged_project_id(event) {
            Ok(id) => {
                self.store.change_status(id, self.status);
            }
            Err(err) => {
                warn!(
                    "event=drop_rejected module=view status=error list={} reason={}",
                    self.list_id, err
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectList;
    use crate::model::project::ProjectStatus;
    use crate::state::project_store::ProjectStore;

    #[test]
    fn mount_sets_ids_and_heading() {
        let store = ProjectStore::new();
        let list = ProjectList::mount(&store, ProjectStatus::Finished);

        assert_eq!(list.anchor().id(), "finished-projects");
        assert_eq!(list.list_id(), "finished-projects-list");
        assert_eq!(list.heading(), "FINISHED PROJECTS");
    }

    #[test]
    fn mount_renders_existing_projects() {
        let store = ProjectStore::new();
        let id = store.add_project("Website", "Build site", 3);

        let list = ProjectList::mount(&store, ProjectStatus::Active);

        assert_eq!(list.project_ids(), vec![id]);
    }

    #[test]
    fn dropping_the_list_unsubscribes_it() {
        let store = ProjectStore::new();
        let list = ProjectList::mount(&store, ProjectStatus::Active);
        assert_eq!(store.listener_count(), 1);

        drop(list);
        assert_eq!(store.listener_count(), 0);
    }
}
