//! One rendered project entry inside a list.

use crate::drag::coordinator::{configure_draggable, Draggable};
use crate::drag::event::{Anchor, DragEvent, DropEffect, PLAIN_TEXT_MEDIA_TYPE};
use crate::model::project::Project;
use log::{debug, warn};
use std::rc::Rc;

/// Draggable list entry for one project.
///
/// Holds an owned copy of the project taken from the snapshot it was rendered
/// from; a re-render replaces the whole item.
#[derive(Debug)]
pub struct ProjectItem {
    project: Project,
    anchor: Anchor,
}

impl ProjectItem {
    /// Builds the item under list `list_id` and registers it as a drag source.
    pub fn render(project: Project, list_id: &str) -> Rc<Self> {
        let anchor = Anchor::new(format!("{list_id}-{}", project.id()));
        let item = Rc::new(Self { project, anchor });
        configure_draggable(&item);
        item
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn title(&self) -> &str {
        self.project.title()
    }

    pub fn description(&self) -> &str {
        self.project.description()
    }

    /// Staffing line, e.g. `3 assigned`.
    pub fn assigned_label(&self) -> String {
        format!("{} assigned", self.project.people_count())
    }
}

impl Draggable for ProjectItem {
    fn drag_anchor(&self) -> Anchor {
        self.anchor.clone()
    }

    fn on_drag_start(&self, event: &mut DragEvent) {
        let Some(transfer) = event.data_transfer_mut() else {
            warn!(
                "event=drag_start module=view status=error reason=no_data_transfer id={}",
                self.project.id()
            );
            return;
        };
        transfer.set_data(PLAIN_TEXT_MEDIA_TYPE, self.project.id().to_string());
        transfer.effect_allowed = DropEffect::Move;
        debug!(
            "event=drag_start module=view status=ok id={}",
            self.project.id()
        );
    }

    fn on_drag_end(&self, event: &mut DragEvent) {
        debug!(
            "event=drag_end module=view status=ok id={} effect={}",
            self.project.id(),
            event
                .data_transfer()
                .map(|transfer| transfer.effect_allowed)
                .unwrap_or_default()
                .as_str()
        );
    }
}
