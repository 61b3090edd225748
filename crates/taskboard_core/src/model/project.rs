//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical task-board record shown by the active/finished lists.
//! - Own identity generation for new projects.
//!
//! # Invariants
//! - `id` is generated once at construction and never reassigned.
//! - New projects always start as `ProjectStatus::Active`.
//! - Only `status` may change after construction, and only through the store.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one project.
///
/// Rendered in hyphenated form when used as a drag payload.
pub type ProjectId = Uuid;

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Still being worked on.
    Active,
    /// Done; shown in the finished list.
    Finished,
}

impl ProjectStatus {
    /// Every status, in board column order.
    pub const ALL: [ProjectStatus; 2] = [ProjectStatus::Active, ProjectStatus::Finished];

    /// Stable lowercase id used in wire data and element ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One task-board entry.
///
/// Fields are read-only outside this crate; the store is the only writer of
/// `status`. Serialize-only: a project is never rebuilt from wire data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    id: ProjectId,
    title: String,
    description: String,
    people_count: u32,
    status: ProjectStatus,
}

impl Project {
    /// Creates an active project with a freshly generated id.
    ///
    /// Field values are expected to be pre-validated by the form layer.
    pub fn new(title: impl Into<String>, description: impl Into<String>, people_count: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            people_count,
            status: ProjectStatus::Active,
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn people_count(&self) -> u32 {
        self.people_count
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }
}
