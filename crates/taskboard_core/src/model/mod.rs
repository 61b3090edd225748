//! Domain model for task-board records.
//!
//! # Responsibility
//! - Define the project record consumed by the store and list views.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Status is the only field that changes over a project's lifetime.

pub mod project;
