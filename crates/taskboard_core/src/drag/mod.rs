//! Drag-and-drop coordination.
//!
//! # Responsibility
//! - Model the host drag surface headlessly (`event`).
//! - Register drag sources and drop targets against it (`coordinator`).
//! - Drive complete gestures for hosts and tests (`gesture`).
//!
//! # Invariants
//! - Payload media type is always `text/plain`; payload is a project id.
//! - Allowed effect is always `move`.

pub mod coordinator;
pub mod event;
pub mod gesture;
