//! Observable board state.
//!
//! # Responsibility
//! - Provide the generic listener fan-out primitive (`observable`).
//! - Own the canonical project set and its mutations (`project_store`).
//!
//! # Invariants
//! - All state changes run synchronously on the calling thread.
//! - Listeners always receive full snapshots, never diffs.

pub mod observable;
pub mod project_store;
