//! Headless list views.
//!
//! Views hold render-ready state (ids, headings, item texts) and drag wiring.
//! Turning that state into markup belongs to the host UI.

pub mod project_item;
pub mod project_list;
