//! Toggle state engine
//!
//! - `ToggleMap` - triggers, their targets and group memberships
//! - `Tog` - applies activation transitions to the map and the document
//! - `access` - aria attribute helpers shared by both
//! - `resolve` - maps an event origin back to its trigger

pub mod access;
mod engine;
mod map;
pub mod resolve;

pub use engine::Tog;
pub use map::{resolve_targets, Target, ToggleMap, Trigger};
