//! Tog
//!
//! Accessible toggles with mutually exclusive groups.
//!
//! Trigger elements declare the content they control (`data-tog`), an optional
//! exclusive group (`data-tog-group`) and whether they start open
//! (`data-tog-active`). [`Tog`] scans a document context once, builds a
//! [`ToggleMap`] and on every activation opens or closes targets while keeping
//! `aria-hidden` / `aria-expanded` in sync.
//!
//! The engine is independent of any UI surface: it works against the
//! [`Document`] and [`EventSource`] traits. [`MemoryDocument`] implements both
//! and is what the tests run on.

pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod toggle;

// Re-export commonly used types
pub use config::{TogConfig, TogOptions};
pub use dom::{Document, EventSource, MemoryDocument, NodeId};
pub use error::{TogError, TogResult};
pub use events::{ActivationEvent, EventHub, EventRegistry, HandlerId, Registration};
pub use toggle::{Target, Tog, ToggleMap, Trigger};
