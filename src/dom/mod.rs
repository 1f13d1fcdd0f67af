//! Document abstractions
//!
//! The engine never talks to a real UI surface. It needs two capabilities:
//! querying and mutating element attributes (`Document`) and attaching event
//! listeners (`EventSource`). `MemoryDocument` implements both in memory.

mod memory;
mod traits;

pub use memory::{MemoryDocument, NodeId, ROOT_TAG};
pub use traits::{Document, EventSource};
