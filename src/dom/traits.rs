//! Traits for document access and event registration
//!
//! These traits allow for dependency injection, so the engine can run against
//! a browser binding, a server-side tree or the in-memory document in tests.

use std::fmt::Debug;

use crate::events::HandlerId;

/// DOM-like query and attribute capability
pub trait Document: Send + Sync {
    /// Opaque element handle
    type Node: Clone + PartialEq + Debug;

    /// All elements within `context` (inclusive) declaring `attribute`, in document order
    fn query_attribute(&self, context: &Self::Node, attribute: &str) -> Vec<Self::Node>;

    /// The first element whose `id` equals `id`
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All elements carrying `class`, in document order
    fn elements_by_class(&self, class: &str) -> Vec<Self::Node>;

    /// Read an attribute value
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Set an attribute value, replacing any previous value
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    /// The element's parent, `None` at the top of the tree
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Check whether an attribute is declared, whatever its value
    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }
}

/// Listener attach/detach capability
pub trait EventSource: Send + Sync {
    /// Element handle listeners attach to
    type Node: Clone + PartialEq + Debug;

    /// Attach `handler` to `context` for the event `name`
    fn add_listener(&self, context: &Self::Node, name: &str, handler: HandlerId);

    /// Detach `handler` from `context` for the event `name`
    fn remove_listener(&self, context: &Self::Node, name: &str, handler: HandlerId);
}
