//! Event origin to trigger resolution

use crate::dom::Document;

/// Nearest element, starting at `node` itself, that declares `attribute`
///
/// Walks parent links iteratively up to `context` (which is still checked).
/// A match only counts when the walk reaches `context`; origins outside it
/// run off the top of the tree and resolve to `None`.
pub fn closest_trigger<D: Document + ?Sized>(
    doc: &D,
    node: &D::Node,
    context: &D::Node,
    attribute: &str,
) -> Option<D::Node> {
    let mut current = node.clone();
    let mut found = None;

    loop {
        if found.is_none() && doc.has_attribute(&current, attribute) {
            found = Some(current.clone());
        }
        if current == *context {
            return found;
        }
        current = doc.parent(&current)?;
    }
}

/// Declared content identifier of the trigger enclosing `node`
pub fn resolve_trigger_id<D: Document + ?Sized>(
    doc: &D,
    node: &D::Node,
    context: &D::Node,
    attribute: &str,
) -> Option<String> {
    closest_trigger(doc, node, context, attribute)
        .and_then(|trigger| doc.attribute(&trigger, attribute))
}
