//! Accessibility attributes on target elements
//!
//! Only targets are ever touched; trigger elements keep their attributes.

use super::map::Target;
use crate::config::TogConfig;
use crate::dom::Document;

pub const ARIA_HIDDEN: &str = "aria-hidden";
pub const ARIA_EXPANDED: &str = "aria-expanded";

/// Mark a target as shown
pub fn apply_open<D: Document + ?Sized>(doc: &D, target: &Target<D::Node>) {
    if let Target::Element(node) = target {
        doc.set_attribute(node, ARIA_HIDDEN, "false");
        doc.set_attribute(node, ARIA_EXPANDED, "true");
    }
}

/// Mark a target as hidden
pub fn apply_close<D: Document + ?Sized>(doc: &D, target: &Target<D::Node>) {
    if let Target::Element(node) = target {
        doc.set_attribute(node, ARIA_HIDDEN, "true");
        doc.set_attribute(node, ARIA_EXPANDED, "false");
    }
}

/// Seed `aria-hidden` on a trigger's targets at construction
///
/// Targets start visible when the trigger declares the active attribute, with
/// any value. `aria-expanded` is left unset until the first transition.
pub fn apply_initial<D: Document + ?Sized>(
    doc: &D,
    config: &TogConfig,
    trigger: &D::Node,
    targets: &[Target<D::Node>],
) {
    let hidden = if doc.has_attribute(trigger, &config.active_attribute) {
        "false"
    } else {
        "true"
    };

    for target in targets {
        if let Target::Element(node) = target {
            doc.set_attribute(node, ARIA_HIDDEN, hidden);
        }
    }
}
