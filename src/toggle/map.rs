//! Toggle map construction
//!
//! Scans trigger elements once and indexes them by the content identifier
//! they declare, recording group membership in document order.

use std::collections::HashMap;
use std::fmt::Debug;

use serde::Serialize;

use crate::config::TogConfig;
use crate::dom::Document;

/// Content element controlled by a trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Target<N> {
    Element(N),
    /// Placeholder kept when the declared content was not found
    Missing,
}

impl<N> Target<N> {
    pub fn element(&self) -> Option<&N> {
        match self {
            Target::Element(node) => Some(node),
            Target::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Target::Missing)
    }
}

/// A declared control and its current state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trigger<N> {
    /// Declared content identifier, unique within the map
    pub id: String,
    /// Exclusive group, if any
    pub group: Option<String>,
    /// Resolved content, never empty
    pub target: Vec<Target<N>>,
    /// Whether the trigger's content is currently open
    pub active: bool,
}

/// Index of triggers and groups built at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleMap<N> {
    /// Trigger id -> trigger
    pub triggers: HashMap<String, Trigger<N>>,
    /// Group name -> member trigger ids in document order
    pub groups: HashMap<String, Vec<String>>,
}

impl<N> Default for ToggleMap<N> {
    fn default() -> Self {
        Self {
            triggers: HashMap::new(),
            groups: HashMap::new(),
        }
    }
}

impl<N: Clone + Debug> ToggleMap<N> {
    /// Build the map from trigger elements in document order
    ///
    /// `transform` runs once per indexed trigger with the trigger element and
    /// its resolved targets; the engine uses it to register listeners and
    /// seed aria attributes. Elements without the trigger attribute are
    /// skipped. A later trigger declaring an id already present replaces the
    /// earlier entry, while both stay listed in their groups.
    pub fn build<D, F>(doc: &D, config: &TogConfig, trigger_elements: &[N], mut transform: F) -> Self
    where
        D: Document<Node = N> + ?Sized,
        F: FnMut(&N, &[Target<N>]),
    {
        let mut map = Self::default();

        for element in trigger_elements {
            let Some(id) = doc.attribute(element, &config.trigger_attribute) else {
                log::warn!(
                    "Element {:?} has no '{}' attribute, skipping",
                    element,
                    config.trigger_attribute
                );
                continue;
            };
            let group = doc
                .attribute(element, &config.group_attribute)
                .filter(|g| !g.is_empty());
            let target = resolve_targets(doc, &id);

            if map.triggers.contains_key(&id) {
                log::warn!("Duplicate trigger '{}' replaces the earlier declaration", id);
            }
            log::debug!(
                "Trigger '{}' (group: {:?}) -> {} target(s)",
                id,
                group,
                target.len()
            );

            if let Some(group) = &group {
                map.groups.entry(group.clone()).or_default().push(id.clone());
            }

            transform(element, &target);

            map.triggers.insert(
                id.clone(),
                Trigger {
                    id,
                    group,
                    target,
                    active: false,
                },
            );
        }

        map
    }
}

impl<N> ToggleMap<N> {
    pub fn trigger(&self, id: &str) -> Option<&Trigger<N>> {
        self.triggers.get(id)
    }

    /// Member ids of a group in document order
    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

/// Resolve a content identifier to its elements
///
/// An element with a matching id wins; otherwise every element carrying the
/// identifier as a class, in document order. Nothing found yields a single
/// [`Target::Missing`].
pub fn resolve_targets<D: Document + ?Sized>(doc: &D, id: &str) -> Vec<Target<D::Node>> {
    if let Some(node) = doc.element_by_id(id) {
        return vec![Target::Element(node)];
    }

    let nodes = doc.elements_by_class(id);
    if nodes.is_empty() {
        log::warn!("No content found for trigger '{}'", id);
        return vec![Target::Missing];
    }

    nodes.into_iter().map(Target::Element).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, NodeId};

    fn build(doc: &MemoryDocument) -> (ToggleMap<NodeId>, usize) {
        let triggers = doc.query_attribute(&doc.root(), "data-tog");
        let mut calls = 0;
        let map = ToggleMap::build(doc, &TogConfig::default(), &triggers, |_, _| calls += 1);
        (map, calls)
    }

    #[test]
    fn test_no_triggers() {
        let doc = MemoryDocument::new();
        let (map, calls) = build(&doc);

        assert_eq!(map, ToggleMap::default());
        assert!(map.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_single_content_item() {
        let doc = MemoryDocument::parse(r#"
            <div id="trigger" data-tog="foo"></div>
            <div id="foo"></div>
        "#).unwrap();
        let target = doc.element_by_id("foo").unwrap();

        let (map, _) = build(&doc);

        let mut expected = ToggleMap::default();
        expected.triggers.insert(
            "foo".to_string(),
            Trigger {
                id: "foo".to_string(),
                group: None,
                target: vec![Target::Element(target)],
                active: false,
            },
        );
        assert_eq!(map, expected);
    }

    #[test]
    fn test_multiple_content_items() {
        let doc = MemoryDocument::parse(r#"
            <div id="trigger" data-tog="foo"></div>
            <div class="foo"></div>
            <div class="foo"></div>
        "#).unwrap();
        let targets: Vec<_> = doc
            .elements_by_class("foo")
            .into_iter()
            .map(Target::Element)
            .collect();

        let (map, _) = build(&doc);

        let trigger = map.trigger("foo").unwrap();
        assert_eq!(trigger.target.len(), 2);
        assert_eq!(trigger.target, targets);
        assert!(!trigger.active);
        assert!(map.groups.is_empty());
    }

    #[test]
    fn test_id_match_preferred_over_class() {
        let doc = MemoryDocument::parse(r#"
            <div data-tog="foo"></div>
            <div class="foo"></div>
            <div id="foo"></div>
        "#).unwrap();

        let (map, _) = build(&doc);

        let expected = doc.element_by_id("foo").unwrap();
        assert_eq!(map.trigger("foo").unwrap().target, vec![Target::Element(expected)]);
    }

    #[test]
    fn test_grouped_triggers() {
        let doc = MemoryDocument::parse(r#"
            <div id="trigger-1" data-tog="target-1" data-tog-group="foo"></div>
            <div id="target-1"></div>
            <div id="trigger-2" data-tog="target-2" data-tog-group="foo"></div>
            <div id="target-2"></div>
        "#).unwrap();

        let (map, _) = build(&doc);

        assert_eq!(map.len(), 2);
        assert_eq!(map.group("foo"), Some(&["target-1".to_string(), "target-2".to_string()][..]));
        for id in ["target-1", "target-2"] {
            let trigger = map.trigger(id).unwrap();
            assert_eq!(trigger.group.as_deref(), Some("foo"));
            assert!(!trigger.active);
        }
    }

    #[test]
    fn test_empty_group_is_ungrouped() {
        let doc = MemoryDocument::parse(r#"
            <div data-tog="foo" data-tog-group=""></div>
            <div id="foo"></div>
        "#).unwrap();

        let (map, _) = build(&doc);

        assert_eq!(map.trigger("foo").unwrap().group, None);
        assert!(map.groups.is_empty());
    }

    #[test]
    fn test_missing_content_degrades() {
        let doc = MemoryDocument::parse(r#"<div data-tog="nowhere"></div>"#).unwrap();

        let (map, calls) = build(&doc);

        let trigger = map.trigger("nowhere").unwrap();
        assert_eq!(trigger.target, vec![Target::Missing]);
        assert!(trigger.target[0].is_missing());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_transform_runs_per_trigger() {
        let doc = MemoryDocument::parse(r#"
            <div id="t1" data-tog="a"></div>
            <div id="t2" data-tog="b"></div>
            <div id="a"></div>
        "#).unwrap();
        let triggers = doc.query_attribute(&doc.root(), "data-tog");

        let mut seen = Vec::new();
        ToggleMap::build(&doc, &TogConfig::default(), &triggers, |trigger, targets| {
            seen.push((*trigger, targets.len()));
        });

        assert_eq!(seen, vec![(triggers[0], 1), (triggers[1], 1)]);
    }

    #[test]
    fn test_duplicate_id_overwrites() {
        let doc = MemoryDocument::parse(r#"
            <div data-tog="foo" data-tog-group="g"></div>
            <div data-tog="foo" data-tog-group="h"></div>
            <div id="foo"></div>
        "#).unwrap();

        let (map, calls) = build(&doc);

        assert_eq!(calls, 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.trigger("foo").unwrap().group.as_deref(), Some("h"));
        // Both declarations keep their group listing
        assert_eq!(map.group("g"), Some(&["foo".to_string()][..]));
        assert_eq!(map.group("h"), Some(&["foo".to_string()][..]));
    }

    #[test]
    fn test_element_without_declaration_skipped() {
        let doc = MemoryDocument::parse(r#"<div id="plain"></div>"#).unwrap();
        let plain = doc.element_by_id("plain").unwrap();

        let map = ToggleMap::build(&doc, &TogConfig::default(), &[plain], |_, _| {
            panic!("transform must not run for skipped elements")
        });

        assert!(map.is_empty());
    }

    #[test]
    fn test_snapshot_serialization() {
        let doc = MemoryDocument::parse(r#"
            <div data-tog="foo" data-tog-group="g"></div>
            <div id="foo"></div>
            <div data-tog="gone"></div>
        "#).unwrap();
        let (map, _) = build(&doc);

        let json = serde_json::to_value(&map).unwrap();

        let foo = &json["triggers"]["foo"];
        assert_eq!(foo["id"], "foo");
        assert_eq!(foo["group"], "g");
        assert_eq!(foo["active"], false);
        assert_eq!(foo["target"][0], doc.element_by_id("foo").unwrap().index());
        assert!(json["triggers"]["gone"]["group"].is_null());
        assert!(json["triggers"]["gone"]["target"][0].is_null());
        assert_eq!(json["groups"]["g"][0], "foo");
    }
}
