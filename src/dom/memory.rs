//! In-memory document
//!
//! An arena of elements behind a lock, parsed from markup or built by hand.
//! Attribute writes take `&self` the way DOM setters do, so one document can be
//! shared between the engine and the event hub.

use std::borrow::Cow;
use std::io::BufRead;

use parking_lot::RwLock;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::Serialize;

use super::traits::{Document, EventSource};
use crate::error::TogResult;
use crate::events::HandlerId;

/// Tag of the synthetic node every document hangs from
pub const ROOT_TAG: &str = "#document";

/// Handle to an element of a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
struct Listener {
    node: NodeId,
    name: String,
    handler: HandlerId,
}

/// Element tree with attributes and listener bookkeeping
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: RwLock<Vec<NodeData>>,
    listeners: RwLock<Vec<Listener>>,
}

impl MemoryDocument {
    /// Create an empty document holding only the root node
    pub fn new() -> Self {
        let root = NodeData {
            tag: ROOT_TAG.to_string(),
            attributes: Vec::new(),
            parent: None,
            children: Vec::new(),
        };

        Self {
            nodes: RwLock::new(vec![root]),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Parse a markup fragment into a new document
    ///
    /// Top-level elements become children of [`MemoryDocument::root`]. Text is
    /// dropped. Attributes without a value (`<div data-tog-active>`) are kept
    /// with an empty value.
    pub fn parse(markup: &str) -> TogResult<Self> {
        let document = Self::new();
        let mut reader = Reader::from_str(markup);
        reader.config_mut().trim_text(true);

        let mut open = vec![document.root()];
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let parent = open.last().copied().unwrap_or(document.root());
                    let node = document.append_parsed(&reader, parent, &e)?;
                    open.push(node);
                }
                Event::Empty(e) => {
                    let parent = open.last().copied().unwrap_or(document.root());
                    document.append_parsed(&reader, parent, &e)?;
                }
                Event::End(_) => {
                    // The root is never closed by markup
                    if open.len() > 1 {
                        open.pop();
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        log::debug!(
            "Parsed markup into {} nodes",
            document.nodes.read().len()
        );
        Ok(document)
    }

    fn append_parsed<R: BufRead>(
        &self,
        reader: &Reader<R>,
        parent: NodeId,
        e: &BytesStart,
    ) -> TogResult<NodeId> {
        let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();

        let mut attributes = Vec::new();
        for attr in e.html_attributes() {
            let attr = attr?;
            let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                Cow::into_owned,
            );
            attributes.push((key, value));
        }

        Ok(self.push_node(parent, tag, attributes))
    }

    /// The synthetic root every element descends from
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append an element as the last child of `parent`
    ///
    /// A `parent` that does not belong to this document leaves the new node
    /// detached: it has no parent and is unreachable by queries.
    pub fn append_element(
        &self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> NodeId {
        let attributes = attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.push_node(parent, tag.to_string(), attributes)
    }

    fn push_node(&self, parent: NodeId, tag: String, attributes: Vec<(String, String)>) -> NodeId {
        let mut nodes = self.nodes.write();
        let id = NodeId(nodes.len());
        // Only existing nodes can be parents, so parent links never form a cycle
        let parent = (parent.0 < nodes.len()).then_some(parent);
        if parent.is_none() {
            log::warn!("Appending {:?} without a parent: unknown parent node", id);
        }
        nodes.push(NodeData {
            tag,
            attributes,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            nodes[parent.0].children.push(id);
        }
        id
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Whether the document holds nothing but its root
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.nodes.read().get(node.0).map(|n| n.tag.clone())
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .read()
            .get(node.0)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Listeners attached to `node` as (event name, handler) pairs
    pub fn listeners(&self, node: NodeId) -> Vec<(String, HandlerId)> {
        self.listeners
            .read()
            .iter()
            .filter(|l| l.node == node)
            .map(|l| (l.name.clone(), l.handler))
            .collect()
    }

    /// Total number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Handlers an event fired at `origin` reaches, in bubbling order
    ///
    /// Walks from `origin` up to the root, collecting the listeners for `name`
    /// attached on each node in registration order.
    pub fn dispatch(&self, origin: NodeId, name: &str) -> Vec<HandlerId> {
        let path = {
            let nodes = self.nodes.read();
            let mut path = Vec::new();
            let mut current = Some(origin);
            while let Some(node) = current {
                path.push(node);
                current = nodes.get(node.0).and_then(|n| n.parent);
            }
            path
        };

        let listeners = self.listeners.read();
        path.iter()
            .flat_map(|node| {
                listeners
                    .iter()
                    .filter(move |l| l.node == *node && l.name == name)
                    .map(|l| l.handler)
            })
            .collect()
    }

    /// Pre-order walk from `from`, inclusive
    fn preorder(nodes: &[NodeData], from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![from];

        while let Some(node) = stack.pop() {
            let Some(data) = nodes.get(node.0) else {
                continue;
            };
            order.push(node);
            stack.extend(data.children.iter().rev().copied());
        }

        order
    }

    fn find_attribute<'a>(data: &'a NodeData, name: &str) -> Option<&'a str> {
        data.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn query_attribute(&self, context: &NodeId, attribute: &str) -> Vec<NodeId> {
        let nodes = self.nodes.read();
        Self::preorder(&nodes, *context)
            .into_iter()
            .filter(|n| Self::find_attribute(&nodes[n.0], attribute).is_some())
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let nodes = self.nodes.read();
        Self::preorder(&nodes, self.root())
            .into_iter()
            .find(|n| Self::find_attribute(&nodes[n.0], "id") == Some(id))
    }

    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        let nodes = self.nodes.read();
        Self::preorder(&nodes, self.root())
            .into_iter()
            .filter(|n| {
                Self::find_attribute(&nodes[n.0], "class")
                    .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
            })
            .collect()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let nodes = self.nodes.read();
        nodes
            .get(node.0)
            .and_then(|data| Self::find_attribute(data, name))
            .map(str::to_string)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        let mut nodes = self.nodes.write();
        let Some(data) = nodes.get_mut(node.0) else {
            log::warn!("set_attribute on unknown node {:?}", node);
            return;
        };

        match data.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => data.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.read().get(node.0).and_then(|n| n.parent)
    }
}

impl EventSource for MemoryDocument {
    type Node = NodeId;

    fn add_listener(&self, context: &NodeId, name: &str, handler: HandlerId) {
        let mut listeners = self.listeners.write();
        // Same listener on the same node and event is attached only once
        let exists = listeners
            .iter()
            .any(|l| l.node == *context && l.name == name && l.handler == handler);
        if !exists {
            listeners.push(Listener {
                node: *context,
                name: name.to_string(),
                handler,
            });
        }
    }

    fn remove_listener(&self, context: &NodeId, name: &str, handler: HandlerId) {
        self.listeners
            .write()
            .retain(|l| !(l.node == *context && l.name == name && l.handler == handler));
    }
}
