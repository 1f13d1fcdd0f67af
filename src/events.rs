//! Event registration for toggle triggers
//!
//! `EventHub` keeps a pool of every listener it attached so that all of them
//! can be released in one call. The engine only sees the `EventRegistry`
//! trait, which keeps it independent of how events are delivered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::dom::EventSource;

static NEXT_HANDLER: AtomicU64 = AtomicU64::new(1);

/// Identity of a registered event handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Allocate a process-unique handler id
    pub fn next() -> Self {
        Self(NEXT_HANDLER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// One attached listener
#[derive(Debug, Clone, PartialEq)]
pub struct Registration<N> {
    /// Event name, e.g. "click"
    pub name: String,
    pub handler: HandlerId,
    /// Element the listener is attached to
    pub context: N,
}

/// Registration seam used by the engine
pub trait EventRegistry<N> {
    /// Attach `handler` to `context` for each space separated name in `names`
    fn add(&mut self, names: &str, handler: HandlerId, context: &N);

    /// Detach every registration made through this registry
    fn reset(&mut self);
}

/// Pool of listener registrations on an event source
pub struct EventHub<S: EventSource> {
    source: Arc<S>,
    pool: Vec<Registration<S::Node>>,
}

impl<S: EventSource> EventHub<S> {
    /// Create an empty hub attaching listeners on `source`
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            pool: Vec::new(),
        }
    }

    /// Current registrations in the order they were added
    pub fn pool(&self) -> &[Registration<S::Node>] {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }
}

impl<S: EventSource> EventRegistry<S::Node> for EventHub<S> {
    fn add(&mut self, names: &str, handler: HandlerId, context: &S::Node) {
        for name in names.split_whitespace() {
            self.source.add_listener(context, name, handler);
            self.pool.push(Registration {
                name: name.to_string(),
                handler,
                context: context.clone(),
            });
        }
    }

    fn reset(&mut self) {
        let released = self.pool.len();
        for registration in self.pool.drain(..) {
            self.source
                .remove_listener(&registration.context, &registration.name, registration.handler);
        }
        if released > 0 {
            log::debug!("Released {} event registrations", released);
        }
    }
}

/// A user activation delivered to the engine
#[derive(Debug, Clone)]
pub struct ActivationEvent<N> {
    name: String,
    target: N,
    default_prevented: bool,
}

impl<N> ActivationEvent<N> {
    /// Create an event of type `name` originating at `target`
    pub fn new(name: impl Into<String>, target: N) -> Self {
        Self {
            name: name.into(),
            target,
            default_prevented: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element the event originated at (not necessarily the trigger)
    pub fn target(&self) -> &N {
        &self.target
    }

    /// Suppress the platform's default action for this event
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, NodeId};

    fn hub_with_node() -> (EventHub<MemoryDocument>, NodeId) {
        let doc = Arc::new(MemoryDocument::new());
        let node = doc.append_element(doc.root(), "button", &[]);
        (EventHub::new(doc), node)
    }

    #[test]
    fn test_add_single_event() {
        let (mut hub, node) = hub_with_node();
        let handler = HandlerId::new(1);

        hub.add("click", handler, &node);

        assert_eq!(
            hub.pool(),
            &[Registration {
                name: "click".to_string(),
                handler,
                context: node,
            }]
        );
        assert_eq!(hub.source().listeners(node), vec![("click".to_string(), handler)]);
    }

    #[test]
    fn test_add_multiple_events() {
        let (mut hub, node) = hub_with_node();
        let handler = HandlerId::new(1);

        hub.add("click touch", handler, &node);

        let names: Vec<_> = hub.pool().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["click", "touch"]);
        assert_eq!(hub.source().listener_count(), 2);
    }

    #[test]
    fn test_add_ignores_extra_whitespace() {
        let (mut hub, node) = hub_with_node();
        hub.add("  click   touch ", HandlerId::new(1), &node);
        assert_eq!(hub.len(), 2);
    }

    #[test]
    fn test_reset_removes_all_events() {
        let (mut hub, node) = hub_with_node();
        hub.add("click touch", HandlerId::new(1), &node);

        hub.reset();

        assert!(hub.is_empty());
        assert_eq!(hub.source().listener_count(), 0);
    }

    #[test]
    fn test_reset_empty_pool_is_noop() {
        let (mut hub, _) = hub_with_node();
        hub.reset();
        hub.reset();
        assert!(hub.is_empty());
    }

    #[test]
    fn test_reset_leaves_foreign_listeners() {
        let (mut hub, node) = hub_with_node();
        let foreign = HandlerId::new(99);
        hub.source().add_listener(&node, "click", foreign);

        hub.add("click", HandlerId::new(1), &node);
        hub.reset();

        assert_eq!(hub.source().listeners(node), vec![("click".to_string(), foreign)]);
    }

    #[test]
    fn test_handler_ids_are_unique() {
        let a = HandlerId::next();
        let b = HandlerId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
        assert_eq!(HandlerId::new(5).raw(), 5);
    }

    #[test]
    fn test_activation_event_prevent_default() {
        let mut event = ActivationEvent::new("click", 3usize);
        assert_eq!(event.name(), "click");
        assert_eq!(*event.target(), 3);
        assert!(!event.default_prevented());

        event.prevent_default();
        assert!(event.default_prevented());
    }
}
