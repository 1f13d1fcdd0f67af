//! Toggle engine
//!
//! Owns the toggle map built from a document context and applies one
//! transition per activation:
//!
//! - an open trigger closes its own targets and leaves its group alone
//! - a closed trigger opens its targets and closes every sibling's targets
//!
//! Afterwards the acted-upon trigger's `active` flag is flipped, every
//! sibling is marked inactive and the after-toggle observer runs.

use std::sync::Arc;

use serde::Serialize;

use super::access;
use super::map::{Target, ToggleMap};
use super::resolve;
use crate::config::{AfterToggle, TogConfig, TogOptions};
use crate::dom::Document;
use crate::error::{TogError, TogResult};
use crate::events::{ActivationEvent, EventRegistry, HandlerId};

/// Toggle engine bound to one document context
pub struct Tog<D, R>
where
    D: Document,
    R: EventRegistry<D::Node>,
{
    doc: Arc<D>,
    context: D::Node,
    config: TogConfig,
    registry: R,
    handler: HandlerId,
    map: ToggleMap<D::Node>,
    after_toggle: Option<AfterToggle<D, R>>,
}

impl<D, R> Tog<D, R>
where
    D: Document,
    R: EventRegistry<D::Node>,
{
    /// Scan `context` for triggers and take ownership of the resulting map
    ///
    /// Every trigger gets a listener through `registry` for the configured
    /// events and its targets get their initial `aria-hidden` value. Triggers
    /// declared active start with visible targets but an inactive flag, and
    /// group exclusivity is not enforced until the first activation.
    pub fn new(options: TogOptions<D, R>, doc: Arc<D>, context: D::Node, mut registry: R) -> Self {
        let TogOptions {
            config,
            after_toggle,
        } = options;
        let handler = HandlerId::next();

        let elements = doc.query_attribute(&context, &config.trigger_attribute);
        let map = ToggleMap::build(doc.as_ref(), &config, &elements, |trigger, targets| {
            registry.add(&config.events, handler, trigger);
            access::apply_initial(doc.as_ref(), &config, trigger, targets);
        });

        log::info!(
            "Tog initialized with {} triggers in {} groups",
            map.triggers.len(),
            map.groups.len()
        );

        Self {
            doc,
            context,
            config,
            registry,
            handler,
            map,
            after_toggle,
        }
    }

    /// Handle an activation event delivered by the event source
    ///
    /// The event is always marked default-prevented. Returns `Ok(false)` when
    /// the origin has no declaring ancestor within the context.
    pub fn handle_event(&mut self, event: &mut ActivationEvent<D::Node>) -> TogResult<bool> {
        event.prevent_default();

        let Some(id) = resolve::resolve_trigger_id(
            self.doc.as_ref(),
            event.target(),
            &self.context,
            &self.config.trigger_attribute,
        ) else {
            log::debug!("'{}' event on {:?} matched no trigger", event.name(), event.target());
            return Ok(false);
        };

        self.activate(&id)?;
        Ok(true)
    }

    /// Run one transition for the trigger `trigger_id`
    pub fn activate(&mut self, trigger_id: &str) -> TogResult<()> {
        let Some(trigger) = self.map.triggers.get(trigger_id) else {
            log::error!("Activation of unknown trigger '{}'", trigger_id);
            return Err(TogError::unknown_trigger(trigger_id));
        };
        let was_active = trigger.active;
        let own_targets = trigger.target.clone();

        let group_ids = match &trigger.group {
            Some(group) => match self.map.groups.get(group) {
                Some(ids) => ids.clone(),
                None => {
                    log::error!("Trigger '{}' names unknown group '{}'", trigger_id, group);
                    return Err(TogError::UnknownGroup {
                        id: trigger_id.to_string(),
                        group: group.clone(),
                    });
                }
            },
            None => vec![trigger_id.to_string()],
        };

        let mut group_targets: Vec<Target<D::Node>> = Vec::new();
        for id in &group_ids {
            let Some(member) = self.map.triggers.get(id) else {
                log::error!("Group member '{}' of '{}' is not in the toggle map", id, trigger_id);
                return Err(TogError::unknown_trigger(id.as_str()));
            };
            if id != trigger_id {
                group_targets.extend(member.target.iter().cloned());
            }
        }

        let doc = self.doc.as_ref();
        if was_active {
            for target in &own_targets {
                access::apply_close(doc, target);
            }
        } else {
            for target in &own_targets {
                access::apply_open(doc, target);
            }
            for target in &group_targets {
                access::apply_close(doc, target);
            }
        }

        for id in &group_ids {
            if let Some(member) = self.map.triggers.get_mut(id) {
                member.active = id == trigger_id && !was_active;
            }
        }

        log::debug!(
            "Trigger '{}' {} ({} sibling target(s))",
            trigger_id,
            if was_active { "closed" } else { "opened" },
            group_targets.len()
        );

        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        if let Some(mut after_toggle) = self.after_toggle.take() {
            after_toggle(&*self);
            self.after_toggle = Some(after_toggle);
        }
    }

    /// Release every event registration made at construction
    pub fn destroy(&mut self) {
        self.registry.reset();
        log::info!("Tog destroyed");
    }

    /// Current map; read-only outside the engine
    pub fn toggle_map(&self) -> &ToggleMap<D::Node> {
        &self.map
    }

    /// Whether trigger `id` is open, `None` when it does not exist
    pub fn is_open(&self, id: &str) -> Option<bool> {
        self.map.triggers.get(id).map(|t| t.active)
    }

    /// Ids of all open triggers, sorted
    pub fn open_triggers(&self) -> Vec<&str> {
        let mut open: Vec<&str> = self
            .map
            .triggers
            .values()
            .filter(|t| t.active)
            .map(|t| t.id.as_str())
            .collect();
        open.sort_unstable();
        open
    }

    pub fn config(&self) -> &TogConfig {
        &self.config
    }

    pub fn document(&self) -> &Arc<D> {
        &self.doc
    }

    pub fn context(&self) -> &D::Node {
        &self.context
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Handler id every trigger listener was registered with
    pub fn handler(&self) -> HandlerId {
        self.handler
    }
}

impl<D, R> Tog<D, R>
where
    D: Document,
    D::Node: Serialize,
    R: EventRegistry<D::Node>,
{
    /// Toggle map rendered as pretty JSON
    pub fn snapshot_json(&self) -> TogResult<String> {
        Ok(serde_json::to_string_pretty(&self.map)?)
    }
}
