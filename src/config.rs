//! Configuration types for the toggle engine
//!
//! `TogConfig` names the declaration attributes the engine scans for and can be
//! loaded from TOML. `TogOptions` pairs it with the after-toggle observer.

use serde::{Deserialize, Serialize};

use crate::dom::Document;
use crate::error::TogResult;
use crate::events::EventRegistry;
use crate::toggle::Tog;

/// Attribute declaring a trigger and naming its content
pub const DEFAULT_TRIGGER_ATTRIBUTE: &str = "data-tog";
/// Attribute naming the trigger's exclusive group
pub const DEFAULT_GROUP_ATTRIBUTE: &str = "data-tog-group";
/// Attribute marking a trigger as open at construction (presence only)
pub const DEFAULT_ACTIVE_ATTRIBUTE: &str = "data-tog-active";
/// Events that activate a trigger
pub const DEFAULT_EVENTS: &str = "click";

/// Declaration attributes and activation events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TogConfig {
    /// Attribute holding the content identifier (element id or class name)
    pub trigger_attribute: String,
    /// Attribute holding the group name
    pub group_attribute: String,
    /// Attribute whose presence opens the content at construction
    pub active_attribute: String,
    /// Space separated event names registered on every trigger
    pub events: String,
}

impl Default for TogConfig {
    fn default() -> Self {
        Self {
            trigger_attribute: DEFAULT_TRIGGER_ATTRIBUTE.to_string(),
            group_attribute: DEFAULT_GROUP_ATTRIBUTE.to_string(),
            active_attribute: DEFAULT_ACTIVE_ATTRIBUTE.to_string(),
            events: DEFAULT_EVENTS.to_string(),
        }
    }
}

impl TogConfig {
    /// Parse a configuration from TOML; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> TogResult<Self> {
        Ok(toml::from_str(source)?)
    }
}

/// Observer invoked with the engine after every transition
pub type AfterToggle<D, R> = Box<dyn FnMut(&Tog<D, R>)>;

/// Construction options for [`Tog`]
pub struct TogOptions<D, R>
where
    D: Document,
    R: EventRegistry<D::Node>,
{
    pub config: TogConfig,
    pub(crate) after_toggle: Option<AfterToggle<D, R>>,
}

impl<D, R> TogOptions<D, R>
where
    D: Document,
    R: EventRegistry<D::Node>,
{
    /// Default attributes, no observer
    pub fn new() -> Self {
        Self {
            config: TogConfig::default(),
            after_toggle: None,
        }
    }

    /// Use the given declaration attributes
    pub fn with_config(mut self, config: TogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the after-toggle observer, replacing any previous one
    pub fn after_toggle(mut self, observer: impl FnMut(&Tog<D, R>) + 'static) -> Self {
        self.after_toggle = Some(Box::new(observer));
        self
    }

    pub fn has_after_toggle(&self) -> bool {
        self.after_toggle.is_some()
    }
}

impl<D, R> Default for TogOptions<D, R>
where
    D: Document,
    R: EventRegistry<D::Node>,
{
    fn default() -> Self {
        Self::new()
    }
}
