//! Error types for the toggle engine

/// Result type for toggle operations
pub type TogResult<T> = Result<T, TogError>;

/// Error type for toggle construction, activation and configuration
#[derive(Debug, thiserror::Error)]
pub enum TogError {
    /// An activation named a trigger that the toggle map does not contain.
    ///
    /// Ids are only ever resolved through the same map, so this means the
    /// map is inconsistent and the transition must not continue.
    #[error("trigger '{id}' is not in the toggle map")]
    UnknownTrigger { id: String },

    /// A trigger declares a group that has no member list.
    #[error("group '{group}' of trigger '{id}' is not in the toggle map")]
    UnknownGroup { id: String, group: String },

    /// Markup could not be parsed into a document.
    #[error("markup parse error")]
    Markup(#[from] quick_xml::Error),

    /// A markup attribute was malformed.
    #[error("markup attribute error")]
    MarkupAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// Markup bytes could not be decoded.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// TOML configuration could not be parsed.
    #[error("invalid configuration")]
    Config(#[from] toml::de::Error),

    /// The toggle map could not be serialized.
    #[error("snapshot serialization failed")]
    Snapshot(#[from] serde_json::Error),
}

impl TogError {
    /// Create a map consistency error for an unknown trigger id
    pub fn unknown_trigger(id: impl Into<String>) -> Self {
        Self::UnknownTrigger { id: id.into() }
    }

    /// Whether this error means the toggle map itself is inconsistent
    pub fn is_consistency_violation(&self) -> bool {
        matches!(self, Self::UnknownTrigger { .. } | Self::UnknownGroup { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_trigger_display() {
        let err = TogError::unknown_trigger("panel-1");
        assert_eq!(err.to_string(), "trigger 'panel-1' is not in the toggle map");
        assert!(err.is_consistency_violation());
    }

    #[test]
    fn test_unknown_group_display() {
        let err = TogError::UnknownGroup {
            id: "panel-1".to_string(),
            group: "faq".to_string(),
        };
        assert!(err.to_string().contains("'faq'"));
        assert!(err.is_consistency_violation());
    }

    #[test]
    fn test_config_error_is_not_consistency_violation() {
        let err: TogError = toml::from_str::<toml::Value>("= nope")
            .unwrap_err()
            .into();
        assert!(!err.is_consistency_violation());
    }
}
