//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::caller::DEFAULT_DENIED_MESSAGE;
use crate::error::Result;

/// Tunable settings for the command engine.
///
/// Every field has a default; hosts typically deserialize overrides from a
/// TOML or JSON fragment of their own configuration file and hand the
/// result to the registry at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Message sent when a permission requirement without a custom message
    /// denies a caller.
    pub denied_message: String,
    /// Sort synthesized completion suggestions alphabetically instead of
    /// returning them in handler discovery order.
    pub sorted_completions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            denied_message: DEFAULT_DENIED_MESSAGE.to_string(),
            sorted_completions: false,
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_stock_denial_message() {
        let config = EngineConfig::default();
        assert_eq!(config.denied_message, DEFAULT_DENIED_MESSAGE);
        assert!(!config.sorted_completions);
    }

    #[test]
    fn from_toml_overrides_fields() {
        let config = EngineConfig::from_toml(
            "denied_message = \"Nope.\"\nsorted_completions = true\n",
        )
        .unwrap();
        assert_eq!(config.denied_message, "Nope.");
        assert!(config.sorted_completions);
    }

    #[test]
    fn from_toml_missing_fields_use_defaults() {
        let config = EngineConfig::from_toml("sorted_completions = true\n").unwrap();
        assert_eq!(config.denied_message, DEFAULT_DENIED_MESSAGE);
        assert!(config.sorted_completions);
    }

    #[test]
    fn from_toml_rejects_garbage() {
        assert!(EngineConfig::from_toml("this is [[[not valid toml").is_err());
    }

    #[test]
    fn from_json_overrides_fields() {
        let config = EngineConfig::from_json("{\"denied_message\": \"No entry.\"}").unwrap();
        assert_eq!(config.denied_message, "No entry.");
        assert!(!config.sorted_completions);
    }

    #[test]
    fn round_trips_through_json() {
        let config = EngineConfig {
            denied_message: "Denied.".to_string(),
            sorted_completions: true,
        };
        let text = serde_json::to_string(&config).unwrap();
        let back = EngineConfig::from_json(&text).unwrap();
        assert_eq!(back, config);
    }
}
