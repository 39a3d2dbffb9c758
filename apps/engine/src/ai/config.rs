//! Provider configuration handling.
//!
//! Provides a typed interface for provider configuration, extracting standard
//! fields from a JSON config while preserving provider-specific custom fields.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Standard configuration for decision providers.
///
/// # Standard Fields
///
/// - `seed`: Optional RNG seed for deterministic behavior. Providers that use
///   randomness seed their generator with it so decisions are reproducible.
///
/// # Example JSON Config
///
/// ```json
/// {"seed": 12345, "challenge_rate": 0.25}
/// ```
///
/// Everything besides `seed` lands in `custom`, where each provider reads its
/// own knobs (`challenge_rate`, `margin`, `failure_rate`, `hang_ms`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Optional RNG seed for deterministic provider behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Provider-specific configuration.
    #[serde(flatten)]
    pub custom: JsonValue,
}

impl AiConfig {
    /// Create an AiConfig from optional JSON value.
    ///
    /// Falls back to an empty config if the input is `None` or malformed.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_else(Self::empty)
    }

    /// Get the RNG seed, if configured.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Get a custom configuration field by key.
    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }

    /// Numeric custom field, or `default` when missing or not a number.
    pub fn custom_f64(&self, key: &str, default: f64) -> f64 {
        self.get_custom(key)
            .and_then(JsonValue::as_f64)
            .unwrap_or(default)
    }

    /// Unsigned custom field, or `default` when missing or not an integer.
    pub fn custom_u64(&self, key: &str, default: u64) -> u64 {
        self.get_custom(key)
            .and_then(JsonValue::as_u64)
            .unwrap_or(default)
    }

    /// Create an empty configuration (no seed, no custom fields).
    pub fn empty() -> Self {
        Self {
            seed: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }

    /// Create a configuration with just a seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::empty()
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::empty()
    }
}
