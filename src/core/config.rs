//! Engine configuration.
//!
//! `EngineConfig` carries the few tunables the rules core exposes. It is
//! built with the usual `with_*` builder methods or loaded from TOML:
//!
//! ```
//! use trail_rules::core::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     seed = 7
//!     path_cards_per_round = 2
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.path_cards_per_round, 2);
//! assert!(config.interaction_fatigue);
//! ```

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Engine-wide settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the challenge deck and path deck shuffles.
    pub seed: u64,

    /// Path cards drawn by `Engine::begin_round`.
    pub path_cards_per_round: usize,

    /// Whether ready cards between the ranger and a test target fatigue the
    /// ranger when the test begins.
    pub interaction_fatigue: bool,

    /// Injury count at which the day ends.
    pub max_injury: u32,

    /// Mirror every engine log message to `tracing::info!`.
    pub trace_messages: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            path_cards_per_round: 1,
            interaction_fatigue: true,
            max_injury: 3,
            trace_messages: false,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, EngineError> {
        Ok(toml::from_str(source)?)
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of path cards drawn per round.
    #[must_use]
    pub fn with_path_cards_per_round(mut self, count: usize) -> Self {
        self.path_cards_per_round = count;
        self
    }

    /// Enable or disable interaction fatigue.
    #[must_use]
    pub fn with_interaction_fatigue(mut self, enabled: bool) -> Self {
        self.interaction_fatigue = enabled;
        self
    }

    /// Set the injury count that ends the day.
    #[must_use]
    pub fn with_max_injury(mut self, max: u32) -> Self {
        self.max_injury = max;
        self
    }

    /// Mirror log messages to tracing.
    #[must_use]
    pub fn with_trace_messages(mut self, enabled: bool) -> Self {
        self.trace_messages = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::new();
        assert_eq!(config.seed, 0);
        assert_eq!(config.path_cards_per_round, 1);
        assert!(config.interaction_fatigue);
        assert_eq!(config.max_injury, 3);
        assert!(!config.trace_messages);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_seed(11)
            .with_path_cards_per_round(3)
            .with_interaction_fatigue(false)
            .with_max_injury(2)
            .with_trace_messages(true);

        assert_eq!(config.seed, 11);
        assert_eq!(config.path_cards_per_round, 3);
        assert!(!config.interaction_fatigue);
        assert_eq!(config.max_injury, 2);
        assert!(config.trace_messages);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EngineConfig::from_toml_str("interaction_fatigue = false").unwrap();
        assert!(!config.interaction_fatigue);
        assert_eq!(config.max_injury, 3);
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = EngineConfig::from_toml_str("seed = \"not a number\"").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
