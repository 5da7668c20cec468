//! Configuration for the RAG engine.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Configuration parameters for the [`RagEngine`](crate::RagEngine).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// The collection queried when no explicit collection is named.
    pub default_collection: String,
    /// Number of passages retrieved for a plain question.
    pub default_num_results: usize,
    /// Number of passages retrieved for each multi-turn exchange.
    pub multi_turn_num_results: usize,
    /// Number of passages retrieved as translation disambiguation context.
    pub translate_num_results: usize,
    /// Maximum turns kept per conversation session.
    pub max_session_turns: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_collection: "wowinfo".to_string(),
            default_num_results: 5,
            multi_turn_num_results: 3,
            translate_num_results: 3,
            max_session_turns: 50,
        }
    }
}

impl EngineConfig {
    /// Create a new builder for constructing an [`EngineConfig`].
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the default collection name.
    pub fn default_collection(mut self, name: impl Into<String>) -> Self {
        self.config.default_collection = name.into();
        self
    }

    /// Set the number of passages retrieved for a plain question.
    pub fn default_num_results(mut self, n: usize) -> Self {
        self.config.default_num_results = n;
        self
    }

    /// Set the number of passages retrieved for multi-turn exchanges.
    pub fn multi_turn_num_results(mut self, n: usize) -> Self {
        self.config.multi_turn_num_results = n;
        self
    }

    /// Set the number of passages retrieved as translation context.
    pub fn translate_num_results(mut self, n: usize) -> Self {
        self.config.translate_num_results = n;
        self
    }

    /// Set the maximum turns kept per conversation session.
    pub fn max_session_turns(mut self, n: usize) -> Self {
        self.config.max_session_turns = n;
        self
    }

    /// Build the [`EngineConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if the collection name is empty
    /// or any retrieval count is zero.
    pub fn build(self) -> Result<EngineConfig> {
        if self.config.default_collection.is_empty() {
            return Err(RagError::ConfigError("default_collection must not be empty".to_string()));
        }
        for (name, value) in [
            ("default_num_results", self.config.default_num_results),
            ("multi_turn_num_results", self.config.multi_turn_num_results),
            ("translate_num_results", self.config.translate_num_results),
        ] {
            if value == 0 {
                return Err(RagError::ConfigError(format!("{name} must be greater than zero")));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        let config = EngineConfig::builder().build().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn zero_num_results_is_rejected() {
        let err = EngineConfig::builder().default_num_results(0).build().unwrap_err();
        assert!(matches!(err, RagError::ConfigError(_)));
    }

    #[test]
    fn empty_collection_is_rejected() {
        let err = EngineConfig::builder().default_collection("").build().unwrap_err();
        assert!(matches!(err, RagError::ConfigError(_)));
    }
}
