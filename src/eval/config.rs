//! Evaluator configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Evaluator configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Trials needed before an estimate is trusted (default: 10,000).
    /// Estimates with fewer collected trials are flagged low confidence.
    pub confidence_floor: u64,

    /// Games started per evaluation, counting rejected ones.
    /// Circuit breaker for triggers that rarely occur.
    pub max_attempts: u64,

    /// Independent trial batches run in parallel.
    /// Results do not depend on how batches are scheduled.
    pub batches: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            confidence_floor: 10_000,
            max_attempts: 2_000_000,
            batches: 32,
        }
    }
}

impl EvalConfig {
    /// Set the confidence floor.
    #[must_use]
    pub fn with_confidence_floor(mut self, floor: u64) -> Self {
        self.confidence_floor = floor;
        self
    }

    /// Set the attempt ceiling.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the batch count.
    #[must_use]
    pub fn with_batches(mut self, batches: usize) -> Self {
        self.batches = batches;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batches == 0 {
            return Err(ConfigError::Invalid { name: "batches", reason: "must be positive".to_string() });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "max_attempts",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvalConfig::default();
        assert_eq!(config.confidence_floor, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EvalConfig::default()
            .with_confidence_floor(500)
            .with_max_attempts(9_000)
            .with_batches(4);

        assert_eq!(config.confidence_floor, 500);
        assert_eq!(config.max_attempts, 9_000);
        assert_eq!(config.batches, 4);
    }

    #[test]
    fn test_zero_batches_rejected() {
        assert!(EvalConfig::default().with_batches(0).validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = EvalConfig::default().with_batches(3);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EvalConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
