//! Tree configuration.
//!
//! [`TreeConfig`] names the hash strategy used to combine child hashes. With
//! the `serde` feature enabled it can be embedded in any serde-based
//! configuration file; a missing `strategy` falls back to the default.

use crate::strategy::{HashStrategy, NamedStrategy, StrategyError};

/// Settings used when building a [`MerkleTree`](crate::MerkleTree).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeConfig {
    /// Name of the registered hash strategy
    pub strategy: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        NamedStrategy::default().into()
    }
}

impl From<NamedStrategy> for TreeConfig {
    fn from(strategy: NamedStrategy) -> Self {
        Self::new(strategy.as_str())
    }
}

impl TreeConfig {
    /// Configuration using the strategy registered under `strategy`.
    pub fn new<S: Into<String>>(strategy: S) -> Self {
        Self {
            strategy: strategy.into(),
        }
    }

    /// Resolve the configured strategy.
    pub fn resolve(&self) -> Result<HashStrategy, StrategyError> {
        HashStrategy::from_name(&self.strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy() {
        let config = TreeConfig::default();
        assert_eq!(config.strategy, "sha256");
        assert_eq!(config.resolve().unwrap(), HashStrategy::default());
    }

    #[test]
    fn test_unknown_strategy() {
        let config = TreeConfig::new("whirlpool");
        assert_eq!(
            config.resolve().unwrap_err(),
            StrategyError::Unknown("whirlpool".into())
        );
    }

    #[test]
    fn test_from_named() {
        let config = TreeConfig::from(NamedStrategy::Keccak256);
        assert_eq!(config.resolve().unwrap().name(), "keccak256");
    }
}
