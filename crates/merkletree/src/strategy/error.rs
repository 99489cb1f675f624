//! Strategy resolution errors.

use thiserror::Error;

/// Errors raised while resolving or registering hash strategies
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    /// No strategy is registered under this name
    #[error("unknown hash strategy: {0}")]
    Unknown(String),

    /// The name belongs to a built-in strategy and cannot be re-registered
    #[error("hash strategy name is reserved: {0}")]
    Reserved(String),
}

impl StrategyError {
    /// Unknown strategy name
    pub fn unknown<S: Into<String>>(name: S) -> Self {
        Self::Unknown(name.into())
    }

    /// Reserved built-in name
    pub fn reserved<S: Into<String>>(name: S) -> Self {
        Self::Reserved(name.into())
    }
}
