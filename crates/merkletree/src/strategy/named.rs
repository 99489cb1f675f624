//! Built-in hash strategies.

use core::fmt;

use digest::{Digest, DynDigest};

use super::keccak::Keccak256;

/// A hash strategy known at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::IntoStaticStr)]
#[derive(strum::VariantNames)]
#[derive(strum::VariantArray)]
#[derive(strum::EnumString)]
#[derive(strum::EnumIter)]
#[derive(strum::EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum NamedStrategy {
    /// SHA-256, the default strategy.
    #[strum(to_string = "sha256")]
    Sha256,

    /// SHA-512.
    #[strum(to_string = "sha512")]
    Sha512,

    /// Keccak-256 as used by Ethereum.
    #[strum(to_string = "keccak256")]
    Keccak256,
}

impl Default for NamedStrategy {
    #[inline]
    fn default() -> Self {
        Self::Sha256
    }
}

impl fmt::Display for NamedStrategy {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

impl AsRef<str> for NamedStrategy {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl NamedStrategy {
    /// Returns the registered name of the strategy.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Digest length in bytes.
    #[inline]
    pub const fn output_size(&self) -> usize {
        match self {
            Self::Sha256 | Self::Keccak256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Create a fresh hasher for this strategy.
    pub fn new_hasher(&self) -> Box<dyn DynDigest + Send + Sync> {
        match self {
            Self::Sha256 => Box::new(sha2::Sha256::new()),
            Self::Sha512 => Box::new(sha2::Sha512::new()),
            Self::Keccak256 => Box::new(Keccak256::new()),
        }
    }
}
