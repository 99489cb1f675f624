//! Build and verification errors.

use thiserror::Error;

use crate::content::{CompareError, HashError};
use crate::strategy::StrategyError;

/// Errors raised while building or rebuilding a tree
#[derive(Error, Debug)]
pub enum BuildError {
    /// A tree needs at least one content item
    #[error("cannot build a merkle tree without content")]
    EmptyInput,

    /// A content item failed to hash itself
    #[error("failed to hash content at index {index}: {source}")]
    LeafHash {
        /// Position of the item in the input sequence
        index: usize,
        /// Error reported by the item
        #[source]
        source: HashError,
    },

    /// The requested hash strategy could not be resolved
    #[error(transparent)]
    Strategy(#[from] StrategyError),
}

impl BuildError {
    /// Leaf hashing failure at `index`
    pub const fn leaf_hash(index: usize, source: HashError) -> Self {
        Self::LeafHash { index, source }
    }
}

/// Errors raised while verifying a tree or looking up content
///
/// A failed verification is not an error: these variants only cover the
/// case where a content item could not be hashed or compared at all.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// A content item failed to hash itself
    #[error("failed to hash content at leaf {index}: {source}")]
    LeafHash {
        /// Position of the leaf in the tree
        index: usize,
        /// Error reported by the item
        #[source]
        source: HashError,
    },

    /// A content item failed to compare itself against the query
    #[error("failed to compare content at leaf {index}: {source}")]
    Compare {
        /// Position of the leaf in the tree
        index: usize,
        /// Error reported by the item
        #[source]
        source: CompareError,
    },
}

impl VerifyError {
    /// Leaf hashing failure at `index`
    pub const fn leaf_hash(index: usize, source: HashError) -> Self {
        Self::LeafHash { index, source }
    }

    /// Comparison failure at `index`
    pub const fn compare(index: usize, source: CompareError) -> Self {
        Self::Compare { index, source }
    }
}
