//! Error types for the merkletree crate
//!
//! The crate uses a two-level error hierarchy:
//!
//! - [`MerkleError`]: the top-level error type that wraps all other errors
//! - Component-specific errors: [`BuildError`], [`VerifyError`] and
//!   [`StrategyError`], returned directly by the operations that raise them
//!
//! Content items report their own failures through
//! [`HashError`](crate::HashError) and [`CompareError`](crate::CompareError),
//! which the component errors carry as their source together with the index
//! of the offending leaf.
//!
//! ```
//! use merkletree::error::{MerkleError, Result};
//! use merkletree::{BuildError, MerkleTree};
//! # use merkletree::{CompareError, Content, HashError};
//! # use bytes::Bytes;
//! # #[derive(Debug)]
//! # struct Item;
//! # impl Content for Item {
//! #     fn calculate_hash(&self) -> std::result::Result<Bytes, HashError> { Ok(Bytes::new()) }
//! #     fn equals(&self, _: &Self) -> std::result::Result<bool, CompareError> { Ok(true) }
//! # }
//!
//! fn build(items: Vec<Item>) -> Result<MerkleTree<Item>> {
//!     Ok(MerkleTree::new(items)?)
//! }
//!
//! match build(Vec::new()) {
//!     Err(MerkleError::Build(BuildError::EmptyInput)) => {}
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

use thiserror::Error;

pub use crate::strategy::StrategyError;
pub use crate::tree::{BuildError, VerifyError};

/// Result type for operations in the merkletree crate
pub type Result<T> = std::result::Result<T, MerkleError>;

/// Main error type for the merkletree crate
#[derive(Error, Debug)]
pub enum MerkleError {
    /// Errors raised while building or rebuilding a tree
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Errors raised while verifying a tree, its content or a proof
    #[error(transparent)]
    Verify(#[from] VerifyError),

    /// Errors raised while resolving or registering a hash strategy
    #[error(transparent)]
    Strategy(#[from] StrategyError),
}
