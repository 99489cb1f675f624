//! Generic binary Merkle tree
//!
//! This crate builds a binary hash tree over an ordered sequence of
//! caller-defined content items, exposes the root digest, verifies the tree
//! and individual items, and produces inclusion proofs that can be checked
//! without the tree.
//!
//! ## Key Components
//!
//! - **Content**: the [`Content`] trait every leaf item implements
//! - **Hash strategies**: named hashers combining child hashes ([`HashStrategy`],
//!   [`strategy::resolve`]), SHA-256 by default
//! - **Tree**: [`MerkleTree`] with rebuild, verification and [`MerklePath`] proofs
//!
//! ## Usage Examples
//!
//! ```
//! use bytes::Bytes;
//! use merkletree::{CompareError, Content, HashError, MerkleTree};
//! use sha2::{Digest, Sha256};
//!
//! #[derive(Debug, Clone)]
//! struct Greeting(String);
//!
//! impl Content for Greeting {
//!     fn calculate_hash(&self) -> Result<Bytes, HashError> {
//!         Ok(Bytes::copy_from_slice(&Sha256::digest(self.0.as_bytes())))
//!     }
//!
//!     fn equals(&self, other: &Self) -> Result<bool, CompareError> {
//!         Ok(self.0 == other.0)
//!     }
//! }
//!
//! let greetings = ["Hello", "Hi", "Hey", "Hola"].map(|g| Greeting(g.to_string()));
//! let tree = MerkleTree::new(greetings).unwrap();
//!
//! assert_eq!(
//!     alloy_primitives::hex::encode(tree.merkle_root()),
//!     "5f30cc80133b9394156e24b233f0c4be32b24e44bb3381f02c7ba52619d0febc"
//! );
//!
//! // Named strategies
//! let tree = MerkleTree::with_strategy_name(
//!     [Greeting("Hello".into()), Greeting("Hi".into())],
//!     "keccak256",
//! )
//! .unwrap();
//! assert!(tree.verify_tree().unwrap());
//! ```

// Re-export dependencies that are part of our public API
pub use bytes;
pub use digest;

pub mod config;
pub mod content;
pub mod error;
pub mod strategy;
pub mod tree;

// Re-export core types
pub use config::TreeConfig;
pub use content::{CompareError, Content, HashError};
pub use error::{MerkleError, Result};
pub use strategy::{HashStrategy, NamedStrategy, StrategyError, StrategyHasher};
pub use tree::{BuildError, Direction, MerklePath, MerkleTree, Node, NodeId, VerifyError};
