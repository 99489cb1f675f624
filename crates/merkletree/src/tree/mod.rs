//! The Merkle tree aggregate.
//!
//! A [`MerkleTree`] owns every node it is made of and the ordered sequence
//! of leaves. It is created once from a non-empty sequence of
//! [`Content`] items and changes only through [`MerkleTree::rebuild`] and
//! [`MerkleTree::rebuild_with`], both of which recompute the whole tree.
//!
//! ```
//! # use bytes::Bytes;
//! # use merkletree::{CompareError, Content, HashError};
//! # use sha2::{Digest, Sha256};
//! # #[derive(Debug, Clone)]
//! # struct Word(&'static str);
//! # impl Content for Word {
//! #     fn calculate_hash(&self) -> Result<Bytes, HashError> {
//! #         Ok(Bytes::copy_from_slice(&Sha256::digest(self.0.as_bytes())))
//! #     }
//! #     fn equals(&self, other: &Self) -> Result<bool, CompareError> {
//! #         Ok(self.0 == other.0)
//! #     }
//! # }
//! use merkletree::MerkleTree;
//!
//! let mut tree = MerkleTree::new([Word("Hello"), Word("Hi"), Word("Hey")]).unwrap();
//! assert!(tree.verify_tree().unwrap());
//! assert!(tree.verify_content(&Word("Hi")).unwrap());
//! assert!(!tree.verify_content(&Word("Bye")).unwrap());
//!
//! let path = tree.merkle_path(&Word("Hey")).unwrap().expect("Hey is in the tree");
//! let leaf_hash = Word("Hey").calculate_hash().unwrap();
//! assert!(path.verify(&leaf_hash, tree.merkle_root(), tree.strategy()));
//!
//! tree.rebuild_with([Word("Hola")]).unwrap();
//! assert_eq!(tree.leaf_count(), 1);
//! ```

mod builder;
pub mod error;
pub mod node;
pub mod proof;
mod verify;


pub use error::{BuildError, VerifyError};
pub use node::{Node, NodeId};
pub use proof::{Direction, MerklePath};

use alloy_primitives::hex;
use bytes::Bytes;
use std::fmt;

use crate::config::TreeConfig;
use crate::content::Content;
use crate::strategy::HashStrategy;
use builder::Layout;

/// A binary Merkle tree over content items of type `C`.
#[derive(Debug, Clone)]
pub struct MerkleTree<C> {
    nodes: Vec<Node<C>>,
    root: NodeId,
    leaves: Vec<NodeId>,
    root_hash: Bytes,
    strategy: HashStrategy,
}

impl<C: Content> MerkleTree<C> {
    /// Build a tree combining node hashes with the default strategy (SHA-256).
    pub fn new<I>(contents: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = C>,
    {
        Self::with_strategy(contents, HashStrategy::default())
    }

    /// Build a tree combining node hashes with `strategy`.
    pub fn with_strategy<I>(contents: I, strategy: HashStrategy) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = C>,
    {
        let layout = builder::build(contents.into_iter().collect(), &strategy)?;
        Ok(Self::from_layout(layout, strategy))
    }

    /// Build a tree using the strategy registered under `name`.
    ///
    /// Fails with [`StrategyError::Unknown`](crate::StrategyError::Unknown)
    /// when nothing is registered under that name.
    pub fn with_strategy_name<I>(contents: I, name: &str) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = C>,
    {
        let strategy = HashStrategy::from_name(name)?;
        Self::with_strategy(contents, strategy)
    }

    /// Build a tree as described by `config`.
    pub fn from_config<I>(contents: I, config: &TreeConfig) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = C>,
    {
        Self::with_strategy(contents, config.resolve()?)
    }

    /// Recompute every hash from the current content, keeping its order.
    ///
    /// On failure the tree is left untouched.
    pub fn rebuild(&mut self) -> Result<(), BuildError> {
        let hashes = builder::leaf_hashes(self.contents())?;

        // Real leaves sit first in the arena, in leaf order.
        let contents = std::mem::take(&mut self.nodes)
            .into_iter()
            .filter_map(|node| node.content)
            .collect();

        let layout = builder::assemble(contents, hashes, &self.strategy);
        self.install(layout);
        Ok(())
    }

    /// Replace the content and rebuild the tree.
    ///
    /// On failure the tree is left untouched.
    pub fn rebuild_with<I>(&mut self, contents: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = C>,
    {
        let layout = builder::build(contents.into_iter().collect(), &self.strategy)?;
        self.install(layout);
        Ok(())
    }
}

impl<C> MerkleTree<C> {
    fn from_layout(layout: Layout<C>, strategy: HashStrategy) -> Self {
        let root_hash = layout.nodes[layout.root.0].hash.clone();
        Self {
            nodes: layout.nodes,
            root: layout.root,
            leaves: layout.leaves,
            root_hash,
            strategy,
        }
    }

    fn install(&mut self, layout: Layout<C>) {
        self.root_hash = layout.nodes[layout.root.0].hash.clone();
        self.nodes = layout.nodes;
        self.root = layout.root;
        self.leaves = layout.leaves;
    }

    #[inline]
    pub(crate) fn node_at(&self, id: NodeId) -> &Node<C> {
        &self.nodes[id.0]
    }

    /// The root digest.
    #[inline]
    pub const fn merkle_root(&self) -> &Bytes {
        &self.root_hash
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> &Node<C> {
        self.node_at(self.root)
    }

    /// Look up a node by id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node<C>> {
        self.nodes.get(id.0)
    }

    /// Leaves in input order, followed by the padding duplicate if any.
    pub fn leaves(&self) -> impl ExactSizeIterator<Item = &Node<C>> + '_ {
        self.leaves.iter().map(|&id| self.node_at(id))
    }

    /// Content items in input order.
    pub fn contents(&self) -> impl Iterator<Item = &C> + '_ {
        self.leaves().filter_map(Node::content)
    }

    /// Number of content items, padding excluded.
    pub fn leaf_count(&self) -> usize {
        self.leaves().filter(|leaf| !leaf.is_duplicate()).count()
    }

    /// Number of levels above the leaves; also the length of every proof.
    pub fn height(&self) -> usize {
        self.leaves
            .first()
            .map_or(0, |&leaf| proof::Ascend::new(self, leaf).count())
    }

    /// The strategy combining child hashes.
    #[inline]
    pub const fn strategy(&self) -> &HashStrategy {
        &self.strategy
    }

    /// Overwrite a stored node hash, bypassing every invariant.
    #[cfg(test)]
    pub(crate) fn tamper(&mut self, id: NodeId, hash: Bytes) {
        self.nodes[id.0].hash = hash;
    }
}

impl<C: fmt::Debug> fmt::Display for MerkleTree<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "MerkleTree strategy={} root={}",
            self.strategy,
            hex::encode(&self.root_hash)
        )?;

        for (index, node) in self.nodes.iter().enumerate() {
            write!(f, "  #{index}")?;
            if node.is_leaf() {
                f.write_str(" leaf")?;
            }
            if let Some(source) = node.duplicate_of() {
                write!(f, " dup-of={source}")?;
            }
            if let Some((left, right)) = node.children() {
                write!(f, " children=({left}, {right})")?;
            }
            write!(f, " hash={}", hex::encode(node.hash()))?;
            if let Some(content) = node.content() {
                write!(f, " content={content:?}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
