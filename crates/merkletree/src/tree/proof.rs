//! Merkle inclusion proofs.
//!
//! A [`MerklePath`] lists, from the leaf level upward, the sibling hash met
//! at every level together with the side that sibling sits on. Anyone holding
//! the leaf's content hash, the path and the hash strategy can recompute the
//! root without the rest of the tree.

use bytes::Bytes;

use super::error::VerifyError;
use super::node::{Node, NodeId};
use super::MerkleTree;
use crate::content::Content;
use crate::strategy::{HashStrategy, StrategyHasher};

/// Side on which a sibling sits relative to the running hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(num_enum::IntoPrimitive, num_enum::TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    /// The sibling is on the left: hash `sibling ++ running`.
    Left = 0,
    /// The sibling is on the right: hash `running ++ sibling`.
    Right = 1,
}

impl Direction {
    /// Combine the running hash with a sibling placed on this side.
    #[inline]
    pub fn combine(self, hasher: &mut StrategyHasher, running: &[u8], sibling: &[u8]) -> Bytes {
        match self {
            Self::Left => hasher.combine(sibling, running),
            Self::Right => hasher.combine(running, sibling),
        }
    }
}

/// Inclusion proof for a single leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MerklePath {
    leaf_index: usize,
    siblings: Vec<Bytes>,
    directions: Vec<Direction>,
}

impl MerklePath {
    /// Assemble a path from `(sibling, direction)` steps ordered leaf first.
    pub fn from_steps<I>(leaf_index: usize, steps: I) -> Self
    where
        I: IntoIterator<Item = (Bytes, Direction)>,
    {
        let (siblings, directions) = steps.into_iter().unzip();
        Self {
            leaf_index,
            siblings,
            directions,
        }
    }

    /// Position of the proven leaf in the tree.
    #[inline]
    pub const fn leaf_index(&self) -> usize {
        self.leaf_index
    }

    /// Sibling hashes, leaf level first.
    #[inline]
    pub fn siblings(&self) -> &[Bytes] {
        &self.siblings
    }

    /// Sibling sides, leaf level first.
    #[inline]
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Number of steps, equal to the height of the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// Whether the path is empty, as for a single-leaf tree.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Iterate over `(sibling, direction)` steps, leaf level first.
    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, Direction)> + '_ {
        self.siblings.iter().zip(self.directions.iter().copied())
    }

    /// Recompute the root starting from `leaf_hash`.
    pub fn compute_root(&self, leaf_hash: &[u8], strategy: &HashStrategy) -> Bytes {
        let mut hasher = strategy.hasher();
        self.iter()
            .fold(Bytes::copy_from_slice(leaf_hash), |running, (sibling, direction)| {
                direction.combine(&mut hasher, &running, sibling)
            })
    }

    /// Check that `leaf_hash` and this path lead to `root`.
    pub fn verify(&self, leaf_hash: &[u8], root: &[u8], strategy: &HashStrategy) -> bool {
        self.siblings.len() == self.directions.len()
            && self.compute_root(leaf_hash, strategy).as_ref() == root
    }
}

impl<C: Content> MerkleTree<C> {
    /// Build the inclusion proof for `item`.
    ///
    /// Returns `Ok(None)` when no leaf holds an equal item. Padding
    /// duplicates are never matched.
    pub fn merkle_path(&self, item: &C) -> Result<Option<MerklePath>, VerifyError> {
        let Some(index) = self.find_leaf(item)? else {
            return Ok(None);
        };

        let steps = Ascend::new(self, self.leaves[index])
            .map(|(sibling, direction)| (sibling.hash.clone(), direction));

        Ok(Some(MerklePath::from_steps(index, steps)))
    }
}

/// Walks from a node up to the root, yielding each sibling and its side.
pub(crate) struct Ascend<'a, C> {
    tree: &'a MerkleTree<C>,
    current: NodeId,
}

impl<'a, C> Ascend<'a, C> {
    pub(crate) const fn new(tree: &'a MerkleTree<C>, start: NodeId) -> Self {
        Self {
            tree,
            current: start,
        }
    }

    /// The node reached so far, the parent of the last yielded sibling.
    #[inline]
    pub(crate) const fn position(&self) -> NodeId {
        self.current
    }
}

impl<'a, C> Iterator for Ascend<'a, C> {
    type Item = (&'a Node<C>, Direction);

    fn next(&mut self) -> Option<Self::Item> {
        let parent = self.tree.node_at(self.current).parent?;
        let (left, right) = self.tree.node_at(parent).children?;

        let step = if left == self.current {
            (self.tree.node_at(right), Direction::Right)
        } else {
            (self.tree.node_at(left), Direction::Left)
        };

        self.current = parent;
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::NamedStrategy;

    #[test]
    fn test_direction_numeric() {
        assert_eq!(u8::from(Direction::Left), 0);
        assert_eq!(u8::from(Direction::Right), 1);
        assert_eq!(Direction::try_from(1u8).unwrap(), Direction::Right);
        assert!(Direction::try_from(2u8).is_err());
    }

    #[test]
    fn test_direction_combine_order() {
        let strategy = HashStrategy::default();
        let mut hasher = strategy.hasher();

        assert_eq!(
            Direction::Right.combine(&mut hasher, b"run", b"sib"),
            strategy.combine(b"run", b"sib")
        );
        assert_eq!(
            Direction::Left.combine(&mut hasher, b"run", b"sib"),
            strategy.combine(b"sib", b"run")
        );
    }

    #[test]
    fn test_empty_path_returns_leaf() {
        let path = MerklePath::from_steps(0, []);
        let strategy = HashStrategy::default();

        assert!(path.is_empty());
        assert_eq!(path.compute_root(b"leaf", &strategy).as_ref(), b"leaf");
        assert!(path.verify(b"leaf", b"leaf", &strategy));
    }

    #[test]
    fn test_manual_path() {
        let strategy = HashStrategy::default();
        let ab = strategy.combine(b"a", b"b");
        let cd = strategy.combine(b"c", b"d");
        let root = strategy.combine(&ab, &cd);

        // Prove "c": sibling "d" on the right, then "ab" on the left
        let path = MerklePath::from_steps(
            2,
            [
                (Bytes::from_static(b"d"), Direction::Right),
                (ab, Direction::Left),
            ],
        );

        assert_eq!(path.leaf_index(), 2);
        assert_eq!(path.len(), 2);
        assert!(path.verify(b"c", &root, &strategy));
        assert!(!path.verify(b"d", &root, &strategy));

        let keccak: HashStrategy = NamedStrategy::Keccak256.into();
        assert!(!path.verify(b"c", &root, &keccak));
    }

    #[test]
    fn test_mismatched_lengths_never_verify() {
        let strategy = HashStrategy::default();
        let mut path = MerklePath::from_steps(0, [(Bytes::from_static(b"b"), Direction::Right)]);
        let root = path.compute_root(b"a", &strategy);
        assert!(path.verify(b"a", &root, &strategy));

        path.directions.push(Direction::Left);
        assert!(!path.verify(b"a", &root, &strategy));
    }
}
