//! Bottom-up tree construction.
//!
//! Construction is split in two phases so that callers can fail before
//! giving up ownership of anything:
//!
//! 1. [`leaf_hashes`] asks every content item for its hash.
//! 2. [`assemble`] lays out leaves, pads odd levels with duplicates and
//!    combines pairs with the hash strategy until a single root remains.

use alloy_primitives::hex;
use bytes::Bytes;

use super::error::BuildError;
use super::node::{Node, NodeId};
use crate::content::Content;
use crate::strategy::{HashStrategy, StrategyHasher};

/// Node arena plus the ids that give it structure.
#[derive(Debug)]
pub(crate) struct Layout<C> {
    pub(crate) nodes: Vec<Node<C>>,
    pub(crate) leaves: Vec<NodeId>,
    pub(crate) root: NodeId,
}

/// Build a complete tree from `contents`.
pub(crate) fn build<C: Content>(
    contents: Vec<C>,
    strategy: &HashStrategy,
) -> Result<Layout<C>, BuildError> {
    let hashes = leaf_hashes(&contents)?;
    Ok(assemble(contents, hashes, strategy))
}

/// Hash every content item in order.
pub(crate) fn leaf_hashes<'a, C, I>(contents: I) -> Result<Vec<Bytes>, BuildError>
where
    C: Content + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let hashes = contents
        .into_iter()
        .enumerate()
        .map(|(index, content)| {
            content
                .calculate_hash()
                .map_err(|source| BuildError::leaf_hash(index, source))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if hashes.is_empty() {
        return Err(BuildError::EmptyInput);
    }

    Ok(hashes)
}

/// Lay out the tree from content and matching leaf hashes.
///
/// Real leaves occupy the first arena slots in input order, which is what
/// lets a rebuild recover the content sequence by draining the arena.
pub(crate) fn assemble<C>(
    contents: Vec<C>,
    hashes: Vec<Bytes>,
    strategy: &HashStrategy,
) -> Layout<C> {
    debug_assert_eq!(contents.len(), hashes.len());
    debug_assert!(!contents.is_empty());

    let mut nodes = Vec::with_capacity(2 * contents.len() + 1);
    let mut level: Vec<NodeId> = contents
        .into_iter()
        .zip(hashes)
        .map(|(content, hash)| {
            nodes.push(Node::new_leaf(hash, content));
            NodeId(nodes.len() - 1)
        })
        .collect();

    if level.len() > 1 {
        pad_level(&mut nodes, &mut level);
    }
    let leaves = level.clone();

    let mut hasher = strategy.hasher();
    let mut depth = 0usize;
    while level.len() > 1 {
        pad_level(&mut nodes, &mut level);
        level = pair_level(&mut nodes, &level, &mut hasher);
        depth += 1;
        tracing::trace!(depth, width = level.len(), "assembled tree level");
    }

    let root = level[0];
    tracing::debug!(
        leaves = leaves.len(),
        height = depth,
        strategy = strategy.name(),
        root = %hex::encode(&nodes[root.0].hash),
        "built merkle tree"
    );

    Layout {
        nodes,
        leaves,
        root,
    }
}

/// Append a duplicate of the last node when the level has an odd length.
fn pad_level<C>(nodes: &mut Vec<Node<C>>, level: &mut Vec<NodeId>) {
    if level.len().is_multiple_of(2) {
        return;
    }

    if let Some(&last) = level.last() {
        let duplicate = Node::duplicate(&nodes[last.0], last);
        nodes.push(duplicate);
        level.push(NodeId(nodes.len() - 1));
    }
}

/// Combine consecutive pairs of an even-length level into their parents.
fn pair_level<C>(
    nodes: &mut Vec<Node<C>>,
    level: &[NodeId],
    hasher: &mut StrategyHasher,
) -> Vec<NodeId> {
    debug_assert!(level.len().is_multiple_of(2));

    let mut parents = Vec::with_capacity(level.len() / 2);
    for pair in level.chunks_exact(2) {
        let (left, right) = (pair[0], pair[1]);
        let hash = hasher.combine(&nodes[left.0].hash, &nodes[right.0].hash);

        nodes.push(Node::new_internal(hash, left, right));
        let parent = NodeId(nodes.len() - 1);
        nodes[left.0].parent = Some(parent);
        nodes[right.0].parent = Some(parent);
        parents.push(parent);
    }

    parents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CompareError, HashError};

    #[derive(Debug, Clone, PartialEq)]
    struct Raw(&'static [u8]);

    impl Content for Raw {
        fn calculate_hash(&self) -> Result<Bytes, HashError> {
            Ok(Bytes::from_static(self.0))
        }

        fn equals(&self, other: &Self) -> Result<bool, CompareError> {
            Ok(self == other)
        }
    }

    /// Hashes fail for `None`.
    #[derive(Debug)]
    struct Maybe(Option<&'static [u8]>);

    impl Content for Maybe {
        fn calculate_hash(&self) -> Result<Bytes, HashError> {
            self.0
                .map(Bytes::from_static)
                .ok_or_else(|| HashError::new("no bytes"))
        }

        fn equals(&self, _other: &Self) -> Result<bool, CompareError> {
            Ok(false)
        }
    }

    fn raw(items: &[&'static str]) -> Vec<Raw> {
        items.iter().map(|&item| Raw(item.as_bytes())).collect()
    }

    #[test]
    fn test_empty_input() {
        let err = build(Vec::<Raw>::new(), &HashStrategy::default()).unwrap_err();
        assert!(matches!(err, BuildError::EmptyInput));
    }

    #[test]
    fn test_leaf_hash_error_carries_index() {
        let contents = vec![
            Maybe(Some("a".as_bytes())),
            Maybe(Some("b".as_bytes())),
            Maybe(None),
        ];
        let err = build(contents, &HashStrategy::default()).unwrap_err();

        assert!(matches!(err, BuildError::LeafHash { index: 2, .. }));
        assert_eq!(err.to_string(), "failed to hash content at index 2: no bytes");
    }

    #[test]
    fn test_single_leaf_is_root() {
        let layout = build(raw(&["solo"]), &HashStrategy::default()).unwrap();

        assert_eq!(layout.nodes.len(), 1);
        assert_eq!(layout.leaves, vec![layout.root]);
        let root = &layout.nodes[layout.root.0];
        assert!(root.is_leaf());
        assert!(root.parent().is_none());
        assert_eq!(root.hash().as_ref(), b"solo");
    }

    #[test]
    fn test_pair_hash_is_left_then_right() {
        let strategy = HashStrategy::default();
        let layout = build(raw(&["left", "right"]), &strategy).unwrap();

        let root = &layout.nodes[layout.root.0];
        assert_eq!(root.hash(), &strategy.combine(b"left", b"right"));
        assert_eq!(root.children(), Some((layout.leaves[0], layout.leaves[1])));
        assert!(root.content().is_none());
    }

    #[test]
    fn test_odd_leaf_count_is_padded() {
        let strategy = HashStrategy::default();
        let layout = build(raw(&["a", "b", "c"]), &strategy).unwrap();

        assert_eq!(layout.leaves.len(), 4);
        let last = &layout.nodes[layout.leaves[2].0];
        let padding = &layout.nodes[layout.leaves[3].0];
        assert!(padding.is_duplicate());
        assert!(padding.is_leaf());
        assert!(padding.content().is_none());
        assert_eq!(padding.duplicate_of(), Some(layout.leaves[2]));
        assert_eq!(padding.hash(), last.hash());
        assert_eq!(padding.parent(), last.parent());

        let ab = strategy.combine(b"a", b"b");
        let cc = strategy.combine(b"c", b"c");
        assert_eq!(
            layout.nodes[layout.root.0].hash(),
            &strategy.combine(&ab, &cc)
        );
    }

    #[test]
    fn test_odd_internal_level_is_padded() {
        // 5 leaves -> 6 padded -> 3 parents -> padded to 4 -> 2 -> root
        let strategy = HashStrategy::default();
        let layout = build(raw(&["a", "b", "c", "d", "e"]), &strategy).unwrap();

        let duplicates: Vec<_> = layout
            .nodes
            .iter()
            .filter(|node| node.is_duplicate())
            .collect();
        assert_eq!(duplicates.len(), 2);
        assert!(duplicates[0].is_leaf());
        assert!(!duplicates[1].is_leaf());

        let internal_dup = duplicates[1];
        let source = &layout.nodes[internal_dup.duplicate_of().unwrap().0];
        assert_eq!(internal_dup.children(), source.children());
        assert_eq!(internal_dup.hash(), source.hash());

        let ab = strategy.combine(b"a", b"b");
        let cd = strategy.combine(b"c", b"d");
        let ee = strategy.combine(b"e", b"e");
        let abcd = strategy.combine(&ab, &cd);
        let eeee = strategy.combine(&ee, &ee);
        assert_eq!(
            layout.nodes[layout.root.0].hash(),
            &strategy.combine(&abcd, &eeee)
        );
    }

    #[test]
    fn test_every_non_root_node_has_parent() {
        let layout = build(
            raw(&["1", "2", "3", "4", "5", "6", "7", "8", "9"]),
            &HashStrategy::default(),
        )
        .unwrap();

        for (i, node) in layout.nodes.iter().enumerate() {
            if NodeId(i) == layout.root {
                assert!(node.parent().is_none());
            } else {
                assert!(node.parent().is_some(), "node {i} has no parent");
            }
        }
    }

    #[test]
    fn test_real_leaves_come_first() {
        let layout = build(raw(&["x", "y", "z"]), &HashStrategy::default()).unwrap();
        let contents: Vec<_> = layout.nodes.into_iter().filter_map(|n| n.content).collect();
        assert_eq!(contents, raw(&["x", "y", "z"]));
    }
}
