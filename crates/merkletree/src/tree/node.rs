//! Tree nodes.
//!
//! Nodes are stored in a flat arena owned by the tree and refer to each other
//! by [`NodeId`]. Children are owned by position in the arena, the parent link
//! is a plain index used only for upward traversal.

use bytes::Bytes;
use std::fmt;

/// Index of a node within its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the tree's arena
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A leaf or internal node.
///
/// Real leaves carry their content and no children. Internal nodes carry
/// exactly two children and no content. Duplicates pad odd levels: a
/// duplicate copies the hash of the node it was made from, shares that
/// node's children, and never carries content of its own.
#[derive(Debug, Clone)]
pub struct Node<C> {
    pub(crate) hash: Bytes,
    pub(crate) content: Option<C>,
    pub(crate) children: Option<(NodeId, NodeId)>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) leaf: bool,
    pub(crate) duplicate_of: Option<NodeId>,
}

impl<C> Node<C> {
    pub(crate) const fn new_leaf(hash: Bytes, content: C) -> Self {
        Self {
            hash,
            content: Some(content),
            children: None,
            parent: None,
            leaf: true,
            duplicate_of: None,
        }
    }

    pub(crate) const fn new_internal(hash: Bytes, left: NodeId, right: NodeId) -> Self {
        Self {
            hash,
            content: None,
            children: Some((left, right)),
            parent: None,
            leaf: false,
            duplicate_of: None,
        }
    }

    /// Padding copy of `source`, the node at `source_id`.
    pub(crate) fn duplicate(source: &Self, source_id: NodeId) -> Self {
        Self {
            hash: source.hash.clone(),
            content: None,
            children: source.children,
            parent: None,
            leaf: source.leaf,
            duplicate_of: Some(source_id),
        }
    }

    /// The stored hash of this node
    #[inline]
    pub const fn hash(&self) -> &Bytes {
        &self.hash
    }

    /// Content of a real leaf, `None` for internal and duplicate nodes
    #[inline]
    pub const fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    /// Left and right children of an internal node
    #[inline]
    pub const fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    /// Parent of this node, `None` for the root
    #[inline]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether this node sits at the leaf level
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Whether this node was inserted to pad an odd level
    #[inline]
    pub const fn is_duplicate(&self) -> bool {
        self.duplicate_of.is_some()
    }

    /// The node this duplicate was copied from
    #[inline]
    pub const fn duplicate_of(&self) -> Option<NodeId> {
        self.duplicate_of
    }
}
