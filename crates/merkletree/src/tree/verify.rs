//! Whole-tree and per-content verification.
//!
//! A failed check is reported as `Ok(false)`. Errors are reserved for
//! content items that cannot hash or compare themselves.

use bytes::Bytes;

use super::MerkleTree;
use super::error::VerifyError;
use super::proof::Ascend;
use crate::content::Content;

impl<C: Content> MerkleTree<C> {
    /// Check every stored hash against a fresh computation.
    ///
    /// Leaves are re-hashed from their content, internal nodes from their
    /// children's stored hashes, and the root node is compared with the
    /// cached root digest.
    pub fn verify_tree(&self) -> Result<bool, VerifyError> {
        let mut fresh: Vec<Bytes> = Vec::with_capacity(self.leaves.len());
        for (index, &id) in self.leaves.iter().enumerate() {
            let node = self.node_at(id);
            let expected = match node.content() {
                Some(content) => content
                    .calculate_hash()
                    .map_err(|source| VerifyError::leaf_hash(index, source))?,
                // padding repeats the leaf right before it
                None => match fresh.last() {
                    Some(previous) => previous.clone(),
                    None => return Ok(false),
                },
            };

            if node.hash != expected {
                tracing::debug!(node = %id, leaf = index, "leaf hash mismatch");
                return Ok(false);
            }
            fresh.push(expected);
        }

        let mut hasher = self.strategy.hasher();
        for (index, node) in self.nodes.iter().enumerate() {
            let Some((left, right)) = node.children() else {
                continue;
            };

            let expected = hasher.combine(&self.node_at(left).hash, &self.node_at(right).hash);
            if node.hash != expected {
                tracing::debug!(node = index, "internal hash mismatch");
                return Ok(false);
            }
        }

        if self.root().hash != self.root_hash {
            tracing::debug!(node = %self.root, "root hash differs from cached merkle root");
            return Ok(false);
        }

        Ok(true)
    }

    /// Check that `item` is stored in the tree and that its path to the
    /// root is intact.
    ///
    /// Returns `Ok(false)` when the item is not in the tree.
    pub fn verify_content(&self, item: &C) -> Result<bool, VerifyError> {
        let Some(index) = self.find_leaf(item)? else {
            return Ok(false);
        };

        let leaf = self.leaves[index];
        let leaf_hash = match self.node_at(leaf).content() {
            Some(content) => content
                .calculate_hash()
                .map_err(|source| VerifyError::leaf_hash(index, source))?,
            None => return Ok(false),
        };

        let mut hasher = self.strategy.hasher();
        let mut ascend = Ascend::new(self, leaf);
        let mut running = leaf_hash;
        while let Some((sibling, direction)) = ascend.next() {
            running = direction.combine(&mut hasher, &running, &sibling.hash);

            let parent = ascend.position();
            if self.node_at(parent).hash != running {
                tracing::debug!(leaf = index, node = %parent, "hash mismatch on content path");
                return Ok(false);
            }
        }

        if running != self.root_hash || running != self.root().hash {
            tracing::debug!(leaf = index, "content path does not reach the merkle root");
            return Ok(false);
        }
        Ok(true)
    }

    /// Position of the first real leaf whose content equals `item`.
    pub(crate) fn find_leaf(&self, item: &C) -> Result<Option<usize>, VerifyError> {
        for (index, node) in self.leaves().enumerate() {
            let Some(content) = node.content() else {
                continue;
            };

            if content
                .equals(item)
                .map_err(|source| VerifyError::compare(index, source))?
            {
                return Ok(Some(index));
            }
        }

        Ok(None)
    }
}
