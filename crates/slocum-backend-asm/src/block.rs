//! Content-addressed block cache.
//!
//! A block is the text of one 8-slot group of a compiled channel. Blocks are
//! identified by the BLAKE3 hash of their trimmed text and stored once, in the
//! order they were first seen. That order is the label order.

use std::collections::HashMap;

use crate::error::AssembleError;

/// Prefix of every block label.
pub const LABEL_PREFIX: &str = "Pattern";

/// Reference to a block stored in a [`BlockCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockRef(usize);

impl BlockRef {
    /// Position of the block in first-occurrence order.
    pub fn position(&self) -> usize {
        self.0
    }
}

/// A deduplicated block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledBlock {
    /// Hex BLAKE3 hash of `canonical`.
    pub identity: String,
    /// Trimmed block text, the hashed content.
    pub canonical: String,
    /// Block text as emitted, including its trailing blank line.
    pub text: String,
}

/// Computes the content identity of a block.
pub fn block_identity(canonical: &str) -> String {
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Label of the block at `position` in first-occurrence order.
pub fn label_for(position: usize) -> String {
    format!("{}{}", LABEL_PREFIX, position + 1)
}

/// Insertion-ordered block store with O(1) identity lookup.
///
/// A cache lives for exactly one compilation; labels derived from it are only
/// meaningful for the song it was filled from.
#[derive(Debug, Default)]
pub struct BlockCache {
    blocks: Vec<CompiledBlock>,
    positions: HashMap<String, usize>,
}

impl BlockCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `text` unless an identical block is already present and
    /// returns the reference to the stored block.
    pub fn insert(&mut self, text: String) -> Result<BlockRef, AssembleError> {
        let identity = block_identity(text.trim());
        self.insert_identified(identity, text)
    }

    pub(crate) fn insert_identified(
        &mut self,
        identity: String,
        text: String,
    ) -> Result<BlockRef, AssembleError> {
        let canonical = text.trim().to_string();

        if let Some(&position) = self.positions.get(&identity) {
            if self.blocks[position].canonical != canonical {
                return Err(AssembleError::IdentityCollision { identity });
            }
            return Ok(BlockRef(position));
        }

        let position = self.blocks.len();
        self.blocks.push(CompiledBlock {
            identity: identity.clone(),
            canonical,
            text,
        });
        self.positions.insert(identity, position);
        Ok(BlockRef(position))
    }

    /// Returns the block behind a reference.
    pub fn get(&self, block: BlockRef) -> Option<&CompiledBlock> {
        self.blocks.get(block.0)
    }

    /// Returns the identity behind a reference.
    pub fn identity(&self, block: BlockRef) -> Option<&str> {
        self.get(block).map(|b| b.identity.as_str())
    }

    /// Number of distinct blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledBlock> {
        self.blocks.iter()
    }

    /// Assigns labels in first-occurrence order, one per stored block.
    ///
    /// The returned list is indexed by [`BlockRef::position`].
    pub fn labels(&self) -> Vec<String> {
        (0..self.blocks.len()).map(label_for).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REST_GROUP: &str = "    byte 255, 255\n    byte 255, 255\n    byte 255, 255\n    byte 255, 255\n\n    byte %00000000\n\n";

    #[test]
    fn test_identity_is_hash_of_trimmed_text() {
        let identity = block_identity(REST_GROUP.trim());
        assert_eq!(identity.len(), 64);
        assert_eq!(identity, block_identity(REST_GROUP.trim()));
        assert_ne!(identity, block_identity(REST_GROUP));
    }

    #[test]
    fn test_duplicates_share_reference() {
        let mut cache = BlockCache::new();
        let a = cache.insert(REST_GROUP.to_string()).unwrap();
        let b = cache.insert("    byte 1, 255\n".to_string()).unwrap();
        let c = cache.insert(REST_GROUP.to_string()).unwrap();

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(cache.len(), 2);
        assert_eq!(a.position(), 0);
        assert_eq!(b.position(), 1);
        assert_eq!(cache.get(a).unwrap().text, REST_GROUP);
    }

    #[test]
    fn test_whitespace_only_differences_collapse() {
        let mut cache = BlockCache::new();
        let a = cache.insert(REST_GROUP.to_string()).unwrap();
        let b = cache.insert(format!("\n{}\n", REST_GROUP)).unwrap();

        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_identity_collision_is_fatal() {
        let mut cache = BlockCache::new();
        cache
            .insert_identified("abc".to_string(), "    byte 1, 2\n".to_string())
            .unwrap();

        let err = cache
            .insert_identified("abc".to_string(), "    byte 3, 4\n".to_string())
            .unwrap_err();
        assert!(matches!(err, AssembleError::IdentityCollision { identity } if identity == "abc"));
    }

    #[test]
    fn test_labels_follow_insertion_order() {
        let mut cache = BlockCache::new();
        cache.insert("b".to_string()).unwrap();
        cache.insert("a".to_string()).unwrap();
        cache.insert("b".to_string()).unwrap();

        assert_eq!(cache.labels(), vec!["Pattern1", "Pattern2"]);
        assert_eq!(label_for(9), "Pattern10");
    }
}
