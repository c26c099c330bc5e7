//! The incremental hash builder.

use crate::{
    nodes::{word_rlp, BranchNode, ExtensionNode, LeafNode},
    Nibbles, TrieMask, EMPTY_ROOT_HASH,
};
use alloy_primitives::{keccak256, B256};
use core::cmp;
use tracing::trace;

mod value;
pub use value::HashBuilderValue;

/// Computes the root hash of a Merkle-Patricia Trie from leaves fed in
/// strictly ascending key order, without materializing the trie.
///
/// The builder keeps a stack of node references. Every new leaf collapses the
/// part of the previous key that is no longer a shared prefix: fully built
/// subtrees are folded into leaf, extension and branch node encodings, so the
/// stack never grows beyond one frame per nibble of the current key. After
/// the last leaf, [`root`](Self::root) collapses what remains and hashes the
/// top of the stack.
#[derive(Clone, Debug, Default)]
pub struct HashBuilder {
    key: Nibbles,
    value: HashBuilderValue,
    stack: Vec<Vec<u8>>,
    state_masks: Vec<TrieMask>,

    rlp_buf: Vec<u8>,
}

impl HashBuilder {
    /// Creates an empty hash builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new leaf element and its value to the trie hash builder.
    ///
    /// # Panics
    ///
    /// Panics if the new key does not come after the current key.
    pub fn add_leaf(&mut self, key: Nibbles, value: &[u8]) {
        assert!(key > self.key, "add_leaf key {:?} self.key {:?}", key, self.key);
        self.add_leaf_unchecked(key, value);
    }

    /// Adds a new leaf element and its value to the trie hash builder,
    /// without checking the order of the new key. This is only for
    /// performance-critical usage that guarantees keys are inserted
    /// in sorted order.
    pub fn add_leaf_unchecked(&mut self, key: Nibbles, value: &[u8]) {
        debug_assert!(key > self.key, "add_leaf_unchecked key {:?} self.key {:?}", key, self.key);
        if !self.key.is_empty() {
            self.update(&key);
        }
        self.set_key_value(key, value.into());
    }

    /// Adds a new branch element and its hash to the trie hash builder.
    pub fn add_branch(&mut self, key: Nibbles, value: B256) {
        assert!(
            key > self.key || (self.key.is_empty() && key.is_empty()),
            "add_branch key {:?} self.key {:?}",
            key,
            self.key
        );
        if !self.key.is_empty() {
            self.update(&key);
        } else if key.is_empty() {
            self.stack.push(word_rlp(&value));
        }
        self.set_key_value(key, value.into());
    }

    /// Returns the current root hash of the trie builder.
    ///
    /// An empty builder yields [`EMPTY_ROOT_HASH`]. The root node is always
    /// hashed, even when its encoding is shorter than a hash.
    pub fn root(&mut self) -> B256 {
        // Clears the internal state
        if !self.key.is_empty() {
            self.update(&Nibbles::default());
            self.key.clear();
            self.value.clear();
        }

        if let Some(node_ref) = self.stack.last() {
            // A node reference of 33 bytes is an RLP string holding the hash
            if node_ref.len() == B256::len_bytes() + 1 {
                B256::from_slice(&node_ref[1..])
            } else {
                keccak256(node_ref)
            }
        } else {
            EMPTY_ROOT_HASH
        }
    }

    fn set_key_value(&mut self, key: Nibbles, value: HashBuilderValue) {
        trace!(target: "trie::hash_builder", key = ?self.key, value = ?self.value, "old key/value");
        self.key = key;
        self.value = value;
        trace!(target: "trie::hash_builder", key = ?self.key, value = ?self.value, "new key/value");
    }

    /// Folds the part of the current key that is no longer shared with the
    /// succeeding key, pushing the resulting node encodings onto the stack.
    /// An empty succeeding key collapses everything.
    fn update(&mut self, succeeding: &Nibbles) {
        let mut build_extensions = false;
        // current / self.key is always the latest added element in the trie
        let mut current = self.key.clone();
        debug_assert!(!current.is_empty());

        trace!(target: "trie::hash_builder", ?current, ?succeeding, "updating merkle tree");

        loop {
            let preceding_exists = !self.state_masks.is_empty();
            let preceding_len = self.state_masks.len().saturating_sub(1);

            let common_prefix_len = succeeding.common_prefix_length(&current);
            let len = cmp::max(preceding_len, common_prefix_len);
            assert!(len < current.len(), "len {} current.len {}", len, current.len());

            trace!(
                target: "trie::hash_builder",
                ?len,
                ?common_prefix_len,
                ?preceding_len,
                preceding_exists,
                "prefix lengths after comparing keys"
            );

            // Adjust the state masks for branch calculation
            let extra_digit = current.get_unchecked(len);
            if self.state_masks.len() <= len {
                self.state_masks.resize(len + 1, TrieMask::default());
            }
            self.state_masks[len] |= TrieMask::from_nibble(extra_digit);

            let mut len_from = len;
            if !succeeding.is_empty() || preceding_exists {
                len_from += 1;
            }

            // The key without the common prefix
            let short_node_key = current.slice(len_from..);
            trace!(target: "trie::hash_builder", ?short_node_key);

            if !build_extensions {
                match &self.value {
                    HashBuilderValue::Bytes(leaf_value) => {
                        let leaf_node = LeafNode::new(&short_node_key, leaf_value);
                        self.rlp_buf.clear();
                        let rlp = leaf_node.rlp(&mut self.rlp_buf);
                        trace!(target: "trie::hash_builder", ?leaf_node, "pushing leaf node");
                        self.stack.push(rlp);
                    }
                    HashBuilderValue::Hash(hash) => {
                        trace!(target: "trie::hash_builder", ?hash, "pushing branch node hash");
                        self.stack.push(word_rlp(hash));
                        build_extensions = true;
                    }
                }
            }

            if build_extensions && !short_node_key.is_empty() {
                let stack_last =
                    self.stack.pop().expect("there should be at least one stack item");
                let extension_node = ExtensionNode::new(&short_node_key, &stack_last);
                self.rlp_buf.clear();
                let rlp = extension_node.rlp(&mut self.rlp_buf);
                trace!(target: "trie::hash_builder", ?extension_node, "pushing extension node");
                self.stack.push(rlp);
            }

            if preceding_len <= common_prefix_len && !succeeding.is_empty() {
                trace!(target: "trie::hash_builder", "no common prefix to create branch nodes from, returning");
                return
            }

            // Insert branch nodes in the stack
            if !succeeding.is_empty() || preceding_exists {
                self.push_branch_node(len);
            }

            self.state_masks.resize(len, TrieMask::default());

            if preceding_len == 0 {
                trace!(target: "trie::hash_builder", "no more state masks, exiting");
                return
            }

            current.truncate(preceding_len);
            trace!(target: "trie::hash_builder", ?current, "truncated nibbles to {} nibbles", preceding_len);

            while self.state_masks.last() == Some(&TrieMask::default()) {
                self.state_masks.pop();
            }

            build_extensions = true;
        }
    }

    /// Builds a branch node from the state mask and the children on top of
    /// the stack, replacing them with the branch node encoding.
    fn push_branch_node(&mut self, len: usize) {
        let state_mask = self.state_masks[len];
        let branch_node = BranchNode::new(&self.stack, state_mask);
        self.rlp_buf.clear();
        let rlp = branch_node.rlp(&mut self.rlp_buf);
        trace!(target: "trie::hash_builder", ?branch_node, "pushing branch node");

        // Clears the stack from the branch node elements
        let first_child_idx = self.stack.len() - state_mask.count_ones() as usize;
        self.stack.truncate(first_child_idx);
        self.stack.push(rlp);
    }
}
