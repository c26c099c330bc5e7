//! Standalone encodings of the three trie node kinds.

use alloy_primitives::{keccak256, B256};
use mpt_rlp::EMPTY_STRING_CODE;

mod branch;
pub use branch::BranchNode;

mod extension;
pub use extension::ExtensionNode;

mod leaf;
pub use leaf::LeafNode;

/// Given an RLP encoded node, returns either RLP(node) or RLP(keccak(RLP(node))).
///
/// Nodes whose encoding is shorter than a hash are embedded into their parent
/// verbatim; everything else is referenced by its Keccak-256 hash.
pub(crate) fn rlp_node(rlp: &[u8]) -> Vec<u8> {
    if rlp.len() < B256::len_bytes() {
        rlp.to_vec()
    } else {
        word_rlp(&keccak256(rlp))
    }
}

/// Encodes a 32-byte hash as an RLP string.
pub fn word_rlp(word: &B256) -> Vec<u8> {
    let mut out = Vec::with_capacity(B256::len_bytes() + 1);
    out.push(EMPTY_STRING_CODE + B256::len_bytes() as u8);
    out.extend_from_slice(word.as_slice());
    out
}
