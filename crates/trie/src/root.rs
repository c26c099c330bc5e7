//! Root hashes of ordered collections, keyed by their RLP encoded index.

use crate::{HashBuilder, Nibbles, EMPTY_ROOT_HASH};
use alloy_primitives::B256;
use mpt_rlp::Encodable;

/// Adjust the index of an item for rlp encoding.
///
/// Indices are inserted in the order `1, 2, ..., 0x7f, 0, 0x80, 0x81, ...` so
/// that the RLP encoded keys reach the hash builder in ascending nibble
/// order: `rlp(1) < rlp(2) < ... < rlp(0x7f) < rlp(0) = 0x80 < rlp(0x80)`.
/// The mapping is a bijection on `0..len`.
pub const fn adjust_index_for_rlp(i: usize, len: usize) -> usize {
    if i > 0x7f {
        i
    } else if i == 0x7f || i + 1 == len {
        0
    } else {
        i + 1
    }
}

/// Compute a trie root of the collection of rlp encodable items.
pub fn ordered_trie_root<T: Encodable>(items: &[T]) -> B256 {
    ordered_trie_root_with_encoder(items, |item, buf| item.encode(buf))
}

/// Compute a trie root of the collection of items with a custom encoder.
pub fn ordered_trie_root_with_encoder<T, F>(items: &[T], mut encode: F) -> B256
where
    F: FnMut(&T, &mut Vec<u8>),
{
    if items.is_empty() {
        return EMPTY_ROOT_HASH
    }

    let mut value_buffer = Vec::new();

    let mut hb = HashBuilder::default();
    let items_len = items.len();
    for i in 0..items_len {
        let index = adjust_index_for_rlp(i, items_len);

        let index_buffer = mpt_rlp::encode_fixed_size(&index);

        value_buffer.clear();
        encode(&items[index], &mut value_buffer);

        hb.add_leaf(Nibbles::unpack(&index_buffer), &value_buffer);
    }

    hb.root()
}

/// Compute a trie root of the collection of pre-encoded items.
///
/// This is an optimized version of [`ordered_trie_root_with_encoder`] for
/// items that are already encoded, e.g. opaque transaction envelopes.
pub fn ordered_trie_root_encoded<T>(items: &[T]) -> B256
where
    T: AsRef<[u8]>,
{
    if items.is_empty() {
        return EMPTY_ROOT_HASH
    }

    let mut hb = HashBuilder::default();
    let items_len = items.len();
    for i in 0..items_len {
        let index = adjust_index_for_rlp(i, items_len);

        let index_buffer = mpt_rlp::encode_fixed_size(&index);
        hb.add_leaf(Nibbles::unpack(&index_buffer), items[index].as_ref());
    }

    hb.root()
}
