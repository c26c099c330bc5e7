//! Merkle-Patricia Trie root hashing.
//!
//! The entry point is the [`HashBuilder`], which computes the root hash of a
//! trie from `(nibble key, value)` pairs fed in strictly ascending key order,
//! without ever materializing the trie itself. On top of it,
//! [`ordered_trie_root`] and friends hash index-keyed collections such as
//! transaction or receipt lists.

use alloy_primitives::{b256, B256};

mod nibbles;
pub use nibbles::Nibbles;

mod mask;
pub use mask::TrieMask;

pub mod nodes;

mod hash_builder;
pub use hash_builder::{HashBuilder, HashBuilderValue};

mod root;
pub use root::{
    adjust_index_for_rlp, ordered_trie_root, ordered_trie_root_encoded,
    ordered_trie_root_with_encoder,
};

/// Root hash of an empty trie: `keccak256(rlp(""))`.
pub const EMPTY_ROOT_HASH: B256 =
    b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");


#[cfg(test)]
pub(crate) fn triehash_trie_root<I, K, V>(iter: I) -> B256
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<[u8]> + Ord,
    V: AsRef<[u8]>,
{
    ::triehash::trie_root::<triehash::KeccakHasher, _, _, _>(iter)
}

#[cfg(test)]
pub(crate) fn triehash_ordered_trie_root<I, V>(iter: I) -> B256
where
    I: IntoIterator<Item = V>,
    V: AsRef<[u8]>,
{
    ::triehash::ordered_trie_root::<triehash::KeccakHasher, _>(iter)
}
