//! Canonical RLP encoding.
//!
//! RLP (Recursive Length Prefix) serializes byte strings and lists of items
//! into length-prefixed payloads. This crate implements the encode direction
//! only; the trie layer never needs to decode.

mod types;
pub use types::{Header, EMPTY_LIST_CODE, EMPTY_STRING_CODE};

mod encode;
pub use encode::{
    encode_fixed_size, encode_iter, encode_list, length_of_length, list_length, Encodable,
    MaxEncodedLen, MaxEncodedLenAssoc,
};

pub use bytes::{self, BufMut, Bytes, BytesMut};
