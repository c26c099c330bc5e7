use super::rlp_node;
use crate::Nibbles;
use mpt_rlp::{BufMut, Encodable, Header};
use smallvec::SmallVec;

/// A leaf node holding the remainder of a key and its value.
///
/// The key remainder is hex-prefix encoded with the leaf flag set, see
/// [`Nibbles::encode_path_leaf`].
pub struct LeafNode<'a> {
    /// The hex-prefix encoded remainder of the key.
    pub prefix: SmallVec<[u8; 36]>,
    /// The raw value.
    pub value: &'a [u8],
}

impl<'a> LeafNode<'a> {
    /// Creates a new leaf node from the key remainder and value.
    pub fn new(key: &Nibbles, value: &'a [u8]) -> Self {
        Self { prefix: key.encode_path_leaf(true), value }
    }

    /// RLP encodes the node and returns either RLP(node) or RLP(keccak(RLP(node))).
    pub fn rlp(&self, buf: &mut Vec<u8>) -> Vec<u8> {
        self.encode(buf);
        rlp_node(buf)
    }
}

impl Encodable for LeafNode<'_> {
    fn encode(&self, out: &mut dyn BufMut) {
        let header = Header {
            list: true,
            payload_length: self.prefix.as_slice().length() + self.value.length(),
        };
        header.encode(out);
        self.prefix.as_slice().encode(out);
        self.value.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.prefix.as_slice().length() + self.value.length();
        payload_length + Header { list: true, payload_length }.length()
    }
}

impl std::fmt::Debug for LeafNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeafNode")
            .field("prefix", &mpt_common::to_hex(&self.prefix, true))
            .field("value", &mpt_common::to_hex(self.value, true))
            .finish()
    }
}
