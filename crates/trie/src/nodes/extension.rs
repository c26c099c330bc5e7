use super::rlp_node;
use crate::Nibbles;
use mpt_rlp::{BufMut, Encodable, Header};
use smallvec::SmallVec;

/// An extension node compressing a run of single-child branches.
///
/// It carries a shared key segment and a single child reference. The child is
/// stored in its final reference form, either an embedded node or a hash.
pub struct ExtensionNode<'a> {
    /// The hex-prefix encoded shared key segment.
    pub prefix: SmallVec<[u8; 36]>,
    /// The child reference, already in RLP form.
    pub node: &'a [u8],
}

impl<'a> ExtensionNode<'a> {
    /// Creates a new extension node from the shared segment and child reference.
    pub fn new(prefix: &Nibbles, node: &'a [u8]) -> Self {
        Self { prefix: prefix.encode_path_leaf(false), node }
    }

    /// RLP encodes the node and returns either RLP(node) or RLP(keccak(RLP(node))).
    pub fn rlp(&self, buf: &mut Vec<u8>) -> Vec<u8> {
        self.encode(buf);
        rlp_node(buf)
    }
}

impl Encodable for ExtensionNode<'_> {
    fn encode(&self, out: &mut dyn BufMut) {
        let header = Header {
            list: true,
            payload_length: self.prefix.as_slice().length() + self.node.len(),
        };
        header.encode(out);
        self.prefix.as_slice().encode(out);
        // The child is already RLP encoded
        out.put_slice(self.node);
    }

    fn length(&self) -> usize {
        let payload_length = self.prefix.as_slice().length() + self.node.len();
        payload_length + Header { list: true, payload_length }.length()
    }
}

impl std::fmt::Debug for ExtensionNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionNode")
            .field("prefix", &mpt_common::to_hex(&self.prefix, true))
            .field("node", &mpt_common::to_hex(self.node, true))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn rlp_encoding() {
        let prefix = Nibbles::from_nibbles([0x6, 0x4]);
        let child = hex!("c22001");
        let ext = ExtensionNode::new(&prefix, &child);

        let mut buf = Vec::new();
        ext.encode(&mut buf);
        assert_eq!(buf, hex!("c6820064c22001"));
        assert_eq!(ext.length(), buf.len());
    }
}
