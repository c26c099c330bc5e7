use super::rlp_node;
use crate::TrieMask;
use mpt_rlp::{BufMut, Encodable, Header, EMPTY_STRING_CODE};

/// A branch node with up to sixteen children, one per nibble.
///
/// The children are borrowed from the top of the hash builder stack: the
/// lowest set nibble of `state_mask` corresponds to the deepest of the
/// `state_mask.count_ones()` topmost stack items. Absent children and the
/// (always empty) value slot encode as empty strings.
pub struct BranchNode<'a> {
    /// The rlp node stack the children are taken from.
    pub stack: &'a [Vec<u8>],
    /// The bitmask of present children.
    pub state_mask: TrieMask,
}

impl<'a> BranchNode<'a> {
    /// Creates a new branch node over the given stack.
    ///
    /// # Panics
    ///
    /// Panics if the stack holds fewer items than `state_mask` has bits set.
    pub fn new(stack: &'a [Vec<u8>], state_mask: TrieMask) -> Self {
        assert!(stack.len() >= state_mask.count_ones() as usize);
        Self { stack, state_mask }
    }

    /// RLP encodes the node and returns either RLP(node) or RLP(keccak(RLP(node))).
    pub fn rlp(&self, buf: &mut Vec<u8>) -> Vec<u8> {
        self.encode(buf);
        rlp_node(buf)
    }

    /// The position in the stack of the child for the lowest set nibble.
    fn first_child_index(&self) -> usize {
        self.stack.len() - self.state_mask.count_ones() as usize
    }

    fn payload_length(&self) -> usize {
        let mut payload_length = 1;
        let mut stack_ptr = self.first_child_index();
        for digit in 0..16 {
            if self.state_mask.is_bit_set(digit) {
                payload_length += self.stack[stack_ptr].len();
                stack_ptr += 1;
            } else {
                payload_length += 1;
            }
        }
        payload_length
    }
}

impl Encodable for BranchNode<'_> {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.payload_length() }.encode(out);

        let mut stack_ptr = self.first_child_index();
        for digit in 0..16 {
            if self.state_mask.is_bit_set(digit) {
                // Children are already RLP encoded
                out.put_slice(&self.stack[stack_ptr]);
                stack_ptr += 1;
            } else {
                out.put_u8(EMPTY_STRING_CODE);
            }
        }

        // The value slot is always empty for the tries built here
        out.put_u8(EMPTY_STRING_CODE);
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_length();
        payload_length + Header { list: true, payload_length }.length()
    }
}

impl std::fmt::Debug for BranchNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchNode")
            .field("stack", &self.stack.iter().map(|x| mpt_common::to_hex(x, true)).collect::<Vec<_>>())
            .field("state_mask", &self.state_mask)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn empty_branch() {
        let branch = BranchNode::new(&[], TrieMask::default());
        let mut buf = Vec::new();
        branch.encode(&mut buf);
        // 17 empty strings
        assert_eq!(buf, hex!("d18080808080808080808080808080808080"));
        assert_eq!(branch.length(), buf.len());
    }

    #[test]
    fn children_fill_mask_positions() {
        let stack = vec![hex!("c22001").to_vec(), hex!("c22002").to_vec()];
        let branch = BranchNode::new(&stack, TrieMask::new(0b0000_0000_1001_0000));

        let mut buf = Vec::new();
        branch.encode(&mut buf);
        let mut expected = vec![0xc0 + 21];
        expected.extend_from_slice(&hex!("80808080"));
        expected.extend_from_slice(&hex!("c22001"));
        expected.extend_from_slice(&hex!("8080"));
        expected.extend_from_slice(&hex!("c22002"));
        expected.extend_from_slice(&hex!("8080808080808080"));
        expected.push(0x80);
        assert_eq!(buf, expected);
        assert_eq!(branch.length(), buf.len());
    }
}
