use alloy_primitives::B256;

/// The current value held by the hash builder.
///
/// Leaves carry raw value bytes, while subtrees fed in through
/// [`HashBuilder::add_branch`](super::HashBuilder::add_branch) carry a hash.
#[derive(Clone, PartialEq, Eq)]
pub enum HashBuilderValue {
    /// Value of the leaf node.
    Bytes(Vec<u8>),
    /// Hash of adjacent nodes.
    Hash(B256),
}

impl HashBuilderValue {
    /// Resets the value to empty bytes.
    pub fn clear(&mut self) {
        *self = Self::Bytes(Vec::new());
    }
}

impl Default for HashBuilderValue {
    fn default() -> Self {
        Self::Bytes(Vec::new())
    }
}

impl std::fmt::Debug for HashBuilderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes(bytes) => write!(f, "Bytes({})", mpt_common::to_hex(bytes, true)),
            Self::Hash(hash) => write!(f, "Hash({hash})"),
        }
    }
}

impl From<Vec<u8>> for HashBuilderValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for HashBuilderValue {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<B256> for HashBuilderValue {
    fn from(value: B256) -> Self {
        Self::Hash(value)
    }
}
