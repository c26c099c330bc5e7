/// The header of an RLP item, preceding string or list payloads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// True if the item is a list.
    pub list: bool,
    /// Length of the payload in bytes.
    pub payload_length: usize,
}

/// The RLP encoding of an empty string, also the base for short string prefixes.
pub const EMPTY_STRING_CODE: u8 = 0x80;

/// The RLP encoding of an empty list, also the base for short list prefixes.
pub const EMPTY_LIST_CODE: u8 = 0xC0;
