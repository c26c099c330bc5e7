use smallvec::SmallVec;
use std::ops::{Bound, RangeBounds};

/// The nibbles are the keys for the trie, one hex digit per element.
///
/// A nibble key is unpacked from bytes high nibble first, so the byte key
/// `0x12 0x34` becomes the nibbles `[0x1, 0x2, 0x3, 0x4]`. Keys compare in
/// lexicographic nibble order, which matches the in-trie ordering of the
/// packed byte keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nibbles(SmallVec<[u8; 64]>);

impl std::ops::Deref for Nibbles {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Nibbles {
    /// Creates a new empty [`Nibbles`] instance.
    pub const fn new() -> Self {
        Self(SmallVec::new_const())
    }

    /// Creates nibbles from the given nibble values.
    ///
    /// # Panics
    ///
    /// Panics if any of the values is not a valid nibble (`> 0xf`).
    pub fn from_nibbles<T: AsRef<[u8]>>(nibbles: T) -> Self {
        let nibbles = nibbles.as_ref();
        assert!(nibbles.iter().all(|&nibble| nibble <= 0xf), "nibbles out of range");
        Self::from_nibbles_unchecked(nibbles)
    }

    /// Creates nibbles from the given nibble values, without checking their
    /// range. Values above `0xf` produce nonsensical packed keys.
    pub fn from_nibbles_unchecked<T: AsRef<[u8]>>(nibbles: T) -> Self {
        Self(SmallVec::from_slice(nibbles.as_ref()))
    }

    /// Converts a byte slice into a [`Nibbles`] instance containing the
    /// nibbles (half-bytes or 4 bits) that make up the input byte data.
    pub fn unpack<T: AsRef<[u8]>>(data: T) -> Self {
        let data = data.as_ref();
        let mut nibbles = SmallVec::with_capacity(data.len() * 2);
        for byte in data {
            nibbles.push(byte >> 4);
            nibbles.push(byte & 0x0f);
        }
        Self(nibbles)
    }

    /// Packs the nibbles back into bytes, two nibbles per byte.
    ///
    /// An odd number of nibbles is padded with a trailing zero nibble, so
    /// `[0x1, 0x2, 0x3]` packs to `0x12 0x30`.
    pub fn pack(&self) -> SmallVec<[u8; 32]> {
        let mut packed = SmallVec::with_capacity(self.0.len().div_ceil(2));
        for chunk in self.0.chunks(2) {
            let hi = chunk[0] << 4;
            let lo = chunk.get(1).copied().unwrap_or_default();
            packed.push(hi | lo);
        }
        packed
    }

    /// Encodes a given path leaf as a compact array of bytes, where each byte
    /// represents two "nibbles" (half-bytes or 4 bits) of the original hex
    /// data, along with a flag byte.
    ///
    /// The flag nibble of the first byte carries `0x2` for leaves and `0x1`
    /// for an odd number of nibbles; the first nibble of an odd path shares
    /// the flag byte.
    pub fn encode_path_leaf(&self, is_leaf: bool) -> SmallVec<[u8; 36]> {
        let mut encoded = SmallVec::with_capacity(self.0.len() / 2 + 1);
        let odd = self.0.len() % 2 != 0;

        let mut first = if is_leaf { 0x20 } else { 0x00 };
        if odd {
            first |= 0x10 | self.0[0];
        }
        encoded.push(first);

        for chunk in self.0[odd as usize..].chunks_exact(2) {
            encoded.push(chunk[0] << 4 | chunk[1]);
        }
        encoded
    }

    /// The number of nibbles in the key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the key is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the nibbles as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns the nibble at the given index, skipping the bounds check in
    /// release builds.
    pub fn get_unchecked(&self, index: usize) -> u8 {
        debug_assert!(index < self.0.len());
        self.0[index]
    }

    /// Returns the last nibble, if any.
    pub fn last(&self) -> Option<u8> {
        self.0.last().copied()
    }

    /// Appends a nibble.
    pub fn push(&mut self, nibble: u8) {
        self.0.push(nibble);
    }

    /// Clears the key.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Shortens the key to `len` nibbles.
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    /// Returns the nibbles in the given range as a new key.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end + 1,
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.0.len(),
        };
        Self::from_nibbles_unchecked(&self.0[start..end])
    }

    /// Returns the length of the common prefix with `other`.
    pub fn common_prefix_length(&self, other: &Self) -> usize {
        mpt_common::prefix_length(self, other)
    }

    /// Returns `true` if this key starts with `other`.
    pub fn starts_with(&self, other: &Self) -> bool {
        self.0.starts_with(other)
    }
}
