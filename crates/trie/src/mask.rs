use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// A bitmask over the sixteen possible nibble values.
///
/// Bit `n` set means a branch child exists for nibble `n`.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrieMask(u16);

impl TrieMask {
    /// Creates a new mask from the given bits.
    pub const fn new(inner: u16) -> Self {
        Self(inner)
    }

    /// Creates a new mask with the bit for `nibble` set.
    pub const fn from_nibble(nibble: u8) -> Self {
        Self(1u16 << nibble)
    }

    /// Returns `true` if the bit for `index` is set.
    pub const fn is_bit_set(self, index: u8) -> bool {
        self.0 & (1u16 << index) != 0
    }

    /// Returns `true` if no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of set bits.
    pub const fn count_ones(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns `true` if every set bit is also set in `other`.
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & other.0 == self.0
    }

    /// Returns the raw bits.
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl BitOr for TrieMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TrieMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for TrieMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for TrieMask {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl std::fmt::Debug for TrieMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrieMask({:016b})", self.0)
    }
}
