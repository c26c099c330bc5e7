//! Shared byte-level utilities: hex conversion, zeroless views and the
//! compact big-endian integer codec.

mod compact;
pub use compact::{BigCompact, DecodeError};

mod hex;
pub use hex::{decode_hex_digit, from_hex, to_hex};

/// Returns a view of `data` with all leading zero bytes stripped.
///
/// An all-zero input yields an empty view.
pub fn zeroless_view(data: &[u8]) -> &[u8] {
    &data[data.iter().take_while(|&&b| b == 0).count()..]
}

/// Returns the length of the longest common prefix of `a` and `b`.
pub fn prefix_length(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn zeroless() {
        assert_eq!(zeroless_view(&[]), &[] as &[u8]);
        assert_eq!(zeroless_view(&hex!("0000")), &[] as &[u8]);
        assert_eq!(zeroless_view(&hex!("0001")), &hex!("01"));
        assert_eq!(zeroless_view(&hex!("a1b2")), &hex!("a1b2"));
        assert_eq!(zeroless_view(&hex!("00a100")), &hex!("a100"));
    }

    #[test]
    fn common_prefix() {
        assert_eq!(prefix_length(&[], &[]), 0);
        assert_eq!(prefix_length(&hex!("1234"), &hex!("1234")), 2);
        assert_eq!(prefix_length(&hex!("1234"), &hex!("123456")), 2);
        assert_eq!(prefix_length(&hex!("1234"), &hex!("1334")), 1);
        assert_eq!(prefix_length(&hex!("1234"), &hex!("ab")), 0);
    }
}
