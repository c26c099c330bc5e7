use crate::zeroless_view;
use arrayvec::ArrayVec;

/// Error returned when parsing a compact big-endian encoding fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input is wider than the target integer type.
    #[error("input too long for the target integer width")]
    Overflow,
    /// The input starts with a zero byte, i.e. it is not minimal.
    #[error("compact encoding must not have leading zero bytes")]
    LeadingZero,
}

/// Compact big-endian encoding of unsigned integers.
///
/// The compact form strips all leading zero bytes, so zero encodes to the
/// empty byte string. Decoding rejects non-minimal input.
pub trait BigCompact: Sized {
    /// The buffer type holding the encoded bytes.
    type Buf: AsRef<[u8]>;

    /// Returns the minimal big-endian byte representation of `self`.
    fn to_big_compact(&self) -> Self::Buf;

    /// Parses an integer from its compact big-endian representation.
    fn from_big_compact(data: &[u8]) -> Result<Self, DecodeError>;
}

macro_rules! impl_big_compact {
    ($($t:ty),*) => {$(
        impl BigCompact for $t {
            type Buf = ArrayVec<u8, { core::mem::size_of::<$t>() }>;

            fn to_big_compact(&self) -> Self::Buf {
                let be = self.to_be_bytes();
                let mut out = Self::Buf::new();
                out.extend(zeroless_view(&be).iter().copied());
                out
            }

            fn from_big_compact(data: &[u8]) -> Result<Self, DecodeError> {
                if data.len() > core::mem::size_of::<$t>() {
                    return Err(DecodeError::Overflow)
                }
                if data.is_empty() {
                    return Ok(0)
                }
                if data[0] == 0 {
                    return Err(DecodeError::LeadingZero)
                }

                let mut buf = [0u8; core::mem::size_of::<$t>()];
                buf[core::mem::size_of::<$t>() - data.len()..].copy_from_slice(data);
                Ok(<$t>::from_be_bytes(buf))
            }
        }
    )*};
}

impl_big_compact!(u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use proptest::prelude::*;

    #[test]
    fn encode_u64() {
        assert_eq!(0u64.to_big_compact().as_ref(), &[] as &[u8]);
        assert_eq!(1u64.to_big_compact().as_ref(), &hex!("01"));
        assert_eq!(0xff_u64.to_big_compact().as_ref(), &hex!("ff"));
        assert_eq!(0x0100_u64.to_big_compact().as_ref(), &hex!("0100"));
        assert_eq!(0xdeadbeef_u64.to_big_compact().as_ref(), &hex!("deadbeef"));
        assert_eq!(u64::MAX.to_big_compact().as_ref(), &hex!("ffffffffffffffff"));
    }

    #[test]
    fn decode_u64() {
        assert_eq!(u64::from_big_compact(&[]), Ok(0));
        assert_eq!(u64::from_big_compact(&hex!("01")), Ok(1));
        assert_eq!(u64::from_big_compact(&hex!("0100")), Ok(0x0100));
        assert_eq!(u64::from_big_compact(&hex!("ffffffffffffffff")), Ok(u64::MAX));
    }

    #[test]
    fn roundtrip_u8() {
        assert_eq!(0u8.to_big_compact().as_ref(), &[] as &[u8]);
        assert_eq!(0x7f_u8.to_big_compact().as_ref(), &hex!("7f"));
        assert_eq!(u8::from_big_compact(&[]), Ok(0));
        assert_eq!(u8::from_big_compact(&hex!("ff")), Ok(u8::MAX));
    }

    #[test]
    fn decode_rejects_overflow() {
        assert_eq!(u8::from_big_compact(&hex!("0100")), Err(DecodeError::Overflow));
        assert_eq!(u16::from_big_compact(&hex!("010000")), Err(DecodeError::Overflow));
        assert_eq!(
            u64::from_big_compact(&hex!("010000000000000000")),
            Err(DecodeError::Overflow)
        );
    }

    #[test]
    fn decode_rejects_leading_zero() {
        assert_eq!(u64::from_big_compact(&hex!("00")), Err(DecodeError::LeadingZero));
        assert_eq!(u64::from_big_compact(&hex!("0001")), Err(DecodeError::LeadingZero));
    }

    proptest! {
        #[test]
        fn roundtrip_u64(value: u64) {
            let encoded = value.to_big_compact();
            prop_assert_eq!(u64::from_big_compact(encoded.as_ref()), Ok(value));
        }

        #[test]
        fn roundtrip_u128(value: u128) {
            let encoded = value.to_big_compact();
            prop_assert_eq!(u128::from_big_compact(encoded.as_ref()), Ok(value));
        }
    }
}
