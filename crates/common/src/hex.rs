const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encodes `bytes` as a lowercase hex string, optionally prepending `0x`.
pub fn to_hex(bytes: &[u8], with_prefix: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 2 + if with_prefix { 2 } else { 0 });
    if with_prefix {
        out.push_str("0x");
    }
    for b in bytes {
        out.push(HEX_DIGITS[(b >> 4) as usize] as char);
        out.push(HEX_DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}

/// Decodes a single hex digit. Both cases are accepted.
pub fn decode_hex_digit(ch: char) -> Option<u8> {
    ch.to_digit(16).map(|d| d as u8)
}

/// Decodes a hex string into bytes.
///
/// An optional `0x`/`0X` prefix is stripped. An odd number of digits is
/// treated as if a zero digit was prepended, so `"0x1"` decodes the same as
/// `"0x01"`. Returns `None` on any non-hex digit.
pub fn from_hex(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")).unwrap_or(hex);
    if hex.is_empty() {
        return Some(Vec::new());
    }

    let mut out = Vec::with_capacity(hex.len().div_ceil(2));
    let mut digits = hex.chars();

    if hex.len() % 2 == 1 {
        out.push(decode_hex_digit(digits.next()?)?);
    }
    while let Some(hi) = digits.next() {
        let lo = digits.next()?;
        out.push((decode_hex_digit(hi)? << 4) | decode_hex_digit(lo)?);
    }
    Some(out)
}
