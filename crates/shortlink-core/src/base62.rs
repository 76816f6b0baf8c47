use crate::error::CoreError;
use smol_str::SmolStr;

/// Symbol order used for base-62 encoding: digits, lowercase, uppercase.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of symbols needed to encode `u64::MAX`.
pub const MAX_ENCODED_LEN: usize = 11;

const BASE: u64 = 62;

/// Encodes `value` as base-62, most-significant symbol first.
///
/// Zero encodes to `"0"`; no other value has a leading `'0'`.
///
/// # Examples
///
/// ```
/// use shortlink_core::base62;
///
/// assert_eq!(base62::encode(0), "0");
/// assert_eq!(base62::encode(61), "Z");
/// assert_eq!(base62::encode(62), "10");
/// ```
pub fn encode(mut value: u64) -> SmolStr {
    if value == 0 {
        return SmolStr::new_inline("0");
    }

    let mut buf = [0_u8; MAX_ENCODED_LEN];
    let mut pos = MAX_ENCODED_LEN;
    while value > 0 {
        pos -= 1;
        buf[pos] = ALPHABET[(value % BASE) as usize];
        value /= BASE;
    }

    buf[pos..].iter().map(|&byte| char::from(byte)).collect()
}

/// Decodes a base-62 string produced by [`encode`].
pub fn decode(input: &str) -> Result<u64, CoreError> {
    if input.is_empty() {
        return Err(CoreError::InvalidShortCode(
            "base62 input cannot be empty".to_string(),
        ));
    }

    input.bytes().try_fold(0_u64, |acc, byte| {
        let digit = symbol_value(byte).ok_or_else(|| {
            CoreError::InvalidShortCode(format!(
                "'{}' is not a base62 symbol in '{input}'",
                byte as char
            ))
        })?;
        acc.checked_mul(BASE)
            .and_then(|shifted| shifted.checked_add(digit))
            .ok_or_else(|| CoreError::InvalidShortCode(format!("'{input}' overflows u64")))
    })
}

/// Returns `true` if `byte` belongs to [`ALPHABET`].
pub fn is_symbol(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

fn symbol_value(byte: u8) -> Option<u64> {
    match byte {
        b'0'..=b'9' => Some(u64::from(byte - b'0')),
        b'a'..=b'z' => Some(u64::from(byte - b'a') + 10),
        b'A'..=b'Z' => Some(u64::from(byte - b'A') + 36),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_small_values() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(1), "1");
        assert_eq!(encode(9), "9");
        assert_eq!(encode(10), "a");
        assert_eq!(encode(35), "z");
        assert_eq!(encode(36), "A");
        assert_eq!(encode(61), "Z");
    }

    #[test]
    fn encodes_most_significant_symbol_first() {
        assert_eq!(encode(62), "10");
        assert_eq!(encode(63), "11");
        assert_eq!(encode(62 * 62), "100");
        assert_eq!(encode(62 * 62 - 1), "ZZ");
    }

    #[test]
    fn u64_max_fits_in_max_len() {
        let encoded = encode(u64::MAX);
        assert_eq!(encoded.len(), MAX_ENCODED_LEN);
        assert_eq!(encoded, "lYGhA16ahyf");
    }

    #[test]
    fn decode_inverts_encode() {
        let samples = [0, 1, 61, 62, 3843, 3844, 1_000_000, u64::MAX / 3, u64::MAX];
        for value in samples {
            assert_eq!(decode(&encode(value)).unwrap(), value, "value {value}");
        }
    }

    #[test]
    fn alphabet_order_matches_symbol_values() {
        for (index, byte) in ALPHABET.iter().enumerate() {
            assert_eq!(symbol_value(*byte), Some(index as u64));
        }
    }

    #[test]
    fn decode_rejects_invalid_input() {
        assert!(decode("").is_err());
        assert!(decode("ab-c").is_err());
        assert!(decode("héllo").is_err());
        // one past u64::MAX
        assert!(decode("lYGhA16ahyg").is_err());
        assert!(decode("100000000000").is_err());
    }
}
