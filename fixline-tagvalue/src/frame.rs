/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Wire framing primitives: delimiters and the FIX checksum.
//!
//! The checksum is the byte sum of everything from the start of the
//! BeginString field up to (not including) the CheckSum field, modulo 256,
//! transmitted as a 3-digit zero-padded ASCII number.

/// SOH (Start of Header) field delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// Equals sign delimiter between tag and value.
pub const EQUALS: u8 = b'=';

/// Calculates the FIX checksum for the given bytes.
///
/// # Arguments
/// * `data` - The framed bytes to checksum (everything before the `10=` field)
#[inline]
#[must_use]
pub fn checksum(data: &[u8]) -> u8 {
    let sum: u32 = data.iter().map(|&b| u32::from(b)).sum();
    (sum % 256) as u8
}

/// Formats a checksum value as a 3-digit zero-padded ASCII number.
///
/// # Arguments
/// * `value` - The checksum value (0-255)
#[inline]
#[must_use]
pub fn encode_checksum(value: u8) -> [u8; 3] {
    [
        b'0' + value / 100,
        b'0' + (value / 10) % 10,
        b'0' + value % 10,
    ]
}

/// Parses a 3-digit checksum field value.
///
/// # Arguments
/// * `bytes` - The 3-byte checksum string
///
/// # Returns
/// `Some(value)` if the input is exactly three ASCII digits, `None` otherwise.
#[inline]
#[must_use]
pub fn parse_checksum(bytes: &[u8]) -> Option<u8> {
    match bytes {
        [a, b, c] => {
            let (a, b, c) = (
                a.checked_sub(b'0')?,
                b.checked_sub(b'0')?,
                c.checked_sub(b'0')?,
            );
            if a > 9 || b > 9 || c > 9 {
                return None;
            }
            a.checked_mul(100)?.checked_add(b * 10 + c)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_empty() {
        assert_eq!(checksum(b""), 0);
    }

    #[test]
    fn test_checksum_simple() {
        let expected = (u32::from(b'A') + u32::from(b'B') + u32::from(b'C')) % 256;
        assert_eq!(checksum(b"ABC"), expected as u8);
    }

    #[test]
    fn test_checksum_wraps() {
        let data = vec![255u8; 1000];
        assert_eq!(checksum(&data), ((255u32 * 1000) % 256) as u8);
    }

    #[test]
    fn test_encode_checksum() {
        assert_eq!(encode_checksum(0), *b"000");
        assert_eq!(encode_checksum(42), *b"042");
        assert_eq!(encode_checksum(255), *b"255");
    }

    #[test]
    fn test_parse_checksum() {
        assert_eq!(parse_checksum(b"000"), Some(0));
        assert_eq!(parse_checksum(b"042"), Some(42));
        assert_eq!(parse_checksum(b"255"), Some(255));
    }

    #[test]
    fn test_parse_checksum_invalid() {
        assert_eq!(parse_checksum(b""), None);
        assert_eq!(parse_checksum(b"42"), None);
        assert_eq!(parse_checksum(b"0421"), None);
        assert_eq!(parse_checksum(b"a42"), None);
        // 256..=259 encode as "256".."259" but overflow u8
        assert_eq!(parse_checksum(b"256"), None);
    }
}
