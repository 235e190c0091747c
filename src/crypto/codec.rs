//! Hex codec
//!
//! Lossless conversion between raw bytes and lowercase hex text.

use super::error::HashError;

/// Encode bytes as lowercase hex, two characters per byte
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string into bytes
///
/// Digits are accepted in either case. Odd-length input has no valid
/// partition into byte pairs and is rejected before any parsing happens.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>, HashError> {
    if hex_str.len() % 2 != 0 {
        return Err(HashError::MalformedInput(format!(
            "hex string must have even length, got {}",
            hex_str.len()
        )));
    }

    hex::decode(hex_str).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => HashError::MalformedInput(
            format!("invalid hex character {:?} at position {}", c, index),
        ),
        other => HashError::MalformedInput(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_hex_zero_pads() {
        assert_eq!(bytes_to_hex(&[0x0a, 0x00, 0xff]), "0a00ff");
        assert_eq!(bytes_to_hex(&[]), "");
    }

    #[test]
    fn test_hex_to_bytes_case_insensitive() {
        assert_eq!(hex_to_bytes("0A0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(hex_to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_hex_to_bytes_odd_length() {
        let err = hex_to_bytes("abc").unwrap_err();
        assert!(matches!(err, HashError::MalformedInput(_)));
    }

    #[test]
    fn test_hex_to_bytes_bad_digit() {
        let err = hex_to_bytes("0g").unwrap_err();
        assert!(matches!(err, HashError::MalformedInput(_)));
    }

    #[test]
    fn test_round_trip() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        assert_eq!(hex_to_bytes(&bytes_to_hex(&bytes)).unwrap(), bytes);
        assert_eq!(bytes_to_hex(&hex_to_bytes("DEADbeef").unwrap()), "deadbeef");
    }
}
