//! Base64 and Base64URL decoding per RFC 4648
//!
//! JWK members (`n`, `e`, `x`, `y`) use the URL-safe alphabet without
//! padding, while `x5c` certificates use the standard alphabet with padding
//! (RFC 7517 Section 4.7). Both decoders enforce a maximum decoded size.

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};

/// Decode Base64URL string to bytes with maximum size limit
pub(crate) fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>, String> {
    let result = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| format!("Base64URL decode failed: {e}"))?;
    check_decoded_size(result, max_size)
}

/// Decode standard (padded) Base64 string to bytes with maximum size limit
pub(crate) fn decode_standard(input: &str, max_size: usize) -> Result<Vec<u8>, String> {
    let result = STANDARD
        .decode(input)
        .map_err(|e| format!("Base64 decode failed: {e}"))?;
    check_decoded_size(result, max_size)
}

fn check_decoded_size(result: Vec<u8>, max_size: usize) -> Result<Vec<u8>, String> {
    if result.len() > max_size {
        return Err(format!(
            "Decoded size exceeds limit: {} bytes (max: {})",
            result.len(),
            max_size
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_invalid() {
        assert!(decode_bytes("!!!", 1000).is_err());
        // Padding is not part of the URL-safe JWK encoding
        assert!(decode_bytes("SGVsbG8=", 1000).is_err());
    }

    #[test]
    fn test_decode_valid() {
        let result = decode_bytes("SGVsbG8", 1000).unwrap();
        assert_eq!(result, b"Hello");
    }

    #[test]
    fn test_decode_with_limit() {
        assert_eq!(decode_bytes("SGVsbG8", 10).unwrap(), b"Hello");
        assert!(decode_bytes("SGVsbG8", 3).is_err());
    }

    #[test]
    fn test_decode_standard() {
        assert_eq!(decode_standard("SGVsbG8=", 10).unwrap(), b"Hello");
        // URL-safe characters are rejected by the standard alphabet
        assert!(decode_standard("-_-_", 10).is_err());
        assert!(decode_standard("SGVsbG8=", 3).is_err());
    }
}
