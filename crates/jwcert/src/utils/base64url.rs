//! Base64URL decoding per RFC 4648
//!
//! This module provides a thin wrapper around the `base64` crate with
//! size limit validation for security.

use crate::error::{Error, Result};
use base64::{DecodeError, Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Decode Base64URL string to bytes with maximum size limit
pub(crate) fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    let result = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::FormatInvalidBase64(format!("Base64URL decode failed: {e}")))?;
    check_size(result, max_size)
}

/// Decode the signature segment
///
/// A final symbol with non-zero trailing bits can only come from altering a
/// canonical encoding, so it is reported as a bad signature rather than a
/// malformed token.
pub(crate) fn decode_signature(input: &str, max_size: usize) -> Result<Vec<u8>> {
    let result = URL_SAFE_NO_PAD.decode(input).map_err(|e| match e {
        DecodeError::InvalidLastSymbol(..) => Error::SignatureInvalid,
        e => Error::FormatInvalidBase64(format!("Base64URL decode failed: {e}")),
    })?;
    check_size(result, max_size)
}

/// Decode Base64URL string to UTF-8 string with size limit
pub(crate) fn decode_string(input: &str, max_size: usize) -> Result<String> {
    decode_bytes(input, max_size).and_then(|bytes| {
        String::from_utf8(bytes)
            .map_err(|e| Error::FormatInvalidBase64(format!("Invalid UTF-8: {e}")))
    })
}

fn check_size(decoded: Vec<u8>, max_size: usize) -> Result<Vec<u8>> {
    // Validate decoded size to prevent DoS attacks
    if decoded.len() > max_size {
        return Err(Error::FormatInvalidBase64(format!(
            "Decoded size exceeds limit: {} bytes (max: {})",
            decoded.len(),
            max_size
        )));
    }
    Ok(decoded)
}
