//! URL-safe base64 without padding (RFC 4648 section 5), as used by every JWT segment.
//!
//! Decoding fails only on characters outside the alphabet, padding, or a
//! length no encoder could have produced. Unused low bits in the final
//! character are ignored, so several spellings can decode to the same bytes;
//! callers that need the exact encoding compare against [`encode`].

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use std::string::FromUtf8Error;
use thiserror::Error;

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// Errors from decoding a base64url string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Invalid characters, padding, or an impossible length.
    #[error("invalid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not valid UTF-8 text.
    #[error("decoded bytes are not UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Encode bytes as unpadded base64url.
#[must_use]
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_LENIENT.encode(bytes)
}

/// Decode unpadded base64url into bytes.
///
/// # Errors
///
/// Returns `DecodeError::Base64` on characters outside the URL-safe alphabet,
/// padding characters, or a length no encoder could have produced.
/// Non-zero unused bits in the last character are not an error.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(URL_SAFE_LENIENT.decode(text)?)
}

/// UTF-8 encode `text`, then base64url-encode it.
#[must_use]
pub fn encode_text(text: &str) -> String {
    encode(text.as_bytes())
}

/// Base64url-decode `text`, then decode the bytes as UTF-8.
///
/// # Errors
///
/// Returns `DecodeError::Base64` for malformed base64url and
/// `DecodeError::Utf8` when the payload is not UTF-8.
pub fn decode_text(text: &str) -> Result<String, DecodeError> {
    Ok(String::from_utf8(decode(text)?)?)
}
