//! Compact JWS serialization: `header.claims.signature`.
//!
//! [`parse`] decodes all three segments but performs no cryptographic work.
//! The signed input is kept as the literal `header.claims` substring of the
//! received text, never re-derived from decoded JSON.

use crate::base64url;
use crate::error::{JwtError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token claims: an arbitrary JSON object.
pub type Claims = Map<String, Value>;

/// JOSE header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Key identifier; tokens without one never match a key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Signature algorithm identifier as transmitted.
    pub alg: String,
    /// Any other header members (`typ`, `cty`, ...), preserved but not interpreted.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A decoded, unverified token.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedToken {
    /// Decoded header.
    pub header: Header,
    /// Decoded claims.
    pub claims: Claims,
    /// Raw signature bytes.
    pub signature: Vec<u8>,
    /// The `header.claims` prefix exactly as received.
    pub signed: String,
}

impl ParsedToken {
    /// Deserialize the claims into a caller-defined type.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::InvalidClaims` if the claims do not fit `T`.
    pub fn claims_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.claims.clone()))
            .map_err(|e| JwtError::InvalidClaims(e.to_string()))
    }
}

/// Split and decode a compact token.
///
/// Leading and trailing whitespace is trimmed before splitting.
///
/// # Errors
///
/// Returns `JwtError::MalformedToken` if the token does not have exactly
/// three dot-separated segments, a segment is not valid base64url, or the
/// header or claims are not JSON objects.
pub fn parse(text: &str) -> Result<ParsedToken> {
    let text = text.trim();

    let mut segments = text.split('.');
    let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        tracing::debug!(target: "jwt.codec", "Token rejected: expected 3 segments");
        return Err(JwtError::MalformedToken(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let header: Header = decode_json("header", header_b64)?;
    let claims: Claims = decode_json("claims", claims_b64)?;
    let signature = base64url::decode(signature_b64).map_err(|e| {
        tracing::debug!(target: "jwt.codec", error = %e, "Token rejected: bad signature encoding");
        JwtError::MalformedToken(format!("signature: {e}"))
    })?;

    // Header and claims segments plus their separator, as received
    let signed_len = header_b64.len() + 1 + claims_b64.len();
    let signed = text
        .get(..signed_len)
        .ok_or_else(|| JwtError::MalformedToken("signed input out of range".to_string()))?
        .to_string();

    Ok(ParsedToken {
        header,
        claims,
        signature,
        signed,
    })
}

fn decode_json<T: DeserializeOwned>(segment: &str, encoded: &str) -> Result<T> {
    let json = base64url::decode_text(encoded).map_err(|e| {
        tracing::debug!(target: "jwt.codec", segment, error = %e, "Token rejected: bad segment encoding");
        JwtError::MalformedToken(format!("{segment}: {e}"))
    })?;
    serde_json::from_str(&json).map_err(|e| {
        tracing::debug!(target: "jwt.codec", segment, error = %e, "Token rejected: bad segment JSON");
        JwtError::MalformedToken(format!("{segment}: {e}"))
    })
}

/// Read a numeric time claim in epoch seconds.
///
/// Absent and `null` are both `None`; any other non-number is an error.
pub(crate) fn numeric_claim(claims: &Claims, name: &str) -> Result<Option<f64>> {
    match claims.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| JwtError::InvalidClaims(format!("'{name}' is not a finite number"))),
        Some(_) => {
            tracing::debug!(target: "jwt.codec", claim = name, "Time claim is not numeric");
            Err(JwtError::InvalidClaims(format!("'{name}' must be a number")))
        }
    }
}
