//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for token structure. Tokens are decoded
//! with base64/serde_json directly, never with the code under test.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;
use serde_json::{Map, Value};

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    #[serde(default)]
    pub kid: Option<String>,
}

fn decode_segment(token: &str, index: usize) -> Vec<u8> {
    let segment = token
        .split('.')
        .nth(index)
        .unwrap_or_else(|| panic!("JWT has no segment {}", index));
    URL_SAFE_NO_PAD
        .decode(segment)
        .unwrap_or_else(|e| panic!("JWT segment {} is not base64url: {:?}", index, e))
}

fn header(token: &str) -> JwtHeader {
    serde_json::from_slice(&decode_segment(token, 0)).expect("Failed to parse JWT header")
}

fn claims(token: &str) -> Map<String, Value> {
    serde_json::from_slice(&decode_segment(token, 1)).expect("Failed to parse JWT claims")
}

/// Custom assertions for issued tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_alg("ES256")
///     .assert_signed_by("key-1")
///     .assert_expires_in(3600);
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a valid compact JWT
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert the header algorithm
    fn assert_alg(&self, alg: &str) -> &Self;

    /// Assert that the token was signed by the specified key
    fn assert_signed_by(&self, key_id: &str) -> &Self;

    /// Assert that the token expires within the specified seconds
    fn assert_expires_in(&self, seconds: u64) -> &Self;

    /// Assert that the token is for the specified subject
    fn assert_for_subject(&self, subject: &str) -> &Self;

    /// Assert that a claim has the given value
    fn assert_claim(&self, name: &str, value: Value) -> &Self;
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );
        assert!(
            !self.contains('='),
            "JWT segments must not carry base64 padding"
        );

        let header = header(self);
        assert!(
            header.alg == "ES256" || header.alg == "RS256",
            "Unexpected algorithm {}",
            header.alg
        );
        let _ = claims(self);
        let signature = decode_segment(self, 2);
        assert!(!signature.is_empty(), "JWT signature is empty");

        self
    }

    fn assert_alg(&self, alg: &str) -> &Self {
        let header = header(self);
        assert_eq!(header.alg, alg, "Expected alg '{}', got '{}'", alg, header.alg);
        self
    }

    fn assert_signed_by(&self, key_id: &str) -> &Self {
        let header = header(self);
        assert_eq!(
            header.kid.as_deref(),
            Some(key_id),
            "Expected key_id '{}', got {:?}",
            key_id,
            header.kid
        );
        self
    }

    fn assert_expires_in(&self, seconds: u64) -> &Self {
        let claims = claims(self);
        let exp = claims
            .get("exp")
            .and_then(Value::as_i64)
            .expect("Token has no integer exp claim");

        let now = chrono::Utc::now().timestamp();
        let expires_in = exp - now;

        // Allow 5-second tolerance for clock skew
        assert!(
            (expires_in - seconds as i64).abs() <= 5,
            "Expected token to expire in {} seconds, but expires in {} seconds",
            seconds,
            expires_in
        );
        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims = claims(self);
        assert_eq!(
            claims.get("sub").and_then(Value::as_str),
            Some(subject),
            "Expected subject '{}', got {:?}",
            subject,
            claims.get("sub")
        );
        self
    }

    fn assert_claim(&self, name: &str, value: Value) -> &Self {
        let claims = claims(self);
        assert_eq!(
            claims.get(name),
            Some(&value),
            "Claim '{}' mismatch",
            name
        );
        self
    }
}
