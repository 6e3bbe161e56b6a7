//! Builder patterns for test data construction
//!
//! Provides fluent APIs for creating test claims and JWK Set documents.

use chrono::{Duration, Utc};
use serde_json::{json, Map, Value};

/// Builder for creating test JWT claims
///
/// Produces a JSON object with `sub`, `iat` and `exp` in that order, plus
/// any extra members. `iat` or `exp` can be dropped to exercise the
/// "claim absent" paths.
///
/// # Example
/// ```rust,ignore
/// let claims = TestClaimsBuilder::new()
///     .for_subject("alice")
///     .issued_at(1_700_000_000)
///     .expires_at(1_700_003_600)
///     .with_claim("scope", "read")
///     .build();
/// ```
pub struct TestClaimsBuilder {
    sub: Option<String>,
    iat: Option<i64>,
    exp: Option<i64>,
    extra: Map<String, Value>,
}

impl TestClaimsBuilder {
    /// Create a new claims builder: subject "test-subject", valid for one hour from now
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            sub: Some("test-subject".to_string()),
            iat: Some(now.timestamp()),
            exp: Some((now + Duration::seconds(3600)).timestamp()),
            extra: Map::new(),
        }
    }

    /// Set the subject
    pub fn for_subject(mut self, subject: &str) -> Self {
        self.sub = Some(subject.to_string());
        self
    }

    /// Set expiration in seconds from now
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = Some((Utc::now() + Duration::seconds(seconds)).timestamp());
        self
    }

    /// Set an absolute expiration timestamp
    pub fn expires_at(mut self, timestamp: i64) -> Self {
        self.exp = Some(timestamp);
        self
    }

    /// Set issued-at timestamp
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.iat = Some(timestamp);
        self
    }

    /// Omit `exp`
    pub fn without_expiry(mut self) -> Self {
        self.exp = None;
        self
    }

    /// Omit `iat`
    pub fn without_issued_at(mut self) -> Self {
        self.iat = None;
        self
    }

    /// Add an arbitrary claim
    pub fn with_claim(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(name.to_string(), value.into());
        self
    }

    /// Build the claims object
    pub fn build(self) -> Map<String, Value> {
        let mut claims = Map::new();
        if let Some(sub) = self.sub {
            claims.insert("sub".to_string(), json!(sub));
        }
        if let Some(iat) = self.iat {
            claims.insert("iat".to_string(), json!(iat));
        }
        if let Some(exp) = self.exp {
            claims.insert("exp".to_string(), json!(exp));
        }
        claims.extend(self.extra);
        claims
    }
}

impl Default for TestClaimsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap JWK values into a JWK Set document
pub fn jwks_document(keys: Vec<Value>) -> Value {
    json!({ "keys": keys })
}
