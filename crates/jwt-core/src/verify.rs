//! Token verification engine.
//!
//! Verification runs in a fixed order, and the first failing step decides
//! the error:
//!
//! 1. Size limit, when configured (before any decoding)
//! 2. Parse ([`crate::token::parse`])
//! 3. Key selection: the first candidate whose `(kid, alg)` equals the header's
//! 4. Signature check against that candidate only (the signature segment
//!    must also be the canonical base64url spelling of its bytes)
//! 5. `exp`, then `iat`
//!
//! A signature failure on the selected key is conclusive: other candidates
//! are not tried.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jwt_core::{verify, Validation};
//! use std::time::Duration;
//!
//! // Exact boundaries, wall-clock time
//! let claims = verify(&keys, &token)?;
//!
//! // Tolerate 30 seconds of clock drift
//! let validation = Validation::default().with_leeway(Duration::from_secs(30))?;
//! let claims = validation.verify(&keys, &token)?;
//! ```

use crate::base64url;
use crate::crypto;
use crate::error::{JwtError, Result};
use crate::keys::{KeyCandidates, KeyRecord};
use crate::token::{self, numeric_claim, Claims};
use std::time::Duration;
use tracing::instrument;

// =============================================================================
// Constants
// =============================================================================

/// Maximum token size in bytes (8KB) applied by [`Validation::new_secure`].
///
/// Larger tokens are rejected before base64 decoding or signature work.
/// Typical ES256 tokens are 200-500 bytes; RS256 tokens with a 2048-bit key
/// carry a 342-character signature segment.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// Maximum allowed clock skew tolerance (10 minutes).
pub const MAX_CLOCK_SKEW: Duration = Duration::from_secs(600);

// =============================================================================
// Validation
// =============================================================================

/// Verification settings.
///
/// The default has zero leeway, so a token is expired exactly at `exp` and
/// valid exactly from `iat`, and no size limit, so anything [`crate::create`]
/// emits verifies. Verifiers facing untrusted input should start from
/// [`Validation::new_secure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    leeway: Duration,
    max_token_size: Option<usize>,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            leeway: Duration::ZERO,
            max_token_size: None,
        }
    }
}

impl Validation {
    /// Create the default validation settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validation that rejects tokens larger than [`MAX_JWT_SIZE_BYTES`].
    ///
    /// This is the recommended constructor for tokens from untrusted sources.
    #[must_use]
    pub fn new_secure() -> Self {
        Self {
            max_token_size: Some(MAX_JWT_SIZE_BYTES),
            ..Self::default()
        }
    }

    /// Tolerate clock drift of up to `leeway` on both `exp` and `iat`.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Configuration` if `leeway` exceeds [`MAX_CLOCK_SKEW`].
    pub fn with_leeway(mut self, leeway: Duration) -> Result<Self> {
        if leeway > MAX_CLOCK_SKEW {
            return Err(JwtError::Configuration(format!(
                "leeway of {}s exceeds maximum of {}s",
                leeway.as_secs(),
                MAX_CLOCK_SKEW.as_secs()
            )));
        }
        self.leeway = leeway;
        Ok(self)
    }

    /// Set the maximum accepted token size in bytes; `None` disables the limit.
    #[must_use]
    pub fn with_max_token_size(mut self, max_token_size: Option<usize>) -> Self {
        self.max_token_size = max_token_size;
        self
    }

    /// Configured clock skew tolerance.
    #[must_use]
    pub fn leeway(&self) -> Duration {
        self.leeway
    }

    /// Configured size limit, if any.
    #[must_use]
    pub fn max_token_size(&self) -> Option<usize> {
        self.max_token_size
    }

    /// Verify `token` against `keys` at the current wall-clock time.
    ///
    /// # Errors
    ///
    /// See [`Validation::verify_at`].
    pub fn verify<K>(&self, keys: &K, token: &str) -> Result<Claims>
    where
        K: KeyCandidates + ?Sized,
    {
        self.verify_at(keys, token, chrono::Utc::now().timestamp())
    }

    /// Verify `token` against `keys` at `now` (Unix epoch seconds).
    ///
    /// Returns the claims only if every check passes.
    ///
    /// # Errors
    ///
    /// - `JwtError::TokenTooLarge` if the token exceeds the size limit
    /// - `JwtError::MalformedToken` if the token cannot be parsed
    /// - `JwtError::KeyNotFound` if no candidate matches the header `(kid, alg)`
    /// - `JwtError::InvalidSignature` if the matching key rejects the signature
    /// - `JwtError::InvalidClaims` if `exp` or `iat` is present but not a number
    /// - `JwtError::Expired` if `now >= exp + leeway`
    /// - `JwtError::NotYetValid` if `iat > now + leeway`
    #[instrument(skip_all)]
    pub fn verify_at<K>(&self, keys: &K, token: &str, now: i64) -> Result<Claims>
    where
        K: KeyCandidates + ?Sized,
    {
        if let Some(limit) = self.max_token_size {
            if token.len() > limit {
                tracing::debug!(
                    target: "jwt.verify",
                    token_size = token.len(),
                    max_size = limit,
                    "Token rejected: size exceeds maximum"
                );
                return Err(JwtError::TokenTooLarge);
            }
        }

        let parsed = token::parse(token)?;
        let kid = parsed.header.kid.as_deref();
        let alg = parsed.header.alg.as_str();

        let Some(record) = select_key(keys.candidates(), kid, alg) else {
            tracing::debug!(target: "jwt.verify", kid = ?kid, alg = %alg, "Token rejected: no matching key");
            return Err(JwtError::KeyNotFound {
                kid: kid.map(str::to_string),
                alg: alg.to_string(),
            });
        };

        // Decoding ignores unused trailing bits; only the canonical spelling is accepted
        let canonical = token
            .trim()
            .rsplit('.')
            .next()
            .is_some_and(|segment| segment == base64url::encode(&parsed.signature));

        if !canonical
            || !crypto::verify(
                record.alg(),
                record.public_key(),
                parsed.signed.as_bytes(),
                &parsed.signature,
            )
        {
            tracing::debug!(target: "jwt.verify", kid = %record.kid(), "Token rejected: invalid signature");
            return Err(JwtError::InvalidSignature);
        }

        self.check_times(&parsed.claims, now)?;

        tracing::debug!(target: "jwt.verify", kid = %record.kid(), alg = %alg, "Token verified");
        Ok(parsed.claims)
    }

    #[allow(clippy::cast_precision_loss)]
    fn check_times(&self, claims: &Claims, now: i64) -> Result<()> {
        let now = now as f64;
        let leeway = self.leeway.as_secs_f64();

        if let Some(exp) = numeric_claim(claims, "exp")? {
            if now >= exp + leeway {
                tracing::debug!(target: "jwt.verify", exp, now, "Token rejected: expired");
                return Err(JwtError::Expired);
            }
        }

        if let Some(iat) = numeric_claim(claims, "iat")? {
            if iat > now + leeway {
                tracing::debug!(target: "jwt.verify", iat, now, "Token rejected: iat in the future");
                return Err(JwtError::NotYetValid);
            }
        }

        Ok(())
    }
}

/// First candidate whose `(kid, alg)` matches, in caller order.
fn select_key<'a>(candidates: &'a [KeyRecord], kid: Option<&str>, alg: &str) -> Option<&'a KeyRecord> {
    candidates.iter().find(|record| record.matches(kid, alg))
}

/// Verify `token` against `keys` at the current wall-clock time, with default [`Validation`].
///
/// # Errors
///
/// See [`Validation::verify_at`].
pub fn verify<K>(keys: &K, token: &str) -> Result<Claims>
where
    K: KeyCandidates + ?Sized,
{
    Validation::default().verify(keys, token)
}

/// Verify `token` against `keys` at `now` (Unix epoch seconds), with default [`Validation`].
///
/// # Errors
///
/// See [`Validation::verify_at`].
pub fn verify_at<K>(keys: &K, token: &str, now: i64) -> Result<Claims>
where
    K: KeyCandidates + ?Sized,
{
    Validation::default().verify_at(keys, token, now)
}
