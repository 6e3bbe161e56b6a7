//! Error types for token codec, key import, issuance and verification.
//!
//! Every failure surfaces to the immediate caller with a distinguishable kind.
//! Nothing is retried internally; retry policy (notably around JWKS retrieval)
//! belongs to the caller.
//!
//! Variants never carry key material. Detailed context for rejections is
//! logged at debug level by the module that rejected the input.

use thiserror::Error;

/// Result type alias using `JwtError`.
pub type Result<T> = std::result::Result<T, JwtError>;

/// Errors that can occur while importing keys, issuing or verifying tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtError {
    /// Algorithm identifier is not in the registry.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Wrong segment count, invalid base64url, or invalid JSON in header/claims.
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Token exceeds the configured maximum size.
    #[error("Token size exceeds the maximum allowed")]
    TokenTooLarge,

    /// No candidate key matches the token's `(kid, alg)`.
    #[error("No key matches kid {kid:?} with algorithm {alg}")]
    KeyNotFound {
        /// `kid` from the token header, if any.
        kid: Option<String>,
        /// `alg` from the token header.
        alg: String,
    },

    /// A matching key was found but the signature check failed.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// `exp` is at or before the verification time.
    #[error("Token has expired")]
    Expired,

    /// `iat` is after the verification time.
    #[error("Token is not yet valid")]
    NotYetValid,

    /// Issuance requested but no supplied key carries private material.
    #[error("No signing key available")]
    NoSigningKey,

    /// Expiry fraction requested for a token without `iat` and no creation time given.
    #[error("Missing time reference: token has no iat and no creation time was supplied")]
    MissingTimeReference,

    /// JWKS retrieval failed (transport error, non-success status or unreadable body).
    #[error("JWKS fetch failed: {0}")]
    FetchFailed(String),

    /// Key material could not be imported.
    #[error("Key import failed: {0}")]
    KeyImport(String),

    /// Claims are unusable (not a JSON object, non-numeric time claims, empty window).
    #[error("Invalid claims: {0}")]
    InvalidClaims(String),

    /// The signature backend failed to produce a signature.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Invalid validation or fetch configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
