//! Signature algorithm registry.
//!
//! The registry is a closed enumeration: each supported algorithm is a
//! variant, and [`Algorithm::descriptor`] returns its immutable key-import
//! and signature parameters. Adding an algorithm means adding a variant, a
//! descriptor, and the matching arms in `crypto`.

use crate::error::{JwtError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key family an algorithm operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Elliptic curve key (`kty = "EC"`).
    Ec,
    /// RSA key (`kty = "RSA"`).
    Rsa,
}

impl KeyType {
    /// The JWK `kty` value for this key family.
    #[must_use]
    pub fn jwk_kty(self) -> &'static str {
        match self {
            KeyType::Ec => "EC",
            KeyType::Rsa => "RSA",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.jwk_kty())
    }
}

/// Digest used by the signature scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha256,
}

/// Import and signature parameters of one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    /// JOSE identifier, e.g. `"ES256"`.
    pub name: &'static str,
    /// Key family accepted on import.
    pub key_type: KeyType,
    /// Named curve for EC keys (JWK `crv`).
    pub curve: Option<&'static str>,
    /// Digest applied to the signing input.
    pub hash: HashAlgorithm,
    /// Fixed signature length in bytes, when the scheme has one.
    pub signature_len: Option<usize>,
}

const ES256: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "ES256",
    key_type: KeyType::Ec,
    curve: Some("P-256"),
    hash: HashAlgorithm::Sha256,
    // r || s, 32 bytes each
    signature_len: Some(64),
};

const RS256: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "RS256",
    key_type: KeyType::Rsa,
    curve: None,
    hash: HashAlgorithm::Sha256,
    signature_len: None,
};

/// Supported JWS signature algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    /// ECDSA using P-256 and SHA-256.
    Es256,
    /// RSASSA-PKCS1-v1_5 using SHA-256.
    Rs256,
}

impl Algorithm {
    /// Every supported algorithm, in registry order.
    pub const ALL: [Algorithm; 2] = [Algorithm::Es256, Algorithm::Rs256];

    /// Look up an algorithm by its JOSE identifier.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::UnknownAlgorithm` if `alg` is not a supported identifier.
    /// Matching is exact; `"es256"` is not `"ES256"`.
    pub fn lookup(alg: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == alg)
            .ok_or_else(|| {
                tracing::debug!(target: "jwt.keys", alg = %alg, "Unknown algorithm requested");
                JwtError::UnknownAlgorithm(alg.to_string())
            })
    }

    /// Import and signature parameters for this algorithm.
    #[must_use]
    pub fn descriptor(self) -> &'static AlgorithmDescriptor {
        match self {
            Algorithm::Es256 => &ES256,
            Algorithm::Rs256 => &RS256,
        }
    }

    /// The JOSE identifier, e.g. `"ES256"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s)
    }
}

impl TryFrom<String> for Algorithm {
    type Error = JwtError;

    fn try_from(value: String) -> Result<Self> {
        Self::lookup(&value)
    }
}

impl From<Algorithm> for String {
    fn from(alg: Algorithm) -> Self {
        alg.as_str().to_string()
    }
}
