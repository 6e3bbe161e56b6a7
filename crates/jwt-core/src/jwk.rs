//! JSON Web Key (RFC 7517) documents.
//!
//! [`Jwk`] is the inbound form: every field is optional and private
//! parameters are held as secrets. [`PublicJwk`] is the outbound form: it is
//! built from [`PublicKeyParams`], which only has room for the public
//! parameters of each key type, so private fields cannot leak into a
//! published key set.

use crate::algorithm::Algorithm;
use crate::error::Result;
use crate::keys::KeyRecord;
use crate::secret::SecretString;
use serde::{Deserialize, Serialize};

/// A JSON Web Key as received from a caller or a JWK Set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Jwk {
    /// Key type (`"EC"` or `"RSA"`).
    pub kty: Option<String>,
    /// Key identifier.
    pub kid: Option<String>,
    /// Intended algorithm.
    pub alg: Option<String>,
    /// Public key use (`"sig"`, `"enc"`).
    #[serde(rename = "use")]
    pub key_use: Option<String>,
    /// Permitted key operations.
    pub key_ops: Option<Vec<String>>,

    /// EC curve name.
    pub crv: Option<String>,
    /// EC x coordinate (base64url).
    pub x: Option<String>,
    /// EC y coordinate (base64url).
    pub y: Option<String>,

    /// RSA modulus (base64url).
    pub n: Option<String>,
    /// RSA public exponent (base64url).
    pub e: Option<String>,

    /// EC private scalar or RSA private exponent.
    pub d: Option<SecretString>,
    /// RSA first prime factor.
    pub p: Option<SecretString>,
    /// RSA second prime factor.
    pub q: Option<SecretString>,
    /// RSA first factor CRT exponent.
    pub dp: Option<SecretString>,
    /// RSA second factor CRT exponent.
    pub dq: Option<SecretString>,
    /// RSA first CRT coefficient.
    pub qi: Option<SecretString>,
}

impl Jwk {
    /// Whether the key carries private material.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.d.is_some()
    }
}

/// A JWK Set document: `{"keys": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JwkSet {
    /// Keys in document order.
    pub keys: Vec<Jwk>,
}

/// Public parameters of a key, by key type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kty")]
pub enum PublicKeyParams {
    /// Elliptic curve public point.
    #[serde(rename = "EC")]
    Ec {
        /// Curve name.
        crv: String,
        /// x coordinate (base64url).
        x: String,
        /// y coordinate (base64url).
        y: String,
    },
    /// RSA public key.
    #[serde(rename = "RSA")]
    Rsa {
        /// Modulus (base64url).
        n: String,
        /// Public exponent (base64url).
        e: String,
    },
}

/// A publishable public-only JWK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicJwk {
    /// Key-type specific public parameters (includes `kty`).
    #[serde(flatten)]
    pub params: PublicKeyParams,
    /// Key identifier.
    pub kid: String,
    /// Algorithm the key is used with.
    pub alg: Algorithm,
    /// Always `"sig"`.
    #[serde(rename = "use")]
    pub key_use: String,
}

impl PublicJwk {
    pub(crate) fn new(params: PublicKeyParams, kid: String, alg: Algorithm) -> Self {
        Self {
            params,
            kid,
            alg,
            key_use: "sig".to_string(),
        }
    }
}

/// A publishable JWK Set, as served at `/.well-known/jwks.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicJwkSet {
    /// Public keys in record order.
    pub keys: Vec<PublicJwk>,
}

impl PublicJwkSet {
    /// Export the public half of every record.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::KeyImport` if a record's public key cannot be
    /// expressed as JWK parameters.
    pub fn from_records(records: &[KeyRecord]) -> Result<Self> {
        let keys = records
            .iter()
            .map(KeyRecord::public_jwk)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keys })
    }
}
