//! Key material model.
//!
//! A [`KeyRecord`] is one signing/verification identity: an algorithm, a
//! caller-chosen `kid`, a public handle, and a private handle when the record
//! was imported from private material. Records are only produced by the
//! importers in [`crate::import`] and are immutable afterwards. The
//! cryptographic handles are owned exclusively by their record and are only
//! ever borrowed by the issuance and verification engines.

use crate::algorithm::{Algorithm, KeyType};
use crate::base64url;
use crate::error::{JwtError, Result};
use crate::jwk::{PublicJwk, PublicKeyParams};
use crate::secret::{secret_bytes, ExposeSecret, SecretBytes, SecretString};
use p256::ecdsa::{SigningKey as EcSigningKey, VerifyingKey as EcVerifyingKey};
use p256::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::pkcs1v15::{SigningKey as RsaSigningKey, VerifyingKey as RsaVerifyingKey};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use std::fmt;

/// P-256 field element size in bytes.
const P256_COORDINATE_LEN: usize = 32;

/// JWK `crv` value for P-256.
const P256_CURVE: &str = "P-256";

/// Public verification handle.
#[derive(Debug)]
pub enum PublicKey {
    /// P-256 ECDSA verifying key.
    Ec(EcVerifyingKey),
    /// RSA PKCS#1 v1.5 SHA-256 verifying key.
    Rsa(RsaVerifyingKey<Sha256>),
}

impl PublicKey {
    /// Key family of this handle.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        match self {
            PublicKey::Ec(_) => KeyType::Ec,
            PublicKey::Rsa(_) => KeyType::Rsa,
        }
    }

    /// Build a P-256 public key from base64url JWK coordinates.
    pub(crate) fn ec_from_coordinates(x: &str, y: &str) -> Result<Self> {
        let x = decode_param("x", x)?;
        let y = decode_param("y", y)?;
        if x.len() != P256_COORDINATE_LEN || y.len() != P256_COORDINATE_LEN {
            return Err(JwtError::KeyImport(format!(
                "EC coordinates must be {P256_COORDINATE_LEN} bytes each"
            )));
        }

        // Uncompressed SEC1 point: 0x04 || x || y
        let mut sec1 = Vec::with_capacity(1 + 2 * P256_COORDINATE_LEN);
        sec1.push(0x04);
        sec1.extend_from_slice(&x);
        sec1.extend_from_slice(&y);

        let key = EcVerifyingKey::from_sec1_bytes(&sec1).map_err(|e| {
            tracing::debug!(target: "jwt.keys", error = %e, "EC point rejected");
            JwtError::KeyImport("EC coordinates are not a point on P-256".to_string())
        })?;
        Ok(PublicKey::Ec(key))
    }

    /// Build an RSA public key from base64url JWK modulus and exponent.
    pub(crate) fn rsa_from_components(n: &str, e: &str) -> Result<Self> {
        let n = BigUint::from_bytes_be(&decode_param("n", n)?);
        let e = BigUint::from_bytes_be(&decode_param("e", e)?);
        let key = RsaPublicKey::new(n, e).map_err(|e| {
            tracing::debug!(target: "jwt.keys", error = %e, "RSA public key rejected");
            JwtError::KeyImport(format!("invalid RSA public key: {e}"))
        })?;
        Ok(PublicKey::Rsa(RsaVerifyingKey::new(key)))
    }

    /// Decode a DER `SubjectPublicKeyInfo` for the given algorithm's key type.
    pub(crate) fn from_spki_der(alg: Algorithm, der: &[u8]) -> Result<Self> {
        match alg.descriptor().key_type {
            KeyType::Ec => EcVerifyingKey::from_public_key_der(der)
                .map(PublicKey::Ec)
                .map_err(|e| {
                    tracing::debug!(target: "jwt.keys", alg = %alg, error = %e, "SPKI decode failed");
                    JwtError::KeyImport(format!("invalid {alg} public key: {e}"))
                }),
            KeyType::Rsa => RsaPublicKey::from_public_key_der(der)
                .map(|key| PublicKey::Rsa(RsaVerifyingKey::new(key)))
                .map_err(|e| {
                    tracing::debug!(target: "jwt.keys", alg = %alg, error = %e, "SPKI decode failed");
                    JwtError::KeyImport(format!("invalid {alg} public key: {e}"))
                }),
        }
    }

    /// Public-only JWK parameters for this key.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::KeyImport` if the EC point cannot be expressed as
    /// affine coordinates (identity point).
    pub fn to_params(&self) -> Result<PublicKeyParams> {
        match self {
            PublicKey::Ec(key) => {
                let point = key.to_encoded_point(false);
                let (Some(x), Some(y)) = (point.x(), point.y()) else {
                    return Err(JwtError::KeyImport(
                        "EC public key has no affine coordinates".to_string(),
                    ));
                };
                Ok(PublicKeyParams::Ec {
                    crv: P256_CURVE.to_string(),
                    x: base64url::encode(x),
                    y: base64url::encode(y),
                })
            }
            PublicKey::Rsa(key) => {
                let key: &RsaPublicKey = key.as_ref();
                Ok(PublicKeyParams::Rsa {
                    n: base64url::encode(key.n().to_bytes_be()),
                    e: base64url::encode(key.e().to_bytes_be()),
                })
            }
        }
    }
}

/// Private signing handle.
pub enum PrivateKey {
    /// P-256 ECDSA signing key.
    Ec(EcSigningKey),
    /// RSA PKCS#1 v1.5 SHA-256 signing key.
    Rsa(RsaSigningKey<Sha256>),
}

// Custom Debug to prevent private key leakage
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            PrivateKey::Ec(_) => "Ec",
            PrivateKey::Rsa(_) => "Rsa",
        };
        f.debug_tuple(kind).field(&"[REDACTED]").finish()
    }
}

impl PrivateKey {
    /// Key family of this handle.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        match self {
            PrivateKey::Ec(_) => KeyType::Ec,
            PrivateKey::Rsa(_) => KeyType::Rsa,
        }
    }

    /// Decode a DER PKCS#8 private key and derive its public key.
    pub(crate) fn from_pkcs8_der(alg: Algorithm, der: &SecretBytes) -> Result<(Self, PublicKey)> {
        let der = der.expose_secret().as_slice();
        match alg.descriptor().key_type {
            KeyType::Ec => {
                let signing_key = EcSigningKey::from_pkcs8_der(der).map_err(|e| {
                    tracing::debug!(target: "jwt.keys", alg = %alg, error = %e, "PKCS8 decode failed");
                    JwtError::KeyImport(format!("invalid {alg} private key: {e}"))
                })?;
                let public_key = PublicKey::Ec(EcVerifyingKey::from(&signing_key));
                Ok((PrivateKey::Ec(signing_key), public_key))
            }
            KeyType::Rsa => {
                let private_key = RsaPrivateKey::from_pkcs8_der(der).map_err(|e| {
                    tracing::debug!(target: "jwt.keys", alg = %alg, error = %e, "PKCS8 decode failed");
                    JwtError::KeyImport(format!("invalid {alg} private key: {e}"))
                })?;
                Ok(Self::rsa_pair(private_key))
            }
        }
    }

    /// Build a P-256 signing key from the JWK `d` parameter.
    ///
    /// The scalar must produce the same point as `public_key`.
    pub(crate) fn ec_from_scalar(d: &SecretString, public_key: &PublicKey) -> Result<Self> {
        let d = decode_secret("d", d)?;
        let signing_key = EcSigningKey::from_slice(d.expose_secret()).map_err(|_| {
            JwtError::KeyImport("EC private scalar is not valid for P-256".to_string())
        })?;

        let PublicKey::Ec(expected) = public_key else {
            return Err(JwtError::KeyImport(
                "EC private key paired with a non-EC public key".to_string(),
            ));
        };
        let derived = EcVerifyingKey::from(&signing_key);
        if derived.to_encoded_point(false) != expected.to_encoded_point(false) {
            tracing::debug!(target: "jwt.keys", "EC private scalar does not match x/y");
            return Err(JwtError::KeyImport(
                "EC private key does not match the public coordinates".to_string(),
            ));
        }

        Ok(PrivateKey::Ec(signing_key))
    }

    /// Build an RSA signing key from JWK parameters and validate it.
    pub(crate) fn rsa_from_components(
        n: &str,
        e: &str,
        d: &SecretString,
        p: &SecretString,
        q: &SecretString,
    ) -> Result<(Self, PublicKey)> {
        let n = BigUint::from_bytes_be(&decode_param("n", n)?);
        let e = BigUint::from_bytes_be(&decode_param("e", e)?);
        let d = BigUint::from_bytes_be(decode_secret("d", d)?.expose_secret());
        let p = BigUint::from_bytes_be(decode_secret("p", p)?.expose_secret());
        let q = BigUint::from_bytes_be(decode_secret("q", q)?.expose_secret());

        let mut private_key = RsaPrivateKey::from_components(n, e, d, vec![p, q])
            .map_err(|e| JwtError::KeyImport(format!("invalid RSA private key: {e}")))?;
        private_key.validate().map_err(|e| {
            tracing::debug!(target: "jwt.keys", error = %e, "RSA private key failed validation");
            JwtError::KeyImport(format!("RSA private key failed validation: {e}"))
        })?;
        private_key
            .precompute()
            .map_err(|e| JwtError::KeyImport(format!("RSA precomputation failed: {e}")))?;

        Ok(Self::rsa_pair(private_key))
    }

    fn rsa_pair(private_key: RsaPrivateKey) -> (Self, PublicKey) {
        let public_key = RsaPublicKey::from(&private_key);
        (
            PrivateKey::Rsa(RsaSigningKey::new(private_key)),
            PublicKey::Rsa(RsaVerifyingKey::new(public_key)),
        )
    }
}

fn decode_param(name: &str, value: &str) -> Result<Vec<u8>> {
    base64url::decode(value)
        .map_err(|e| JwtError::KeyImport(format!("JWK parameter '{name}' is not base64url: {e}")))
}

// The decode error is dropped so no fragment of the secret reaches an error message
fn decode_secret(name: &str, value: &SecretString) -> Result<SecretBytes> {
    base64url::decode(value.expose_secret())
        .map(secret_bytes)
        .map_err(|_| JwtError::KeyImport(format!("JWK parameter '{name}' is not base64url")))
}

/// One signing/verification identity.
#[derive(Debug)]
pub struct KeyRecord {
    alg: Algorithm,
    kid: String,
    public_key: PublicKey,
    private_key: Option<PrivateKey>,
}

impl KeyRecord {
    /// Assemble a record, enforcing that the handles fit the algorithm.
    pub(crate) fn new(
        alg: Algorithm,
        kid: impl Into<String>,
        public_key: PublicKey,
        private_key: Option<PrivateKey>,
    ) -> Result<Self> {
        let expected = alg.descriptor().key_type;
        let private_type = private_key.as_ref().map(PrivateKey::key_type);
        if public_key.key_type() != expected || private_type.is_some_and(|t| t != expected) {
            return Err(JwtError::KeyImport(format!(
                "{alg} requires a {expected} key"
            )));
        }

        Ok(Self {
            alg,
            kid: kid.into(),
            public_key,
            private_key,
        })
    }

    /// Algorithm this key is used with.
    #[must_use]
    pub fn alg(&self) -> Algorithm {
        self.alg
    }

    /// Key identifier.
    #[must_use]
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Public verification handle.
    #[must_use]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Private signing handle, when imported from private material.
    #[must_use]
    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    /// Whether this record can issue tokens.
    #[must_use]
    pub fn can_sign(&self) -> bool {
        self.private_key.is_some()
    }

    /// Whether a token header `(kid, alg)` selects this record.
    ///
    /// A header without `kid` never matches.
    #[must_use]
    pub fn matches(&self, kid: Option<&str>, alg: &str) -> bool {
        kid.is_some_and(|kid| kid == self.kid) && alg == self.alg.as_str()
    }

    /// Publishable public JWK for this record (`use = "sig"`).
    ///
    /// # Errors
    ///
    /// Returns `JwtError::KeyImport` if the public key cannot be expressed as JWK parameters.
    pub fn public_jwk(&self) -> Result<PublicJwk> {
        Ok(PublicJwk::new(
            self.public_key.to_params()?,
            self.kid.clone(),
            self.alg,
        ))
    }
}

/// A single key record or a list of them.
///
/// Lets the issuance and verification engines accept a bare record wherever
/// a candidate list is expected.
pub trait KeyCandidates {
    /// Candidates in caller-supplied order.
    fn candidates(&self) -> &[KeyRecord];
}

impl KeyCandidates for KeyRecord {
    fn candidates(&self) -> &[KeyRecord] {
        std::slice::from_ref(self)
    }
}

impl KeyCandidates for [KeyRecord] {
    fn candidates(&self) -> &[KeyRecord] {
        self
    }
}

impl KeyCandidates for Vec<KeyRecord> {
    fn candidates(&self) -> &[KeyRecord] {
        self.as_slice()
    }
}

impl<const N: usize> KeyCandidates for [KeyRecord; N] {
    fn candidates(&self) -> &[KeyRecord] {
        self.as_slice()
    }
}
