//! Signature dispatch for the algorithm registry.
//!
//! Every `(Algorithm, key handle)` pairing is matched here. `KeyRecord`
//! construction already guarantees the handle fits the algorithm, so the
//! mismatch arms are unreachable through the public API.

use crate::algorithm::Algorithm;
use crate::error::{JwtError, Result};
use crate::keys::{PrivateKey, PublicKey};
use p256::ecdsa::Signature as EcSignature;
use rsa::pkcs1v15::Signature as RsaSignature;
use rsa::signature::{SignatureEncoding, Signer, Verifier};

/// Sign `message` with `key` under `alg`.
///
/// ES256 signatures are the fixed 64-byte `r || s` encoding, not DER.
pub(crate) fn sign(alg: Algorithm, key: &PrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    match (alg, key) {
        (Algorithm::Es256, PrivateKey::Ec(signing_key)) => {
            let signature: EcSignature = signing_key
                .try_sign(message)
                .map_err(|e| JwtError::Signing(format!("ES256 signing failed: {e}")))?;
            Ok(signature.to_bytes().to_vec())
        }
        (Algorithm::Rs256, PrivateKey::Rsa(signing_key)) => {
            let signature = signing_key
                .try_sign(message)
                .map_err(|e| JwtError::Signing(format!("RS256 signing failed: {e}")))?;
            Ok(signature.to_vec())
        }
        (alg, key) => Err(JwtError::Signing(format!(
            "{alg} cannot sign with a {} key",
            key.key_type()
        ))),
    }
}

/// Check `signature` over `message` with `key` under `alg`.
///
/// Signature bytes that cannot be decoded for the scheme are reported as
/// invalid rather than as an error.
pub(crate) fn verify(alg: Algorithm, key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
    match (alg, key) {
        (Algorithm::Es256, PublicKey::Ec(verifying_key)) => {
            let Ok(signature) = EcSignature::from_slice(signature) else {
                tracing::debug!(target: "jwt.verify", len = signature.len(), "ES256 signature has wrong shape");
                return false;
            };
            verifying_key.verify(message, &signature).is_ok()
        }
        (Algorithm::Rs256, PublicKey::Rsa(verifying_key)) => {
            let Ok(signature) = RsaSignature::try_from(signature) else {
                return false;
            };
            verifying_key.verify(message, &signature).is_ok()
        }
        _ => false,
    }
}
