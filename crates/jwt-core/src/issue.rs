//! Token issuance engine.

use crate::base64url;
use crate::crypto;
use crate::error::{JwtError, Result};
use crate::keys::{KeyCandidates, KeyRecord, PrivateKey};
use crate::token::Header;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::instrument;

/// Sign `claims` with the first key in `keys` that carries a private handle.
///
/// The header is `{"kid": ..., "alg": ...}` from the chosen record. Claims
/// members are serialized in insertion order, so a `serde_json::Map` or a
/// struct yields a reproducible signed input.
///
/// # Errors
///
/// - `JwtError::NoSigningKey` if no record can sign
/// - `JwtError::InvalidClaims` if `claims` does not serialize to a JSON object
/// - `JwtError::Signing` if the signature backend fails
#[instrument(skip_all)]
pub fn create<K, C>(keys: &K, claims: &C) -> Result<String>
where
    K: KeyCandidates + ?Sized,
    C: Serialize + ?Sized,
{
    let Some((record, private_key)) = signing_key(keys.candidates()) else {
        tracing::debug!(target: "jwt.issue", candidates = keys.candidates().len(), "No signing key available");
        return Err(JwtError::NoSigningKey);
    };

    let claims = match serde_json::to_value(claims) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return Err(JwtError::InvalidClaims(
                "claims must serialize to a JSON object".to_string(),
            ))
        }
        Err(e) => return Err(JwtError::InvalidClaims(e.to_string())),
    };

    let header = Header {
        kid: Some(record.kid().to_string()),
        alg: record.alg().as_str().to_string(),
        extra: Map::new(),
    };

    let header_b64 = encode_json(&header)?;
    let claims_b64 = encode_json(&claims)?;
    let signing_input = format!("{header_b64}.{claims_b64}");

    let signature = crypto::sign(record.alg(), private_key, signing_input.as_bytes())?;

    tracing::debug!(target: "jwt.issue", kid = %record.kid(), alg = %record.alg(), "Token issued");
    Ok(format!("{signing_input}.{}", base64url::encode(signature)))
}

fn signing_key(candidates: &[KeyRecord]) -> Option<(&KeyRecord, &PrivateKey)> {
    candidates
        .iter()
        .find_map(|record| record.private_key().map(|private_key| (record, private_key)))
}

fn encode_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).map_err(|e| JwtError::InvalidClaims(e.to_string()))?;
    Ok(base64url::encode_text(&json))
}
