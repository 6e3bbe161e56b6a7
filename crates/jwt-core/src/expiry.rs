//! Validity-window helpers.
//!
//! [`expires_time`] builds the `{iat, exp}` claims fragment for a new token.
//! [`expired_fraction`] reports how far through its validity window a token
//! is, without verifying it:
//!
//! - `< 0`: not yet valid
//! - `0..1`: within the window
//! - `> 1`: expired
//!
//! Passing the locally recorded creation time as `created_at` removes any
//! dependence on the issuer's clock, since it replaces the token's own `iat`
//! as the starting point.

use crate::error::{JwtError, Result};
use crate::token::{self, numeric_claim, Claims};
use serde_json::Value;

/// `{iat, exp}` claims for a token valid for `duration_secs` from now.
#[must_use]
pub fn expires_time(duration_secs: i64) -> Claims {
    expires_time_at(duration_secs, chrono::Utc::now().timestamp())
}

/// `{iat, exp}` claims for a token issued at `now` and valid for `duration_secs`.
#[must_use]
pub fn expires_time_at(duration_secs: i64, now: i64) -> Claims {
    let mut claims = Claims::new();
    claims.insert("iat".to_string(), Value::from(now));
    claims.insert("exp".to_string(), Value::from(now.saturating_add(duration_secs)));
    claims
}

/// Fraction of the token's validity window elapsed at the current time.
///
/// # Errors
///
/// See [`expired_fraction_at`].
pub fn expired_fraction(token: &str, created_at: Option<i64>) -> Result<f64> {
    expired_fraction_at(token, created_at, chrono::Utc::now().timestamp())
}

/// Fraction of the token's validity window elapsed at `now`.
///
/// Computed as `(now - created) / (exp - issued_at)`, where `created` is
/// `created_at` if given, else the token's `iat`, and `issued_at` is the
/// token's `iat` if present, else `created_at`. A token without `exp`
/// never expires and yields `0`.
///
/// # Errors
///
/// - `JwtError::MalformedToken` if the token cannot be parsed
/// - `JwtError::MissingTimeReference` if the token has no `iat` and no `created_at` is given
/// - `JwtError::InvalidClaims` if `iat`/`exp` are not numbers or the window is empty
#[allow(clippy::cast_precision_loss)]
pub fn expired_fraction_at(token: &str, created_at: Option<i64>, now: i64) -> Result<f64> {
    let parsed = token::parse(token)?;

    let Some(exp) = numeric_claim(&parsed.claims, "exp")? else {
        return Ok(0.0);
    };
    let iat = numeric_claim(&parsed.claims, "iat")?;
    let created_at = created_at.map(|t| t as f64);

    let Some(created) = created_at.or(iat) else {
        tracing::debug!(target: "jwt.expiry", "No iat and no creation time supplied");
        return Err(JwtError::MissingTimeReference);
    };
    let issued_at = iat.or(created_at).unwrap_or(created);

    let window = exp - issued_at;
    if window <= 0.0 {
        tracing::debug!(target: "jwt.expiry", exp, issued_at, "Validity window is empty");
        return Err(JwtError::InvalidClaims(
            "exp must be later than the issue time".to_string(),
        ));
    }

    Ok((now as f64 - created) / window)
}
