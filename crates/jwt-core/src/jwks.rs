//! JWK Set retrieval over HTTP.
//!
//! Fetches a JWK Set document and hands it to [`import_jwks`]. There is no
//! cache and no retry: every call performs one GET, and key rotation is
//! handled by the caller re-importing.
//!
//! # Security
//!
//! - `FetchConfig::new_secure()` refuses non-HTTPS URLs
//! - Requests are bounded by connect and total timeouts
//! - Only public keys are imported from a fetched set

use crate::error::{JwtError, Result};
use crate::import::import_jwks;
use crate::jwk::JwkSet;
use crate::keys::KeyRecord;
use std::time::Duration;
use tracing::instrument;

/// Default total HTTP request timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Default TCP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Conventional JWK Set location for `host`.
#[must_use]
pub fn well_known_jwks_url(host: &str) -> String {
    format!("https://{host}/.well-known/jwks.json")
}

/// HTTP settings for JWK Set retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Total request timeout.
    pub http_timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Reject URLs that are not `https://`.
    pub require_https: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            require_https: false,
        }
    }
}

impl FetchConfig {
    /// Default configuration; any URL scheme reqwest supports is accepted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that only fetches over HTTPS.
    ///
    /// This is the recommended constructor for production use.
    #[must_use]
    pub fn new_secure() -> Self {
        Self {
            require_https: true,
            ..Self::default()
        }
    }

    /// Set the total request timeout.
    #[must_use]
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Set the TCP connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Fetches JWK Sets and imports their keys.
#[derive(Debug, Clone)]
pub struct JwksFetcher {
    http_client: reqwest::Client,
    config: FetchConfig,
}

impl JwksFetcher {
    /// Build a fetcher with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| JwtError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Settings this fetcher was built with.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// GET `url` and decode the body as a JWK Set.
    ///
    /// # Errors
    ///
    /// - `JwtError::Configuration` if HTTPS is required and `url` is not HTTPS
    /// - `JwtError::FetchFailed` on transport errors, non-2xx status, or an
    ///   unreadable body
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<JwkSet> {
        if self.config.require_https && !url.starts_with("https://") {
            return Err(JwtError::Configuration(
                "JWKS URL must use HTTPS".to_string(),
            ));
        }

        tracing::debug!(target: "jwt.jwks", "Fetching JWKS");

        let response = self.http_client.get(url).send().await.map_err(|e| {
            tracing::error!(target: "jwt.jwks", error = %e, "Failed to fetch JWKS");
            JwtError::FetchFailed(format!("request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(target: "jwt.jwks", status = %status, "JWKS endpoint returned error");
            return Err(JwtError::FetchFailed(format!("status {status}")));
        }

        response.json::<JwkSet>().await.map_err(|e| {
            tracing::error!(target: "jwt.jwks", error = %e, "Failed to parse JWKS response");
            JwtError::FetchFailed(format!("invalid JWK Set body: {e}"))
        })
    }

    /// Fetch the JWK Set at `url` and import its public keys.
    ///
    /// # Errors
    ///
    /// Fetch errors as for [`JwksFetcher::fetch`]; import errors as for
    /// [`import_jwks`].
    pub async fn import_url(&self, url: &str) -> Result<Vec<KeyRecord>> {
        let set = self.fetch(url).await?;
        let records = import_jwks(&set)?;
        tracing::info!(target: "jwt.jwks", url = %url, key_count = records.len(), "JWKS imported");
        Ok(records)
    }

    /// Fetch and import the JWK Set at `https://{host}/.well-known/jwks.json`.
    ///
    /// The scheme is always HTTPS, whatever `require_https` says; use
    /// [`JwksFetcher::import_url`] for any other location.
    ///
    /// # Errors
    ///
    /// As for [`JwksFetcher::import_url`].
    pub async fn import_host(&self, host: &str) -> Result<Vec<KeyRecord>> {
        self.import_url(&well_known_jwks_url(host)).await
    }
}

/// Fetch the JWK Set at `url` with default settings and import its public keys.
///
/// # Errors
///
/// As for [`JwksFetcher::import_url`], plus `JwtError::Configuration` if the
/// HTTP client cannot be built.
pub async fn import_url_jwks(url: &str) -> Result<Vec<KeyRecord>> {
    JwksFetcher::new(FetchConfig::default())?.import_url(url).await
}

/// Fetch and import the JWK Set published by `host` at its well-known path.
///
/// Always fetched over HTTPS (see [`well_known_jwks_url`]).
///
/// # Errors
///
/// As for [`import_url_jwks`].
pub async fn import_host_jwks(host: &str) -> Result<Vec<KeyRecord>> {
    JwksFetcher::new(FetchConfig::default())?.import_host(host).await
}
