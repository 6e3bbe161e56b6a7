//! ES256/RS256 JSON Web Token codec, issuance and verification engine.
//!
//! Keys are imported once into [`KeyRecord`]s (from a JWK, a PEM blob, or a
//! JWK Set fetched over HTTP) and then used to issue tokens with [`create`]
//! or to check them with [`verify`]. Verification selects a key by the
//! token's `(kid, alg)` header, checks the signature, and then applies the
//! `exp`/`iat` time rules.
//!
//! ```rust,ignore
//! use jwt_core::{create, expires_time, import_pem, verify, Algorithm};
//!
//! let key = import_pem(Algorithm::Es256, "signing-key-1", PRIVATE_KEY_PEM)?;
//!
//! let mut claims = expires_time(3600);
//! claims.insert("sub".to_string(), "alice".into());
//! let token = create(&key, &claims)?;
//!
//! let verified = verify(&key, &token)?;
//! assert_eq!(verified["sub"], "alice");
//! ```

#![warn(clippy::pedantic)]

/// Module for URL-safe unpadded base64
pub mod base64url;

/// Module for the signature algorithm registry
pub mod algorithm;

/// Module for the error taxonomy
pub mod error;

/// Module for key records and cryptographic handles
pub mod keys;

/// Module for JSON Web Key documents
pub mod jwk;

/// Module for JWK, PEM and JWK Set importers
pub mod import;

/// Module for JWK Set retrieval over HTTP
pub mod jwks;

/// Module for the compact token codec
pub mod token;

/// Module for token verification
pub mod verify;

/// Module for token issuance
pub mod issue;

/// Module for validity-window helpers
pub mod expiry;

/// Module for secret types that prevent accidental logging
pub mod secret;

mod crypto;

pub use algorithm::{Algorithm, AlgorithmDescriptor, KeyType};
pub use error::{JwtError, Result};
pub use expiry::{expired_fraction, expired_fraction_at, expires_time, expires_time_at};
pub use import::{import_jwk, import_jwks, import_pem};
pub use issue::create;
pub use jwk::{Jwk, JwkSet, PublicJwk, PublicJwkSet};
pub use jwks::{import_host_jwks, import_url_jwks, well_known_jwks_url, FetchConfig, JwksFetcher};
pub use keys::{KeyCandidates, KeyRecord, PrivateKey, PublicKey};
pub use token::{parse, Claims, Header, ParsedToken};
pub use verify::{verify, verify_at, Validation, MAX_CLOCK_SKEW, MAX_JWT_SIZE_BYTES};
