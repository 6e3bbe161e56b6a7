//! # JWT Test Utilities
//!
//! Shared test utilities for the `jwt-core` crate.
//!
//! This crate provides:
//! - Deterministic crypto fixtures (fixed ES256/RS256 keys, independently signed tokens)
//! - Fresh P-256 keys generated with ring
//! - Claims builders (`TestClaimsBuilder`)
//! - Custom assertions (`TokenAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jwt_test_utils::*;
//!
//! #[test]
//! fn test_example() {
//!     let key = import_pem(Algorithm::Es256, "key-1", EC_FIXTURE_1.pkcs8_pem)?;
//!
//!     let claims = TestClaimsBuilder::new().for_subject("alice").expires_in(3600).build();
//!     let token = create(&key, &claims)?;
//!
//!     token.assert_valid_jwt()
//!          .assert_signed_by("key-1")
//!          .assert_for_subject("alice");
//! }
//! ```

pub mod assertions;
pub mod crypto_fixtures;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use crypto_fixtures::*;
pub use token_builders::*;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a log subscriber for tests, filtered by `RUST_LOG` (default `jwt=debug`).
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwt=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
