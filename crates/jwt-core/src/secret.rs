//! Secret wrappers for private key material.
//!
//! Private JWK parameters (`d`, `p`, `q`, `dp`, `dq`, `qi`) are held in
//! [`SecretString`] from the moment they are deserialized, and decoded key
//! bytes are held in [`SecretBox`] until the signing key is constructed.
//! Both redact themselves in `Debug` output and zeroize on drop, so any type
//! deriving `Debug` over them is safe to log.
//!
//! ```rust
//! use jwt_core::secret::{ExposeSecret, SecretString};
//!
//! let d = SecretString::from("private-scalar");
//! assert!(format!("{d:?}").contains("REDACTED"));
//! assert_eq!(d.expose_secret(), "private-scalar");
//! ```

pub use secrecy::{ExposeSecret, SecretBox, SecretString};

/// Decoded private key bytes.
pub type SecretBytes = SecretBox<Vec<u8>>;

/// Wrap decoded key bytes so they are zeroized on drop.
#[must_use]
pub fn secret_bytes(bytes: Vec<u8>) -> SecretBytes {
    SecretBox::new(Box::new(bytes))
}
