//! Compatibility with tokens and keys produced by other JWT implementations.

use jsonwebtoken::{DecodingKey, EncodingKey, Header};
use jwt_core::{create, import_pem, parse, verify, verify_at, Algorithm, JwtError};
use jwt_test_utils::{
    generate_p256_pkcs8_pem, TestClaimsBuilder, EC_FIXTURE_1, FOREIGN_ES256_KID,
    FOREIGN_ES256_TOKEN, FOREIGN_RS256_KID, FOREIGN_RS256_TOKEN, FOREIGN_TOKEN_EXP,
    FOREIGN_TOKEN_IAT, FOREIGN_TOKEN_SUB, RSA_FIXTURE,
};
use serde_json::{json, Value};

// ============================================================================
// Foreign tokens verified here
// ============================================================================

#[test]
fn test_verifies_foreign_es256_token() -> Result<(), anyhow::Error> {
    let key = import_pem(Algorithm::Es256, FOREIGN_ES256_KID, EC_FIXTURE_1.spki_pem)?;

    let claims = verify_at(&key, FOREIGN_ES256_TOKEN, FOREIGN_TOKEN_IAT + 60)?;
    assert_eq!(claims["sub"], FOREIGN_TOKEN_SUB);
    assert_eq!(claims["exp"], json!(FOREIGN_TOKEN_EXP));

    // Unknown header members are kept, not rejected
    let parsed = parse(FOREIGN_ES256_TOKEN)?;
    assert_eq!(parsed.header.extra.get("typ"), Some(&json!("JWT")));
    Ok(())
}

#[test]
fn test_verifies_foreign_rs256_token() -> Result<(), anyhow::Error> {
    let key = import_pem(Algorithm::Rs256, FOREIGN_RS256_KID, RSA_FIXTURE.spki_pem)?;

    let claims = verify_at(&key, FOREIGN_RS256_TOKEN, FOREIGN_TOKEN_IAT)?;
    assert_eq!(claims["sub"], FOREIGN_TOKEN_SUB);

    assert_eq!(
        verify_at(&key, FOREIGN_RS256_TOKEN, FOREIGN_TOKEN_EXP),
        Err(JwtError::Expired)
    );
    assert_eq!(
        verify_at(&key, FOREIGN_RS256_TOKEN, FOREIGN_TOKEN_IAT - 1),
        Err(JwtError::NotYetValid)
    );
    Ok(())
}

#[test]
fn test_verifies_jsonwebtoken_issued_tokens() -> Result<(), anyhow::Error> {
    let claims = TestClaimsBuilder::new().for_subject("interop").build();

    let mut header = Header::new(jsonwebtoken::Algorithm::ES256);
    header.kid = Some("ec-1".to_string());
    let ec_token = jsonwebtoken::encode(
        &header,
        &claims,
        &EncodingKey::from_ec_pem(EC_FIXTURE_1.pkcs8_pem.as_bytes())?,
    )?;

    let mut header = Header::new(jsonwebtoken::Algorithm::RS256);
    header.kid = Some("rsa-1".to_string());
    let rsa_token = jsonwebtoken::encode(
        &header,
        &claims,
        &EncodingKey::from_rsa_pem(RSA_FIXTURE.pkcs8_pem.as_bytes())?,
    )?;

    let keys = vec![
        import_pem(Algorithm::Es256, "ec-1", EC_FIXTURE_1.spki_pem)?,
        import_pem(Algorithm::Rs256, "rsa-1", RSA_FIXTURE.spki_pem)?,
    ];

    assert_eq!(verify(&keys, &ec_token)?["sub"], "interop");
    assert_eq!(verify(&keys, &rsa_token)?["sub"], "interop");
    Ok(())
}

// ============================================================================
// Our tokens verified elsewhere
// ============================================================================

#[test]
fn test_jsonwebtoken_accepts_es256_tokens() -> Result<(), anyhow::Error> {
    let key = import_pem(Algorithm::Es256, "ec-1", EC_FIXTURE_1.pkcs8_pem)?;
    let token = create(&key, &TestClaimsBuilder::new().for_subject("me").build())?;

    let decoded = jsonwebtoken::decode::<Value>(
        &token,
        &DecodingKey::from_ec_pem(EC_FIXTURE_1.spki_pem.as_bytes())?,
        &jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::ES256),
    )?;

    assert_eq!(decoded.header.kid.as_deref(), Some("ec-1"));
    assert_eq!(decoded.claims["sub"], "me");
    Ok(())
}

#[test]
fn test_jsonwebtoken_accepts_rs256_tokens() -> Result<(), anyhow::Error> {
    let key = import_pem(Algorithm::Rs256, "rsa-1", RSA_FIXTURE.pkcs8_pem)?;
    let token = create(&key, &TestClaimsBuilder::new().for_subject("me").build())?;

    let decoded = jsonwebtoken::decode::<Value>(
        &token,
        &DecodingKey::from_rsa_pem(RSA_FIXTURE.spki_pem.as_bytes())?,
        &jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::RS256),
    )?;

    assert_eq!(decoded.claims["sub"], "me");
    Ok(())
}

// ============================================================================
// Keys generated elsewhere
// ============================================================================

#[test]
fn test_ring_generated_keys() -> Result<(), anyhow::Error> {
    let pem = generate_p256_pkcs8_pem()?;
    let key = import_pem(Algorithm::Es256, "fresh", &pem)?;

    let token = create(&key, &TestClaimsBuilder::new().build())?;
    verify(&key, &token)?;

    // Cross-check the signature with an independent verifier
    let public = serde_json::to_value(key.public_jwk()?)?;
    let decoding = DecodingKey::from_ec_components(
        public["x"].as_str().unwrap(),
        public["y"].as_str().unwrap(),
    )?;
    jsonwebtoken::decode::<Value>(
        &token,
        &decoding,
        &jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::ES256),
    )?;
    Ok(())
}

#[test]
fn test_distinct_generated_keys_do_not_cross_verify() -> Result<(), anyhow::Error> {
    let first = import_pem(Algorithm::Es256, "same", &generate_p256_pkcs8_pem()?)?;
    let second = import_pem(Algorithm::Es256, "same", &generate_p256_pkcs8_pem()?)?;

    let token = create(&first, &json!({"sub": "me"}))?;
    assert_eq!(verify(&second, &token), Err(JwtError::InvalidSignature));
    Ok(())
}
