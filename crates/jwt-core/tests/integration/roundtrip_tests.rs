//! Issue-then-verify round trips for both algorithms and every import path.

use jwt_core::{
    create, expires_time, import_jwk, import_pem, parse, verify, Algorithm, Claims, Jwk,
    KeyRecord,
};
use jwt_test_utils::{
    ec_fixture_jwk, init_test_tracing, rsa_fixture_jwk, TestClaimsBuilder, TokenAssertions,
    EC_FIXTURE_1, RSA_FIXTURE,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

fn jwk(value: serde_json::Value) -> Result<Jwk, anyhow::Error> {
    Ok(serde_json::from_value(value)?)
}

#[test]
fn test_es256_issue_and_verify() -> Result<(), anyhow::Error> {
    init_test_tracing();

    let key = import_jwk(Algorithm::Es256, "key-1", &jwk(ec_fixture_jwk())?)?;

    let mut claims = Claims::new();
    claims.insert("sub".to_string(), json!("me"));
    claims.extend(expires_time(3600));

    let token = create(&key, &claims)?;
    token
        .assert_valid_jwt()
        .assert_alg("ES256")
        .assert_signed_by("key-1")
        .assert_for_subject("me")
        .assert_expires_in(3600);

    let verified = verify(&key, &token)?;
    assert_eq!(verified, claims);

    let parsed = parse(&token)?;
    assert_eq!(parsed.signature.len(), 64);
    Ok(())
}

#[test]
fn test_rs256_issue_and_verify() -> Result<(), anyhow::Error> {
    let key = import_jwk(Algorithm::Rs256, "rsa-1", &jwk(rsa_fixture_jwk())?)?;

    let claims = TestClaimsBuilder::new()
        .for_subject("service-a")
        .with_claim("scope", "read write")
        .build();

    let token = create(&key, &claims)?;
    token
        .assert_valid_jwt()
        .assert_alg("RS256")
        .assert_signed_by("rsa-1")
        .assert_claim("scope", json!("read write"));

    assert_eq!(verify(&key, &token)?, claims);
    assert_eq!(parse(&token)?.signature.len(), 256);
    Ok(())
}

#[test]
fn test_rs256_signatures_are_deterministic() -> Result<(), anyhow::Error> {
    let key = import_pem(Algorithm::Rs256, "rsa-1", RSA_FIXTURE.pkcs8_pem)?;
    let claims = json!({"sub": "me", "iat": 1_700_000_000});

    assert_eq!(create(&key, &claims)?, create(&key, &claims)?);
    Ok(())
}

#[test]
fn test_pem_and_jwk_imports_agree() -> Result<(), anyhow::Error> {
    let from_jwk = import_jwk(Algorithm::Es256, "k", &jwk(ec_fixture_jwk())?)?;
    let from_pem = import_pem(Algorithm::Es256, "k", EC_FIXTURE_1.pkcs8_pem)?;
    let public_only = import_pem(Algorithm::Es256, "k", EC_FIXTURE_1.spki_pem)?;

    assert_eq!(from_jwk.public_jwk()?, from_pem.public_jwk()?);
    assert_eq!(from_pem.public_jwk()?, public_only.public_jwk()?);

    // Either private record's tokens verify against the public-only record
    let token = create(&from_jwk, &json!({"sub": "a"}))?;
    verify(&public_only, &token)?;
    let token = create(&from_pem, &json!({"sub": "b"}))?;
    verify(&public_only, &token)?;
    Ok(())
}

#[test]
fn test_exported_public_jwk_reimports() -> Result<(), anyhow::Error> {
    let signer = import_pem(Algorithm::Rs256, "rsa-1", RSA_FIXTURE.pkcs8_pem)?;

    let exported = serde_json::to_value(signer.public_jwk()?)?;
    assert!(exported.get("d").is_none());
    let verifier = import_jwk(Algorithm::Rs256, "rsa-1", &jwk(exported)?)?;
    assert!(!verifier.can_sign());

    let token = create(&signer, &json!({"sub": "me"}))?;
    assert_eq!(verify(&verifier, &token)?["sub"], "me");
    Ok(())
}

#[test]
fn test_typed_claims() -> Result<(), anyhow::Error> {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct SessionClaims {
        sub: String,
        iat: i64,
        exp: i64,
        scope: String,
    }

    let key = import_pem(Algorithm::Es256, "k", EC_FIXTURE_1.pkcs8_pem)?;
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: "alice".to_string(),
        iat: now,
        exp: now + 60,
        scope: "read".to_string(),
    };

    let token = create(&key, &claims)?;
    verify(&key, &token)?;

    let decoded: SessionClaims = parse(&token)?.claims_as()?;
    assert_eq!(decoded, claims);
    Ok(())
}

#[test]
fn test_records_are_usable_as_slices() -> Result<(), anyhow::Error> {
    let keys: [KeyRecord; 2] = [
        import_pem(Algorithm::Es256, "ec", EC_FIXTURE_1.pkcs8_pem)?,
        import_pem(Algorithm::Rs256, "rsa", RSA_FIXTURE.pkcs8_pem)?,
    ];

    let token = create(&keys, &json!({"sub": "me"}))?;
    token.assert_signed_by("ec");

    verify(&keys, &token)?;
    verify(&keys[..], &token)?;
    Ok(())
}
