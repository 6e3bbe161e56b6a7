//! Any modification of an issued token must be rejected.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jwt_core::{create, import_pem, verify, Algorithm, JwtError, KeyRecord};
use jwt_test_utils::{TestClaimsBuilder, EC_FIXTURE_1, RSA_FIXTURE};

fn ec_key() -> KeyRecord {
    import_pem(Algorithm::Es256, "key-1", EC_FIXTURE_1.pkcs8_pem).unwrap()
}

fn rsa_key() -> KeyRecord {
    import_pem(Algorithm::Rs256, "key-1", RSA_FIXTURE.pkcs8_pem).unwrap()
}

fn issue(key: &KeyRecord) -> String {
    create(key, &TestClaimsBuilder::new().for_subject("me").build()).unwrap()
}

fn segments(token: &str) -> (String, String, String) {
    let parts: Vec<&str> = token.split('.').collect();
    (parts[0].to_string(), parts[1].to_string(), parts[2].to_string())
}

fn reencode_json(segment: &str, edit: impl FnOnce(&mut serde_json::Value)) -> String {
    let mut value: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment).unwrap()).unwrap();
    edit(&mut value);
    URL_SAFE_NO_PAD.encode(value.to_string())
}

#[test]
fn test_flipped_signature_bits_rejected() {
    for key in [ec_key(), rsa_key()] {
        let token = issue(&key);
        let (header, claims, signature) = segments(&token);
        let signature = URL_SAFE_NO_PAD.decode(signature).unwrap();

        for index in [0, signature.len() / 2, signature.len() - 1] {
            let mut tampered = signature.clone();
            tampered[index] ^= 0x01;
            let token = format!("{header}.{claims}.{}", URL_SAFE_NO_PAD.encode(&tampered));

            assert_eq!(
                verify(&key, &token),
                Err(JwtError::InvalidSignature),
                "{} signature byte {index}",
                key.alg()
            );
        }
    }
}

const BASE64URL_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

#[test]
fn test_changed_last_character_rejected() {
    // The final character also carries unused bits (4 for ES256, 2 for
    // RS256), so some replacements decode to the same signature bytes
    for key in [ec_key(), rsa_key()] {
        let token = issue(&key);
        let last = token.chars().last().unwrap();

        for replacement in BASE64URL_ALPHABET.chars().filter(|c| *c != last) {
            let mut tampered = token.clone();
            tampered.pop();
            tampered.push(replacement);

            assert_eq!(
                verify(&key, &tampered),
                Err(JwtError::InvalidSignature),
                "{} token with last character {last} replaced by {replacement}",
                key.alg()
            );
        }
    }
}

#[test]
fn test_modified_claims_rejected() {
    let key = rsa_key();
    let (header, claims, signature) = segments(&issue(&key));

    let claims = reencode_json(&claims, |value| value["sub"] = "admin".into());
    let token = format!("{header}.{claims}.{signature}");

    assert_eq!(verify(&key, &token), Err(JwtError::InvalidSignature));
}

#[test]
fn test_modified_header_kid_rejected() {
    let key = ec_key();
    let (header, claims, signature) = segments(&issue(&key));

    let header = reencode_json(&header, |value| value["kid"] = "key-2".into());
    let token = format!("{header}.{claims}.{signature}");

    assert_eq!(
        verify(&key, &token),
        Err(JwtError::KeyNotFound {
            kid: Some("key-2".to_string()),
            alg: "ES256".to_string(),
        })
    );
}

#[test]
fn test_modified_header_alg_rejected() {
    let key = ec_key();
    let (header, claims, signature) = segments(&issue(&key));

    let header = reencode_json(&header, |value| value["alg"] = "RS256".into());
    let token = format!("{header}.{claims}.{signature}");
    assert!(matches!(verify(&key, &token), Err(JwtError::KeyNotFound { .. })));

    let header = reencode_json(&header, |value| value["alg"] = "none".into());
    let token = format!("{header}.{claims}.");
    assert!(verify(&key, &token).is_err());
}

#[test]
fn test_header_without_kid_rejected() {
    let key = ec_key();
    let (header, claims, signature) = segments(&issue(&key));

    let header = reencode_json(&header, |value| {
        value.as_object_mut().unwrap().remove("kid");
    });
    let token = format!("{header}.{claims}.{signature}");

    assert_eq!(
        verify(&key, &token),
        Err(JwtError::KeyNotFound {
            kid: None,
            alg: "ES256".to_string(),
        })
    );
}

#[test]
fn test_truncated_token_rejected() {
    let key = ec_key();
    let token = issue(&key);
    let (signed, _) = token.rsplit_once('.').unwrap();

    assert!(matches!(verify(&key, signed), Err(JwtError::MalformedToken(_))));
    assert!(matches!(
        verify(&key, &format!("{token}.extra")),
        Err(JwtError::MalformedToken(_))
    ));
}
