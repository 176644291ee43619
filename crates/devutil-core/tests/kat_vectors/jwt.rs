//! jwt.io sample tokens signed with HS256/HS384/HS512.

use devutil_core::jwt::{decode_jwt, JwtAlgorithm, VerificationState};

const HEADER_HS256: &str = r#"{"alg":"HS256","typ":"JWT"}"#;
const PAYLOAD: &str = r#"{"sub":"1234567890","name":"John Doe","iat":1516239022}"#;

const HS256_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
    eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
    SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

const HS384_TOKEN: &str = "eyJhbGciOiJIUzM4NCIsInR5cCI6IkpXVCJ9.\
    eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
    hO2sthNQUSfvI9ylUdMKDxcrm8jB3KL6Rtkd3FOskL-jVqYh2CK1es8FKCQO8_tW";

const HS512_TOKEN: &str = "eyJhbGciOiJIUzUxMiIsInR5cCI6IkpXVCJ9.\
    eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
    wUVS6tazE2N98_J4SH_djkEe1igXPu0qILAvVXCiO6O20gdf5vZ2sYFWX3c-Hy6L4TD47b3DSAAO9XjSqpJfag";

#[test]
fn hs256_sample_decodes_and_verifies() {
    let parts = decode_jwt(HS256_TOKEN, JwtAlgorithm::Hs256, Some(b"your-256-bit-secret")).unwrap();
    assert_eq!(parts.header, HEADER_HS256);
    assert_eq!(parts.payload, PAYLOAD);
    assert_eq!(parts.signature.len(), 32);
    assert_eq!(parts.verification, VerificationState::Valid);
}

#[test]
fn hs384_and_hs512_verify() {
    let parts = decode_jwt(HS384_TOKEN, JwtAlgorithm::Hs384, Some(b"secret")).unwrap();
    assert_eq!(parts.header, r#"{"alg":"HS384","typ":"JWT"}"#);
    assert_eq!(parts.signature.len(), 48);
    assert_eq!(parts.verification, VerificationState::Valid);

    let parts = decode_jwt(HS512_TOKEN, JwtAlgorithm::Hs512, Some(b"secret")).unwrap();
    assert_eq!(parts.signature.len(), 64);
    assert_eq!(parts.verification, VerificationState::Valid);
}

#[test]
fn every_single_character_flip_in_signature_is_invalid() {
    let signature_start = HS256_TOKEN.rfind('.').unwrap() + 1;
    for i in signature_start..HS256_TOKEN.len() {
        let mut bytes = HS256_TOKEN.as_bytes().to_vec();
        bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();
        let parts =
            decode_jwt(&tampered, JwtAlgorithm::Hs256, Some(b"your-256-bit-secret")).unwrap();
        assert_eq!(parts.verification, VerificationState::Invalid, "flip at {i}");
    }
}
