//! Base64, Base32 and hex codecs.
//!
//! Thin wrappers over `data-encoding` that pin down which engine is used for
//! which job and map decode failures onto [`UtilityError`] kinds:
//!
//! - Base64 (standard, padded) and Base64url (unpadded) for the codec tool and JWT
//! - Base32 (RFC 4648, unpadded) for OTP secrets
//! - lowercase hex for digests

use std::sync::LazyLock;

use data_encoding::{Encoding, BASE32_NOPAD, BASE64, BASE64URL_NOPAD, HEXLOWER};
use serde::{Deserialize, Serialize};

use crate::UtilityError;

/// Unpadded Base32 that does not reject non-zero trailing bits.
#[allow(clippy::expect_used)]
static LENIENT_BASE32: LazyLock<Encoding> = LazyLock::new(|| {
    let mut spec = BASE32_NOPAD.specification();
    spec.check_trailing_bits = false;
    spec.encoding().expect("RFC 4648 Base32 specification is valid")
});

// ── Base64 ──────────────────────────────────────────────────────────

/// Which Base64 alphabet to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base64Engine {
    /// `+/` alphabet with `=` padding.
    Standard,
    /// `-_` alphabet, no padding on output.
    UrlSafe,
}

/// Encode bytes as Base64 with the given engine.
#[must_use]
pub fn encode_base64(bytes: &[u8], engine: Base64Engine) -> String {
    match engine {
        Base64Engine::Standard => BASE64.encode(bytes),
        Base64Engine::UrlSafe => BASE64URL_NOPAD.encode(bytes),
    }
}

/// Decode Base64 text with the given engine.
///
/// The standard engine requires canonical padding. The URL-safe engine
/// accepts input with or without trailing `=`.
///
/// # Errors
/// Returns `UtilityError::MalformedInput` if the text is not valid for the engine.
pub fn decode_base64(input: &str, engine: Base64Engine) -> Result<Vec<u8>, UtilityError> {
    let decoded = match engine {
        Base64Engine::Standard => BASE64.decode(input.as_bytes()),
        Base64Engine::UrlSafe => BASE64URL_NOPAD.decode(input.trim_end_matches('=').as_bytes()),
    };
    decoded.map_err(|e| UtilityError::MalformedInput(format!("invalid base64: {e}")))
}

// ── Base32 ──────────────────────────────────────────────────────────

/// Encode bytes as unpadded RFC 4648 Base32.
#[must_use]
pub fn encode_base32(bytes: &[u8]) -> String {
    BASE32_NOPAD.encode(bytes)
}

/// Decode an OTP secret from Base32.
///
/// Lenient in the ways authenticator apps are: case-insensitive, padding
/// optional, embedded whitespace ignored, non-zero trailing bits accepted.
///
/// # Errors
/// Returns `UtilityError::InvalidSecret` if the secret is empty, contains a
/// character outside the Base32 alphabet, or has an impossible length.
pub fn decode_base32(input: &str) -> Result<Vec<u8>, UtilityError> {
    let normalized: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .trim_end_matches('=')
        .to_ascii_uppercase();

    if normalized.is_empty() {
        return Err(UtilityError::InvalidSecret("secret must not be empty".to_owned()));
    }

    LENIENT_BASE32
        .decode(normalized.as_bytes())
        .map_err(|e| UtilityError::InvalidSecret(format!("invalid base32: {e}")))
}

// ── Hex ─────────────────────────────────────────────────────────────

/// Encode bytes as lowercase hex.
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    HEXLOWER.encode(bytes)
}

// ── Tests ───────────────────────────────────────────────────────────
