//! Compact JWT decoding with optional HMAC signature verification.
//!
//! Header and payload are handed back as the exact JSON text carried by the
//! token so key order and formatting survive for display. Only the HMAC
//! family is verified; asymmetric algorithms are decoded but left
//! unverified.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use data_encoding::{Encoding, BASE64URL_NOPAD};
use serde::{Deserialize, Serialize};

use crate::hmac::{self, constant_time_eq, MacAlgorithm};
use crate::UtilityError;

/// JWS `alg` values the decoder recognises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JwtAlgorithm {
    Hs256,
    Hs384,
    Hs512,
    Rs256,
    Rs384,
    Rs512,
    Es256,
    Es384,
    Es512,
    Ps256,
    Ps384,
    Ps512,
    EdDsa,
}

impl JwtAlgorithm {
    /// Registered JWS name (`HS256`, `EdDSA`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hs256 => "HS256",
            Self::Hs384 => "HS384",
            Self::Hs512 => "HS512",
            Self::Rs256 => "RS256",
            Self::Rs384 => "RS384",
            Self::Rs512 => "RS512",
            Self::Es256 => "ES256",
            Self::Es384 => "ES384",
            Self::Es512 => "ES512",
            Self::Ps256 => "PS256",
            Self::Ps384 => "PS384",
            Self::Ps512 => "PS512",
            Self::EdDsa => "EdDSA",
        }
    }

    /// The MAC behind an `HS*` algorithm; `None` for asymmetric ones.
    #[must_use]
    pub const fn mac_algorithm(self) -> Option<MacAlgorithm> {
        match self {
            Self::Hs256 => Some(MacAlgorithm::Sha256),
            Self::Hs384 => Some(MacAlgorithm::Sha384),
            Self::Hs512 => Some(MacAlgorithm::Sha512),
            _ => None,
        }
    }
}

impl fmt::Display for JwtAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JwtAlgorithm {
    type Err = UtilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HS256" => Ok(Self::Hs256),
            "HS384" => Ok(Self::Hs384),
            "HS512" => Ok(Self::Hs512),
            "RS256" => Ok(Self::Rs256),
            "RS384" => Ok(Self::Rs384),
            "RS512" => Ok(Self::Rs512),
            "ES256" => Ok(Self::Es256),
            "ES384" => Ok(Self::Es384),
            "ES512" => Ok(Self::Es512),
            "PS256" => Ok(Self::Ps256),
            "PS384" => Ok(Self::Ps384),
            "PS512" => Ok(Self::Ps512),
            "EDDSA" => Ok(Self::EdDsa),
            _ => Err(UtilityError::UnsupportedAlgorithm(format!(
                "unsupported JWT algorithm '{s}'"
            ))),
        }
    }
}

/// Outcome of the signature check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationState {
    Valid,
    Invalid,
    /// No secret supplied, or an algorithm that is decoded only.
    Unverified,
}

/// The three logical parts of a compact JWT.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtParts {
    /// Header JSON text, verbatim.
    pub header: String,
    /// Payload JSON text, verbatim.
    pub payload: String,
    /// Raw signature bytes.
    pub signature: Vec<u8>,
    pub verification: VerificationState,
}

/// Split, decode and optionally verify a compact JWT.
///
/// Verification is attempted only for an `HS*` `algorithm` with a secret.
/// It fails (`Invalid`) when the header names a different `alg` than the
/// caller declared, so a token cannot pick its own algorithm.
///
/// # Errors
/// - `MalformedToken` if the token does not have exactly three segments, a
///   segment is not Base64url, or header/payload are not UTF-8
pub fn decode_jwt(
    input: &str,
    algorithm: JwtAlgorithm,
    secret: Option<&[u8]>,
) -> Result<JwtParts, UtilityError> {
    let token = input.trim();
    let segments: Vec<&str> = token.split('.').collect();
    let [header_segment, payload_segment, signature_segment] = segments.as_slice() else {
        return Err(UtilityError::MalformedToken(format!(
            "JWT must have 3 segments, found {}",
            segments.len()
        )));
    };

    let header = decode_text(header_segment, "header")?;
    let payload = decode_text(payload_segment, "payload")?;
    let signature = decode_segment(signature_segment, "signature")?;

    let verification = match (algorithm.mac_algorithm(), secret) {
        (Some(mac), Some(secret)) => {
            if header_alg(&header).as_deref() == Some(algorithm.as_str()) {
                let signing_input = format!("{header_segment}.{payload_segment}");
                let expected =
                    BASE64URL_NOPAD.encode(&hmac::sign(mac, secret, signing_input.as_bytes()));
                let provided = signature_segment.trim_end_matches('=');
                if constant_time_eq(expected.as_bytes(), provided.as_bytes()) {
                    VerificationState::Valid
                } else {
                    VerificationState::Invalid
                }
            } else {
                VerificationState::Invalid
            }
        }
        _ => VerificationState::Unverified,
    };

    Ok(JwtParts {
        header,
        payload,
        signature,
        verification,
    })
}

/// Unpadded Base64url that tolerates non-zero trailing bits, so a tampered
/// final character still decodes and is then rejected by the comparison.
#[allow(clippy::expect_used)]
static SEGMENT_CODEC: LazyLock<Encoding> = LazyLock::new(|| {
    let mut spec = BASE64URL_NOPAD.specification();
    spec.check_trailing_bits = false;
    spec.encoding().expect("Base64url specification is valid")
});

fn decode_segment(segment: &str, what: &str) -> Result<Vec<u8>, UtilityError> {
    SEGMENT_CODEC
        .decode(segment.trim_end_matches('=').as_bytes())
        .map_err(|e| UtilityError::MalformedToken(format!("{what} is not valid base64url: {e}")))
}

fn decode_text(segment: &str, what: &str) -> Result<String, UtilityError> {
    String::from_utf8(decode_segment(segment, what)?)
        .map_err(|_| UtilityError::MalformedToken(format!("{what} is not valid UTF-8")))
}

/// `alg` member of the header, if the header is a JSON object carrying one.
fn header_alg(header: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(header).ok()?;
    value.get("alg")?.as_str().map(str::to_owned)
}
