//! JWT decode/verify command.

use std::fmt;

use serde::{Deserialize, Serialize};

use devutil_core::codec::encode_hex;
use devutil_core::jwt::{self, JwtAlgorithm, VerificationState};

use crate::CommandError;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request DTO for `decode_jwt`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeJwtRequest {
    /// Compact token `header.payload.signature`.
    pub input: String,
    /// Declared algorithm (default: `HS256`).
    pub algorithm: Option<String>,
    /// HMAC key as UTF-8 text. Empty means "do not verify".
    pub secret: Option<String>,
}

impl fmt::Debug for DecodeJwtRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeJwtRequest")
            .field("input", &"***")
            .field("algorithm", &self.algorithm)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Result DTO for `decode_jwt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeJwtResult {
    /// Header JSON exactly as carried by the token.
    pub header: String,
    /// Payload JSON exactly as carried by the token.
    pub payload: String,
    /// Signature bytes as lowercase hex.
    pub signature: String,
    pub verified: VerificationState,
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Decode a token and verify it when a secret is given.
///
/// # Errors
///
/// `MalformedToken` for a structurally broken token, `UnsupportedAlgorithm`
/// for an unknown algorithm name. A bad signature is not an error.
#[allow(clippy::needless_pass_by_value)]
pub fn decode_jwt(request: DecodeJwtRequest) -> Result<DecodeJwtResult, CommandError> {
    let algorithm = match request.algorithm.as_deref() {
        None | Some("") => JwtAlgorithm::Hs256,
        Some(name) => name.parse::<JwtAlgorithm>()?,
    };
    let secret = request
        .secret
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::as_bytes);

    let parts = jwt::decode_jwt(&request.input, algorithm, secret)?;
    Ok(DecodeJwtResult {
        header: parts.header,
        payload: parts.payload,
        signature: encode_hex(&parts.signature),
        verified: parts.verification,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
