//! Base64 encode/decode commands.
//!
//! The core codec works on bytes; these commands work on UTF-8 text.

use serde::{Deserialize, Serialize};

use devutil_core::codec::{self, Base64Engine};

use crate::CommandError;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request DTO shared by `encode_base64` and `decode_base64`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64Request {
    pub input: String,
    /// `standard` (default) or `url_safe`.
    #[serde(default = "default_engine")]
    pub engine: Base64Engine,
}

const fn default_engine() -> Base64Engine {
    Base64Engine::Standard
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Encode the UTF-8 bytes of `input`.
///
/// # Errors
///
/// Never fails; the `Result` keeps the handler signature uniform.
#[allow(clippy::needless_pass_by_value, clippy::unnecessary_wraps)]
pub fn encode_base64(request: Base64Request) -> Result<String, CommandError> {
    Ok(codec::encode_base64(request.input.as_bytes(), request.engine))
}

/// Decode `input` and return it as text.
///
/// # Errors
///
/// `MalformedInput` if `input` is not valid for the engine or the decoded
/// bytes are not UTF-8.
#[allow(clippy::needless_pass_by_value)]
pub fn decode_base64(request: Base64Request) -> Result<String, CommandError> {
    let bytes = codec::decode_base64(request.input.trim(), request.engine)?;
    String::from_utf8(bytes).map_err(|_| {
        CommandError::new(
            crate::CommandErrorKind::MalformedInput,
            "decoded bytes are not valid UTF-8",
        )
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
