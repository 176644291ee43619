//! Multi-algorithm hash command.

use serde::{Deserialize, Serialize};

use devutil_core::hash::{self, HashDigestSet};

use crate::CommandError;

/// Request DTO for `generate_hashes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateHashesRequest {
    pub input: String,
}

/// Hash `input` under every supported algorithm.
///
/// # Errors
///
/// Never fails; the `Result` keeps the handler signature uniform.
#[allow(clippy::needless_pass_by_value, clippy::unnecessary_wraps)]
pub fn generate_hashes(request: GenerateHashesRequest) -> Result<HashDigestSet, CommandError> {
    Ok(hash::generate_hashes(&request.input))
}
