//! Error types for `devutil-core`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the encoding, hashing, OTP and identifier operations.
///
/// Every variant carries a human-readable message. The variant itself is the
/// machine-distinguishable part; see [`UtilityError::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UtilityError {
    /// Out-of-range digits, period, count or similar, caught before any work.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// OTP secret is not valid Base32 (or is empty).
    #[error("invalid secret: {0}")]
    InvalidSecret(String),

    /// Caller-supplied encoded data (Base64, hex, UUID text) failed to parse.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// JWT does not have three valid Base64url segments.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Algorithm name outside the supported set.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Discriminant of [`UtilityError`], stable across the IPC boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    InvalidParameters,
    InvalidSecret,
    MalformedInput,
    MalformedToken,
    UnsupportedAlgorithm,
}

impl UtilityError {
    /// Return the error kind without the message.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameters(_) => ErrorKind::InvalidParameters,
            Self::InvalidSecret(_) => ErrorKind::InvalidSecret,
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            Self::MalformedToken(_) => ErrorKind::MalformedToken,
            Self::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
        }
    }
}
