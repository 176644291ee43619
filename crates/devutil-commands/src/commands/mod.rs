//! Command handlers grouped by tool.
//!
//! Each handler takes a deserialized request DTO and returns a result DTO
//! or a [`CommandError`]. Randomness, time and settings are passed in by
//! the [`Dispatcher`](crate::Dispatcher).

pub mod codec;
pub mod hash;
pub mod identifiers;
pub mod jwt;
pub mod totp;

use crate::CommandError;

/// Narrow a caller-supplied integer to `u32`, rejecting negatives and overflow.
pub(crate) fn to_u32(value: i64, field: &str) -> Result<u32, CommandError> {
    u32::try_from(value).map_err(|_| {
        CommandError::invalid_parameters(format!(
            "{field} must be a non-negative 32-bit integer, got {value}"
        ))
    })
}

/// Narrow a caller-supplied integer to `u64`, rejecting negatives.
pub(crate) fn to_u64(value: i64, field: &str) -> Result<u64, CommandError> {
    u64::try_from(value).map_err(|_| {
        CommandError::invalid_parameters(format!("{field} must not be negative, got {value}"))
    })
}
