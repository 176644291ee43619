//! Unique identifier generation and UUID analysis.
//!
//! Generators cover UUID v1/v3/v4/v5/v7, ULID and Nano ID. Every random
//! or time-dependent generator takes its entropy source and clock as
//! parameters. [`analyze_uuid`] decomposes an arbitrary UUID string into
//! a [`UuidRecord`] whose version-specific fields are a tagged union.

mod analyze;
mod generate;

pub use analyze::{
    analyze_uuid, NameBasedFields, TimeBasedFields, UnixTimeFields, UuidRecord, UuidVersion,
    VersionFields,
};
pub use generate::{
    generate_nanoid, generate_ulid, generate_uuid_v1, generate_uuid_v3, generate_uuid_v4,
    generate_uuid_v5, generate_uuid_v7, DEFAULT_NANOID_SIZE, MAX_NANOID_SIZE,
};

use data_encoding::HEXLOWER_PERMISSIVE;
use uuid::Uuid;

use crate::UtilityError;

/// Default upper bound on identifiers produced by one call.
pub const MAX_BATCH: usize = 10_000;

/// A validated number of identifiers to produce (1..=ceiling).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchSize(usize);

impl BatchSize {
    /// Check `count` against `1..=ceiling`.
    ///
    /// # Errors
    /// Returns `UtilityError::InvalidParameters` when `count` is zero or above `ceiling`.
    pub fn new(count: u64, ceiling: usize) -> Result<Self, UtilityError> {
        match usize::try_from(count) {
            Ok(n) if (1..=ceiling).contains(&n) => Ok(Self(n)),
            _ => Err(UtilityError::InvalidParameters(format!(
                "count must be between 1 and {ceiling}, got {count}"
            ))),
        }
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Resolve a namespace for v3/v5: `dns`, `url`, `oid`, `x500` or a UUID string.
///
/// # Errors
/// Returns `UtilityError::InvalidParameters` for anything else.
pub fn parse_namespace(namespace: &str) -> Result<Uuid, UtilityError> {
    let trimmed = namespace.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "dns" => Ok(Uuid::NAMESPACE_DNS),
        "url" => Ok(Uuid::NAMESPACE_URL),
        "oid" => Ok(Uuid::NAMESPACE_OID),
        "x500" => Ok(Uuid::NAMESPACE_X500),
        _ => parse_uuid_text(trimmed).map_err(|_| {
            UtilityError::InvalidParameters(format!(
                "namespace must be dns, url, oid, x500 or a UUID, got '{namespace}'"
            ))
        }),
    }
}

/// Strict textual UUID parsing: 36 chars with hyphens at 8/13/18/23, or 32 hex chars.
///
/// Braced and `urn:uuid:` forms are rejected.
pub(crate) fn parse_uuid_text(input: &str) -> Result<Uuid, UtilityError> {
    let hex: String = match input.len() {
        36 => {
            for (i, c) in input.char_indices() {
                let hyphen_slot = matches!(i, 8 | 13 | 18 | 23);
                if hyphen_slot != (c == '-') {
                    return Err(UtilityError::MalformedInput(format!(
                        "unexpected '{c}' at position {i} in UUID"
                    )));
                }
            }
            input.chars().filter(|c| *c != '-').collect()
        }
        32 => input.to_owned(),
        n => {
            return Err(UtilityError::MalformedInput(format!(
                "UUID must be 32 or 36 characters, got {n}"
            )))
        }
    };

    let bytes = HEXLOWER_PERMISSIVE
        .decode(hex.as_bytes())
        .map_err(|e| UtilityError::MalformedInput(format!("UUID is not hex: {e}")))?;
    let bytes: [u8; 16] = bytes
        .try_into()
        .map_err(|_| UtilityError::MalformedInput("UUID must decode to 16 bytes".to_owned()))?;
    Ok(Uuid::from_bytes(bytes))
}
