//! UUID / ULID / Nano ID generation and UUID analysis commands.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use devutil_core::clock::Clock;
use devutil_core::identifier::{self, BatchSize, UuidRecord};

use super::{to_u32, to_u64};
use crate::{CommandConfig, CommandError};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request DTO for `generate_uuid_v4` and `generate_ulid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIdsRequest {
    /// How many identifiers (default: 1).
    pub count: Option<i64>,
}

/// Request DTO for `generate_uuid_v1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateUuidV1Request {
    pub count: Option<i64>,
    /// Unix seconds (default: now).
    pub timestamp: Option<i64>,
    /// `AA:BB:CC:DD:EE:FF` node (default: random multicast node).
    pub mac_address: Option<String>,
}

/// Request DTO for `generate_uuid_v3` and `generate_uuid_v5`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNameBasedRequest {
    pub count: Option<i64>,
    /// `dns`, `url`, `oid`, `x500` or a UUID.
    pub namespace: String,
    pub name: String,
}

/// Request DTO for `generate_uuid_v7`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateUuidV7Request {
    pub count: Option<i64>,
    /// Unix seconds (default: now).
    pub timestamp: Option<i64>,
}

/// Request DTO for `generate_nanoid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNanoidRequest {
    pub count: Option<i64>,
    /// Length of each ID (default: configured, normally 21).
    pub size: Option<i64>,
    /// Symbols to draw from (default: URL-safe alphabet).
    pub alphabet: Option<String>,
}

/// Request DTO for `analyze_uuid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeUuidRequest {
    pub input: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn batch(count: Option<i64>, config: &CommandConfig) -> Result<BatchSize, CommandError> {
    let count = count.unwrap_or(1);
    let count = u64::try_from(count).map_err(|_| {
        CommandError::invalid_parameters(format!(
            "count must be between 1 and {}, got {count}",
            config.max_batch
        ))
    })?;
    Ok(BatchSize::new(count, config.max_batch)?)
}

fn seconds(timestamp: Option<i64>) -> Result<Option<u64>, CommandError> {
    timestamp.map(|t| to_u64(t, "timestamp")).transpose()
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// # Errors
///
/// `InvalidParameters` for a bad count, timestamp or MAC address.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_uuid_v1<R: RngCore + CryptoRng>(
    request: GenerateUuidV1Request,
    config: &CommandConfig,
    clock: &impl Clock,
    rng: &mut R,
) -> Result<Vec<String>, CommandError> {
    Ok(identifier::generate_uuid_v1(
        batch(request.count, config)?,
        seconds(request.timestamp)?,
        request.mac_address.as_deref().filter(|mac| !mac.trim().is_empty()),
        clock,
        rng,
    )?)
}

/// # Errors
///
/// `InvalidParameters` for a bad count or namespace.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_uuid_v3(
    request: GenerateNameBasedRequest,
    config: &CommandConfig,
) -> Result<Vec<String>, CommandError> {
    Ok(identifier::generate_uuid_v3(
        batch(request.count, config)?,
        &request.namespace,
        &request.name,
    )?)
}

/// # Errors
///
/// `InvalidParameters` for a bad count.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_uuid_v4<R: RngCore + CryptoRng>(
    request: GenerateIdsRequest,
    config: &CommandConfig,
    rng: &mut R,
) -> Result<Vec<String>, CommandError> {
    Ok(identifier::generate_uuid_v4(batch(request.count, config)?, rng))
}

/// # Errors
///
/// `InvalidParameters` for a bad count or namespace.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_uuid_v5(
    request: GenerateNameBasedRequest,
    config: &CommandConfig,
) -> Result<Vec<String>, CommandError> {
    Ok(identifier::generate_uuid_v5(
        batch(request.count, config)?,
        &request.namespace,
        &request.name,
    )?)
}

/// # Errors
///
/// `InvalidParameters` for a bad count or timestamp.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_uuid_v7<R: RngCore + CryptoRng>(
    request: GenerateUuidV7Request,
    config: &CommandConfig,
    clock: &impl Clock,
    rng: &mut R,
) -> Result<Vec<String>, CommandError> {
    Ok(identifier::generate_uuid_v7(
        batch(request.count, config)?,
        seconds(request.timestamp)?,
        clock,
        rng,
    )?)
}

/// # Errors
///
/// `InvalidParameters` for a bad count.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_ulid<R: RngCore + CryptoRng>(
    request: GenerateIdsRequest,
    config: &CommandConfig,
    clock: &impl Clock,
    rng: &mut R,
) -> Result<Vec<String>, CommandError> {
    Ok(identifier::generate_ulid(batch(request.count, config)?, clock, rng))
}

/// # Errors
///
/// `InvalidParameters` for a bad count, size or alphabet.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_nanoid<R: RngCore + CryptoRng>(
    request: GenerateNanoidRequest,
    config: &CommandConfig,
    rng: &mut R,
) -> Result<Vec<String>, CommandError> {
    let size = match request.size {
        None => config.default_nanoid_size,
        Some(size) => usize::try_from(to_u32(size, "size")?)
            .map_err(|_| CommandError::invalid_parameters(format!("size out of range: {size}")))?,
    };
    Ok(identifier::generate_nanoid(
        batch(request.count, config)?,
        size,
        request.alphabet.as_deref().filter(|a| !a.is_empty()),
        rng,
    )?)
}

/// # Errors
///
/// `MalformedInput` if `input` is not a UUID.
#[allow(clippy::needless_pass_by_value)]
pub fn analyze_uuid(request: AnalyzeUuidRequest) -> Result<UuidRecord, CommandError> {
    Ok(identifier::analyze_uuid(&request.input)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
