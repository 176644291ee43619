//! TOTP / HOTP commands.
//!
//! Secrets and codes pass through here; none of them are ever logged.
//! `Debug` on request DTOs masks the secret.

use std::fmt;

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use devutil_core::clock::Clock;
use devutil_core::totp::{
    self, HotpCode, OtpAlgorithm, ProvisioningRequest, TotpCode, TotpSecretBundle,
    TotpValidationOutcome, DEFAULT_DIGITS, DEFAULT_PERIOD,
};

use super::{to_u32, to_u64};
use crate::{CommandConfig, CommandError};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request DTO for `generate_totp_secret`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTotpSecretRequest {
    pub issuer: String,
    pub account: String,
    /// `SHA1` (default), `SHA256` or `SHA512`.
    pub algorithm: Option<String>,
    /// Code length (default: 6).
    pub digits: Option<i64>,
    /// Step in seconds (default: 30).
    pub period: Option<i64>,
    /// Logo URL some authenticator apps display.
    pub image: Option<String>,
    /// Label as `issuer:account` (default: true).
    pub add_issuer_prefix: Option<bool>,
}

/// OTP settings shared by the code commands.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpSettings {
    /// Base32 shared secret.
    pub secret: String,
    pub algorithm: Option<String>,
    pub digits: Option<i64>,
    pub period: Option<i64>,
}

impl fmt::Debug for TotpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TotpSettings")
            .field("secret", &"***")
            .field("algorithm", &self.algorithm)
            .field("digits", &self.digits)
            .field("period", &self.period)
            .finish()
    }
}

/// Request DTO for `generate_totp_code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTotpCodeRequest {
    #[serde(flatten)]
    pub settings: TotpSettings,
}

/// Request DTO for `generate_totp_code_for_time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTotpCodeForTimeRequest {
    #[serde(flatten)]
    pub settings: TotpSettings,
    /// Unix time in seconds.
    pub timestamp: i64,
}

/// Request DTO for `validate_totp_code`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTotpCodeRequest {
    #[serde(flatten)]
    pub settings: TotpSettings,
    pub code: String,
    /// ± windows to accept (default: configured, normally 1).
    pub window: Option<i64>,
}

impl fmt::Debug for ValidateTotpCodeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateTotpCodeRequest")
            .field("settings", &self.settings)
            .field("code", &"***")
            .field("window", &self.window)
            .finish()
    }
}

/// Request DTO for `generate_hotp_code`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateHotpCodeRequest {
    pub secret: String,
    pub counter: u64,
    pub algorithm: Option<String>,
    pub digits: Option<i64>,
}

impl fmt::Debug for GenerateHotpCodeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateHotpCodeRequest")
            .field("secret", &"***")
            .field("counter", &self.counter)
            .field("algorithm", &self.algorithm)
            .field("digits", &self.digits)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_algorithm(algorithm: Option<&str>) -> Result<OtpAlgorithm, CommandError> {
    match algorithm {
        None => Ok(OtpAlgorithm::Sha1),
        Some(name) => Ok(name.parse::<OtpAlgorithm>()?),
    }
}

fn parse_digits(digits: Option<i64>) -> Result<u32, CommandError> {
    digits.map_or(Ok(DEFAULT_DIGITS), |d| to_u32(d, "digits"))
}

/// `period <= 0` is rejected here; zero is rejected again by the engine.
fn parse_period(period: Option<i64>) -> Result<u32, CommandError> {
    match period {
        None => Ok(DEFAULT_PERIOD),
        Some(p) if p <= 0 => Err(CommandError::invalid_parameters(format!(
            "period must be > 0, got {p}"
        ))),
        Some(p) => to_u32(p, "period"),
    }
}

fn code_for(settings: &TotpSettings, time: u64) -> Result<TotpCode, CommandError> {
    Ok(totp::generate_code(
        &settings.secret,
        parse_algorithm(settings.algorithm.as_deref())?,
        parse_digits(settings.digits)?,
        parse_period(settings.period)?,
        time,
    )?)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Create a fresh secret with its `otpauth://` URI and QR link.
///
/// # Errors
///
/// `InvalidParameters` for digits outside 4..=8 or a non-positive period,
/// `UnsupportedAlgorithm` for an unknown algorithm name.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_totp_secret<R: RngCore + CryptoRng>(
    request: GenerateTotpSecretRequest,
    config: &CommandConfig,
    rng: &mut R,
) -> Result<TotpSecretBundle, CommandError> {
    let provisioning = ProvisioningRequest {
        issuer: request.issuer,
        account: request.account,
        algorithm: parse_algorithm(request.algorithm.as_deref())?,
        digits: parse_digits(request.digits)?,
        period: parse_period(request.period)?,
        image: request.image.filter(|url| !url.is_empty()),
        add_issuer_prefix: request.add_issuer_prefix.unwrap_or(true),
    };
    Ok(totp::generate_secret(
        &provisioning,
        &config.qr_code_endpoint,
        rng,
    )?)
}

/// Code for the current time.
///
/// # Errors
///
/// `InvalidParameters`, `InvalidSecret` or `UnsupportedAlgorithm`.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_totp_code(
    request: GenerateTotpCodeRequest,
    clock: &impl Clock,
) -> Result<TotpCode, CommandError> {
    code_for(&request.settings, clock.unix_seconds())
}

/// Code for an explicit unix timestamp.
///
/// # Errors
///
/// Same as [`generate_totp_code`], plus `InvalidParameters` for a negative timestamp.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_totp_code_for_time(
    request: GenerateTotpCodeForTimeRequest,
) -> Result<TotpCode, CommandError> {
    let time = to_u64(request.timestamp, "timestamp")?;
    code_for(&request.settings, time)
}

/// Check a code against the current window and its neighbours.
///
/// # Errors
///
/// `InvalidParameters`, `InvalidSecret` or `UnsupportedAlgorithm`. A wrong
/// code is not an error; it yields `isValid: false`.
#[allow(clippy::needless_pass_by_value)]
pub fn validate_totp_code(
    request: ValidateTotpCodeRequest,
    config: &CommandConfig,
    clock: &impl Clock,
) -> Result<TotpValidationOutcome, CommandError> {
    let settings = &request.settings;
    let window = request
        .window
        .map_or(Ok(config.default_validation_window), |w| to_u32(w, "window"))?;
    Ok(totp::validate_code(
        &settings.secret,
        request.code.trim(),
        parse_algorithm(settings.algorithm.as_deref())?,
        parse_digits(settings.digits)?,
        parse_period(settings.period)?,
        window,
        clock.unix_seconds(),
    )?)
}

/// Counter-based code (RFC 4226).
///
/// # Errors
///
/// `InvalidParameters`, `InvalidSecret` or `UnsupportedAlgorithm`.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_hotp_code(request: GenerateHotpCodeRequest) -> Result<HotpCode, CommandError> {
    Ok(totp::generate_hotp_code(
        &request.secret,
        request.counter,
        parse_algorithm(request.algorithm.as_deref())?,
        parse_digits(request.digits)?,
    )?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
