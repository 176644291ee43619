//! RFC 6238 TOTP and RFC 4226 HOTP engine.
//!
//! Provides standards-compliant one-time password generation using
//! `ring::hmac` for HMAC-SHA1, HMAC-SHA256, and HMAC-SHA512, secret
//! provisioning (`otpauth://` URIs), and skew-tolerant validation.

use std::fmt;
use std::str::FromStr;

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::codec::{decode_base32, encode_base32};
use crate::hmac::{self, constant_time_eq, MacAlgorithm};
use crate::UtilityError;

// ── Constants ───────────────────────────────────────────────────────

/// Default TOTP period in seconds (RFC 6238 §4).
pub const DEFAULT_PERIOD: u32 = 30;

/// Default number of code digits.
pub const DEFAULT_DIGITS: u32 = 6;

/// Default validation tolerance (±1 step per RFC 6238 §5.2).
pub const DEFAULT_WINDOW: u32 = 1;

/// Largest accepted validation tolerance, in steps on each side.
pub const MAX_WINDOW: u32 = 10;

/// Smallest accepted digit count.
pub const MIN_DIGITS: u32 = 4;

/// Largest accepted digit count (10^8 still fits a `u32`).
pub const MAX_DIGITS: u32 = 8;

/// QR rendering service the provisioning URI is handed to.
pub const DEFAULT_QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/?size=300x300";

// ── Types ───────────────────────────────────────────────────────────

/// HMAC algorithm used for OTP generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtpAlgorithm {
    /// HMAC-SHA1 (default for most authenticator apps).
    #[serde(rename = "SHA1", alias = "sha1", alias = "Sha1")]
    Sha1,
    /// HMAC-SHA256.
    #[serde(rename = "SHA256", alias = "sha256", alias = "Sha256")]
    Sha256,
    /// HMAC-SHA512.
    #[serde(rename = "SHA512", alias = "sha512", alias = "Sha512")]
    Sha512,
}

impl OtpAlgorithm {
    /// Name used in `otpauth://` URIs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }

    /// Length of a freshly generated secret: 160 bits for SHA1, 256 bits otherwise.
    #[must_use]
    pub const fn secret_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 | Self::Sha512 => 32,
        }
    }

    const fn mac_algorithm(self) -> MacAlgorithm {
        match self {
            Self::Sha1 => MacAlgorithm::Sha1,
            Self::Sha256 => MacAlgorithm::Sha256,
            Self::Sha512 => MacAlgorithm::Sha512,
        }
    }
}

impl fmt::Display for OtpAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpAlgorithm {
    type Err = UtilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" => Ok(Self::Sha1),
            "SHA256" => Ok(Self::Sha256),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(UtilityError::UnsupportedAlgorithm(format!(
                "OTP algorithm must be SHA1, SHA256 or SHA512, got '{s}'"
            ))),
        }
    }
}

/// Number of digits in an OTP code, always within [`MIN_DIGITS`]..=[`MAX_DIGITS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OtpDigits(u8);

impl OtpDigits {
    /// 6-digit code (standard).
    pub const SIX: Self = Self(6);
    /// 8-digit code.
    pub const EIGHT: Self = Self(8);

    /// Validate a caller-supplied digit count.
    ///
    /// # Errors
    /// Returns `UtilityError::InvalidParameters` outside 4..=8.
    pub fn new(digits: u32) -> Result<Self, UtilityError> {
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
            return Err(UtilityError::InvalidParameters(format!(
                "digits must be between {MIN_DIGITS} and {MAX_DIGITS}, got {digits}"
            )));
        }
        u8::try_from(digits)
            .map(Self)
            .map_err(|_| UtilityError::InvalidParameters(format!("digits out of range: {digits}")))
    }

    /// Return the numeric digit count.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Return the modulus value (10^digits) for truncation.
    #[must_use]
    const fn modulus(self) -> u32 {
        match self.0 {
            4 => 10_000,
            5 => 100_000,
            6 => 1_000_000,
            7 => 10_000_000,
            _ => 100_000_000,
        }
    }
}

fn check_period(period: u32) -> Result<(), UtilityError> {
    if period == 0 {
        return Err(UtilityError::InvalidParameters("period must be > 0".to_owned()));
    }
    Ok(())
}

// ── HOTP (RFC 4226) ────────────────────────────────────────────────

/// Generate an HOTP code per RFC 4226.
///
/// # Arguments
/// - `secret`: Shared secret key bytes
/// - `counter`: 8-byte counter value (big-endian per RFC 4226 §5.2)
/// - `digits`: Number of output digits
/// - `algorithm`: HMAC algorithm to use
///
/// # Errors
/// Returns `UtilityError::InvalidSecret` if the secret is empty.
#[must_use = "OTP code should be used or stored"]
pub fn generate_hotp(
    secret: &[u8],
    counter: u64,
    digits: OtpDigits,
    algorithm: OtpAlgorithm,
) -> Result<String, UtilityError> {
    if secret.is_empty() {
        return Err(UtilityError::InvalidSecret("secret must not be empty".to_owned()));
    }

    // HMAC(K, C) where C is counter as 8-byte big-endian (RFC 4226 §5.2).
    let hmac_result = hmac::sign(algorithm.mac_algorithm(), secret, &counter.to_be_bytes());

    // Dynamic Truncation (RFC 4226 §5.3).
    // offset = low-order 4 bits of last byte; the shortest tag (SHA1) is
    // 20 bytes, so offset + 3 <= 18 is always in bounds.
    let offset = usize::from(hmac_result[hmac_result.len().wrapping_sub(1)] & 0x0F);

    // Extract 4 bytes starting at offset, mask high bit (0x7FFFFFFF).
    let binary_code = u32::from_be_bytes([
        hmac_result[offset] & 0x7F,
        hmac_result[offset.wrapping_add(1)],
        hmac_result[offset.wrapping_add(2)],
        hmac_result[offset.wrapping_add(3)],
    ]);

    // modulus is 10^4..=10^8 (never zero).
    #[allow(clippy::arithmetic_side_effects)]
    let code = binary_code % digits.modulus();
    let width = usize::from(digits.value());

    Ok(format!("{code:0>width$}"))
}

/// Counter-based code plus the counter to use next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotpCode {
    pub code: String,
    pub counter: u64,
    pub next_counter: u64,
}

/// Generate an HOTP code from a Base32 secret.
///
/// # Errors
/// - `InvalidParameters` for digits outside 4..=8 or `counter == u64::MAX`
/// - `InvalidSecret` if the secret is not Base32
pub fn generate_hotp_code(
    secret: &str,
    counter: u64,
    algorithm: OtpAlgorithm,
    digits: u32,
) -> Result<HotpCode, UtilityError> {
    let digits = OtpDigits::new(digits)?;
    let next_counter = counter
        .checked_add(1)
        .ok_or_else(|| UtilityError::InvalidParameters("counter is exhausted".to_owned()))?;
    let secret = decode_base32(secret)?;
    let code = generate_hotp(&secret, counter, digits, algorithm)?;
    Ok(HotpCode {
        code,
        counter,
        next_counter,
    })
}

// ── TOTP (RFC 6238) ────────────────────────────────────────────────

/// Generate a TOTP code per RFC 6238.
///
/// # Arguments
/// - `secret`: Shared secret key bytes
/// - `time`: Unix timestamp in seconds
/// - `digits`: Number of output digits
/// - `period`: Time step in seconds (typically 30)
/// - `algorithm`: HMAC algorithm to use
///
/// # Errors
/// Returns `InvalidParameters` if `period` is 0, `InvalidSecret` if the secret is empty.
#[must_use = "OTP code should be used or stored"]
pub fn generate_totp(
    secret: &[u8],
    time: u64,
    digits: OtpDigits,
    period: u32,
    algorithm: OtpAlgorithm,
) -> Result<String, UtilityError> {
    check_period(period)?;

    // T = floor(time / period) per RFC 6238 §4.
    // period is validated non-zero above.
    #[allow(clippy::arithmetic_side_effects)]
    let time_step = time / u64::from(period);
    generate_hotp(secret, time_step, digits, algorithm)
}

/// Validated TOTP configuration: decoded secret, algorithm, digits, period.
#[derive(Clone, PartialEq, Eq)]
pub struct TotpParameters {
    secret: Vec<u8>,
    algorithm: OtpAlgorithm,
    digits: OtpDigits,
    period: u32,
}

impl fmt::Debug for TotpParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TotpParameters")
            .field("secret", &"***")
            .field("algorithm", &self.algorithm)
            .field("digits", &self.digits)
            .field("period", &self.period)
            .finish()
    }
}

/// A generated TOTP code and the window it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpCode {
    /// Zero-padded decimal code, exactly `digits` long.
    pub code: String,
    /// `floor(unix_time / period)`.
    pub time_window: u64,
    /// Seconds until the next window starts.
    pub time_remaining: u64,
    pub algorithm: OtpAlgorithm,
    pub digits: u8,
    pub period: u32,
}

/// Result of checking a code against the windows around "now".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpValidationOutcome {
    pub is_valid: bool,
    /// Signed distance of the matching window from the current one (0 if none matched).
    #[serde(rename = "timeOffset")]
    pub matched_window_offset: i64,
    pub current_time_window: u64,
    pub used_time_window: u64,
    pub message: String,
}

impl TotpParameters {
    /// Validate parameters, then decode the Base32 secret.
    ///
    /// # Errors
    /// - `InvalidParameters` for digits outside 4..=8 or a zero period
    /// - `InvalidSecret` if the secret is empty or not Base32
    pub fn new(
        secret: &str,
        algorithm: OtpAlgorithm,
        digits: u32,
        period: u32,
    ) -> Result<Self, UtilityError> {
        let digits = OtpDigits::new(digits)?;
        check_period(period)?;
        let secret = decode_base32(secret)?;
        Ok(Self {
            secret,
            algorithm,
            digits,
            period,
        })
    }

    /// Build from raw secret bytes.
    ///
    /// # Errors
    /// Same as [`TotpParameters::new`], minus the Base32 step.
    pub fn from_secret_bytes(
        secret: Vec<u8>,
        algorithm: OtpAlgorithm,
        digits: u32,
        period: u32,
    ) -> Result<Self, UtilityError> {
        let digits = OtpDigits::new(digits)?;
        check_period(period)?;
        if secret.is_empty() {
            return Err(UtilityError::InvalidSecret("secret must not be empty".to_owned()));
        }
        Ok(Self {
            secret,
            algorithm,
            digits,
            period,
        })
    }

    #[must_use]
    pub const fn algorithm(&self) -> OtpAlgorithm {
        self.algorithm
    }

    #[must_use]
    pub const fn digits(&self) -> OtpDigits {
        self.digits
    }

    #[must_use]
    pub const fn period(&self) -> u32 {
        self.period
    }

    /// `floor(time / period)`.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)] // period is non-zero by construction
    pub fn time_window(&self, time: u64) -> u64 {
        time / u64::from(self.period)
    }

    /// Code for an explicit time window (HOTP counter).
    ///
    /// # Errors
    /// Propagates HOTP failures (cannot occur for a validated secret).
    pub fn code_for_window(&self, window: u64) -> Result<String, UtilityError> {
        generate_hotp(&self.secret, window, self.digits, self.algorithm)
    }

    /// Generate the code valid at unix time `time`.
    ///
    /// # Errors
    /// Propagates HOTP failures (cannot occur for a validated secret).
    pub fn code_at(&self, time: u64) -> Result<TotpCode, UtilityError> {
        let period = u64::from(self.period);
        let time_window = self.time_window(time);
        // period is non-zero by construction and `time % period < period`.
        #[allow(clippy::arithmetic_side_effects)]
        let time_remaining = period - time % period;
        Ok(TotpCode {
            code: self.code_for_window(time_window)?,
            time_window,
            time_remaining,
            algorithm: self.algorithm,
            digits: self.digits.value(),
            period: self.period,
        })
    }

    /// Check `code` against the current window and up to `window` steps on
    /// each side, nearest first and earlier before later (0, -1, +1, -2, +2, …).
    ///
    /// Steps that would fall before window 0 are skipped. Each candidate is
    /// compared in constant time.
    ///
    /// # Errors
    /// `InvalidParameters` if `window` exceeds [`MAX_WINDOW`].
    #[must_use = "validation result should be checked"]
    pub fn validate_at(
        &self,
        code: &str,
        window: u32,
        time: u64,
    ) -> Result<TotpValidationOutcome, UtilityError> {
        if window > MAX_WINDOW {
            return Err(UtilityError::InvalidParameters(format!(
                "window must be at most {MAX_WINDOW}, got {window}"
            )));
        }
        let current_time_window = self.time_window(time);

        for offset in validation_offsets(window) {
            let Some(candidate) = current_time_window.checked_add_signed(offset) else {
                continue;
            };
            let expected = self.code_for_window(candidate)?;
            if constant_time_eq(expected.as_bytes(), code.as_bytes()) {
                return Ok(TotpValidationOutcome {
                    is_valid: true,
                    matched_window_offset: offset,
                    current_time_window,
                    used_time_window: candidate,
                    message: match offset {
                        0 => "Code is valid for current time window".to_owned(),
                        o if o < 0 => format!("Code is valid for past time window (offset: {o})"),
                        o => format!("Code is valid for future time window (offset: +{o})"),
                    },
                });
            }
        }

        Ok(TotpValidationOutcome {
            is_valid: false,
            matched_window_offset: 0,
            current_time_window,
            used_time_window: current_time_window,
            message: format!("Code is not valid within ±{window} time windows"),
        })
    }
}

/// 0, -1, +1, -2, +2, … ±`window`.
fn validation_offsets(window: u32) -> impl Iterator<Item = i64> {
    std::iter::once(0).chain((1..=i64::from(window)).flat_map(|k| [k.wrapping_neg(), k]))
}

/// Generate the code for `secret` at unix time `time`.
///
/// # Errors
/// `InvalidParameters` or `InvalidSecret`, see [`TotpParameters::new`].
pub fn generate_code(
    secret: &str,
    algorithm: OtpAlgorithm,
    digits: u32,
    period: u32,
    time: u64,
) -> Result<TotpCode, UtilityError> {
    TotpParameters::new(secret, algorithm, digits, period)?.code_at(time)
}

/// Validate `code` for `secret` at unix time `time` with ±`window` tolerance.
///
/// # Errors
/// `InvalidParameters` or `InvalidSecret`, see [`TotpParameters::new`];
/// `InvalidParameters` for a `window` above [`MAX_WINDOW`].
#[allow(clippy::too_many_arguments)]
pub fn validate_code(
    secret: &str,
    code: &str,
    algorithm: OtpAlgorithm,
    digits: u32,
    period: u32,
    window: u32,
    time: u64,
) -> Result<TotpValidationOutcome, UtilityError> {
    TotpParameters::new(secret, algorithm, digits, period)?.validate_at(code, window, time)
}

// ── Provisioning ────────────────────────────────────────────────────

/// Inputs for a new authenticator enrolment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningRequest {
    pub issuer: String,
    pub account: String,
    pub algorithm: OtpAlgorithm,
    pub digits: u32,
    pub period: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub add_issuer_prefix: bool,
}

/// A fresh secret with everything an authenticator app needs to enrol it.
///
/// `Debug` is manually implemented to mask the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpSecretBundle {
    /// Unpadded Base32 secret.
    pub secret: String,
    /// `otpauth://totp/...` key URI.
    pub provisioning_uri: String,
    /// Link to an external QR renderer for `provisioning_uri`.
    pub qr_code_url: String,
}

impl fmt::Debug for TotpSecretBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TotpSecretBundle")
            .field("secret", &"***")
            .field("provisioning_uri", &"***")
            .field("qr_code_url", &"***")
            .finish()
    }
}

/// Build the `otpauth://totp/` key URI for `secret`.
///
/// Label and every parameter value are percent-encoded.
#[must_use]
pub fn provisioning_uri(request: &ProvisioningRequest, secret: &str) -> String {
    let label = if request.add_issuer_prefix {
        format!("{}:{}", request.issuer, request.account)
    } else {
        request.account.clone()
    };

    let mut uri = format!(
        "otpauth://totp/{}?secret={}&issuer={}&algorithm={}&digits={}&period={}",
        urlencoding::encode(&label),
        urlencoding::encode(secret),
        urlencoding::encode(&request.issuer),
        request.algorithm.as_str(),
        request.digits,
        request.period,
    );
    if let Some(image) = &request.image {
        uri.push_str("&image=");
        uri.push_str(&urlencoding::encode(image));
    }
    uri
}

/// Append the percent-encoded `uri` to a QR endpoint as its `data` parameter.
#[must_use]
pub fn qr_code_url(endpoint: &str, uri: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}data={}", urlencoding::encode(uri))
}

/// Create a random secret and its provisioning URIs.
///
/// The secret is 20 bytes for SHA1 and 32 bytes for SHA256/SHA512, drawn
/// from `rng` (use `OsRng` outside tests).
///
/// # Errors
/// Returns `InvalidParameters` for digits outside 4..=8 or a zero period.
pub fn generate_secret<R: RngCore + CryptoRng>(
    request: &ProvisioningRequest,
    qr_endpoint: &str,
    rng: &mut R,
) -> Result<TotpSecretBundle, UtilityError> {
    OtpDigits::new(request.digits)?;
    check_period(request.period)?;

    let mut secret_bytes = vec![0u8; request.algorithm.secret_len()];
    rng.fill_bytes(&mut secret_bytes);
    let secret = encode_base32(&secret_bytes);

    let provisioning_uri = provisioning_uri(request, &secret);
    let qr_code_url = qr_code_url(qr_endpoint, &provisioning_uri);

    Ok(TotpSecretBundle {
        secret,
        provisioning_uri,
        qr_code_url,
    })
}

// ── Tests ───────────────────────────────────────────────────────────
