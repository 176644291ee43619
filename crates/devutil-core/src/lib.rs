//! `devutil-core`: pure computational core for the devutil toolbox.
//!
//! Encoding, hashing, OTP and identifier primitives with no I/O, no async
//! and no global state. Randomness and time are passed in by the caller.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod clock;

pub mod codec;

pub mod hash;
pub mod hmac;

pub mod totp;

pub mod identifier;

pub mod jwt;

pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{decode_base32, decode_base64, encode_base32, encode_base64, Base64Engine};
pub use error::{ErrorKind, UtilityError};
pub use hash::{generate_hashes, HashAlgorithm, HashDigestSet, HashFunction, ALL_ALGORITHMS};
pub use hmac::MacAlgorithm;
pub use identifier::{analyze_uuid, BatchSize, UuidRecord, MAX_BATCH};
pub use jwt::{decode_jwt, JwtAlgorithm, JwtParts, VerificationState};
pub use totp::{
    generate_code, generate_hotp, generate_hotp_code, generate_secret, generate_totp,
    validate_code, HotpCode, OtpAlgorithm, OtpDigits, ProvisioningRequest, TotpCode,
    TotpParameters, TotpSecretBundle, TotpValidationOutcome,
};
