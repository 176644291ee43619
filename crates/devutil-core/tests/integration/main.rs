#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! End-to-end flows across the core modules.

mod identifier_roundtrip;
mod totp_roundtrip;
