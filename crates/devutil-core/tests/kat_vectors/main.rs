#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Known Answer Tests against published vectors.

mod hash;
mod identifier;
mod jwt;
mod totp;
