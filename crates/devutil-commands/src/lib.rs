//! `devutil-commands`: JSON command layer over `devutil-core`.
//!
//! Each tool is exposed as a named command taking a camelCase JSON
//! argument object and returning a JSON result or a `{kind, message}`
//! error. [`Dispatcher`] routes names to handlers; [`ipc`] frames the
//! exchange as JSON lines for the `devutil-ipc` host binary.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ipc;

pub use config::{CommandConfig, ConfigError};
pub use dispatch::{Dispatcher, COMMANDS};
pub use error::{CommandError, CommandErrorKind};
pub use ipc::{handle_line, serve, IpcRequest, IpcResponse};
