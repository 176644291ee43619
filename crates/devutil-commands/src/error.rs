//! Error DTO returned across the command boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use devutil_core::{ErrorKind, UtilityError};

/// Machine-readable error category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandErrorKind {
    InvalidParameters,
    InvalidSecret,
    MalformedInput,
    MalformedToken,
    UnsupportedAlgorithm,
    /// No command with the requested name.
    UnknownCommand,
    /// Arguments do not match the command's request shape.
    InvalidArguments,
}

/// Structured error sent to the caller as `{ "kind": ..., "message": ... }`.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CommandError {
    pub kind: CommandErrorKind,
    pub message: String,
}

impl CommandError {
    #[must_use]
    pub fn new(kind: CommandErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unknown_command(name: &str) -> Self {
        Self::new(CommandErrorKind::UnknownCommand, format!("unknown command '{name}'"))
    }

    #[must_use]
    pub fn invalid_arguments(err: &serde_json::Error) -> Self {
        Self::new(CommandErrorKind::InvalidArguments, format!("invalid arguments: {err}"))
    }

    /// Shorthand for an `InvalidParameters` error from the command layer itself.
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::new(CommandErrorKind::InvalidParameters, message)
    }
}

impl From<ErrorKind> for CommandErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidParameters => Self::InvalidParameters,
            ErrorKind::InvalidSecret => Self::InvalidSecret,
            ErrorKind::MalformedInput => Self::MalformedInput,
            ErrorKind::MalformedToken => Self::MalformedToken,
            ErrorKind::UnsupportedAlgorithm => Self::UnsupportedAlgorithm,
        }
    }
}

impl From<UtilityError> for CommandError {
    fn from(err: UtilityError) -> Self {
        Self::new(err.kind().into(), err.to_string())
    }
}
