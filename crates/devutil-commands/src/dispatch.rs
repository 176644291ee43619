//! Name-based command dispatch.
//!
//! Maps a command name plus a JSON argument object onto a typed handler
//! and serializes the result back to JSON.

use rand::rngs::OsRng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use devutil_core::clock::{Clock, SystemClock};

use crate::commands::{codec, hash, identifiers, jwt, totp};
use crate::{CommandConfig, CommandError, CommandErrorKind};

/// Every command name [`Dispatcher::dispatch`] accepts.
pub const COMMANDS: [&str; 18] = [
    "encode_base64",
    "decode_base64",
    "generate_hashes",
    "generate_totp_secret",
    "generate_totp_code",
    "generate_totp_code_for_time",
    "validate_totp_code",
    "generate_hotp_code",
    "decode_jwt",
    "generate_uuid_v1",
    "generate_uuid_v3",
    "generate_uuid_v4",
    "generate_uuid_v5",
    "generate_uuid_v7",
    "generate_ulid",
    "generate_nanoid",
    "analyze_uuid",
    "list_commands",
];

/// Stateless command router.
///
/// Holds only read-only settings and a clock, so one instance can serve
/// concurrent callers. Randomness is drawn from `OsRng` per call.
#[derive(Debug, Clone)]
pub struct Dispatcher<C: Clock = SystemClock> {
    config: CommandConfig,
    clock: C,
}

impl Dispatcher<SystemClock> {
    #[must_use]
    pub const fn new(config: CommandConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> Dispatcher<C> {
    /// Dispatcher reading time from `clock` instead of the system.
    #[must_use]
    pub const fn with_clock(config: CommandConfig, clock: C) -> Self {
        Self { config, clock }
    }

    #[must_use]
    pub const fn config(&self) -> &CommandConfig {
        &self.config
    }

    /// Run `command` with `args` and return its JSON result.
    ///
    /// Arguments are never logged; they carry secrets and codes.
    ///
    /// # Errors
    ///
    /// `UnknownCommand` for an unrecognised name, `InvalidArguments` when
    /// `args` does not fit the command, otherwise the handler's own error.
    pub fn dispatch(&self, command: &str, args: Value) -> Result<Value, CommandError> {
        debug!(command, "dispatching command");
        let result = self.route(command, args);
        if let Err(err) = &result {
            warn!(command, kind = ?err.kind, "command failed");
        }
        result
    }

    fn route(&self, command: &str, args: Value) -> Result<Value, CommandError> {
        let config = &self.config;
        let clock = &self.clock;
        match command {
            "encode_base64" => invoke(args, codec::encode_base64),
            "decode_base64" => invoke(args, codec::decode_base64),
            "generate_hashes" => invoke(args, hash::generate_hashes),
            "generate_totp_secret" => invoke(args, |req| {
                totp::generate_totp_secret(req, config, &mut OsRng)
            }),
            "generate_totp_code" => invoke(args, |req| totp::generate_totp_code(req, clock)),
            "generate_totp_code_for_time" => invoke(args, totp::generate_totp_code_for_time),
            "validate_totp_code" => {
                invoke(args, |req| totp::validate_totp_code(req, config, clock))
            }
            "generate_hotp_code" => invoke(args, totp::generate_hotp_code),
            "decode_jwt" => invoke(args, jwt::decode_jwt),
            "generate_uuid_v1" => invoke(args, |req| {
                identifiers::generate_uuid_v1(req, config, clock, &mut OsRng)
            }),
            "generate_uuid_v3" => invoke(args, |req| identifiers::generate_uuid_v3(req, config)),
            "generate_uuid_v4" => invoke(args, |req| {
                identifiers::generate_uuid_v4(req, config, &mut OsRng)
            }),
            "generate_uuid_v5" => invoke(args, |req| identifiers::generate_uuid_v5(req, config)),
            "generate_uuid_v7" => invoke(args, |req| {
                identifiers::generate_uuid_v7(req, config, clock, &mut OsRng)
            }),
            "generate_ulid" => invoke(args, |req| {
                identifiers::generate_ulid(req, config, clock, &mut OsRng)
            }),
            "generate_nanoid" => invoke(args, |req| {
                identifiers::generate_nanoid(req, config, &mut OsRng)
            }),
            "analyze_uuid" => invoke(args, identifiers::analyze_uuid),
            "list_commands" => to_json(&COMMANDS),
            other => Err(CommandError::unknown_command(other)),
        }
    }
}

/// Deserialize `args` into the handler's request type, run it, serialize the result.
fn invoke<Req, Res>(
    args: Value,
    handler: impl FnOnce(Req) -> Result<Res, CommandError>,
) -> Result<Value, CommandError>
where
    Req: DeserializeOwned,
    Res: Serialize,
{
    let request = serde_json::from_value(args).map_err(|e| CommandError::invalid_arguments(&e))?;
    to_json(&handler(request)?)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value, CommandError> {
    serde_json::to_value(value).map_err(|e| {
        CommandError::new(
            CommandErrorKind::MalformedInput,
            format!("result is not representable as JSON: {e}"),
        )
    })
}
