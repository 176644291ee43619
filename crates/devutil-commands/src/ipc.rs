//! JSON-lines request/response protocol.
//!
//! One request per line: `{"id": …, "command": "…", "args": {…}}`.
//! One response per line: `{"id": …, "ok": …}` or `{"id": …, "error": {…}}`.
//! The `id` is echoed verbatim so callers can match responses to requests.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use devutil_core::clock::Clock;

use crate::{CommandError, CommandErrorKind, Dispatcher};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One decoded request line.
#[derive(Debug, Clone, Deserialize)]
pub struct IpcRequest {
    #[serde(default)]
    pub id: Value,
    pub command: String,
    #[serde(default = "empty_args")]
    pub args: Value,
}

fn empty_args() -> Value {
    Value::Object(serde_json::Map::new())
}

/// One response line; exactly one of `ok` / `error` is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpcResponse {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl IpcResponse {
    fn from_result(id: Value, result: Result<Value, CommandError>) -> Self {
        match result {
            Ok(value) => Self {
                id,
                ok: Some(value),
                error: None,
            },
            Err(err) => Self {
                id,
                ok: None,
                error: Some(err),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Protocol
// ---------------------------------------------------------------------------

/// Handle one request line. Never fails: protocol errors become error responses.
pub fn handle_line<C: Clock>(dispatcher: &Dispatcher<C>, line: &str) -> IpcResponse {
    match serde_json::from_str::<IpcRequest>(line) {
        Ok(request) => {
            let result = dispatcher.dispatch(&request.command, request.args);
            IpcResponse::from_result(request.id, result)
        }
        Err(e) => {
            warn!("rejected malformed request line");
            IpcResponse::from_result(
                Value::Null,
                Err(CommandError::new(
                    CommandErrorKind::InvalidArguments,
                    format!("malformed request: {e}"),
                )),
            )
        }
    }
}

/// Serve requests from `input` until EOF, writing one response per non-blank line.
///
/// # Errors
///
/// Returns an `io::Error` if reading `input` or writing `output` fails.
pub fn serve<C: Clock>(
    dispatcher: &Dispatcher<C>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(dispatcher, &line);
        serde_json::to_writer(&mut output, &response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        output.write_all(b"\n")?;
        output.flush()?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
