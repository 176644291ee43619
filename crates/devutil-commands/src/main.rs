//! `devutil-ipc`: serves devutil commands as JSON lines over stdin/stdout.
//!
//! Usage: `devutil-ipc [config.json]`. Logs go to stderr; set `RUST_LOG`
//! to change the filter.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devutil_commands::{serve, CommandConfig, Dispatcher};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devutil_commands=info,devutil_ipc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CommandConfig::load(Path::new(&path)).unwrap_or_else(|e| {
            tracing::warn!("{e}; using default settings");
            CommandConfig::default()
        }),
        None => CommandConfig::default(),
    };

    let dispatcher = Dispatcher::new(config);
    tracing::info!(max_batch = dispatcher.config().max_batch, "devutil-ipc ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = serve(&dispatcher, stdin.lock(), stdout.lock()) {
        tracing::error!("I/O failure: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
