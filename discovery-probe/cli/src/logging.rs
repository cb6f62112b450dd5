use std::io::IsTerminal;

use discovery_probe_env::envs;
use tracing::error;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Logs go to stderr, stdout is reserved for the progress lines.
///
/// Filtered through [`envs::LOG_LEVEL`], so nothing but errors shows up by default. An invalid
/// [`envs::JSON_LOG`] value falls back to text logs, and is reported as an error.
pub fn init_tracing_registry() {
    let json_log = envs::JSON_LOG.try_from_env();
    let ansi = std::io::stderr().is_terminal();

    if matches!(json_log, Ok(Some(true))) {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .with(EnvFilter::from_env(envs::LOG_LEVEL))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(ansi)
                    .with_line_number(true),
            )
            .with(EnvFilter::from_env(envs::LOG_LEVEL))
            .init();
    }

    if let Err(fail) = json_log {
        error!(%fail, "invalid `{}`, using text logs", envs::JSON_LOG);
    }
}
