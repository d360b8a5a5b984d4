//! Logging setup for the `docmerge` binary.

use tracing_subscriber::EnvFilter;

use crate::CliError;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "DOCMERGE_LOG";

/// Default filter directive for a `-v` count.
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber filtered by `DOCMERGE_LOG` or `verbosity`.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when a global subscriber is already set.
pub fn init_logging(verbosity: u8) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}
