//! Shared helpers for `docmerge` integration tests.

use camino::Utf8PathBuf;
use std::error::Error;
use std::process::{Command, Output};

/// Resolves the compiled `docmerge` binary path from test environment
/// variables.
///
/// # Errors
///
/// Returns an error when none of the supported cargo/nextest binary
/// environment variables are present.
pub(crate) fn docmerge_exe() -> Result<Utf8PathBuf, Box<dyn Error>> {
    let env_vars = ["CARGO_BIN_EXE_docmerge", "NEXTEST_BIN_EXE_docmerge"];
    for var in env_vars {
        if let Ok(path) = std::env::var(var) {
            return Ok(Utf8PathBuf::from(path));
        }
    }
    Err("docmerge binary path not found in environment".into())
}

/// Runs `docmerge` with `args` and captures its output.
///
/// # Errors
///
/// Returns an error when the binary cannot be located or spawned.
pub(crate) fn run_docmerge<I, S>(args: I) -> Result<Output, Box<dyn Error>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = Command::new(docmerge_exe()?)
        .args(args)
        .env_remove("DOCMERGE_LOG")
        .output()?;
    Ok(output)
}
