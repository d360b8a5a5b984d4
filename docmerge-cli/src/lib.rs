//! Library interface for the `docmerge` command.
//!
//! The binary is a thin wrapper: it parses [`Args`], installs logging and
//! calls [`run`]. Tests drive [`execute`] directly to inspect the merged
//! bytes without touching stdout.

pub mod cli;
pub mod error;
mod logging;
mod merge;

pub use cli::{Args, Command, OutputFormat};
pub use error::CliError;
pub use logging::init_logging;
pub use merge::{execute, run};
