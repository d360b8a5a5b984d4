//! Command-line interface definitions for `docmerge`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use docmerge::DocumentFormat;

/// Output formats supported by `docmerge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON.
    Json,
    /// YAML.
    Yaml,
    /// TOML; the merged document must be a table without nulls.
    Toml,
}

impl From<OutputFormat> for DocumentFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Yaml => Self::Yaml,
            OutputFormat::Toml => Self::Toml,
        }
    }
}

/// Parsed CLI arguments for `docmerge`.
#[derive(Debug, Parser)]
#[command(name = "docmerge")]
#[command(about = "Merge JSON, YAML and TOML documents")]
#[command(version)]
pub struct Args {
    /// Merge semantics to apply.
    #[command(subcommand)]
    pub command: Command,
    /// Format of the merged document (defaults to the first input's format).
    #[arg(long, value_enum, global = true)]
    pub output_format: Option<OutputFormat>,
    /// Write the merged document here instead of stdout.
    #[arg(long, short, value_name = "path", global = true)]
    pub output: Option<Utf8PathBuf>,
    /// Increase log verbosity (repeatable). `DOCMERGE_LOG` takes precedence.
    #[arg(long, short, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available merge commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fold patches over the original with the null-preserving merge patch.
    Patch {
        /// Document to patch.
        original: Utf8PathBuf,
        /// Patches applied left to right.
        #[arg(required = true)]
        patches: Vec<Utf8PathBuf>,
    },
    /// Fold modifiers over the original with a strategic merge.
    Strategic {
        /// Schema document declaring the field policies.
        #[arg(long, value_name = "path")]
        schema: Utf8PathBuf,
        /// Document to merge into.
        original: Utf8PathBuf,
        /// Modifiers applied left to right.
        #[arg(required = true)]
        modifiers: Vec<Utf8PathBuf>,
    },
}

impl Command {
    /// Every input document in precedence order.
    #[must_use]
    pub fn inputs(&self) -> Vec<&Utf8PathBuf> {
        let (original, rest) = match self {
            Self::Patch { original, patches } => (original, patches),
            Self::Strategic {
                original,
                modifiers,
                ..
            } => (original, modifiers),
        };
        std::iter::once(original).chain(rest).collect()
    }
}
