//! Merge execution for `docmerge`.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use docmerge::{DocumentFormat, LayerStack, Schema};
use tracing::{debug, info};

use crate::cli::{Args, Command};
use crate::error::CliError;

/// Merge the inputs named by `args` and return the encoded result.
///
/// The output format is `--output-format` when given, otherwise the format
/// of the original document's extension. When every input is empty the
/// result is empty.
///
/// # Errors
///
/// Returns [`CliError::Merge`] when any input fails to load or the merge
/// fails, and the schema variants when the strategic schema is unusable.
pub fn execute(args: &Args) -> Result<Vec<u8>, CliError> {
    let inputs = args.command.inputs();
    let format = output_format(args, &inputs);
    let composition = LayerStack::load_all(inputs);
    let merged = match &args.command {
        Command::Patch { .. } => composition.into_merge_result(|stack| Ok(stack.merge_patch()))?,
        Command::Strategic { schema, .. } => {
            let table = load_schema(schema)?;
            info!(schema = table.name(), "strategic merge");
            composition.into_merge_result(|stack| stack.strategic(&table))?
        }
    };
    debug!(format = format.as_str(), empty = merged.is_none(), "encoding result");
    Ok(format.encode(merged.as_ref())?)
}

/// Merge per `args` and write the result to `--output` or stdout.
///
/// # Errors
///
/// Returns any [`execute`] error, or [`CliError::Output`] when the result
/// cannot be written.
pub fn run(args: &Args) -> Result<(), CliError> {
    let bytes = execute(args)?;
    match &args.output {
        Some(path) => std::fs::write(path, &bytes).map_err(|source| CliError::Output {
            target: format!("'{path}'"),
            source,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|()| stdout.flush())
                .map_err(|source| CliError::Output {
                    target: String::from("stdout"),
                    source,
                })
        }
    }
}

fn output_format(args: &Args, inputs: &[&Utf8PathBuf]) -> DocumentFormat {
    args.output_format.map_or_else(
        || {
            inputs
                .first()
                .map_or_else(DocumentFormat::default, |path| DocumentFormat::from_path(path))
        },
        DocumentFormat::from,
    )
}

/// Decode a schema document by extension and deserialise it.
fn load_schema(path: &Utf8Path) -> Result<Schema, CliError> {
    let mut stack = LayerStack::new();
    stack.load(path)?;
    let document = stack
        .merge_patch()
        .ok_or_else(|| CliError::EmptySchema(path.to_path_buf()))?;
    serde_json::from_value(document).map_err(|source| CliError::Schema {
        path: path.to_path_buf(),
        source,
    })
}
