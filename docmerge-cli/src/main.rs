//! CLI entrypoint for `docmerge`.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use docmerge_cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    let outcome = docmerge_cli::init_logging(args.verbose).and_then(|()| docmerge_cli::run(&args));
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            writeln!(std::io::stderr(), "docmerge: {err}").ok();
            ExitCode::FAILURE
        }
    }
}
