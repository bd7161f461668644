//! Personnummer test data generator.
//!
//! This binary delegates to `personnummer::cli` for parsing and generation,
//! keeping the CLI behaviour testable without spawning a process. Results go
//! to stdout; logs go to stderr and honour `RUST_LOG`.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use personnummer::cli::{CliError, ParseOutcome, USAGE, load_settings, parse_args, run};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> Result<(), CliError> {
    match parse_args(env::args().skip(1))? {
        ParseOutcome::Help => {
            print_usage(io::stdout().lock());
            Ok(())
        }
        ParseOutcome::Options(options) => {
            let settings = load_settings()?;
            run(&options, &settings, &mut io::stdout().lock())
        }
    }
}

fn print_usage(mut out: impl Write) {
    if let Err(err) = out.write_all(USAGE.as_bytes()) {
        drop(err);
    }
}
