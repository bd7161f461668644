//! CLI support for generating and checking personnummer test data.
//!
//! This module provides parsing and execution helpers for the
//! `personnummer-gen` binary. The binary delegates to these functions so they
//! can be exercised in tests without spawning a subprocess.

mod error;

use std::ffi::OsString;
use std::fmt;
use std::io::Write;

use ortho_config::OrthoConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

pub use self::error::CliError;
use crate::config::GeneratorSettings;
use crate::generator::{IdNumberGenerator, SwedenIdNumber};
use crate::identity::{Gender, IdentityRequest};
use crate::validation::validate;

/// Program name reported to the configuration loader.
pub const PROGRAM_NAME: &str = "personnummer-gen";

/// Usage text printed for `--help`.
pub const USAGE: &str = concat!(
    "Usage: personnummer-gen [valid|invalid|validate <candidate>...] [options]\n",
    "\n",
    "Commands:\n",
    "  valid                Generate valid personnummer as JSON lines (default)\n",
    "  invalid              Generate well-shaped but invalid personnummer\n",
    "  validate <numbers>   Check each candidate and report the result\n",
    "\n",
    "Options:\n",
    "  --seed <seed>        RNG seed value (defaults to config, else random)\n",
    "  --count <n>          Numbers to generate (defaults to 1)\n",
    "  --min-age <n>        Minimum age for valid numbers (defaults to 10)\n",
    "  --max-age <n>        Maximum age for valid numbers (defaults to 100)\n",
    "  --gender <g>         female or male (defaults to either)\n",
    "  -h, --help           Print this help output\n",
);

/// The action requested on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Command {
    /// Generate valid identities.
    #[default]
    Valid,
    /// Generate invalid candidates.
    Invalid,
    /// Validate the supplied candidates.
    Validate(Vec<String>),
}

/// Parsed options for the generator CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    command: Command,
    seed: Option<u64>,
    count: Option<usize>,
    min_age: Option<u32>,
    max_age: Option<u32>,
    gender: Option<Gender>,
}

impl Options {
    /// Returns the requested command.
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// Returns the seed supplied on the command line, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Continue with the parsed options.
    Options(Options),
}

/// Parses CLI arguments (excluding the program name).
///
/// # Errors
///
/// Returns [`CliError`] when a flag is unknown, lacks its value, or its value
/// cannot be parsed.
///
/// # Example
///
/// ```
/// use personnummer::cli::{Command, ParseOutcome, parse_args};
///
/// let args = vec!["invalid".to_string(), "--count".to_string(), "3".to_string()];
/// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
///     panic!("expected options");
/// };
///
/// assert_eq!(options.command(), &Command::Invalid);
/// ```
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let mut options = Options::default();
    let mut command_seen = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "--seed" => {
                let value = next_value(&mut args, "--seed")?;
                options.seed = Some(parse_number(&value, "--seed")?);
            }
            "--count" => {
                let value = next_value(&mut args, "--count")?;
                options.count = Some(parse_number(&value, "--count")?);
            }
            "--min-age" => {
                let value = next_value(&mut args, "--min-age")?;
                options.min_age = Some(parse_number(&value, "--min-age")?);
            }
            "--max-age" => {
                let value = next_value(&mut args, "--max-age")?;
                options.max_age = Some(parse_number(&value, "--max-age")?);
            }
            "--gender" => {
                let value = next_value(&mut args, "--gender")?;
                options.gender = Some(value.parse()?);
            }
            "valid" if !command_seen => {
                options.command = Command::Valid;
                command_seen = true;
            }
            "invalid" if !command_seen => {
                options.command = Command::Invalid;
                command_seen = true;
            }
            "validate" if !command_seen => {
                options.command = Command::Validate(Vec::new());
                command_seen = true;
            }
            _ => match &mut options.command {
                Command::Validate(candidates) if !arg.starts_with("--") => candidates.push(arg),
                _ => return Err(CliError::UnknownArgument { value: arg }),
            },
        }
    }

    Ok(ParseOutcome::Options(options))
}

/// Loads generator settings from the environment and configuration files.
///
/// Flags are parsed by [`parse_args`], so only the program name is handed to
/// the loader; unset values fall back to their defaults.
///
/// # Errors
///
/// Returns [`CliError::Config`] when a configured value cannot be loaded.
pub fn load_settings() -> Result<GeneratorSettings, CliError> {
    GeneratorSettings::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|err| {
        CliError::Config {
            message: err.to_string(),
        }
    })
}

/// Runs the parsed command, writing results to `out`.
///
/// Command line values take precedence over `settings`. Valid identities are
/// written as one JSON object per line, invalid candidates one per line, and
/// validation results as `<candidate>\tvalid` or `<candidate>\tinvalid: <reason>`.
///
/// # Errors
///
/// Returns [`CliError`] when generation fails, output cannot be written, or
/// any validated candidate is rejected.
///
/// # Example
///
/// ```
/// use personnummer::GeneratorSettings;
/// use personnummer::cli::{ParseOutcome, parse_args, run};
///
/// let args = vec!["validate".to_string(), "121212-1212".to_string()];
/// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
///     panic!("expected options");
/// };
/// let mut out = Vec::new();
///
/// run(&options, &GeneratorSettings::default(), &mut out).expect("run");
/// assert_eq!(String::from_utf8(out).expect("utf8"), "121212-1212\tvalid\n");
/// ```
pub fn run<W>(options: &Options, settings: &GeneratorSettings, out: &mut W) -> Result<(), CliError>
where
    W: Write,
{
    let scheme: SwedenIdNumber = SwedenIdNumber::default();
    run_with_scheme(&scheme, options, settings, out)
}

/// Runs the parsed command against an explicit scheme.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_scheme<S, W>(
    scheme: &S,
    options: &Options,
    settings: &GeneratorSettings,
    out: &mut W,
) -> Result<(), CliError>
where
    S: IdNumberGenerator,
    W: Write,
{
    let count = options.count.unwrap_or_else(|| settings.count());
    match &options.command {
        Command::Valid => {
            let request = resolve_request(options, settings)?;
            let seed = resolve_seed(options, settings);
            info!(seed, count, country = scheme.country_code(), "generating valid personnummer");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..count {
                let person = scheme.generate_valid(&mut rng, &request)?;
                let line = serde_json::to_string(&person).map_err(output_error)?;
                writeln!(out, "{line}").map_err(output_error)?;
            }
            Ok(())
        }
        Command::Invalid => {
            let seed = resolve_seed(options, settings);
            info!(seed, count, "generating invalid personnummer");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..count {
                let candidate = scheme.generate_invalid(&mut rng)?;
                writeln!(out, "{candidate}").map_err(output_error)?;
            }
            Ok(())
        }
        Command::Validate(candidates) => validate_candidates(candidates, out),
    }
}

fn validate_candidates<W>(candidates: &[String], out: &mut W) -> Result<(), CliError>
where
    W: Write,
{
    if candidates.is_empty() {
        return Err(CliError::MissingCandidates);
    }

    let mut rejected = 0;
    for candidate in candidates {
        match validate(candidate) {
            Ok(_) => writeln!(out, "{candidate}\tvalid"),
            Err(err) => {
                rejected += 1;
                writeln!(out, "{candidate}\tinvalid: {err}")
            }
        }
        .map_err(output_error)?;
    }

    if rejected > 0 {
        return Err(CliError::RejectedCandidates {
            rejected,
            total: candidates.len(),
        });
    }
    Ok(())
}

fn resolve_request(
    options: &Options,
    settings: &GeneratorSettings,
) -> Result<IdentityRequest, CliError> {
    let configured = settings.request()?;
    Ok(IdentityRequest {
        min_age: options.min_age.unwrap_or(configured.min_age),
        max_age: options.max_age.unwrap_or(configured.max_age),
        gender: options.gender.or(configured.gender),
    })
}

fn resolve_seed(options: &Options, settings: &GeneratorSettings) -> u64 {
    options
        .seed
        .or(settings.seed)
        .unwrap_or_else(|| rand::rng().random())
}

fn next_value<I>(args: &mut I, flag: &'static str) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(CliError::MissingValue { flag })
}

fn parse_number<T>(value: &str, flag: &'static str) -> Result<T, CliError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|err| CliError::InvalidNumber {
        flag,
        value: value.to_owned(),
        message: err.to_string(),
    })
}

fn output_error(err: impl fmt::Display) -> CliError {
    CliError::Output {
        message: err.to_string(),
    }
}
