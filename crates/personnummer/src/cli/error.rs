//! Error types for the generator CLI.

use thiserror::Error;

use crate::error::{GenerationError, ParseGenderError};

/// Errors surfaced by the CLI parsing and generation flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// A flag expected a value but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag that was missing its value.
        flag: &'static str,
    },
    /// An unsupported argument was supplied.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// Argument value that was not recognized.
        value: String,
    },
    /// A numeric value failed to parse.
    #[error("invalid number for {flag}: '{value}' ({message})")]
    InvalidNumber {
        /// Flag associated with the invalid number.
        flag: &'static str,
        /// Raw value supplied for the flag.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// A gender flag or setting was not recognised.
    #[error(transparent)]
    InvalidGender(#[from] ParseGenderError),
    /// `validate` was given no candidates.
    #[error("validate requires at least one candidate")]
    MissingCandidates,
    /// One or more candidates failed validation.
    #[error("{rejected} of {total} candidates are not valid personnummer")]
    RejectedCandidates {
        /// Number of rejected candidates.
        rejected: usize,
        /// Number of candidates checked.
        total: usize,
    },
    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration failure.
        message: String,
    },
    /// Generation failed.
    #[error("generation error: {source}")]
    Generation {
        /// Underlying generation error.
        #[from]
        #[source]
        source: GenerationError,
    },
    /// Output could not be serialized or written.
    #[error("failed to write output: {message}")]
    Output {
        /// Description of the output failure.
        message: String,
    },
}
