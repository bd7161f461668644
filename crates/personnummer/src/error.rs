//! Error types for the personnummer crate.
//!
//! This module defines semantic error enums for date decoding, candidate
//! validation, and identity number generation, following the project's error
//! handling conventions with `thiserror`.

use thiserror::Error;

/// Errors raised when six `YYMMDD` digits do not describe a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateCodecError {
    /// The date part does not contain exactly six characters.
    #[error("date part must be 6 characters, found {actual}")]
    WrongLength {
        /// Number of characters supplied.
        actual: usize,
    },

    /// A character in the date part is not an ASCII digit.
    #[error("non-digit character in date part at position {position}")]
    NonDigit {
        /// Zero-based position of the offending character.
        position: usize,
    },

    /// The month digits fall outside `01..=12`.
    #[error("month {month} is out of range")]
    MonthOutOfRange {
        /// Decoded month value.
        month: u8,
    },

    /// The day digits fall outside `01..=31`.
    #[error("day {day} is out of range")]
    DayOutOfRange {
        /// Decoded day value.
        day: u8,
    },

    /// The digits are in range but do not name a real date.
    #[error("'{digits}' is not a calendar date")]
    NotACalendarDate {
        /// The rejected digits.
        digits: String,
    },
}

/// Reasons a candidate string is not a valid identity number.
///
/// Every malformed input maps to one of these variants; validation never
/// panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The candidate is not exactly 11 characters long.
    #[error("identity number must be 11 characters, found {actual}")]
    WrongLength {
        /// Number of characters supplied.
        actual: usize,
    },

    /// The leading six digits are not a valid `YYMMDD` date.
    #[error("invalid birth date: {0}")]
    Date(#[from] DateCodecError),

    /// The seventh character is neither `-` nor `+`.
    #[error("invalid separator '{found}'")]
    InvalidSeparator {
        /// Character found at the separator position.
        found: char,
    },

    /// A serial or check character is not an ASCII digit.
    #[error("non-digit character at position {position}")]
    NonDigit {
        /// Zero-based position of the offending character.
        position: usize,
    },

    /// The serial digits are `000`.
    #[error("serial number 000 is not allocated")]
    ZeroSerial,

    /// The final digit does not match the computed check digit.
    #[error("check digit mismatch: expected {expected}, found {actual}")]
    ChecksumMismatch {
        /// Check digit computed from the date and serial digits.
        expected: u8,
        /// Check digit present in the candidate.
        actual: u8,
    },
}

/// Errors that can occur while generating identity numbers.
///
/// Generation assumes well-behaved collaborators; these variants surface the
/// cases where a collaborator or request breaks that contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested minimum age exceeds the maximum age.
    #[error("minimum age {min_age} exceeds maximum age {max_age}")]
    InvalidAgeRange {
        /// Requested minimum age.
        min_age: u32,
        /// Requested maximum age.
        max_age: u32,
    },

    /// A birth date for the requested age cannot be represented.
    #[error("birth date for age {age} is out of the representable range")]
    DateOutOfRange {
        /// Age that could not be converted to a date.
        age: u32,
    },

    /// The random source returned a serial outside `1..=999`.
    #[error("serial {value} is outside 1..=999")]
    SerialOutOfRange {
        /// Value returned by the random source.
        value: i64,
    },

    /// The random source could not pick from the supplied options.
    #[error("random source returned no option")]
    NoOptions,

    /// The random source picked a separator other than `-` or `+`.
    #[error("unknown separator '{value}'")]
    UnknownSeparator {
        /// Value returned by the random source.
        value: String,
    },

    /// An assembled identity number failed its own validation.
    #[error("generated identity number '{candidate}' is malformed: {source}")]
    MalformedCandidate {
        /// The assembled identity number.
        candidate: String,
        /// Reason the validator rejected it.
        #[source]
        source: ValidationError,
    },

    /// No invalid candidate was sampled within the retry budget.
    #[error("failed to sample an invalid identity number after {max_attempts} attempts")]
    InvalidCandidateExhausted {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },
}

/// Error returned when a gender label cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gender '{value}'; expected 'female' or 'male'")]
pub struct ParseGenderError {
    /// The rejected label.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_codec_error_formats_correctly() {
        let err = DateCodecError::NotACalendarDate {
            digits: "010230".to_owned(),
        };
        assert_eq!(err.to_string(), "'010230' is not a calendar date");
    }

    #[test]
    fn validation_error_wraps_date_error() {
        let err = ValidationError::from(DateCodecError::MonthOutOfRange { month: 13 });
        assert_eq!(err.to_string(), "invalid birth date: month 13 is out of range");
    }

    #[test]
    fn validation_error_checksum_formats_correctly() {
        let err = ValidationError::ChecksumMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "check digit mismatch: expected 2, found 3");
    }

    #[test]
    fn validation_error_separator_formats_correctly() {
        let err = ValidationError::InvalidSeparator { found: '/' };
        assert_eq!(err.to_string(), "invalid separator '/'");
    }

    #[test]
    fn generation_error_malformed_candidate_keeps_source() {
        let err = GenerationError::MalformedCandidate {
            candidate: "121212-0002".to_owned(),
            source: ValidationError::ZeroSerial,
        };
        assert_eq!(
            err.to_string(),
            "generated identity number '121212-0002' is malformed: serial number 000 is not allocated"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn generation_error_age_range_formats_correctly() {
        let err = GenerationError::InvalidAgeRange {
            min_age: 50,
            max_age: 20,
        };
        assert_eq!(err.to_string(), "minimum age 50 exceeds maximum age 20");
    }

    #[test]
    fn generation_error_exhausted_formats_correctly() {
        let err = GenerationError::InvalidCandidateExhausted {
            max_attempts: 10_000,
        };
        assert_eq!(
            err.to_string(),
            "failed to sample an invalid identity number after 10000 attempts"
        );
    }

    #[test]
    fn parse_gender_error_formats_correctly() {
        let err = ParseGenderError {
            value: "other".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unknown gender 'other'; expected 'female' or 'male'"
        );
    }

    #[test]
    fn generation_error_serial_formats_correctly() {
        let err = GenerationError::SerialOutOfRange { value: 1000 };
        assert_eq!(err.to_string(), "serial 1000 is outside 1..=999");
    }
}
