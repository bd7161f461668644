//! Swedish personnummer validation and test data generation.
//!
//! This crate validates identity numbers in the ten-digit `YYMMDD-NNNC`
//! form and generates both valid identities and well-shaped invalid
//! candidates for use as test data. Generation is deterministic for a given
//! random source, so seeded runs reproduce the same output.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Encoding and decoding the six-digit birth date segment
//! - Computing the Luhn check digit over date and serial digits
//! - Validating candidates with a typed reason for every rejection
//! - Generating valid identities bounded by age and gender
//! - Generating invalid candidates with a bounded retry loop
//!
//! # Example
//!
//! ```
//! use personnummer::{IdNumberGenerator, IdentityRequest, SwedenIdNumber, validate};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let number = validate("811218-9876").expect("valid personnummer");
//! assert_eq!(number.serial(), 987);
//!
//! let scheme: SwedenIdNumber = SwedenIdNumber::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let person = scheme
//!     .generate_valid(&mut rng, &IdentityRequest::default())
//!     .expect("generation succeeds");
//!
//! assert!(scheme.is_valid(person.identity_number()));
//! ```

mod checksum;
pub mod cli;
mod config;
mod date_codec;
mod error;
mod generator;
mod identity;
mod policy;
mod random;
mod validation;

pub use checksum::{SOURCE_DIGITS, check_digit, check_digit_for};
pub use config::{DEFAULT_COUNT, GeneratorSettings};
pub use date_codec::{CENTURY_BASE, DATE_DIGITS, decode_date, encode_date};
pub use error::{DateCodecError, GenerationError, ParseGenderError, ValidationError};
pub use generator::{
    COUNTRY_CODE, IdNumberGenerator, KNOWN_VALID_SEED, MAX_INVALID_ATTEMPTS, SwedenIdNumber,
    generate_invalid,
};
pub use identity::{
    DEFAULT_MAX_AGE, DEFAULT_MIN_AGE, Gender, IdentityNumber, IdentityRequest, PersonIdentity,
    Separator,
};
pub use policy::{AgeRangeBirthdays, BirthdayPolicy, GenderPolicy, SerialParityGender};
pub use random::{DIGIT_PLACEHOLDER, RandomSource};
pub use validation::{IDENTITY_NUMBER_LENGTH, is_valid, validate};
