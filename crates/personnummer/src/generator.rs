//! Valid and invalid identity number generation.
//!
//! Valid numbers combine a policy-supplied birth date, a random serial in
//! `001..=999`, and a randomly chosen separator, then append the check digit.
//! Invalid numbers are sampled from fixed digit patterns until the validator
//! rejects one.

use tracing::{debug, warn};

use crate::checksum::check_digit_for;
use crate::date_codec::encode_date;
use crate::error::GenerationError;
use crate::identity::{IdentityRequest, PersonIdentity, Separator};
use crate::policy::{AgeRangeBirthdays, BirthdayPolicy, GenderPolicy, SerialParityGender};
use crate::random::RandomSource;
use crate::validation::{is_valid, validate};

/// Country code identifying the Swedish scheme.
pub const COUNTRY_CODE: &str = "SE";

/// Maximum number of candidates sampled before invalid generation gives up.
pub const MAX_INVALID_ATTEMPTS: usize = 10_000;

/// A valid number that seeds the invalid-candidate loop.
pub const KNOWN_VALID_SEED: &str = "121212-1212";

/// Separators the valid generator chooses between.
const SEPARATORS: [&str; 2] = ["+", "-"];

/// Digit patterns sampled by the invalid generator.
const CANDIDATE_PATTERNS: [&str; 2] = ["######-####", "######+####"];

/// Lowest serial number handed out.
const MIN_SERIAL: i64 = 1;

/// Highest serial number handed out.
const MAX_SERIAL: i64 = 999;

/// A national identity number scheme a higher-level orchestrator can dispatch
/// to by country code.
pub trait IdNumberGenerator {
    /// Returns the ISO 3166-1 alpha-2 code of the scheme.
    fn country_code(&self) -> &'static str;

    /// Generates a well-formed identity honouring `request`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when a collaborator breaks its contract or
    /// the request cannot be satisfied.
    fn generate_valid(
        &self,
        source: &mut dyn RandomSource,
        request: &IdentityRequest,
    ) -> Result<PersonIdentity, GenerationError>;

    /// Generates a string shaped like an identity number that fails
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when no invalid candidate is found within
    /// the retry budget.
    fn generate_invalid(&self, source: &mut dyn RandomSource) -> Result<String, GenerationError>;

    /// Returns `true` if `candidate` is valid under the scheme.
    fn is_valid(&self, candidate: &str) -> bool;
}

/// The Swedish personnummer scheme.
///
/// # Example
///
/// ```
/// use personnummer::{IdNumberGenerator, IdentityRequest, SwedenIdNumber, is_valid};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let scheme: SwedenIdNumber = SwedenIdNumber::default();
/// let mut rng = ChaCha8Rng::seed_from_u64(2026);
///
/// let person = scheme
///     .generate_valid(&mut rng, &IdentityRequest::default())
///     .expect("generation succeeds");
/// assert!(is_valid(person.identity_number()));
///
/// let invalid = scheme.generate_invalid(&mut rng).expect("generation succeeds");
/// assert!(!is_valid(&invalid));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SwedenIdNumber<B = AgeRangeBirthdays, G = SerialParityGender> {
    birthdays: B,
    genders: G,
}

impl<B, G> SwedenIdNumber<B, G>
where
    B: BirthdayPolicy,
    G: GenderPolicy,
{
    /// Creates a scheme using the supplied policies.
    #[must_use]
    pub const fn new(birthdays: B, genders: G) -> Self {
        Self { birthdays, genders }
    }
}

impl<B, G> IdNumberGenerator for SwedenIdNumber<B, G>
where
    B: BirthdayPolicy,
    G: GenderPolicy,
{
    fn country_code(&self) -> &'static str {
        COUNTRY_CODE
    }

    fn generate_valid(
        &self,
        source: &mut dyn RandomSource,
        request: &IdentityRequest,
    ) -> Result<PersonIdentity, GenerationError> {
        let birth_date = self.birthdays.pick(request, source)?;
        let serial = generate_serial(source)?;
        let separator = pick_separator(source)?;

        let date_digits = encode_date(birth_date);
        let serial_digits = format!("{serial:03}");
        let check = check_digit_for(&date_digits, &serial_digits)
            .ok_or(GenerationError::SerialOutOfRange {
                value: i64::from(serial),
            })?;
        let identity_number = format!("{date_digits}{separator}{serial_digits}{check}");
        if let Err(source) = validate(&identity_number) {
            return Err(GenerationError::MalformedCandidate {
                candidate: identity_number,
                source,
            });
        }
        let gender = self.genders.infer(request, serial);

        debug!(
            identity_number = %identity_number,
            birth_date = %birth_date,
            gender = %gender,
            "generated valid personnummer"
        );
        Ok(PersonIdentity::new(identity_number, birth_date, gender))
    }

    fn generate_invalid(&self, source: &mut dyn RandomSource) -> Result<String, GenerationError> {
        generate_invalid(source)
    }

    fn is_valid(&self, candidate: &str) -> bool {
        is_valid(candidate)
    }
}

/// Samples candidates from the fixed digit patterns until one fails
/// validation.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidCandidateExhausted`] after
/// [`MAX_INVALID_ATTEMPTS`] valid samples in a row, and
/// [`GenerationError::NoOptions`] if the source cannot pick a pattern.
///
/// # Example
///
/// ```
/// use personnummer::{generate_invalid, is_valid};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let candidate = generate_invalid(&mut rng).expect("generation succeeds");
///
/// assert_eq!(candidate.chars().count(), 11);
/// assert!(!is_valid(&candidate));
/// ```
pub fn generate_invalid(source: &mut dyn RandomSource) -> Result<String, GenerationError> {
    let mut candidate = KNOWN_VALID_SEED.to_owned();
    let mut attempts = 0;

    while is_valid(&candidate) {
        if attempts == MAX_INVALID_ATTEMPTS {
            warn!(attempts, "random source kept producing valid personnummer");
            return Err(GenerationError::InvalidCandidateExhausted {
                max_attempts: MAX_INVALID_ATTEMPTS,
            });
        }
        let pattern = source
            .pick_one(&CANDIDATE_PATTERNS)
            .ok_or(GenerationError::NoOptions)?;
        candidate = source.fill_pattern(pattern);
        attempts += 1;
    }

    debug!(candidate = %candidate, attempts, "generated invalid personnummer");
    Ok(candidate)
}

fn generate_serial(source: &mut dyn RandomSource) -> Result<u16, GenerationError> {
    let value = source.uniform_int(MIN_SERIAL, MAX_SERIAL);
    if !(MIN_SERIAL..=MAX_SERIAL).contains(&value) {
        return Err(GenerationError::SerialOutOfRange { value });
    }
    u16::try_from(value).map_err(|_| GenerationError::SerialOutOfRange { value })
}

fn pick_separator(source: &mut dyn RandomSource) -> Result<Separator, GenerationError> {
    let picked = source
        .pick_one(&SEPARATORS)
        .ok_or(GenerationError::NoOptions)?;
    let mut chars = picked.chars();
    match (chars.next().and_then(Separator::from_char), chars.next()) {
        (Some(separator), None) => Ok(separator),
        _ => Err(GenerationError::UnknownSeparator {
            value: picked.to_owned(),
        }),
    }
}
