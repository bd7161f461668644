//! Birthday and gender policies consulted by valid generation.
//!
//! The generator only depends on the [`BirthdayPolicy`] and
//! [`GenderPolicy`] traits. [`AgeRangeBirthdays`] and [`SerialParityGender`]
//! are the defaults used when nothing else is injected.

use chrono::{Days, Local, Months, NaiveDate};

use crate::error::GenerationError;
use crate::identity::{Gender, IdentityRequest};
use crate::random::RandomSource;

/// Supplies a birth date honouring the constraints in a request.
pub trait BirthdayPolicy {
    /// Picks a birth date for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the request cannot be satisfied.
    fn pick(
        &self,
        request: &IdentityRequest,
        source: &mut dyn RandomSource,
    ) -> Result<NaiveDate, GenerationError>;
}

/// Maps a request and serial number to a gender label.
pub trait GenderPolicy {
    /// Infers the gender for a generated serial.
    fn infer(&self, request: &IdentityRequest, serial: u16) -> Gender;
}

/// Picks birth dates uniformly so the person's age on `today` lies within
/// the request's `min_age..=max_age`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use personnummer::{AgeRangeBirthdays, BirthdayPolicy, IdentityRequest};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
/// let policy = AgeRangeBirthdays::new(today);
/// let request = IdentityRequest { min_age: 20, max_age: 20, gender: None };
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
///
/// let birthday = policy.pick(&request, &mut rng).expect("birthday");
/// assert!(birthday > NaiveDate::from_ymd_opt(2005, 10, 19).expect("valid date"));
/// assert!(birthday <= NaiveDate::from_ymd_opt(2006, 10, 19).expect("valid date"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRangeBirthdays {
    today: NaiveDate,
}

impl AgeRangeBirthdays {
    /// Creates a policy that measures ages on `today`.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Creates a policy that measures ages on the local calendar date.
    #[must_use]
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Returns the date ages are measured on.
    #[must_use]
    pub const fn reference_date(&self) -> NaiveDate {
        self.today
    }

    fn years_before(&self, years: u32) -> Result<NaiveDate, GenerationError> {
        years
            .checked_mul(12)
            .and_then(|months| self.today.checked_sub_months(Months::new(months)))
            .ok_or(GenerationError::DateOutOfRange { age: years })
    }
}

impl Default for AgeRangeBirthdays {
    fn default() -> Self {
        Self::today()
    }
}

impl BirthdayPolicy for AgeRangeBirthdays {
    fn pick(
        &self,
        request: &IdentityRequest,
        source: &mut dyn RandomSource,
    ) -> Result<NaiveDate, GenerationError> {
        let IdentityRequest {
            min_age, max_age, ..
        } = *request;
        if min_age > max_age {
            return Err(GenerationError::InvalidAgeRange { min_age, max_age });
        }

        let latest = self.years_before(min_age)?;
        let beyond_max = max_age
            .checked_add(1)
            .ok_or(GenerationError::DateOutOfRange { age: max_age })?;
        let earliest = self
            .years_before(beyond_max)?
            .checked_add_days(Days::new(1))
            .ok_or(GenerationError::DateOutOfRange { age: max_age })?;

        let span = (latest - earliest).num_days();
        let offset = u64::try_from(source.uniform_int(0, span))
            .map_err(|_| GenerationError::DateOutOfRange { age: max_age })?;
        earliest
            .checked_add_days(Days::new(offset))
            .filter(|birthday| *birthday <= latest)
            .ok_or(GenerationError::DateOutOfRange { age: max_age })
    }
}

/// Uses the requested gender, or the parity of the last serial digit when the
/// request leaves it open: odd is male, even is female.
///
/// A requested gender is returned as is. The serial has already been drawn
/// from the whole `001..=999` range by then, so its parity only agrees with a
/// requested gender about half of the time.
///
/// # Example
///
/// ```
/// use personnummer::{Gender, GenderPolicy, IdentityRequest, SerialParityGender};
///
/// let request = IdentityRequest::default();
/// assert_eq!(SerialParityGender.infer(&request, 987), Gender::Male);
/// assert_eq!(SerialParityGender.infer(&request, 122), Gender::Female);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerialParityGender;

impl GenderPolicy for SerialParityGender {
    fn infer(&self, request: &IdentityRequest, serial: u16) -> Gender {
        request.gender.unwrap_or_else(|| {
            if serial.rem_euclid(2) == 1 {
                Gender::Male
            } else {
                Gender::Female
            }
        })
    }
}
