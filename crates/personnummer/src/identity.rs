//! Identity number value types.
//!
//! [`IdentityNumber`] only ever holds strings the validator accepted.
//! [`PersonIdentity`] is the record produced by valid generation, and
//! [`IdentityRequest`] carries the constraints the birthday and gender
//! policies read.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date_codec::CENTURY_BASE;
use crate::error::{ParseGenderError, ValidationError};
use crate::validation::validate;

/// Minimum age used when a request does not specify one.
pub const DEFAULT_MIN_AGE: u32 = 10;

/// Maximum age used when a request does not specify one.
pub const DEFAULT_MAX_AGE: u32 = 100;

/// The character between the date and serial digits.
///
/// By convention `-` marks a bearer under 100 years of age and `+` one who
/// has reached 100; the date digits carry no century of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// `-`: under 100 years of age.
    Minus,
    /// `+`: 100 years of age or over.
    Plus,
}

impl Separator {
    /// Returns the separator character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Minus => '-',
            Self::Plus => '+',
        }
    }

    /// Parses a separator character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Self::Minus),
            '+' => Some(Self::Plus),
            _ => None,
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A validated Swedish personal identity number, `YYMMDD[-+]SSSC`.
///
/// Values are only constructed through validation, so every instance passes
/// [`is_valid`](crate::is_valid).
///
/// # Example
///
/// ```
/// use personnummer::{IdentityNumber, Separator};
///
/// let number: IdentityNumber = "811218-9876".parse().expect("valid number");
/// assert_eq!(number.separator(), Separator::Minus);
/// assert_eq!(number.serial(), 987);
/// assert_eq!(number.check_digit(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityNumber {
    value: String,
    date: NaiveDate,
    separator: Separator,
    serial: u16,
    check_digit: u8,
}

impl IdentityNumber {
    pub(crate) const fn from_parts(
        value: String,
        date: NaiveDate,
        separator: Separator,
        serial: u16,
        check_digit: u8,
    ) -> Self {
        Self {
            value,
            date,
            separator,
            serial,
            check_digit,
        }
    }

    /// Validates `candidate` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the candidate fails.
    pub fn parse(candidate: &str) -> Result<Self, ValidationError> {
        validate(candidate)
    }

    /// Returns the identity number as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the encoded date, decoded into the codec's base century.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the separator.
    #[must_use]
    pub const fn separator(&self) -> Separator {
        self.separator
    }

    /// Returns the three serial digits as a number in `1..=999`.
    #[must_use]
    pub const fn serial(&self) -> u16 {
        self.serial
    }

    /// Returns the trailing check digit.
    #[must_use]
    pub const fn check_digit(&self) -> u8 {
        self.check_digit
    }

    /// Resolves the full birth date as of `today` using the separator.
    ///
    /// With `-` the result is the most recent date carrying these `YYMMDD`
    /// digits that is not after `today`; with `+` it is that date moved back
    /// another hundred years. Returns `None` when the resolved day does not
    /// exist in that century (29 February in a non-leap century year).
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use personnummer::IdentityNumber;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
    /// let minus: IdentityNumber = "121212-1212".parse().expect("valid number");
    /// let plus: IdentityNumber = "121212+1212".parse().expect("valid number");
    ///
    /// assert_eq!(minus.resolve_birth_date(today), NaiveDate::from_ymd_opt(2012, 12, 12));
    /// assert_eq!(plus.resolve_birth_date(today), NaiveDate::from_ymd_opt(1912, 12, 12));
    /// ```
    #[must_use]
    pub fn resolve_birth_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        let two_digit_year = self.date.year() - CENTURY_BASE;
        let century_start = today.year() - today.year().rem_euclid(100);
        let mut year = century_start + two_digit_year;

        let birthday_this_year = (self.date.month(), self.date.day());
        let today_in_year = (today.month(), today.day());
        if year > today.year() || (year == today.year() && birthday_this_year > today_in_year) {
            year -= 100;
        }
        if self.separator == Separator::Plus {
            year -= 100;
        }

        NaiveDate::from_ymd_opt(year, self.date.month(), self.date.day())
    }
}

impl fmt::Display for IdentityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for IdentityNumber {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl FromStr for IdentityNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl TryFrom<String> for IdentityNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

impl From<IdentityNumber> for String {
    fn from(number: IdentityNumber) -> Self {
        number.value
    }
}

/// Gender label attached to a generated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Female.
    Female,
    /// Male.
    Male,
}

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Ok(Self::Female),
            "male" | "m" => Ok(Self::Male),
            _ => Err(ParseGenderError {
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Female => f.write_str("female"),
            Self::Male => f.write_str("male"),
        }
    }
}

/// Constraints for generating a valid identity.
///
/// The core does not interpret these fields itself; they are read by the
/// [`BirthdayPolicy`](crate::BirthdayPolicy) and
/// [`GenderPolicy`](crate::GenderPolicy) collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityRequest {
    /// Minimum age of the person, in whole years.
    pub min_age: u32,
    /// Maximum age of the person, in whole years.
    pub max_age: u32,
    /// Desired gender, or `None` for any.
    pub gender: Option<Gender>,
}

impl Default for IdentityRequest {
    fn default() -> Self {
        Self {
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            gender: None,
        }
    }
}

/// A generated identity: the number, the birth date it encodes, and a
/// gender label.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use personnummer::{Gender, PersonIdentity};
///
/// let birth_date = NaiveDate::from_ymd_opt(1981, 12, 18).expect("valid date");
/// let person = PersonIdentity::new("811218-9876".to_owned(), birth_date, Gender::Male);
///
/// assert_eq!(person.identity_number(), "811218-9876");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonIdentity {
    identity_number: String,
    birth_date: NaiveDate,
    gender: Gender,
}

impl PersonIdentity {
    /// Creates a new identity record.
    #[must_use]
    pub const fn new(identity_number: String, birth_date: NaiveDate, gender: Gender) -> Self {
        Self {
            identity_number,
            birth_date,
            gender,
        }
    }

    /// Returns the identity number string.
    #[must_use]
    pub fn identity_number(&self) -> &str {
        &self.identity_number
    }

    /// Returns the birth date the identity was generated for.
    #[must_use]
    pub const fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Returns the gender label.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }
}
