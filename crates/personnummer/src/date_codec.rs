//! `YYMMDD` date encoding for the date part of an identity number.
//!
//! The six digits never carry a century. Decoding places the two-digit year
//! in the century starting at [`CENTURY_BASE`]; interpreting the real century
//! is left to the separator (see
//! [`IdentityNumber::resolve_birth_date`](crate::IdentityNumber::resolve_birth_date)).

use chrono::{Datelike, NaiveDate};

use crate::checksum::digit_value;
use crate::error::DateCodecError;

/// Number of digits in an encoded date.
pub const DATE_DIGITS: usize = 6;

/// First year of the century two-digit years decode into.
pub const CENTURY_BASE: i32 = 2000;

/// Encodes a date as zero-padded `YYMMDD`, truncating the year to two digits.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use personnummer::encode_date;
///
/// let date = NaiveDate::from_ymd_opt(1981, 12, 18).expect("valid date");
/// assert_eq!(encode_date(date), "811218");
/// ```
#[must_use]
pub fn encode_date(date: NaiveDate) -> String {
    format!(
        "{:02}{:02}{:02}",
        date.year().rem_euclid(100),
        date.month(),
        date.day()
    )
}

/// Decodes six `YYMMDD` digits into a date in the [`CENTURY_BASE`] century.
///
/// The decoded date is re-encoded and compared with the input, so digit
/// combinations that are numerically in range but name no real day (for
/// example 31 April) are rejected rather than normalised.
///
/// # Errors
///
/// Returns [`DateCodecError`] for the wrong length, non-digit characters,
/// out-of-range month or day, or a date that does not exist.
///
/// # Examples
///
/// ```
/// use personnummer::decode_date;
///
/// assert!(decode_date("000229").is_ok());
/// assert!(decode_date("010229").is_err());
/// ```
pub fn decode_date(digits: &str) -> Result<NaiveDate, DateCodecError> {
    let chars: Vec<char> = digits.chars().collect();
    let actual = chars.len();
    let [y1, y2, m1, m2, d1, d2]: [char; DATE_DIGITS] = chars
        .try_into()
        .map_err(|_| DateCodecError::WrongLength { actual })?;

    let year = two_digit_value(y1, y2, 0)?;
    let month = two_digit_value(m1, m2, 2)?;
    let day = two_digit_value(d1, d2, 4)?;

    if !(1..=12).contains(&month) {
        return Err(DateCodecError::MonthOutOfRange { month });
    }
    if !(1..=31).contains(&day) {
        return Err(DateCodecError::DayOutOfRange { day });
    }

    let not_a_date = || DateCodecError::NotACalendarDate {
        digits: digits.to_owned(),
    };
    let date = NaiveDate::from_ymd_opt(
        CENTURY_BASE + i32::from(year),
        u32::from(month),
        u32::from(day),
    )
    .ok_or_else(not_a_date)?;

    if encode_date(date) != digits {
        return Err(not_a_date());
    }
    Ok(date)
}

fn two_digit_value(tens: char, units: char, position: usize) -> Result<u8, DateCodecError> {
    let high = digit_value(tens).ok_or(DateCodecError::NonDigit { position })?;
    let low = digit_value(units).ok_or(DateCodecError::NonDigit {
        position: position + 1,
    })?;
    Ok(high * 10 + low)
}
