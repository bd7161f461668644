//! Structural and checksum validation of identity number candidates.
//!
//! # Validation Rules
//!
//! - Exactly 11 characters
//! - The first six are a real `YYMMDD` date that re-encodes identically
//! - The seventh is `-` or `+`
//! - The three serial digits are not `000`
//! - The last digit equals the check digit over the date and serial digits

use crate::checksum::{check_digit, digit_value};
use crate::date_codec::decode_date;
use crate::error::ValidationError;
use crate::identity::{IdentityNumber, Separator};

/// Number of characters in an identity number.
pub const IDENTITY_NUMBER_LENGTH: usize = 11;

/// Position of the separator character.
const SEPARATOR_POSITION: usize = 6;

/// Validates a candidate and returns it as an [`IdentityNumber`].
///
/// Malformed input of any shape is reported as a [`ValidationError`]; this
/// function never panics.
///
/// # Errors
///
/// Returns the first rule the candidate breaks, in the order listed in the
/// module documentation.
///
/// # Examples
///
/// ```
/// use personnummer::{ValidationError, validate};
///
/// assert!(validate("121212-1212").is_ok());
/// assert_eq!(validate("000101-0000"), Err(ValidationError::ZeroSerial));
/// ```
pub fn validate(candidate: &str) -> Result<IdentityNumber, ValidationError> {
    let chars: Vec<char> = candidate.chars().collect();
    let actual = chars.len();
    let [y1, y2, m1, m2, d1, d2, separator_char, s1, s2, s3, check_char]: [char;
        IDENTITY_NUMBER_LENGTH] = chars
        .try_into()
        .map_err(|_| ValidationError::WrongLength { actual })?;

    let date_digits: String = [y1, y2, m1, m2, d1, d2].iter().collect();
    let date = decode_date(&date_digits)?;

    let separator =
        Separator::from_char(separator_char).ok_or(ValidationError::InvalidSeparator {
            found: separator_char,
        })?;

    let [dy1, dy2, dm1, dm2, dd1, dd2] = digit_values([y1, y2, m1, m2, d1, d2], 0)?;
    let [serial_high, serial_mid, serial_low, actual_check] =
        digit_values([s1, s2, s3, check_char], SEPARATOR_POSITION + 1)?;
    let serial = u16::from(serial_high) * 100 + u16::from(serial_mid) * 10 + u16::from(serial_low);
    if serial == 0 {
        return Err(ValidationError::ZeroSerial);
    }

    let expected = check_digit(&[
        dy1,
        dy2,
        dm1,
        dm2,
        dd1,
        dd2,
        serial_high,
        serial_mid,
        serial_low,
    ]);
    if expected != actual_check {
        return Err(ValidationError::ChecksumMismatch {
            expected,
            actual: actual_check,
        });
    }

    Ok(IdentityNumber::from_parts(
        candidate.to_owned(),
        date,
        separator,
        serial,
        actual_check,
    ))
}

/// Returns `true` if `candidate` is a valid identity number.
///
/// Total over all strings: malformed input yields `false`, never a panic.
///
/// # Examples
///
/// ```
/// use personnummer::is_valid;
///
/// assert!(is_valid("121212-1212"));
/// assert!(is_valid("811218-9876"));
/// assert!(!is_valid("999999-9999"));
/// assert!(!is_valid(""));
/// ```
#[must_use]
pub fn is_valid(candidate: &str) -> bool {
    validate(candidate).is_ok()
}

fn digit_values<const N: usize>(
    chars: [char; N],
    first_position: usize,
) -> Result<[u8; N], ValidationError> {
    let mut digits = [0_u8; N];
    for ((position, c), slot) in (first_position..).zip(chars).zip(&mut digits) {
        *slot = digit_value(c).ok_or(ValidationError::NonDigit { position })?;
    }
    Ok(digits)
}
