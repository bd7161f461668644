//! Luhn-style check digit over the date and serial digits.
//!
//! Digits at even positions are doubled, the decimal digits of every
//! resulting value are summed, and the check digit is whatever brings that
//! sum up to the next multiple of ten.

/// Number of digits the check digit is computed over (date plus serial).
pub const SOURCE_DIGITS: usize = 9;

/// Computes the check digit for nine source digits.
///
/// Each element of `digits` must be a decimal digit (`0..=9`).
///
/// # Examples
///
/// ```
/// use personnummer::check_digit;
///
/// assert_eq!(check_digit(&[1, 2, 1, 2, 1, 2, 1, 2, 1]), 2);
/// assert_eq!(check_digit(&[8, 1, 1, 2, 1, 8, 9, 8, 7]), 6);
/// ```
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "value is reduced modulo ten"
)]
pub fn check_digit(digits: &[u8; SOURCE_DIGITS]) -> u8 {
    let total: u32 = digits
        .iter()
        .zip([2_u32, 1].into_iter().cycle())
        .map(|(&digit, weight)| digit_sum(u32::from(digit) * weight))
        .sum();
    (10 - total.rem_euclid(10)).rem_euclid(10) as u8
}

/// Computes the check digit for a six-digit date and three-digit serial.
///
/// Returns `None` when either part has the wrong length or contains a
/// character that is not an ASCII digit.
///
/// # Examples
///
/// ```
/// use personnummer::check_digit_for;
///
/// assert_eq!(check_digit_for("121212", "121"), Some(2));
/// assert_eq!(check_digit_for("12121x", "121"), None);
/// ```
#[must_use]
pub fn check_digit_for(date_digits: &str, serial_digits: &str) -> Option<u8> {
    let digits: Vec<u8> = date_digits
        .chars()
        .chain(serial_digits.chars())
        .map(digit_value)
        .collect::<Option<_>>()?;
    let source: [u8; SOURCE_DIGITS] = digits.try_into().ok()?;
    Some(check_digit(&source))
}

/// Returns the value of an ASCII decimal digit.
pub(crate) fn digit_value(c: char) -> Option<u8> {
    c.to_digit(10).and_then(|d| u8::try_from(d).ok())
}

fn digit_sum(value: u32) -> u32 {
    let mut remaining = value;
    let mut sum = 0;
    while remaining > 0 {
        sum += remaining.rem_euclid(10);
        remaining = remaining.div_euclid(10);
    }
    sum
}
