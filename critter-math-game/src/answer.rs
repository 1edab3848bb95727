//! Parsing and checking submitted answers.
use crate::error::AnswerError;

/// Parse the leading number of `input`, the way a browser number field does:
/// surrounding whitespace is ignored and trailing junk after the number is
/// dropped (`"12abc"` reads as 12).
///
/// # Errors
///
/// Returns [`AnswerError`] when no number can be read.
pub fn parse_answer(input: &str) -> Result<f64, AnswerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AnswerError::Empty);
    }
    let prefix = numeric_prefix(trimmed);
    prefix
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| AnswerError::NotANumber(trimmed.to_string()))
}

/// Whether `submitted` is within `tolerance` of `expected`.
#[must_use]
pub fn is_correct(submitted: f64, expected: f64, tolerance: f64) -> bool {
    (submitted - expected).abs() < tolerance
}

fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut saw_digit = end > digits_start;
    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > end + 1 || saw_digit {
            saw_digit |= frac_end > end + 1;
            end = frac_end;
        }
    }
    if !saw_digit {
        return "";
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    &s[..end]
}
