//! Validators for raw conversational input.
//!
//! Pure functions: each takes the text exactly as the transport delivered it
//! and either returns the normalized value or a [`ValidationError`] naming
//! what was wrong.

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::ValidationError;

/// Ideographic (full-width) space, common in pasted CJK address lists.
const FULL_WIDTH_SPACE: char = '\u{3000}';

/// HTML non-breaking-space artifacts some chat clients leave behind.
const NBSP_ARTIFACTS: [&str; 2] = ["&#160;", "&#160:^"];

/// Date layouts accepted besides RFC 3339 timestamps.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Non-greedy `( ... )` span. Nested parentheses are not balanced: the first
/// `)` closes the span, whatever opened in between.
static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(.+?\)").expect("parenthesized regex is valid"));

static EMAIL_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("email regex is valid")
});

/// Parses a non-negative decimal integer.
///
/// Surrounding whitespace is trimmed; what remains must be ASCII digits only.
/// Leading zeros are accepted, so `"007"` is `7`.
pub fn parse_natural_number(field: &str, raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(field, "only digits are allowed"));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ValidationError::invalid_format(field, "number is too large"))
}

/// Strips spaces, non-breaking-space artifacts and parenthesized annotations.
///
/// Only the first `)` after a `(` closes an annotation, so `"a(b(c)d)"`
/// becomes `"ad)"`.
pub fn clean_email_input(raw: &str) -> String {
    let mut cleaned: String = raw
        .chars()
        .filter(|c| *c != ' ' && *c != FULL_WIDTH_SPACE)
        .collect();
    for artifact in NBSP_ARTIFACTS {
        cleaned = cleaned.replace(artifact, "");
    }
    PARENTHESIZED.replace_all(&cleaned, "").into_owned()
}

/// Returns true if `candidate` is a single syntactically valid address.
pub fn is_email_address(candidate: &str) -> bool {
    EMAIL_ADDRESS.is_match(candidate)
}

/// Cleans and splits a comma-separated address list.
///
/// All or nothing: a single empty or malformed segment rejects the input.
pub fn parse_email_list(field: &str, raw: &str) -> Result<Vec<String>, ValidationError> {
    let cleaned = clean_email_input(raw);
    if cleaned.is_empty() {
        return Err(ValidationError::empty_field(field));
    }

    let addresses: Vec<String> = cleaned.split(',').map(str::to_string).collect();
    if let Some(bad) = addresses.iter().find(|a| !is_email_address(a)) {
        let reason = if bad.is_empty() {
            "empty entry between commas".to_string()
        } else {
            format!("'{}' is not an email address", bad)
        };
        return Err(ValidationError::invalid_format(field, reason));
    }
    Ok(addresses)
}

/// Parses a calendar date, ignoring any time-of-day component.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY.MM.DD` and RFC 3339 timestamps.
/// The minimum and maximum representable dates are treated as parse failures.
pub fn parse_calendar_date(field: &str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }

    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        });

    match parsed {
        Some(date) if date != NaiveDate::MIN && date != NaiveDate::MAX => Ok(date),
        _ => Err(ValidationError::invalid_format(
            field,
            "expected a date such as 2017-10-10",
        )),
    }
}

/// Parses a 1-based choice among `count` options into a 0-based index.
pub fn parse_choice_index(field: &str, raw: &str, count: usize) -> Result<usize, ValidationError> {
    let choice = parse_natural_number(field, raw)? as usize;
    if count == 0 || choice == 0 || choice > count {
        return Err(ValidationError::out_of_range(
            field,
            1,
            count as i64,
            choice as i64,
        ));
    }
    Ok(choice - 1)
}
