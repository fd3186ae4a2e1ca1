//! Row validation
//!
//! Turns tokenizer output into a [`ParseOutcome`]. Header problems and empty
//! files stop validation immediately; row problems are collected so a user can
//! fix every bad line in one pass.

use crate::types::{normalize_header, ParseOutcome, RawRecord, ValidatedRow, ValidationError};
use chrono::NaiveDate;
use tracing::debug;

pub const DATE_HEADER: &str = "date";
pub const PERSON_HEADER: &str = "person";
pub const MILES_HEADER: &str = "miles run";

/// Columns every file must provide, in the order missing ones are reported.
pub const REQUIRED_HEADERS: [&str; 3] = [DATE_HEADER, PERSON_HEADER, MILES_HEADER];

/// Validate a tokenized file.
///
/// Source line numbers on row errors count the header as line 1, so the
/// record at position `i` is reported as row `i + 2`.
pub fn validate(headers: &[String], records: &[RawRecord]) -> ParseOutcome {
    if headers.is_empty() && records.is_empty() {
        return ParseOutcome::failed(vec![ValidationError::empty_file()]);
    }

    let missing = missing_headers(headers);
    if !missing.is_empty() {
        debug!(?missing, "Required headers missing");
        return ParseOutcome::failed(
            missing
                .into_iter()
                .map(ValidationError::missing_header)
                .collect(),
        );
    }

    if records.is_empty() {
        return ParseOutcome::failed(vec![ValidationError::empty_file()]);
    }

    let mut rows = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match validate_record(record, index + 2) {
            Ok(row) => rows.push(row),
            Err(row_errors) => {
                debug!(row = index + 2, count = row_errors.len(), "Rejected row");
                errors.extend(row_errors);
            }
        }
    }

    ParseOutcome {
        success: errors.is_empty(),
        rows,
        errors,
    }
}

/// Required headers not present in `headers` (case and whitespace ignored).
pub fn missing_headers(headers: &[String]) -> Vec<&'static str> {
    let present: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

    REQUIRED_HEADERS
        .into_iter()
        .filter(|required| !present.iter().any(|h| h == required))
        .collect()
}

/// Check a single record, returning the row or every problem with it.
fn validate_record(
    record: &RawRecord,
    row_index: usize,
) -> std::result::Result<ValidatedRow, Vec<ValidationError>> {
    let date_raw = record.get(DATE_HEADER).unwrap_or("").trim();
    let person = record.get(PERSON_HEADER).unwrap_or("").trim();
    let miles_raw = record.get(MILES_HEADER).unwrap_or("").trim();

    let mut errors = Vec::new();

    let date = normalize_date(date_raw);
    if date.is_none() {
        errors.push(ValidationError::invalid_date(row_index, date_raw));
    }

    if parse_miles(miles_raw).is_none() {
        errors.push(ValidationError::invalid_miles(row_index, miles_raw));
    }

    match date {
        Some(date) if errors.is_empty() => Ok(ValidatedRow::new(
            date,
            person.to_string(),
            miles_raw.to_string(),
        )),
        _ => Err(errors),
    }
}

/// Convert a `DD/MM/YYYY` date to `YYYY-MM-DD`.
///
/// Returns `None` unless the input is exactly two digits, `/`, two digits,
/// `/`, four digits and names a day that exists on the calendar. Years
/// below 100 are rejected.
pub fn normalize_date(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let day: u32 = raw[0..2].parse().ok()?;
    let month: u32 = raw[3..5].parse().ok()?;
    let year: i32 = raw[6..10].parse().ok()?;

    // Years 0000-0099 are not accepted as calendar years
    if year < 100 {
        return None;
    }

    // from_ymd_opt rejects day 00, month 13, 31/04, 29/02 outside leap years
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    Some(date.format("%Y-%m-%d").to_string())
}

/// Parse a mileage value, accepting only finite numbers above zero.
///
/// The whole trimmed string must be a number: `"12abc"` is rejected rather
/// than read as 12.
pub fn parse_miles(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: f64 = trimmed.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}
