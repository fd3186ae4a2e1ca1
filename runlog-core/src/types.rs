//! Core domain types for runlog
//!
//! These types describe a running log as it moves through the pipeline:
//!
//! ```text
//! bytes ─► RawRecord ─► ValidatedRow / ValidationError ─► ParseOutcome
//!                                   │
//!                                   ▼
//!          OverallMetrics, PersonMetrics, TimeSeriesPoint
//! ```
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Row** | One data line of the CSV file (the header is line 1) |
//! | **Person** | The runner a row belongs to, matched exactly after trimming |
//! | **Miles run** | Distance for one run, always a finite number above zero once validated |
//! | **Time series** | Date-ordered points used to draw the miles chart |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================
// Tokenizer output
// ============================================

/// A single CSV record keyed by header name, as produced by the tokenizer.
///
/// Lookup through [`RawRecord::get`] ignores case and surrounding whitespace
/// in the header name, so `" Miles Run "` finds the `miles run` column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `header`.
    ///
    /// The first value stored for a header is kept; a duplicate column with an
    /// equivalent name is ignored.
    pub fn insert(&mut self, header: impl AsRef<str>, value: impl Into<String>) {
        self.fields
            .entry(normalize_header(header.as_ref()))
            .or_insert_with(|| value.into());
    }

    /// Raw value for `header`, if the column exists in this record.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .get(&normalize_header(header))
            .map(String::as_str)
    }

    /// Number of columns in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (header, value) in iter {
            record.insert(header, value);
        }
        record
    }
}

/// Canonical form of a header name: trimmed and lowercased.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

// ============================================
// Validation
// ============================================

/// A CSV row that passed every check.
///
/// Only the validator constructs these, so every instance carries an ISO
/// date and a positive, finite mileage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedRow {
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
    /// Trimmed runner name (may be empty)
    pub person: String,
    /// Mileage exactly as written in the file, trimmed
    #[serde(rename = "miles run")]
    pub miles_run: String,
}

impl ValidatedRow {
    pub(crate) fn new(date: String, person: String, miles_run: String) -> Self {
        Self {
            date,
            person,
            miles_run,
        }
    }

    /// Mileage as a number.
    ///
    /// The string was checked when the row was validated; a hand-built row
    /// holding garbage yields 0.0.
    pub fn miles(&self) -> f64 {
        self.miles_run.trim().parse().unwrap_or(0.0)
    }
}

/// Category of a validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// A required column is absent from the header row
    MissingHeader,
    /// Date is not a real `DD/MM/YYYY` calendar day
    InvalidDate,
    /// Miles value is missing, non-numeric, or not above zero
    InvalidMiles,
    /// The file has no data rows
    EmptyFile,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingHeader => "missing_header",
            ValidationErrorKind::InvalidDate => "invalid_date",
            ValidationErrorKind::InvalidMiles => "invalid_miles",
            ValidationErrorKind::EmptyFile => "empty_file",
        }
    }
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One problem found while validating a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Message shown verbatim to the user
    pub message: String,
    /// 1-based source line number (the header is line 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<usize>,
    /// Column the problem belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl ValidationError {
    pub fn missing_header(header: &str) -> Self {
        Self {
            kind: ValidationErrorKind::MissingHeader,
            message: format!("Missing required header: \"{}\"", header),
            row_index: None,
            column: Some(header.to_string()),
        }
    }

    pub fn empty_file() -> Self {
        Self {
            kind: ValidationErrorKind::EmptyFile,
            message: "CSV file is empty or contains no data rows".to_string(),
            row_index: None,
            column: None,
        }
    }

    pub fn invalid_date(row_index: usize, raw: &str) -> Self {
        Self {
            kind: ValidationErrorKind::InvalidDate,
            message: format!(
                "Invalid date format in row {}: \"{}\". Expected DD/MM/YYYY format.",
                row_index, raw
            ),
            row_index: Some(row_index),
            column: Some(crate::ingest::validator::DATE_HEADER.to_string()),
        }
    }

    pub fn invalid_miles(row_index: usize, raw: &str) -> Self {
        Self {
            kind: ValidationErrorKind::InvalidMiles,
            message: format!(
                "Invalid miles value in row {}: \"{}\". Must be a positive number.",
                row_index, raw
            ),
            row_index: Some(row_index),
            column: Some(crate::ingest::validator::MILES_HEADER.to_string()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of validating one whole file.
///
/// `rows` holds every valid row even when `success` is false, so callers can
/// show partial data next to the error list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub success: bool,
    pub rows: Vec<ValidatedRow>,
    pub errors: Vec<ValidationError>,
}

impl ParseOutcome {
    /// A failed outcome with no rows.
    pub fn failed(errors: Vec<ValidationError>) -> Self {
        Self {
            success: false,
            rows: Vec::new(),
            errors,
        }
    }

    /// Whether there is anything to chart.
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}

// ============================================
// Metrics
// ============================================

/// Aggregate statistics across a set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallMetrics {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
    pub total_entries: usize,
}

/// Aggregate statistics for one runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonMetrics {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
    pub entries: usize,
}

/// One point of the miles chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// ISO `YYYY-MM-DD`
    pub date: String,
    pub miles: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_header_lookup_is_case_insensitive() {
        let record: RawRecord = [(" Miles Run ", "5.0"), ("DATE", "01/01/2025")]
            .into_iter()
            .collect();

        assert_eq!(record.get("miles run"), Some("5.0"));
        assert_eq!(record.get("Date"), Some("01/01/2025"));
        assert_eq!(record.get("person"), None);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_raw_record_keeps_first_duplicate_column() {
        let record: RawRecord = [("person", "Alice"), ("Person", "Bob")]
            .into_iter()
            .collect();
        assert_eq!(record.get("person"), Some("Alice"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_validated_row_miles() {
        let row = ValidatedRow::new("2025-01-01".into(), "Alice".into(), "3.25".into());
        assert_eq!(row.miles(), 3.25);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::missing_header("person").message,
            "Missing required header: \"person\""
        );

        let err = ValidationError::invalid_date(3, "29/02/2023");
        assert_eq!(
            err.to_string(),
            "Invalid date format in row 3: \"29/02/2023\". Expected DD/MM/YYYY format."
        );
        assert_eq!(err.row_index, Some(3));
        assert_eq!(err.column.as_deref(), Some("date"));

        let err = ValidationError::invalid_miles(4, "-3");
        assert_eq!(
            err.message,
            "Invalid miles value in row 4: \"-3\". Must be a positive number."
        );
        assert_eq!(err.column.as_deref(), Some("miles run"));
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = ParseOutcome {
            success: false,
            rows: vec![ValidatedRow::new(
                "2025-01-01".into(),
                "Alice".into(),
                "3.5".into(),
            )],
            errors: vec![ValidationError::empty_file()],
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["rows"][0]["miles run"], "3.5");
        assert_eq!(json["errors"][0]["kind"], "empty_file");
        assert!(json["errors"][0].get("row_index").is_none());
    }

    #[test]
    fn test_overall_metrics_json_field_names() {
        let json = serde_json::to_value(OverallMetrics::default()).unwrap();
        assert_eq!(json["total_entries"], 0);
        assert!(json.get("totalEntries").is_none());
    }
}
