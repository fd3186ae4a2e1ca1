//! Ingestion layer for running log files
//!
//! This module turns raw CSV bytes into a validated [`ParseOutcome`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌───────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  CSV bytes  │ ──► │   Tokenizer   │ ──► │  validator   │ ──► │ ParseOutcome │
//! │ (file/mem)  │     │ (CsvTokenizer)│     │  ::validate  │     │ rows+errors  │
//! └─────────────┘     └───────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! Reading the file is the only step that may suspend ([`load_path_async`]);
//! tokenizing and validating are synchronous.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use runlog_core::ingest;
//! use std::path::Path;
//!
//! let outcome = ingest::load_path(Path::new("runs.csv")).expect("readable file");
//! for error in &outcome.errors {
//!     eprintln!("{}", error);
//! }
//! println!("{} valid rows", outcome.rows.len());
//! ```

pub mod tokenizer;
pub mod validator;

pub use tokenizer::{CsvTokenizer, TokenizedFile, Tokenizer};
pub use validator::{normalize_date, parse_miles, validate, REQUIRED_HEADERS};

use crate::error::{Error, Result};
use crate::types::ParseOutcome;
use std::path::Path;
use tracing::{info, info_span, warn};

/// Tokenize and validate in-memory CSV bytes with the default tokenizer.
pub fn load_bytes(bytes: &[u8]) -> Result<ParseOutcome> {
    load_bytes_with(&CsvTokenizer::new(), bytes)
}

/// Tokenize and validate in-memory CSV bytes with a specific tokenizer.
pub fn load_bytes_with(tokenizer: &dyn Tokenizer, bytes: &[u8]) -> Result<ParseOutcome> {
    let _span = info_span!("load", tokenizer = tokenizer.name(), bytes = bytes.len()).entered();

    let file = tokenizer.tokenize(bytes).map_err(|e| {
        warn!(error = %e, "Tokenizer rejected input");
        e
    })?;

    let outcome = validate(&file.headers, &file.records);

    info!(
        records = file.records.len(),
        valid_rows = outcome.rows.len(),
        errors = outcome.errors.len(),
        success = outcome.success,
        "Validated running log"
    );

    Ok(outcome)
}

/// Read and validate a `.csv` file.
pub fn load_path(path: &Path) -> Result<ParseOutcome> {
    ensure_csv(path)?;
    info!(path = %path.display(), "Loading running log");

    let bytes = std::fs::read(path)?;
    load_bytes(&bytes)
}

/// Async variant of [`load_path`]: only the file read is awaited.
pub async fn load_path_async(path: &Path) -> Result<ParseOutcome> {
    ensure_csv(path)?;
    info!(path = %path.display(), "Loading running log");

    let bytes = tokio::fs::read(path).await?;
    load_bytes(&bytes)
}

/// Reject anything without a `.csv` extension (case-insensitive).
fn ensure_csv(path: &Path) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        Ok(())
    } else {
        Err(Error::UnsupportedFile(path.to_path_buf()))
    }
}
