//! Error types for runlog-core
//!
//! These cover operational failures only. Problems with the *contents* of a
//! CSV file are reported as [`crate::types::ValidationError`] values inside a
//! [`crate::types::ParseOutcome`], never as `Err`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the runlog-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV tokenizer could not make sense of the input
    #[error("Failed to parse CSV file: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Only `.csv` files are accepted
    #[error("unsupported file {}: expected a .csv file", .0.display())]
    UnsupportedFile(PathBuf),
}

/// Result type alias for runlog-core
pub type Result<T> = std::result::Result<T, Error>;
