//! Tokenizer abstraction
//!
//! A [`Tokenizer`] turns raw file bytes into header names plus header-keyed
//! records. The validator only relies on this contract:
//!
//! 1. `headers` lists the header row cells in file order
//! 2. `records` preserves file order
//! 3. Empty lines never reach the validator; lines like `,,` or `   ` do
//! 4. Every header has an entry in every record (short lines are padded with `""`)

use crate::error::Result;
use crate::types::RawRecord;

/// Output of tokenizing one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenizedFile {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

/// Trait implemented by CSV tokenizers.
pub trait Tokenizer: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Split `bytes` into headers and records.
    ///
    /// Only input the tokenizer cannot read at all (bad encoding, broken
    /// quoting) is an `Err`; questionable values are left to the validator.
    fn tokenize(&self, bytes: &[u8]) -> Result<TokenizedFile>;
}

/// Tokenizer backed by the `csv` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTokenizer;

impl CsvTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for CsvTokenizer {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn tokenize(&self, bytes: &[u8]) -> Result<TokenizedFile> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').trim().to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;

            let raw: RawRecord = headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.as_str(), record.get(i).unwrap_or("")))
                .collect();
            records.push(raw);
        }

        Ok(TokenizedFile { headers, records })
    }
}
