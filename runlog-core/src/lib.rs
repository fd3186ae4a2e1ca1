//! # runlog-core
//!
//! Core library for runlog - a running log dashboard.
//!
//! This library provides:
//! - A CSV tokenizer adapter and row validator for running logs
//! - Metrics over validated rows (overall, per runner, time series)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three layers:
//! - **Raw:** CSV bytes and header-keyed [`RawRecord`]s (discarded after validation)
//! - **Validated:** a [`ParseOutcome`] of [`ValidatedRow`]s plus every [`ValidationError`]
//! - **Derived:** metrics and chart series, recomputed whenever rows or the filter change
//!
//! ## Example
//!
//! ```rust
//! use runlog_core::analytics::Dashboard;
//! use runlog_core::ingest;
//!
//! let csv = b"date,person,miles run\n31/12/2024,Alice,5.0\n01/01/2025,Alice,3.5\n";
//! let outcome = ingest::load_bytes(csv).expect("well-formed CSV");
//! assert!(outcome.success);
//!
//! let dashboard = Dashboard::build(&outcome.rows, None);
//! assert_eq!(dashboard.overall.total, 8.5);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod types;
