//! Analytics module for runlog
//!
//! Provides aggregate statistics over validated rows:
//! - [`metrics`]: overall and per-runner statistics, and chart time series
//! - [`dashboard`]: the runner filter applied on top of the metrics

pub mod dashboard;
pub mod metrics;

pub use dashboard::{filter_rows, person_names, Dashboard};
pub use metrics::{overall, per_person, round2, time_series, time_series_for_person};
