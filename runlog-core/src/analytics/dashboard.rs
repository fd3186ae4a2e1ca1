//! Dashboard view model.
//!
//! Applies the runner filter and gathers everything one dashboard render
//! needs. Built fresh whenever the rows or the filter change.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::metrics::{overall, per_person, time_series, time_series_for_person};
use crate::types::{OverallMetrics, PersonMetrics, TimeSeriesPoint, ValidatedRow};

/// Distinct runner names, sorted.
pub fn person_names(rows: &[ValidatedRow]) -> Vec<String> {
    rows.iter()
        .map(|row| row.person.trim())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Rows belonging to `person`, or every row when no filter is set.
pub fn filter_rows(rows: &[ValidatedRow], person: Option<&str>) -> Vec<ValidatedRow> {
    match person {
        Some(person) => rows
            .iter()
            .filter(|row| row.person.trim() == person)
            .cloned()
            .collect(),
        None => rows.to_vec(),
    }
}

/// Everything shown on one dashboard render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Active runner filter (None = all runners)
    pub selected_person: Option<String>,
    /// Every runner in the file, for the selector
    pub persons: Vec<String>,
    /// Metrics over the filtered rows
    pub overall: OverallMetrics,
    /// Per-runner cards; just the selected runner when filtered
    pub per_person: BTreeMap<String, PersonMetrics>,
    /// Chart points
    pub series: Vec<TimeSeriesPoint>,
}

impl Dashboard {
    /// Build the dashboard for `rows` with an optional runner filter.
    pub fn build(rows: &[ValidatedRow], selected_person: Option<&str>) -> Self {
        let filtered = filter_rows(rows, selected_person);
        let mut cards = per_person(rows);

        let series = match selected_person {
            Some(person) => {
                cards.retain(|name, _| name == person);
                time_series_for_person(&filtered, person)
            }
            None => time_series(&filtered),
        };

        Self {
            selected_person: selected_person.map(str::to_string),
            persons: person_names(rows),
            overall: overall(&filtered),
            per_person: cards,
            series,
        }
    }

    /// Chart heading.
    pub fn chart_title(&self) -> String {
        match &self.selected_person {
            Some(person) => format!("{}'s Miles Run Over Time", person),
            None => "Overall Miles Run Over Time".to_string(),
        }
    }

    /// Line under the chart heading.
    pub fn chart_description(&self) -> String {
        match &self.selected_person {
            Some(person) => format!("Daily miles run by {}", person),
            None => "Total miles run per day across all runners".to_string(),
        }
    }

    /// Label for the overall card, which covers only the filtered rows.
    pub fn overall_description(&self) -> String {
        match &self.selected_person {
            Some(person) => format!("Statistics for {}", person),
            None => "Statistics across all runners".to_string(),
        }
    }

    /// True when there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Largest chart value, for sizing the y axis.
    pub fn max_series_miles(&self) -> f64 {
        self.series.iter().map(|p| p.miles).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, person: &str, miles: &str) -> ValidatedRow {
        ValidatedRow::new(date.to_string(), person.to_string(), miles.to_string())
    }

    fn rows() -> Vec<ValidatedRow> {
        vec![
            row("2024-12-31", "Alice", "5.0"),
            row("2025-01-01", "Alice", "3.5"),
            row("2024-12-31", "Bob", "2.0"),
            row("2025-01-01", "Alice", "1"),
        ]
    }

    #[test]
    fn test_person_names_sorted_unique() {
        assert_eq!(person_names(&rows()), vec!["Alice", "Bob"]);
        assert!(person_names(&[]).is_empty());
    }

    #[test]
    fn test_filter_rows() {
        assert_eq!(filter_rows(&rows(), None).len(), 4);
        assert_eq!(filter_rows(&rows(), Some("Alice")).len(), 3);
        assert!(filter_rows(&rows(), Some("alice")).is_empty());
    }

    #[test]
    fn test_unfiltered_dashboard() {
        let dashboard = Dashboard::build(&rows(), None);

        assert_eq!(dashboard.overall.total_entries, 4);
        assert_eq!(dashboard.overall.total, 11.5);
        assert_eq!(dashboard.per_person.len(), 2);
        assert_eq!(dashboard.series.len(), 2);
        assert_eq!(dashboard.series[1].miles, 4.5);
        assert_eq!(dashboard.chart_title(), "Overall Miles Run Over Time");
        assert_eq!(
            dashboard.chart_description(),
            "Total miles run per day across all runners"
        );
    }

    #[test]
    fn test_filtered_dashboard() {
        let dashboard = Dashboard::build(&rows(), Some("Alice"));

        assert_eq!(dashboard.persons, vec!["Alice", "Bob"]);
        assert_eq!(dashboard.overall.total_entries, 3);
        assert_eq!(dashboard.overall.total, 9.5);
        assert_eq!(dashboard.per_person.keys().collect::<Vec<_>>(), vec!["Alice"]);
        // Per-runner chart does not merge the two runs on 2025-01-01
        assert_eq!(dashboard.series.len(), 3);
        assert_eq!(dashboard.chart_title(), "Alice's Miles Run Over Time");
        assert_eq!(dashboard.chart_description(), "Daily miles run by Alice");
        assert_eq!(dashboard.max_series_miles(), 5.0);
    }

    #[test]
    fn test_filter_for_unknown_person_is_empty() {
        let dashboard = Dashboard::build(&rows(), Some("Zed"));

        assert!(dashboard.is_empty());
        assert!(dashboard.per_person.is_empty());
        assert_eq!(dashboard.overall, OverallMetrics::default());
    }

    #[test]
    fn test_empty_rows() {
        let dashboard = Dashboard::build(&[], None);
        assert!(dashboard.is_empty());
        assert!(dashboard.persons.is_empty());
        assert_eq!(dashboard.max_series_miles(), 0.0);
    }
}
