//! Metrics engine.
//!
//! Pure functions over validated rows. Nothing here fails: an empty input
//! yields zeroed metrics or an empty series.
//!
//! Every reported number is rounded to two decimal places, half away from
//! zero, once, after aggregation. Sums are never rounded part way through.

use std::collections::BTreeMap;

use crate::types::{OverallMetrics, PersonMetrics, TimeSeriesPoint, ValidatedRow};

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Running sum/min/max over a group of mileages.
#[derive(Debug, Clone, Copy)]
struct Summary {
    sum: f64,
    min: f64,
    max: f64,
    count: usize,
}

impl Summary {
    fn new(first: f64) -> Self {
        Self {
            sum: first,
            min: first,
            max: first,
            count: 1,
        }
    }

    fn add(&mut self, miles: f64) {
        self.sum += miles;
        self.min = self.min.min(miles);
        self.max = self.max.max(miles);
        self.count += 1;
    }

    fn from_values(mut values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut summary = Summary::new(values.next()?);
        for miles in values {
            summary.add(miles);
        }
        Some(summary)
    }

    fn average(&self) -> f64 {
        self.sum / self.count as f64
    }
}

impl From<Summary> for PersonMetrics {
    fn from(summary: Summary) -> Self {
        Self {
            average: round2(summary.average()),
            min: round2(summary.min),
            max: round2(summary.max),
            total: round2(summary.sum),
            entries: summary.count,
        }
    }
}

/// Statistics across every row.
pub fn overall(rows: &[ValidatedRow]) -> OverallMetrics {
    match Summary::from_values(rows.iter().map(ValidatedRow::miles)) {
        Some(summary) => OverallMetrics {
            average: round2(summary.average()),
            min: round2(summary.min),
            max: round2(summary.max),
            total: round2(summary.sum),
            total_entries: rows.len(),
        },
        None => OverallMetrics::default(),
    }
}

/// Statistics for each runner, keyed by name.
///
/// Only names that occur in `rows` appear; the map iterates alphabetically.
pub fn per_person(rows: &[ValidatedRow]) -> BTreeMap<String, PersonMetrics> {
    let mut groups: BTreeMap<&str, Summary> = BTreeMap::new();

    for row in rows {
        let miles = row.miles();
        groups
            .entry(row.person.trim())
            .and_modify(|summary| summary.add(miles))
            .or_insert_with(|| Summary::new(miles));
    }

    groups
        .into_iter()
        .map(|(person, summary)| (person.to_string(), summary.into()))
        .collect()
}

/// Miles per date across all runners.
///
/// Rows sharing a date are summed into one point. Dates are ISO strings, so
/// the lexicographic order of the map is chronological order.
pub fn time_series(rows: &[ValidatedRow]) -> Vec<TimeSeriesPoint> {
    let mut by_date: BTreeMap<&str, f64> = BTreeMap::new();

    for row in rows {
        *by_date.entry(row.date.as_str()).or_insert(0.0) += row.miles();
    }

    by_date
        .into_iter()
        .map(|(date, miles)| TimeSeriesPoint {
            date: date.to_string(),
            miles: round2(miles),
        })
        .collect()
}

/// Miles per row for one runner.
///
/// Unlike [`time_series`], two runs on the same date stay two points. The
/// name must match exactly (case-sensitive).
pub fn time_series_for_person(rows: &[ValidatedRow], person: &str) -> Vec<TimeSeriesPoint> {
    let mut points: Vec<TimeSeriesPoint> = rows
        .iter()
        .filter(|row| row.person.trim() == person)
        .map(|row| TimeSeriesPoint {
            date: row.date.clone(),
            miles: round2(row.miles()),
        })
        .collect();

    // Stable: same-date runs keep file order
    points.sort_by(|a, b| a.date.cmp(&b.date));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, person: &str, miles: &str) -> ValidatedRow {
        ValidatedRow::new(date.to_string(), person.to_string(), miles.to_string())
    }

    fn scenario() -> Vec<ValidatedRow> {
        vec![
            row("2024-12-31", "Alice", "5.0"),
            row("2025-01-01", "Alice", "3.5"),
            row("2024-12-31", "Bob", "2.0"),
        ]
    }

    fn point(date: &str, miles: f64) -> TimeSeriesPoint {
        TimeSeriesPoint {
            date: date.to_string(),
            miles,
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
    }

    #[test]
    fn test_overall_empty() {
        assert_eq!(
            overall(&[]),
            OverallMetrics {
                average: 0.0,
                min: 0.0,
                max: 0.0,
                total: 0.0,
                total_entries: 0,
            }
        );
    }

    #[test]
    fn test_overall_scenario() {
        let metrics = overall(&scenario());
        assert_eq!(metrics.total, 10.5);
        assert_eq!(metrics.min, 2.0);
        assert_eq!(metrics.max, 5.0);
        assert_eq!(metrics.average, 3.5);
        assert_eq!(metrics.total_entries, 3);
    }

    #[test]
    fn test_overall_rounds_once() {
        // 0.333 * 3 = 0.999; rounding each value first would give 0.99
        let rows = vec![
            row("2025-01-01", "A", "0.333"),
            row("2025-01-02", "A", "0.333"),
            row("2025-01-03", "A", "0.333"),
        ];
        let metrics = overall(&rows);
        assert_eq!(metrics.total, 1.0);
        assert_eq!(metrics.average, 0.33);
        assert_eq!(metrics.min, 0.33);
    }

    #[test]
    fn test_total_and_average_agree() {
        let values = [
            "1.234", "7.5", "0.01", "12.999", "3.333", "4.4449", "26.2", "0.5", "9.87",
        ];
        for n in 1..=values.len() {
            let rows: Vec<_> = values[..n]
                .iter()
                .enumerate()
                .map(|(i, m)| row(&format!("2025-01-{:02}", i + 1), "X", m))
                .collect();
            let metrics = overall(&rows);

            let sum: f64 = rows.iter().map(ValidatedRow::miles).sum();
            assert_eq!(metrics.total, round2(sum));
            // Each of the two roundings moves a value by at most half a cent
            let bound = 0.005 * (n as f64 + 1.0) + 1e-9;
            assert!(
                (metrics.average * n as f64 - metrics.total).abs() <= bound,
                "average {} * {} drifted from total {}",
                metrics.average,
                n,
                metrics.total
            );
        }
    }

    #[test]
    fn test_scenario_average_within_one_cent_of_total() {
        let metrics = overall(&scenario());
        assert!((metrics.average * 3.0 - metrics.total).abs() <= 0.01);
    }

    #[test]
    fn test_per_person_scenario() {
        let metrics = per_person(&scenario());

        assert_eq!(metrics.len(), 2);
        assert_eq!(
            metrics["Alice"],
            PersonMetrics {
                average: 4.25,
                min: 3.5,
                max: 5.0,
                total: 8.5,
                entries: 2,
            }
        );
        assert_eq!(metrics["Bob"].entries, 1);
        assert_eq!(metrics["Bob"].average, 2.0);
    }

    #[test]
    fn test_per_person_entries_sum_to_total() {
        let mut rows = scenario();
        rows.push(row("2025-01-02", "Cara", "1.25"));
        rows.push(row("2025-01-02", "", "1"));

        let entries: usize = per_person(&rows).values().map(|m| m.entries).sum();
        assert_eq!(entries, overall(&rows).total_entries);
    }

    #[test]
    fn test_per_person_is_case_sensitive_and_sorted() {
        let rows = vec![
            row("2025-01-01", "bob", "1"),
            row("2025-01-01", "Bob", "2"),
            row("2025-01-01", "Alice", "3"),
        ];
        let names: Vec<_> = per_person(&rows).into_keys().collect();
        assert_eq!(names, vec!["Alice", "Bob", "bob"]);
    }

    #[test]
    fn test_per_person_empty() {
        assert!(per_person(&[]).is_empty());
    }

    #[test]
    fn test_time_series_scenario() {
        assert_eq!(
            time_series(&scenario()),
            vec![point("2024-12-31", 7.0), point("2025-01-01", 3.5)]
        );
    }

    #[test]
    fn test_time_series_sorts_and_skips_missing_days() {
        let rows = vec![
            row("2025-03-01", "A", "1"),
            row("2024-11-30", "A", "2"),
            row("2025-01-15", "B", "0.004"),
            row("2025-01-15", "A", "0.004"),
        ];
        assert_eq!(
            time_series(&rows),
            vec![
                point("2024-11-30", 2.0),
                point("2025-01-15", 0.01),
                point("2025-03-01", 1.0),
            ]
        );
    }

    #[test]
    fn test_time_series_for_person_keeps_same_day_runs_apart() {
        let rows = vec![
            row("2025-01-02", "Alice", "2"),
            row("2025-01-01", "Alice", "1.25"),
            row("2025-01-01", "Bob", "9"),
            row("2025-01-01", "Alice", "4"),
        ];

        // Overall sums the three runs on the 1st
        assert_eq!(
            time_series(&rows),
            vec![point("2025-01-01", 14.25), point("2025-01-02", 2.0)]
        );

        // Alice's series emits one point per run, same-day runs in file order
        let alice = time_series_for_person(&rows, "Alice");
        assert_eq!(alice.len(), 3);
        assert_eq!(alice[0], point("2025-01-01", 1.25));
        assert_eq!(alice[1], point("2025-01-01", 4.0));
        assert_eq!(alice[2], point("2025-01-02", 2.0));
    }

    #[test]
    fn test_time_series_for_person_exact_match() {
        assert!(time_series_for_person(&scenario(), "alice").is_empty());
        assert!(time_series_for_person(&scenario(), "Nobody").is_empty());
        assert_eq!(time_series_for_person(&scenario(), "Bob").len(), 1);
    }
}
