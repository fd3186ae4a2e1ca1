//! Formatting helpers shared across UIs.

/// Show an ISO `YYYY-MM-DD` date as `DD/MM/YYYY`.
///
/// Anything that does not split into three parts is returned unchanged.
pub fn display_date(iso: &str) -> String {
    let mut parts = iso.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day))
            if !year.is_empty() && !month.is_empty() && !day.is_empty() =>
        {
            format!("{}/{}/{}", day, month, year)
        }
        _ => iso.to_string(),
    }
}

/// Format a mileage for display (e.g., "4.25 mi", "7 mi").
pub fn format_miles(miles: f64) -> String {
    format!("{} mi", miles)
}

/// Pluralize an entry count (e.g., "1 entry", "3 entries").
pub fn entries_label(count: usize) -> String {
    if count == 1 {
        "1 entry".to_string()
    } else {
        format!("{} entries", count)
    }
}

/// Name shown for a runner; blank names get a placeholder.
pub fn display_person(person: &str) -> &str {
    if person.is_empty() {
        "(unnamed)"
    } else {
        person
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2024-12-31"), "31/12/2024");
        assert_eq!(display_date("2024-12"), "2024-12");
        assert_eq!(display_date(""), "");
    }

    #[test]
    fn test_format_miles() {
        assert_eq!(format_miles(7.0), "7 mi");
        assert_eq!(format_miles(4.25), "4.25 mi");
    }

    #[test]
    fn test_entries_label() {
        assert_eq!(entries_label(0), "0 entries");
        assert_eq!(entries_label(1), "1 entry");
        assert_eq!(entries_label(2), "2 entries");
    }

    #[test]
    fn test_display_person() {
        assert_eq!(display_person("Alice"), "Alice");
        assert_eq!(display_person(""), "(unnamed)");
    }
}
