use std::collections::HashMap;

use crate::format::sort_keys_descending;
use crate::model::entry::Entry;

/// Total hours per month (`YYYY-MM`) and per year (`YYYY`).
///
/// Sums are plain additions of each entry's stored `total_hours`; rounding
/// happens only when the values are displayed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub by_month: HashMap<String, f64>,
    pub by_year: HashMap<String, f64>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut summary = Self::new();
        for entry in entries {
            summary.add(entry);
        }
        summary
    }

    pub fn add(&mut self, entry: &Entry) {
        *self.by_month.entry(entry.month_key()).or_default() += entry.total_hours();
        *self.by_year.entry(entry.year_key()).or_default() += entry.total_hours();
    }

    pub fn is_empty(&self) -> bool {
        self.by_month.is_empty() && self.by_year.is_empty()
    }

    pub fn month_total(&self, month_key: &str) -> Option<f64> {
        self.by_month.get(month_key).copied()
    }

    pub fn year_total(&self, year_key: &str) -> Option<f64> {
        self.by_year.get(year_key).copied()
    }

    /// Months newest first.
    pub fn months_descending(&self) -> Vec<(&str, f64)> {
        descending(&self.by_month)
    }

    /// Years newest first.
    pub fn years_descending(&self) -> Vec<(&str, f64)> {
        descending(&self.by_year)
    }
}

fn descending(totals: &HashMap<String, f64>) -> Vec<(&str, f64)> {
    sort_keys_descending(totals.keys().map(String::as_str))
        .into_iter()
        .map(|key| (key, totals[key]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(date: &str, participants: u32, hours: f64) -> Entry {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Entry::new("Service", date, participants, hours).unwrap()
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::from_entries(&[]);
        assert!(summary.is_empty());
        assert!(summary.months_descending().is_empty());
        assert!(summary.years_descending().is_empty());
    }

    #[test]
    fn test_sums_by_month_and_year() {
        let entries = vec![
            entry("2024-03-01", 10, 2.0),
            entry("2024-03-15", 4, 1.5),
            entry("2024-01-20", 2, 0.25),
            entry("2023-12-25", 3, 1.33),
        ];
        let summary = Summary::from_entries(&entries);

        assert_eq!(summary.month_total("2024-03"), Some(26.0));
        assert_eq!(summary.month_total("2024-01"), Some(0.5));
        assert_eq!(summary.month_total("2023-12"), Some(3.99));
        assert_eq!(summary.month_total("2024-02"), None);
        assert_eq!(summary.year_total("2024"), Some(26.5));
        assert_eq!(summary.year_total("2023"), Some(3.99));
    }

    #[test]
    fn test_each_group_matches_its_entries() {
        let entries = vec![
            entry("2022-06-01", 7, 0.75),
            entry("2022-06-30", 1, 3.0),
            entry("2022-07-01", 12, 1.25),
            entry("2021-06-01", 5, 2.0),
            entry("2022-06-15", 2, 2.5),
        ];
        let summary = Summary::from_entries(&entries);

        for (key, total) in summary.months_descending() {
            let expected: f64 = entries
                .iter()
                .filter(|e| e.month_key() == key)
                .map(|e| e.total_hours())
                .sum();
            assert_eq!(total, expected, "month {}", key);
        }
        for (key, total) in summary.years_descending() {
            let expected: f64 = entries
                .iter()
                .filter(|e| e.year_key() == key)
                .map(|e| e.total_hours())
                .sum();
            assert_eq!(total, expected, "year {}", key);
        }
    }

    #[test]
    fn test_keys_sorted_newest_first() {
        let entries = vec![
            entry("2023-01-15", 1, 1.0),
            entry("2024-03-01", 1, 1.0),
            entry("2023-12-25", 1, 1.0),
        ];
        let summary = Summary::from_entries(&entries);

        let months: Vec<&str> = summary.months_descending().into_iter().map(|(k, _)| k).collect();
        assert_eq!(months, vec!["2024-03", "2023-12", "2023-01"]);
        let years: Vec<&str> = summary.years_descending().into_iter().map(|(k, _)| k).collect();
        assert_eq!(years, vec!["2024", "2023"]);
    }
}
