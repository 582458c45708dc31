use chrono::NaiveDate;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date. No timezone is involved, so the
/// result never shifts by a day.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), ISO_DATE_FORMAT).ok()
}

/// Short display form used in table rows, e.g. `Mar 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn year_key(date: NaiveDate) -> String {
    date.format("%Y").to_string()
}

/// `2024-03` -> `March 2024`. Keys that are not `YYYY-MM` are returned as-is.
pub fn month_label(month_key: &str) -> String {
    let parsed = month_key
        .split_once('-')
        .and_then(|(year, month)| Some((year.parse::<i32>().ok()?, month.parse::<u32>().ok()?)))
        .and_then(|(year, month)| NaiveDate::from_ymd_opt(year, month, 1));

    match parsed {
        Some(first_of_month) => first_of_month.format("%B %Y").to_string(),
        None => month_key.to_string(),
    }
}

/// Lexicographic descending order. For `YYYY-MM` and `YYYY` keys this is
/// also newest-first.
pub fn sort_keys_descending<K: Ord>(keys: impl IntoIterator<Item = K>) -> Vec<K> {
    let mut keys: Vec<K> = keys.into_iter().collect();
    keys.sort_by(|a, b| b.cmp(a));
    keys
}

pub fn round_hours(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders an hour amount with at most two decimals and no trailing zeros
/// (`20`, `2.5`, `3.99`). Aggregated sums go through here too, which hides
/// floating point drift from repeated addition.
pub fn format_hours(value: f64) -> String {
    let fixed = format!("{:.2}", round_hours(value));
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Renders an entered number exactly as stored (`10`, `2.5`, `1.333`).
/// Used for the inputs of a calculation so `3 × 1.333 = 4` reads correctly;
/// computed totals go through [`format_hours`] instead.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
