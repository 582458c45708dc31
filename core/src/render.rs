use maud::{html, Markup};

use crate::format::{format_date, format_hours, format_number, month_label};
use crate::input::FormInput;
use crate::model::entry::{Entry, MAX_ACTIVITY_LEN};
use crate::model::summary::Summary;
use crate::service::dto::{Message, MessageKind, SummaryLine, TableRow, TrackerView};

pub const EMPTY_PLACEHOLDER: &str = "No entries yet.";
const TABLE_COLUMNS: u32 = 5;

/// Newest date first. The sort is stable, so same-day entries keep their
/// insertion order. The input slice is left untouched.
pub fn sort_for_display(entries: &[Entry]) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date().cmp(&a.date()));
    sorted
}

pub fn table_rows(entries: &[Entry]) -> Vec<TableRow> {
    sort_for_display(entries)
        .into_iter()
        .map(|entry| TableRow {
            iso_date: entry.date().format("%Y-%m-%d").to_string(),
            date: format_date(entry.date()),
            activity: entry.activity().to_string(),
            participant_count: format_number(entry.participant_count()),
            hours_per_participant: format_number(entry.hours_per_participant()),
            total_hours: format_hours(entry.total_hours()),
        })
        .collect()
}

pub fn month_lines(summary: &Summary) -> Vec<SummaryLine> {
    summary
        .months_descending()
        .into_iter()
        .map(|(key, hours)| SummaryLine {
            key: key.to_string(),
            label: month_label(key),
            hours,
        })
        .collect()
}

pub fn year_lines(summary: &Summary) -> Vec<SummaryLine> {
    summary
        .years_descending()
        .into_iter()
        .map(|(key, hours)| SummaryLine {
            key: key.to_string(),
            label: key.to_string(),
            hours,
        })
        .collect()
}

pub fn build_view(entries: &[Entry], summary: &Summary) -> TrackerView {
    TrackerView {
        rows: table_rows(entries),
        month_totals: month_lines(summary),
        year_totals: year_lines(summary),
    }
}

pub fn entries_body(view: &TrackerView) -> Markup {
    html! {
        tbody id="entries-body" {
            @if view.rows.is_empty() {
                tr { td colspan=(TABLE_COLUMNS) { (EMPTY_PLACEHOLDER) } }
            } @else {
                @for row in &view.rows {
                    tr {
                        td { (row.date) }
                        td { (row.activity) }
                        td { (row.participant_count) }
                        td { (row.hours_per_participant) }
                        td { strong { (row.total_hours) } }
                    }
                }
            }
        }
    }
}

pub fn summary_list(id: &str, lines: &[SummaryLine]) -> Markup {
    html! {
        ul id=(id) class="total-list" {
            @if lines.is_empty() {
                li { (EMPTY_PLACEHOLDER) }
            } @else {
                @for line in lines {
                    li { strong { (line.label) ":" } " " (format_hours(line.hours)) " hrs" }
                }
            }
        }
    }
}

fn message_region(message: Option<&Message>) -> Markup {
    match message {
        Some(message) => {
            let class = match message.kind {
                MessageKind::Success => "message success",
                MessageKind::Error => "message error",
            };
            html! { div id="form-message" class=(class) role="status" { (message.text) } }
        }
        None => html! { div id="form-message" class="message" hidden {} },
    }
}

/// The whole widget: entry form, message region, entries table and the
/// month and year running totals.
pub fn widget_markup(view: &TrackerView, form: &FormInput, message: Option<&Message>) -> Markup {
    html! {
        section class="tracker" aria-label="Volunteer hours tracker" {
            form id="hours-form" {
                div class="grid" {
                    div class="field" {
                        label for="event" { "Event / Activity" }
                        input id="event" name="event" type="text" required maxlength=(MAX_ACTIVITY_LEN)
                            placeholder="Camp cleanup" value=(form.activity);
                    }
                    div class="field" {
                        label for="date" { "Date" }
                        input id="date" name="date" type="date" required value=(form.date);
                    }
                    div class="field" {
                        label for="arrowmen" { "Arrowmen Present" }
                        input id="arrowmen" name="arrowmen" type="number" required min="1" step="1"
                            placeholder="10" value=(form.participants);
                    }
                    div class="field" {
                        label for="hours" { "Hours Worked (per Arrowman)" }
                        input id="hours" name="hours" type="number" required min="0.25" step="0.25"
                            placeholder="2" value=(form.hours);
                    }
                    div class="field" {
                        button type="submit" { "Add Entry" }
                    }
                }
                p class="inline-note" { "Total service hours are calculated automatically: Arrowmen × Hours Worked." }
                p class="inline-note" { "Entries are saved locally and reloaded automatically." }
                div class="action-row" {
                    button id="clear-entries" type="button" class="secondary" { "Clear Saved Entries" }
                }
                (message_region(message))
            }

            div class="table-wrap" {
                table {
                    thead {
                        tr {
                            th { "Date" }
                            th { "Activity" }
                            th { "Arrowmen" }
                            th { "Hours / Arrowman" }
                            th { "Total Hours" }
                        }
                    }
                    (entries_body(view))
                }
            }

            section class="totals" aria-label="Running totals" {
                div class="total-card" {
                    h3 { "Running Total by Month" }
                    (summary_list("month-totals", &view.month_totals))
                }
                div class="total-card" {
                    h3 { "Running Total by Year" }
                    (summary_list("year-totals", &view.year_totals))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(activity: &str, date: &str, participants: u32, hours: f64) -> Entry {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Entry::new(activity, date, participants, hours).unwrap()
    }

    fn view_of(entries: &[Entry]) -> TrackerView {
        build_view(entries, &Summary::from_entries(entries))
    }

    #[test]
    fn test_empty_view_shows_placeholders() {
        let view = view_of(&[]);
        assert!(view.is_empty());

        let body = entries_body(&view).into_string();
        assert_eq!(body, r#"<tbody id="entries-body"><tr><td colspan="5">No entries yet.</td></tr></tbody>"#);

        let months = summary_list("month-totals", &view.month_totals).into_string();
        assert_eq!(months, r#"<ul id="month-totals" class="total-list"><li>No entries yet.</li></ul>"#);
        let years = summary_list("year-totals", &view.year_totals).into_string();
        assert!(years.contains("<li>No entries yet.</li>"));
    }

    #[test]
    fn test_rows_sorted_by_date_descending() {
        let entries = vec![
            entry("A", "2023-01-15", 1, 1.0),
            entry("B", "2024-03-01", 1, 1.0),
            entry("C", "2023-12-25", 1, 1.0),
        ];
        let view = view_of(&entries);

        let dates: Vec<&str> = view.rows.iter().map(|r| r.iso_date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2023-12-25", "2023-01-15"]);
        let years: Vec<&str> = view.year_totals.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(years, vec!["2024", "2023"]);

        // Storage order is untouched.
        assert_eq!(entries[0].activity(), "A");
    }

    #[test]
    fn test_same_day_entries_keep_insertion_order() {
        let entries = vec![
            entry("First", "2024-03-01", 1, 1.0),
            entry("Second", "2024-03-01", 1, 1.0),
        ];
        let names: Vec<String> = table_rows(&entries).into_iter().map(|r| r.activity).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_row_formatting() {
        let view = view_of(&[entry("Trail work", "2024-03-05", 3, 1.33)]);
        let row = &view.rows[0];
        assert_eq!(row.date, "Mar 5, 2024");
        assert_eq!(row.hours_per_participant, "1.33");
        assert_eq!(row.total_hours, "3.99");

        let body = entries_body(&view).into_string();
        assert!(body.contains("<td>Mar 5, 2024</td><td>Trail work</td><td>3</td><td>1.33</td><td><strong>3.99</strong></td>"));
    }

    #[test]
    fn test_summary_labels() {
        let entries = vec![
            entry("A", "2024-03-01", 10, 2.0),
            entry("B", "2024-03-20", 1, 0.25),
            entry("C", "2023-12-25", 2, 1.0),
        ];
        let view = view_of(&entries);

        let months: Vec<String> = view.month_totals.iter().map(|l| l.display()).collect();
        assert_eq!(months, vec!["March 2024: 20.25 hrs", "December 2023: 2 hrs"]);
        let years: Vec<String> = view.year_totals.iter().map(|l| l.display()).collect();
        assert_eq!(years, vec!["2024: 20.25 hrs", "2023: 2 hrs"]);

        let html = summary_list("month-totals", &view.month_totals).into_string();
        assert!(html.contains("<li><strong>March 2024:</strong> 20.25 hrs</li>"));
    }

    #[test]
    fn test_markup_escapes_activity() {
        let view = view_of(&[entry("<script>alert(1)</script>", "2024-03-01", 1, 1.0)]);
        let html = widget_markup(&view, &FormInput::default(), None).into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_message_region() {
        let view = view_of(&[]);
        let hidden = widget_markup(&view, &FormInput::default(), None).into_string();
        assert!(hidden.contains(r#"<div id="form-message" class="message" hidden></div>"#));

        let shown = widget_markup(&view, &FormInput::default(), Some(&Message::error("Nope"))).into_string();
        assert!(shown.contains(r#"class="message error""#));
        assert!(shown.contains(">Nope</div>"));
    }

    #[test]
    fn test_form_keeps_typed_values() {
        let form = FormInput::new("Camp cleanup", "2024-03-05", "0", "2");
        let html = widget_markup(&view_of(&[]), &form, None).into_string();
        assert!(html.contains(r#"value="Camp cleanup""#));
        assert!(html.contains(r#"maxlength="120""#));
    }
}
