use serde::Serialize;

use crate::format::format_hours;

/// One row of the entries table, already formatted for display.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TableRow {
    pub iso_date: String,
    pub date: String,
    pub activity: String,
    pub participant_count: String,
    pub hours_per_participant: String,
    pub total_hours: String,
}

/// One line of a month or year running total.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub key: String,
    pub label: String,
    pub hours: f64,
}

impl SummaryLine {
    pub fn hours_display(&self) -> String {
        format_hours(self.hours)
    }

    /// `March 2024: 26 hrs`
    pub fn display(&self) -> String {
        format!("{}: {} hrs", self.label, self.hours_display())
    }
}

/// Everything the widget shows for one snapshot of the entry list.
///
/// Empty collections mean the placeholder is shown in their place.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct TrackerView {
    pub rows: Vec<TableRow>,
    pub month_totals: Vec<SummaryLine>,
    pub year_totals: Vec<SummaryLine>,
}

impl TrackerView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Outcome of the last form action, shown inline under the form.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Error, text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}
