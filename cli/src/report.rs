use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use volunteer_hours_core::render::EMPTY_PLACEHOLDER;
use volunteer_hours_core::{SummaryLine, TrackerView};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Arrowmen")]
    participants: String,
    #[tabled(rename = "Hours / Arrowman")]
    hours: String,
    #[tabled(rename = "Total Hours")]
    total: String,
}

pub fn show_entries(view: &TrackerView) {
    if view.rows.is_empty() {
        println!("{}", EMPTY_PLACEHOLDER);
    } else {
        let rows: Vec<EntryRow> = view
            .rows
            .iter()
            .map(|row| EntryRow {
                date: row.date.clone(),
                activity: row.activity.clone(),
                participants: row.participant_count.clone(),
                hours: row.hours_per_participant.clone(),
                total: row.total_hours.clone(),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
        println!("{}", table);
    }

    show_totals("Running Total by Month", &view.month_totals);
    show_totals("Running Total by Year", &view.year_totals);
}

fn show_totals(title: &str, lines: &[SummaryLine]) {
    println!("\n\x1b[1;36m{}\x1b[0m", title);
    if lines.is_empty() {
        println!("  {}", EMPTY_PLACEHOLDER);
        return;
    }
    for line in lines {
        println!("  {}", line.display());
    }
}
