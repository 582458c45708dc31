use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;
use volunteer_hours_core::render::EMPTY_PLACEHOLDER;
use volunteer_hours_core::{EntryRepository, MessageKind, SummaryLine};

use crate::tui::app::{App, FormField};

pub fn draw<R: EntryRepository>(f: &mut Frame, app: &mut App<R>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Form
            Constraint::Length(3), // Message
            Constraint::Min(5),    // Entries + totals
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("VOLUNTEER HOURS")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    draw_form(f, app, main_chunks[1]);
    draw_message(f, app, main_chunks[2]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[3]);

    draw_entries(f, app, content_chunks[0]);

    let totals_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(content_chunks[1]);
    let view = app.tracker.view();
    draw_totals(f, " Running Total by Month ", &view.month_totals, totals_chunks[0]);
    draw_totals(f, " Running Total by Year ", &view.year_totals, totals_chunks[1]);

    let footer = Paragraph::new("Tab/↑↓: Field | Enter: Add Entry | Ctrl-X: Clear Saved Entries | PgUp/PgDn: Scroll | Esc: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[4]);
}

fn draw_form<R: EntryRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);
    let mut cells = Vec::with_capacity(FormField::ALL.len());
    for row in rows.iter() {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        cells.extend(halves.iter().copied());
    }

    let form = app.tracker.form();
    for (field, cell) in FormField::ALL.into_iter().zip(cells) {
        let focused = field == app.focus;
        let value = field.value(form);
        let text = if value.is_empty() {
            Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value)
        };
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let input = Paragraph::new(Line::from(text)).block(
            Block::default()
                .title(format!(" {} ", field.label()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style),
        );
        f.render_widget(input, cell);

        if focused {
            let before_cursor: String = value.chars().take(app.cursor_position).collect();
            let x = cell.x + 1 + before_cursor.width() as u16;
            f.set_cursor_position((x.min(cell.right().saturating_sub(2)), cell.y + 1));
        }
    }
}

fn draw_message<R: EntryRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let (text, style) = match app.tracker.message() {
        Some(message) => {
            let color = match message.kind {
                MessageKind::Success => Color::Green,
                MessageKind::Error => Color::Red,
            };
            (message.text.as_str(), Style::default().fg(color))
        }
        None => (
            "Total service hours are calculated automatically: Arrowmen × Hours Worked.",
            Style::default().fg(Color::DarkGray),
        ),
    };

    let message = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(message, area);
}

fn draw_entries<R: EntryRepository>(f: &mut Frame, app: &mut App<R>, area: Rect) {
    let view = app.tracker.view();
    let rows: Vec<Row> = if view.rows.is_empty() {
        vec![Row::new(vec![Cell::from(EMPTY_PLACEHOLDER)])]
    } else {
        view.rows
            .iter()
            .map(|row| {
                Row::new(vec![
                    Cell::from(row.date.clone()),
                    Cell::from(row.activity.clone()),
                    Cell::from(row.participant_count.clone()),
                    Cell::from(row.hours_per_participant.clone()),
                    Cell::from(Span::styled(row.total_hours.clone(), Style::default().add_modifier(Modifier::BOLD))),
                ])
            })
            .collect()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(13), // Date
            Constraint::Min(12),    // Activity
            Constraint::Length(9),  // Arrowmen
            Constraint::Length(9),  // Hours / Arrowman
            Constraint::Length(11), // Total
        ],
    )
    .header(
        Row::new(vec!["Date", "Activity", "Arrowmen", "Hrs/Each", "Total Hours"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(Block::default().title(" Entries ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_totals(f: &mut Frame, title: &str, lines: &[SummaryLine], area: Rect) {
    let text: Vec<Line> = if lines.is_empty() {
        vec![Line::from(EMPTY_PLACEHOLDER)]
    } else {
        lines
            .iter()
            .map(|line| {
                Line::from(vec![
                    Span::styled(format!("{}:", line.label), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!(" {} hrs", line.hours_display())),
                ])
            })
            .collect()
    };

    let totals = Paragraph::new(text)
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(totals, area);
}
