use ratatui::widgets::TableState;
use volunteer_hours_core::{EntryRepository, FormInput, SubmitOutcome, VolunteerHoursTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Activity,
    Date,
    Participants,
    Hours,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Activity,
        FormField::Date,
        FormField::Participants,
        FormField::Hours,
    ];

    pub fn next(self) -> Self {
        match self {
            FormField::Activity => FormField::Date,
            FormField::Date => FormField::Participants,
            FormField::Participants => FormField::Hours,
            FormField::Hours => FormField::Activity,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Activity => FormField::Hours,
            FormField::Date => FormField::Activity,
            FormField::Participants => FormField::Date,
            FormField::Hours => FormField::Participants,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Activity => "Event / Activity",
            FormField::Date => "Date (YYYY-MM-DD)",
            FormField::Participants => "Arrowmen Present",
            FormField::Hours => "Hours Worked (per Arrowman)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Activity => "Camp cleanup",
            FormField::Date => "2024-03-05",
            FormField::Participants => "10",
            FormField::Hours => "2",
        }
    }

    pub fn value(self, form: &FormInput) -> &str {
        match self {
            FormField::Activity => &form.activity,
            FormField::Date => &form.date,
            FormField::Participants => &form.participants,
            FormField::Hours => &form.hours,
        }
    }

    fn value_mut(self, form: &mut FormInput) -> &mut String {
        match self {
            FormField::Activity => &mut form.activity,
            FormField::Date => &mut form.date,
            FormField::Participants => &mut form.participants,
            FormField::Hours => &mut form.hours,
        }
    }
}

pub struct App<R: EntryRepository> {
    pub tracker: VolunteerHoursTracker<R>,
    pub focus: FormField,
    pub cursor_position: usize,
    pub table_state: TableState,
}

impl<R: EntryRepository> App<R> {
    pub fn new(repo: R) -> App<R> {
        let tracker = VolunteerHoursTracker::new(repo);
        let mut table_state = TableState::default();
        if !tracker.view().rows.is_empty() {
            table_state.select(Some(0));
        }
        App {
            tracker,
            focus: FormField::Activity,
            cursor_position: 0,
            table_state,
        }
    }

    pub fn focused_value(&self) -> &str {
        self.focus.value(self.tracker.form())
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
        self.cursor_position = self.focused_value().chars().count();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
        self.cursor_position = self.focused_value().chars().count();
    }

    pub fn input_char(&mut self, c: char) {
        let cursor = self.cursor_position;
        let value = self.focus.value_mut(self.tracker.form_mut());
        let byte_index = value.chars().take(cursor).map(|c| c.len_utf8()).sum();
        value.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor = self.cursor_position;
            let value = self.focus.value_mut(self.tracker.form_mut());
            let byte_index: usize = value.chars().take(cursor - 1).map(|c| c.len_utf8()).sum();
            value.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.focused_value().chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit(&mut self) {
        if let SubmitOutcome::Added { .. } = self.tracker.submit() {
            self.focus = FormField::Activity;
            self.cursor_position = 0;
            self.table_state.select(Some(0));
        }
    }

    pub fn clear_all(&mut self) {
        self.tracker.clear();
        self.table_state.select(None);
    }

    pub fn next_row(&mut self) {
        let len = self.tracker.view().rows.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.tracker.view().rows.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }
}
