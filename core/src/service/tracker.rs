use tracing::{debug, error, info};

use crate::error::ValidationError;
use crate::format::{format_date, format_hours, format_number};
use crate::input::FormInput;
use crate::model::entry::Entry;
use crate::model::summary::Summary;
use crate::render::{build_view, widget_markup};
use crate::repository::EntryRepository;
use crate::service::dto::{Message, TrackerView};

pub const INVALID_INPUT_MESSAGE: &str = "Please provide valid values for all fields.";
pub const CLEARED_MESSAGE: &str = "All saved entries have been cleared.";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The entry was appended. `persisted` is false when the save failed;
    /// the entry still lives in memory for this session.
    Added { entry: Entry, persisted: bool },
    /// Nothing changed; the form keeps its values.
    Rejected(ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOutcome {
    pub removed: usize,
    pub persisted: bool,
}

/// The volunteer hours widget for one container: owns its entry list, the
/// raw form values and the last rendered view.
pub struct VolunteerHoursTracker<R: EntryRepository> {
    repo: R,
    entries: Vec<Entry>,
    form: FormInput,
    message: Option<Message>,
    view: TrackerView,
}

impl<R: EntryRepository> VolunteerHoursTracker<R> {
    /// Loads the persisted entries and renders them.
    pub fn new(repo: R) -> Self {
        let entries = repo.load();
        info!(count = entries.len(), "volunteer hours tracker initialized");

        let mut tracker = Self {
            repo,
            entries,
            form: FormInput::default(),
            message: None,
            view: TrackerView::default(),
        };
        tracker.render();
        tracker
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormInput {
        &mut self.form
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn view(&self) -> &TrackerView {
        &self.view
    }

    pub fn summary(&self) -> Summary {
        Summary::from_entries(&self.entries)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Replaces the form values and submits them.
    pub fn submit_input(&mut self, input: FormInput) -> SubmitOutcome {
        self.form = input;
        self.submit()
    }

    /// Validates the current form values and, when they are valid, appends
    /// the new entry, saves the list, resets the form and re-renders.
    pub fn submit(&mut self) -> SubmitOutcome {
        let entry = match self.form.parse() {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "rejected form submission");
                self.message = Some(Message::error(INVALID_INPUT_MESSAGE));
                return SubmitOutcome::Rejected(e);
            }
        };

        self.entries.push(entry.clone());
        let summary_text = format!(
            "{} ({}) = {} × {} = {} hours",
            entry.activity(),
            format_date(entry.date()),
            format_number(entry.participant_count()),
            format_number(entry.hours_per_participant()),
            format_hours(entry.total_hours()),
        );

        let persisted = match self.repo.save(&self.entries) {
            Ok(()) => {
                info!(activity = entry.activity(), date = %entry.date(), total_hours = entry.total_hours(), "entry added");
                self.message = Some(Message::success(format!("Entry added: {}.", summary_text)));
                true
            }
            Err(e) => {
                error!(error = %e, "could not save entries after adding one");
                self.message = Some(Message::error(format!(
                    "Entry added: {}, but it could not be saved: {}",
                    summary_text, e
                )));
                false
            }
        };

        self.form.reset();
        self.render();
        SubmitOutcome::Added { entry, persisted }
    }

    /// Drops every entry, in memory and in storage. No confirmation.
    pub fn clear(&mut self) -> ClearOutcome {
        let removed = self.entries.len();
        self.entries.clear();

        let persisted = match self.repo.save(&self.entries) {
            Ok(()) => {
                info!(removed, "cleared all entries");
                self.message = Some(Message::success(CLEARED_MESSAGE));
                true
            }
            Err(e) => {
                error!(error = %e, "could not save cleared entry list");
                self.message = Some(Message::error(format!(
                    "Entries were cleared for this session, but storage could not be updated: {}",
                    e
                )));
                false
            }
        };

        self.render();
        ClearOutcome { removed, persisted }
    }

    /// Recomputes the view from the current entries.
    pub fn render(&mut self) {
        let summary = Summary::from_entries(&self.entries);
        self.view = build_view(&self.entries, &summary);
    }

    /// HTML for the whole widget in its current state.
    pub fn markup(&self) -> String {
        widget_markup(&self.view, &self.form, self.message.as_ref()).into_string()
    }
}
