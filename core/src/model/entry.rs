use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ValidationError;
use crate::format::{month_key, round_hours, year_key};

pub const MAX_ACTIVITY_LEN: usize = 120;
pub const MIN_PARTICIPANTS: u32 = 1;
pub const MIN_HOURS_PER_PARTICIPANT: f64 = 0.25;

/// One logged volunteer session.
///
/// The serialized field names are the persisted layout (`event`, `date`,
/// `arrowmen`, `hours`, `totalHours`). `total_hours` is fixed when the entry
/// is created; entries are never edited afterwards.
///
/// New entries always have a whole participant count of at least 1, but the
/// count is held as a number so stored lists written by other tools (`10.0`,
/// `2.5`) load without losing elements.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    #[serde(rename = "event")]
    activity: String,
    date: NaiveDate,
    #[serde(rename = "arrowmen", serialize_with = "serialize_count")]
    participant_count: f64,
    #[serde(rename = "hours")]
    hours_per_participant: f64,
    #[serde(rename = "totalHours")]
    total_hours: f64,
}

impl Entry {
    pub fn new(
        activity: &str,
        date: NaiveDate,
        participant_count: u32,
        hours_per_participant: f64,
    ) -> Result<Self, ValidationError> {
        let activity = activity.trim();
        if activity.is_empty() {
            return Err(ValidationError::MissingActivity);
        }
        let len = activity.chars().count();
        if len > MAX_ACTIVITY_LEN {
            return Err(ValidationError::ActivityTooLong { len, max: MAX_ACTIVITY_LEN });
        }
        if participant_count < MIN_PARTICIPANTS {
            return Err(ValidationError::InvalidParticipantCount(participant_count.to_string()));
        }
        // NaN fails every comparison, so check it explicitly.
        if !hours_per_participant.is_finite() || hours_per_participant < MIN_HOURS_PER_PARTICIPANT {
            return Err(ValidationError::InvalidHours(hours_per_participant.to_string()));
        }

        Ok(Self {
            activity: activity.to_string(),
            date,
            participant_count: participant_count as f64,
            hours_per_participant,
            total_hours: round_hours(participant_count as f64 * hours_per_participant),
        })
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn participant_count(&self) -> f64 {
        self.participant_count
    }

    pub fn hours_per_participant(&self) -> f64 {
        self.hours_per_participant
    }

    pub fn total_hours(&self) -> f64 {
        self.total_hours
    }

    pub fn month_key(&self) -> String {
        month_key(self.date)
    }

    pub fn year_key(&self) -> String {
        year_key(self.date)
    }
}

/// Whole counts are written as JSON integers, matching the stored layout.
fn serialize_count<S: Serializer>(count: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if count.fract() == 0.0 && count.abs() <= i64::MAX as f64 {
        serializer.serialize_i64(*count as i64)
    } else {
        serializer.serialize_f64(*count)
    }
}
