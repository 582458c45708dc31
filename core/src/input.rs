use std::collections::HashMap;
use anyhow::{anyhow, Result};

use crate::error::ValidationError;
use crate::format::parse_iso_date;
use crate::model::entry::Entry;

/// Keys accepted by [`FormInput::from_args`]. Any unambiguous prefix works.
pub const FIELD_KEYS: [&str; 3] = ["date", "participants", "hours"];

/// Raw, unvalidated values of the entry form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub activity: String,
    pub date: String,
    pub participants: String,
    pub hours: String,
}

impl FormInput {
    pub fn new(activity: &str, date: &str, participants: &str, hours: &str) -> Self {
        Self {
            activity: activity.to_string(),
            date: date.to_string(),
            participants: participants.to_string(),
            hours: hours.to_string(),
        }
    }

    /// Builds form input from command line words: free words form the
    /// activity, `key:value` words fill the other fields.
    ///
    /// `Camp cleanup date:2024-03-05 p:10 h:2`
    pub fn from_args(args: &[String]) -> Result<Self> {
        let parsed = parse_args(args);
        let mut form = FormInput {
            activity: parsed.name,
            ..Default::default()
        };

        for (key, value) in parsed.metadata {
            match expand_key(&key, &FIELD_KEYS)?.as_str() {
                "date" => form.date = value,
                "participants" => form.participants = value,
                "hours" => form.hours = value,
                _ => unreachable!("expand_key only returns known keys"),
            }
        }

        Ok(form)
    }

    /// Validates the raw values and creates the entry, computing its total.
    pub fn parse(&self) -> Result<Entry, ValidationError> {
        if self.activity.trim().is_empty() {
            return Err(ValidationError::MissingActivity);
        }
        let raw_date = self.date.trim();
        if raw_date.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        let date = parse_iso_date(raw_date)
            .ok_or_else(|| ValidationError::InvalidDate(raw_date.to_string()))?;

        let participants = parse_number(&self.participants);
        if !participants.is_finite()
            || participants <= 0.0
            || participants.fract() != 0.0
            || participants > u32::MAX as f64
        {
            return Err(ValidationError::InvalidParticipantCount(self.participants.trim().to_string()));
        }

        let hours = parse_number(&self.hours);
        if !hours.is_finite() || hours <= 0.0 {
            return Err(ValidationError::InvalidHours(self.hours.trim().to_string()));
        }

        Entry::new(&self.activity, date, participants as u32, hours)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        self.activity.is_empty() && self.date.is_empty() && self.participants.is_empty() && self.hours.is_empty()
    }
}

/// Empty input reads as zero and anything unparsable as NaN, so both fall
/// through to the range checks.
fn parse_number(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    raw.parse::<f64>().unwrap_or(f64::NAN)
}

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && !key.contains(char::is_whitespace) {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        name_parts.push(arg.as_str());
    }

    ParsedInput {
        name: name_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &[&str]) -> Vec<String> {
        s.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_valid_form() {
        let entry = FormInput::new("Camp cleanup", "2024-03-05", "10", "2").parse().unwrap();
        assert_eq!(entry.activity(), "Camp cleanup");
        assert_eq!(entry.participant_count(), 10.0);
        assert_eq!(entry.hours_per_participant(), 2.0);
        assert_eq!(entry.total_hours(), 20.0);
    }

    #[test]
    fn test_boundary_values() {
        assert!(FormInput::new("x", "2024-03-05", "1", "0.25").parse().is_ok());
        assert!(matches!(
            FormInput::new("x", "2024-03-05", "0", "1").parse(),
            Err(ValidationError::InvalidParticipantCount(_))
        ));
        assert!(matches!(
            FormInput::new("x", "2024-03-05", "1", "0").parse(),
            Err(ValidationError::InvalidHours(_))
        ));
        assert!(matches!(
            FormInput::new("x", "2024-03-05", "1", "0.1").parse(),
            Err(ValidationError::InvalidHours(_))
        ));
    }

    #[test]
    fn test_non_numeric_input_is_rejected() {
        assert!(FormInput::new("x", "2024-03-05", "ten", "2").parse().is_err());
        assert!(FormInput::new("x", "2024-03-05", "10", "two").parse().is_err());
        assert!(FormInput::new("x", "2024-03-05", "NaN", "2").parse().is_err());
        assert!(FormInput::new("x", "2024-03-05", "10", "inf").parse().is_err());
        assert!(FormInput::new("x", "2024-03-05", "", "2").parse().is_err());
        assert!(FormInput::new("x", "2024-03-05", "-3", "2").parse().is_err());
        assert!(FormInput::new("x", "2024-03-05", "2.5", "2").parse().is_err());
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            FormInput::new("  ", "2024-03-05", "1", "1").parse(),
            Err(ValidationError::MissingActivity)
        );
        assert_eq!(
            FormInput::new("x", "", "1", "1").parse(),
            Err(ValidationError::MissingDate)
        );
        assert_eq!(
            FormInput::new("x", "March 5", "1", "1").parse(),
            Err(ValidationError::InvalidDate("March 5".to_string()))
        );
    }

    #[test]
    fn test_reset_clears_all_fields() {
        let mut form = FormInput::new("x", "2024-03-05", "1", "1");
        form.reset();
        assert!(form.is_blank());
    }

    #[test]
    fn test_from_args() {
        let form = FormInput::from_args(&words(&["Camp", "cleanup", "date:2024-03-05", "p:10", "hours:2"])).unwrap();
        assert_eq!(form, FormInput::new("Camp cleanup", "2024-03-05", "10", "2"));
    }

    #[test]
    fn test_from_args_rejects_unknown_key() {
        assert!(FormInput::from_args(&words(&["Cleanup", "project:Lodge"])).is_err());
    }

    #[test]
    fn test_expand_key() {
        assert_eq!(expand_key("d", &FIELD_KEYS).unwrap(), "date");
        assert_eq!(expand_key("part", &FIELD_KEYS).unwrap(), "participants");
        assert_eq!(expand_key("hours", &FIELD_KEYS).unwrap(), "hours");
        assert!(expand_key("x", &FIELD_KEYS).is_err());
        assert!(expand_key("", &FIELD_KEYS).is_err());
    }
}
