use thiserror::Error;

/// Reasons a submitted form is rejected. Each maps to one input rule.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Activity is required")]
    MissingActivity,
    #[error("Activity is {len} characters long (max {max})")]
    ActivityTooLong { len: usize, max: usize },
    #[error("Date is required")]
    MissingDate,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Participant count must be a whole number of at least 1, got '{0}'")]
    InvalidParticipantCount(String),
    #[error("Hours per participant must be a number of at least 0.25, got '{0}'")]
    InvalidHours(String),
}
