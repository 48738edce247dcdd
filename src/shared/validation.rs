//! Field rules shared by the todo request schemas.
//!
//! Every check reports the first offending field; the request types call
//! these in declaration order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::{todo_priority::TodoPriority, todo_status::TodoStatus};

pub const TITLE_MIN_CHARS: usize = 1;
pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

// Offset-less forms. Anything without an explicit offset is read as UTC.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    Missing,
    TooShort { min: usize },
    TooLong { max: usize },
    NotAMember { value: String, expected: &'static [&'static str] },
    Unparseable { value: String },
    InPast,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::Missing => write!(f, "field required"),
            ValidationReason::TooShort { min } => write!(f, "must be at least {min} characters"),
            ValidationReason::TooLong { max } => write!(f, "must be at most {max} characters"),
            ValidationReason::NotAMember { value, expected } => {
                write!(f, "'{value}' is not one of {}", expected.join(", "))
            }
            ValidationReason::Unparseable { value } => write!(f, "'{value}' is not a valid datetime"),
            ValidationReason::InPast => write!(f, "due_date cannot be in the past"),
        }
    }
}

/// Length in characters, not bytes.
pub fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::new(field, ValidationReason::TooShort { min }));
    }
    if len > max {
        return Err(ValidationError::new(field, ValidationReason::TooLong { max }));
    }
    Ok(())
}

pub fn parse_status(raw: &str) -> Result<TodoStatus, ValidationError> {
    TodoStatus::from_name(raw).ok_or_else(|| {
        ValidationError::new(
            "status",
            ValidationReason::NotAMember { value: raw.to_string(), expected: TodoStatus::NAMES },
        )
    })
}

pub fn parse_priority(raw: &str) -> Result<TodoPriority, ValidationError> {
    TodoPriority::from_name(raw).ok_or_else(|| {
        ValidationError::new(
            "priority",
            ValidationReason::NotAMember { value: raw.to_string(), expected: TodoPriority::NAMES },
        )
    })
}

/// Parse a due date, normalising to UTC.
///
/// Accepts RFC 3339, naive date-times and bare dates (midnight).
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A due date equal to `now` is accepted; only strictly earlier ones fail.
pub fn check_due_date(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
    let due = parse_due_date(raw).ok_or_else(|| {
        ValidationError::new("due_date", ValidationReason::Unparseable { value: raw.to_string() })
    })?;
    if due < now {
        return Err(ValidationError::new("due_date", ValidationReason::InPast));
    }
    Ok(due)
}
