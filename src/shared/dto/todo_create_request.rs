use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    todo_priority::TodoPriority,
    todo_status::TodoStatus,
    validation::{
        check_due_date, check_length, parse_priority, parse_status, ValidationError,
        ValidationReason, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
    },
};

/// Creation payload as it arrives on the wire. Nothing here is trusted yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoCreateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

/// A creation payload that passed every field rule.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoCreate {
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub due_date: Option<DateTime<Utc>>,
}

impl TodoCreateRequest {
    pub fn validate(self, now: DateTime<Utc>) -> Result<TodoCreate, ValidationError> {
        let title = self
            .title
            .ok_or_else(|| ValidationError::new("title", ValidationReason::Missing))?;
        check_length("title", &title, TITLE_MIN_CHARS, TITLE_MAX_CHARS)?;

        if let Some(description) = &self.description {
            check_length("description", description, 0, DESCRIPTION_MAX_CHARS)?;
        }

        let status = match self.status.as_deref() {
            Some(raw) => parse_status(raw)?,
            None => TodoStatus::default(),
        };
        let priority = match self.priority.as_deref() {
            Some(raw) => parse_priority(raw)?,
            None => TodoPriority::default(),
        };
        let due_date = match self.due_date.as_deref() {
            Some(raw) => Some(check_due_date(raw, now)?),
            None => None,
        };

        Ok(TodoCreate {
            title,
            description: self.description,
            status,
            priority,
            due_date,
        })
    }
}
