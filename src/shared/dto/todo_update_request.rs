use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::{
    todo_priority::TodoPriority,
    todo_status::TodoStatus,
    validation::{
        check_due_date, check_length, parse_priority, parse_status, ValidationError,
        DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
    },
};

/// Partial update as it arrives on the wire.
///
/// An absent field is left unchanged. For the nullable fields
/// (`description`, `due_date`) an explicit `null` clears the value; for the
/// rest `null` is the same as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoUpdateRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<String>>,
}

/// `Some(None)` clears the stored value, `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

// Only called when the key is present, so a `null` becomes `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TodoUpdateRequest {
    pub fn validate(self, now: DateTime<Utc>) -> Result<TodoUpdate, ValidationError> {
        if let Some(title) = &self.title {
            check_length("title", title, TITLE_MIN_CHARS, TITLE_MAX_CHARS)?;
        }
        if let Some(Some(description)) = &self.description {
            check_length("description", description, 0, DESCRIPTION_MAX_CHARS)?;
        }

        let status = self.status.as_deref().map(parse_status).transpose()?;
        let priority = self.priority.as_deref().map(parse_priority).transpose()?;
        let due_date = match self.due_date {
            Some(Some(raw)) => Some(Some(check_due_date(&raw, now)?)),
            Some(None) => Some(None),
            None => None,
        };

        Ok(TodoUpdate {
            title: self.title,
            description: self.description,
            status,
            priority,
            due_date,
        })
    }
}

impl TodoUpdate {
    pub fn is_empty(&self) -> bool {
        *self == TodoUpdate::default()
    }
}
