use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    todo_create_request::TodoCreate, todo_out::TodoOut, todo_priority::TodoPriority,
    todo_status::TodoStatus, todo_update_request::TodoUpdate,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(id: u64, request: TodoCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: request.title,
            description: request.description,
            status: request.status,
            priority: request.priority,
            due_date: request.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. A `Some(None)` description or due date clears
    /// it. `updated_at` never moves backwards, even if the caller's clock does.
    pub fn edit(self, request: TodoUpdate, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            title: request.title.unwrap_or(self.title),
            description: request.description.unwrap_or(self.description),
            status: request.status.unwrap_or(self.status),
            priority: request.priority.unwrap_or(self.priority),
            due_date: request.due_date.unwrap_or(self.due_date),
            created_at: self.created_at,
            updated_at: now.max(self.updated_at),
        }
    }

    pub fn to_out_dto(&self) -> TodoOut {
        TodoOut::from(self.clone())
    }
}
