use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{todo::Todo, todo_priority::TodoPriority, todo_status::TodoStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoOut {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoOut {
    fn from(todo: Todo) -> Self {
        TodoOut {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            status: todo.status,
            priority: todo.priority,
            due_date: todo.due_date,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}
