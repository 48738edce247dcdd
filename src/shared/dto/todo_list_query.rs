use serde::Deserialize;

use crate::{todo_priority::TodoPriority, todo_status::TodoStatus};

pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Query string for `GET /todos`.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoListQuery {
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for TodoListQuery {
    fn default() -> Self {
        Self {
            status: None,
            priority: None,
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}
