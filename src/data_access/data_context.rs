use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::{
    todo::Todo, todo_create_request::TodoCreate, todo_list_query::TodoListQuery,
    todo_update_request::TodoUpdate,
};

const TODOS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("todos");
const TODO_META: TableDefinition<&str, u64> = TableDefinition::new("todo_meta");

const NEXT_TODO_ID: &str = "next_todo_id";
const FIRST_TODO_ID: u64 = 1;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("redb: {0}")]
    Redb(#[from] redb::Error),
    #[error("codec: {0}")]
    Codec(#[from] serde_json::Error),
}

// redb 2.x has many error types. Funnel them all through redb::Error.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for DataError {
            fn from(e: $t) -> Self { DataError::Redb(e.into()) }
        })*
    };
}

from_redb!(
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);

/// Row storage for todos. Cloneable (Arc inside).
#[derive(Clone)]
pub struct DataContext {
    db: Arc<Database>,
}

impl DataContext {
    /// Open (or create) the database file and make sure the tables exist.
    pub fn new(path: &str) -> Result<Self, DataError> {
        let db = Database::create(path)?;
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TODOS_TABLE)?;
            let _ = write_txn.open_table(TODO_META)?;
        }
        write_txn.commit()?;
        Ok(DataContext { db: Arc::new(db) })
    }

    /// Store a validated todo under a fresh id. Ids are never reused, even
    /// after the highest one is deleted.
    pub fn create_todo(&self, request: TodoCreate, now: DateTime<Utc>) -> Result<Todo, DataError> {
        let write_txn = self.db.begin_write()?;
        let todo;
        {
            let mut meta = write_txn.open_table(TODO_META)?;
            let id = meta.get(NEXT_TODO_ID)?.map(|v| v.value()).unwrap_or(FIRST_TODO_ID);
            meta.insert(NEXT_TODO_ID, id + 1)?;

            todo = Todo::new(id, request, now);
            let mut todos = write_txn.open_table(TODOS_TABLE)?;
            let bytes = serde_json::to_vec(&todo)?;
            todos.insert(todo.id, bytes.as_slice())?;
        }
        write_txn.commit()?;
        debug!(id = todo.id, "todo created");
        Ok(todo)
    }

    pub fn get_todo(&self, id: u64) -> Result<Option<Todo>, DataError> {
        let read_txn = self.db.begin_read()?;
        let todos = read_txn.open_table(TODOS_TABLE)?;
        match todos.get(id)? {
            Some(data) => Ok(Some(serde_json::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    /// Todos matching the query's filters, ordered by id, then paged.
    pub fn list_todos(&self, query: &TodoListQuery) -> Result<Vec<Todo>, DataError> {
        let read_txn = self.db.begin_read()?;
        let todos_table = read_txn.open_table(TODOS_TABLE)?;

        let mut todos = Vec::new();
        let mut skipped = 0;
        for entry in todos_table.iter()? {
            if todos.len() >= query.limit {
                break;
            }
            let (_, value) = entry?;
            let todo: Todo = serde_json::from_slice(value.value())?;
            if query.status.is_some_and(|s| s != todo.status)
                || query.priority.is_some_and(|p| p != todo.priority)
            {
                continue;
            }
            if skipped < query.skip {
                skipped += 1;
                continue;
            }
            todos.push(todo);
        }
        Ok(todos)
    }

    /// Apply a validated partial update. `Ok(None)` when no such todo.
    pub fn update_todo(
        &self,
        id: u64,
        request: TodoUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Todo>, DataError> {
        let write_txn = self.db.begin_write()?;
        let edited;
        {
            let mut todos = write_txn.open_table(TODOS_TABLE)?;
            let current: Todo = match todos.get(id)? {
                Some(data) => serde_json::from_slice(data.value())?,
                None => return Ok(None),
            };
            edited = current.edit(request, now);
            let bytes = serde_json::to_vec(&edited)?;
            todos.insert(id, bytes.as_slice())?;
        }
        write_txn.commit()?;
        debug!(id, "todo updated");
        Ok(Some(edited))
    }

    /// Hard delete. Returns whether a row was removed.
    pub fn delete_todo(&self, id: u64) -> Result<bool, DataError> {
        let write_txn = self.db.begin_write()?;
        let deleted;
        {
            let mut todos = write_txn.open_table(TODOS_TABLE)?;
            deleted = todos.remove(id)?.is_some();
        }
        write_txn.commit()?;
        debug!(id, deleted, "todo delete");
        Ok(deleted)
    }
}
