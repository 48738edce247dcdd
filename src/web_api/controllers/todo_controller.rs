use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::{
    app_state::SharedState, todo_create_request::TodoCreateRequest,
    todo_list_query::TodoListQuery, todo_out::TodoOut, todo_update_request::TodoUpdateRequest,
    web_api::error::ApiError,
};

pub struct TodoController {}

impl TodoController {
    pub async fn add(
        State(state): State<SharedState>,
        body: Result<Json<TodoCreateRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<TodoOut>), ApiError> {
        let Json(body) = body?;
        let now = Utc::now();
        let request = body.validate(now)?;
        let todo = state.data_context.create_todo(request, now)?;
        info!(id = todo.id, status = %todo.status, priority = %todo.priority, "todo added");
        Ok((StatusCode::CREATED, Json(TodoOut::from(todo))))
    }

    pub async fn get_all(
        State(state): State<SharedState>,
        Query(query): Query<TodoListQuery>,
    ) -> Result<Json<Vec<TodoOut>>, ApiError> {
        let todos = state.data_context.list_todos(&query)?;
        Ok(Json(todos.into_iter().map(TodoOut::from).collect()))
    }

    pub async fn get(
        State(state): State<SharedState>,
        Path(id): Path<u64>,
    ) -> Result<Json<TodoOut>, ApiError> {
        match state.data_context.get_todo(id)? {
            Some(todo) => Ok(Json(todo.to_out_dto())),
            None => Err(ApiError::TodoNotFound),
        }
    }

    pub async fn edit(
        State(state): State<SharedState>,
        Path(id): Path<u64>,
        body: Result<Json<TodoUpdateRequest>, JsonRejection>,
    ) -> Result<Json<TodoOut>, ApiError> {
        let Json(body) = body?;
        let now = Utc::now();
        let request = body.validate(now)?;
        let touched_only = request.is_empty();
        match state.data_context.update_todo(id, request, now)? {
            Some(todo) => {
                info!(id, touched_only, "todo edited");
                Ok(Json(TodoOut::from(todo)))
            }
            None => Err(ApiError::TodoNotFound),
        }
    }

    pub async fn delete(
        State(state): State<SharedState>,
        Path(id): Path<u64>,
    ) -> Result<StatusCode, ApiError> {
        if !state.data_context.delete_todo(id)? {
            return Err(ApiError::TodoNotFound);
        }
        info!(id, "todo deleted");
        Ok(StatusCode::NO_CONTENT)
    }
}
