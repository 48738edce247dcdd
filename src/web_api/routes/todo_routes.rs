use axum::{routing::get, Router};

use crate::{app_state::SharedState, todo_controller::TodoController};

pub const ROUTER_PATH: &str = "/todos";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(ROUTER_PATH, get(TodoController::get_all).post(TodoController::add))
        .route(
            format!("{}/:id", ROUTER_PATH).as_str(),
            get(TodoController::get)
                .patch(TodoController::edit)
                .put(TodoController::edit)
                .delete(TodoController::delete),
        )
        .with_state(app_state)
}
