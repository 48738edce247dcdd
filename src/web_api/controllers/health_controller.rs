use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app_state::SharedState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub title: String,
    pub version: String,
}

pub struct HealthController {}

impl HealthController {
    pub async fn get(State(state): State<SharedState>) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok".to_string(),
            title: state.settings.app_title.clone(),
            version: state.settings.app_version.clone(),
        })
    }
}
