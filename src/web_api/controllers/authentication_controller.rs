use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::TimeDelta;
use serde_json::Value;
use tracing::info;

use crate::{
    app_state::SharedState,
    authentication::auth::Claims,
    login_request::LoginRequest,
    token::Token,
    web_api::error::ApiError,
};

pub struct AuthenticationController {}

impl AuthenticationController {
    pub async fn login(
        State(state): State<SharedState>,
        payload: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Json<Token>, ApiError> {
        let Json(payload) = payload?;
        info!(username = %payload.username, "login attempt");

        // There is no account store yet, so no stored hash to check against.
        if !state.credentials.verify_password(&payload.password, "")? {
            return Err(ApiError::InvalidCredentials);
        }

        let mut claims = Claims::new();
        claims.insert("sub".to_string(), Value::String(payload.username));
        let expires_in = TimeDelta::minutes(state.settings.jwt_access_token_expire_minutes);
        let access_token = state.credentials.create_access_token(&claims, Some(expires_in))?;

        Ok(Json(Token::bearer(access_token, None)))
    }
}
