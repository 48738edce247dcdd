use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::{
    authentication::auth::AuthError, data_access::data_context::DataError,
    validation::ValidationError,
};

// Prefix axum puts in front of serde's "<path>: <message>".
const JSON_DATA_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Payload(#[from] JsonRejection),
    #[error("Todo not found")]
    TodoNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Data(#[from] DataError),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Payload(rejection) => rejection.status(),
            ApiError::TodoNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::NotImplemented(_)) => StatusCode::NOT_IMPLEMENTED,
            ApiError::Data(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Split a JSON data rejection into the offending field and serde's message.
fn payload_body(rejection: &JsonRejection) -> ErrorBody {
    let text = rejection.body_text();
    if let JsonRejection::JsonDataError(_) = rejection {
        if let Some(rest) = text.strip_prefix(JSON_DATA_PREFIX) {
            if let Some((path, message)) = rest.split_once(": ") {
                let is_path = !path.is_empty()
                    && path != "."
                    && path
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
                if is_path {
                    return ErrorBody { detail: message.to_string(), field: Some(path.to_string()) };
                }
            }
            return ErrorBody { detail: rest.to_string(), field: None };
        }
    }
    ErrorBody { detail: text, field: None }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Validation(e) => ErrorBody {
                detail: e.reason.to_string(),
                field: Some(e.field.to_string()),
            },
            ApiError::Payload(rejection) => payload_body(rejection),
            ApiError::Data(e) => {
                error!(error = %e, "storage failure");
                ErrorBody { detail: "Internal storage error".to_string(), field: None }
            }
            other => {
                warn!(error = %other, "request rejected");
                ErrorBody { detail: other.to_string(), field: None }
            }
        };
        (status, Json(body)).into_response()
    }
}
