pub mod authentication_routes;
pub mod health_routes;
pub mod todo_routes;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app_state::SharedState;

pub fn map_routes(app_state: SharedState) -> Router {
    Router::new()
        .merge(health_routes::get_router(app_state.clone()))
        .merge(todo_routes::get_router(app_state.clone()))
        .merge(authentication_routes::get_router(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app_state::AppState,
        authentication::auth::{AuthError, Claims, CredentialService},
        data_access::data_context::DataContext,
        settings::Settings,
        todo_out::TodoOut,
        token::Token,
        web_api::error::ErrorBody,
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};
    use chrono::TimeDelta;
    use std::{fs, sync::Arc};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        path: String,
    }

    impl TestApp {
        fn new(name: &str) -> Self {
            let path = Self::db_path(name);
            let data_context = DataContext::new(&path).unwrap();
            let router = map_routes(AppState::new(data_context, Settings::default()));
            TestApp { router, path }
        }

        fn with_credentials(name: &str, credentials: Arc<dyn CredentialService>) -> Self {
            let path = Self::db_path(name);
            let state = Arc::new(AppState {
                data_context: DataContext::new(&path).unwrap(),
                settings: Settings::default(),
                credentials,
            });
            TestApp { router: map_routes(state), path }
        }

        fn db_path(name: &str) -> String {
            let path = format!("/tmp/toado_test_http_{name}_{}.redb", std::process::id());
            let _ = fs::remove_file(&path);
            path
        }

        async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
            let mut builder = Request::builder().method(method).uri(uri);
            let body = match body {
                Some(json) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };
            let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, bytes.to_vec())
        }

        async fn send_json<T: DeserializeOwned>(
            &self,
            method: Method,
            uri: &str,
            body: Option<Value>,
        ) -> (StatusCode, T) {
            let (status, bytes) = self.send(method, uri, body).await;
            (status, serde_json::from_slice(&bytes).unwrap())
        }
    }

    impl Drop for TestApp {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.path);
        }
    }

    #[tokio::test]
    async fn health_reports_app_metadata() {
        let app = TestApp::new("health");
        let (status, body): (_, Value) = app.send_json(Method::GET, "/health/check_status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["title"], "Toado API");
        assert_eq!(body["version"], "1.0.0");
    }

    #[tokio::test]
    async fn create_buy_milk() {
        let app = TestApp::new("create");
        let (status, todo): (_, TodoOut) =
            app.send_json(Method::POST, "/todos", Some(json!({ "title": "Buy milk" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(todo.id, 1);
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.status.as_str(), "pending");
        assert_eq!(todo.priority.as_str(), "medium");
        assert_eq!(todo.due_date, None);
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[tokio::test]
    async fn past_due_date_is_422_on_due_date() {
        let app = TestApp::new("past");
        let past = (Utc::now() - Duration::hours(1)).to_rfc3339();
        let (status, body): (_, ErrorBody) = app
            .send_json(Method::POST, "/todos", Some(json!({ "title": "Late", "due_date": past })))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.field.as_deref(), Some("due_date"));
        assert_eq!(body.detail, "due_date cannot be in the past");
    }

    #[tokio::test]
    async fn unknown_status_is_422() {
        let app = TestApp::new("badstatus");
        let (status, body): (_, ErrorBody) = app
            .send_json(Method::POST, "/todos", Some(json!({ "title": "x", "status": "done" })))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.field.as_deref(), Some("status"));
    }

    #[tokio::test]
    async fn missing_title_is_422() {
        let app = TestApp::new("notitle");
        let (status, body): (_, ErrorBody) =
            app.send_json(Method::POST, "/todos", Some(json!({ "priority": "high" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.field.as_deref(), Some("title"));
    }

    #[tokio::test]
    async fn patch_due_date_only() {
        let app = TestApp::new("patch");
        let (_, created): (_, TodoOut) = app
            .send_json(
                Method::POST,
                "/todos",
                Some(json!({ "title": "Feed toad", "status": "in_progress", "priority": "high" })),
            )
            .await;

        std::thread::sleep(std::time::Duration::from_millis(5));
        let due = Utc::now() + Duration::hours(1);
        let (status, updated): (_, TodoOut) = app
            .send_json(
                Method::PATCH,
                &format!("/todos/{}", created.id),
                Some(json!({ "due_date": due.to_rfc3339() })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated.due_date, Some(due));
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.status, created.status);
        assert_eq!(updated.priority, created.priority);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn put_behaves_like_patch() {
        let app = TestApp::new("put");
        let (_, created): (_, TodoOut) =
            app.send_json(Method::POST, "/todos", Some(json!({ "title": "Buy milk" }))).await;
        let (status, updated): (_, TodoOut) = app
            .send_json(Method::PUT, "/todos/1", Some(json!({ "status": "completed" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated.status.as_str(), "completed");
        assert_eq!(updated.title, created.title);
    }

    #[tokio::test]
    async fn invalid_update_leaves_todo_alone() {
        let app = TestApp::new("badpatch");
        let (_, created): (_, TodoOut) =
            app.send_json(Method::POST, "/todos", Some(json!({ "title": "Buy milk" }))).await;
        let (status, _): (_, ErrorBody) = app
            .send_json(Method::PATCH, "/todos/1", Some(json!({ "title": "" })))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, fetched): (_, TodoOut) = app.send_json(Method::GET, "/todos/1", None).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_list_and_filter() {
        let app = TestApp::new("list");
        for (title, priority) in [("a", "low"), ("b", "high"), ("c", "high")] {
            let (status, _) = app
                .send(Method::POST, "/todos", Some(json!({ "title": title, "priority": priority })))
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, all): (_, Vec<TodoOut>) = app.send_json(Method::GET, "/todos", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.len(), 3);

        let (_, high): (_, Vec<TodoOut>) =
            app.send_json(Method::GET, "/todos?priority=high", None).await;
        let titles: Vec<_> = high.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["b", "c"]);

        let (_, paged): (_, Vec<TodoOut>) =
            app.send_json(Method::GET, "/todos?skip=1&limit=1", None).await;
        assert_eq!(paged.len(), 1);
        assert_eq!(paged[0].title, "b");

        let (status, _) = app.send(Method::GET, "/todos?status=done", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_todo_is_404() {
        let app = TestApp::new("404");
        let (status, body): (_, ErrorBody) = app.send_json(Method::GET, "/todos/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.detail, "Todo not found");

        let (status, _) = app.send(Method::PATCH, "/todos/7", Some(json!({ "status": "pending" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.send(Method::DELETE, "/todos/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_then_gone() {
        let app = TestApp::new("delete");
        app.send(Method::POST, "/todos", Some(json!({ "title": "Doomed" }))).await;

        let (status, body) = app.send(Method::DELETE, "/todos/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, _) = app.send(Method::GET, "/todos/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn login_is_not_implemented() {
        let app = TestApp::new("login");
        let (status, body): (_, ErrorBody) = app
            .send_json(
                Method::POST,
                "/authentication/login",
                Some(json!({ "username": "toad", "password": "ribbit" })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body.detail, "Password verification is not implemented yet");
    }

    #[tokio::test]
    async fn null_clears_description_and_due_date() {
        let app = TestApp::new("clear");
        let due = (Utc::now() + Duration::hours(2)).to_rfc3339();
        let (_, created): (_, TodoOut) = app
            .send_json(
                Method::POST,
                "/todos",
                Some(json!({ "title": "x", "description": "d", "due_date": due })),
            )
            .await;
        assert!(created.description.is_some());
        assert!(created.due_date.is_some());

        let (status, kept): (_, TodoOut) = app
            .send_json(Method::PATCH, "/todos/1", Some(json!({ "priority": "high" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(kept.description, created.description);
        assert_eq!(kept.due_date, created.due_date);

        let (status, cleared): (_, TodoOut) = app
            .send_json(
                Method::PATCH,
                "/todos/1",
                Some(json!({ "description": null, "due_date": null, "title": null })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cleared.description, None);
        assert_eq!(cleared.due_date, None);
        assert_eq!(cleared.title, "x");
        assert_eq!(cleared.priority.as_str(), "high");
    }

    #[tokio::test]
    async fn wrong_json_types_name_the_field() {
        let app = TestApp::new("types");
        let (status, body): (_, ErrorBody) =
            app.send_json(Method::POST, "/todos", Some(json!({ "title": 5 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.field.as_deref(), Some("title"));
        assert!(body.detail.contains("invalid type"));

        app.send(Method::POST, "/todos", Some(json!({ "title": "x" }))).await;
        let (status, body): (_, ErrorBody) =
            app.send_json(Method::PATCH, "/todos/1", Some(json!({ "due_date": 5 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.field.as_deref(), Some("due_date"));
    }

    #[tokio::test]
    async fn malformed_json_keeps_the_error_shape() {
        let app = TestApp::new("syntax");
        let request = Request::builder()
            .method(Method::POST)
            .uri("/todos")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"title\":"))
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert!(body.field.is_none());
        assert!(!body.detail.is_empty());
    }

    /// Password check answers a fixed verdict; tokens echo the subject.
    struct FixedCredentials {
        accept: bool,
    }

    impl CredentialService for FixedCredentials {
        fn create_access_token(
            &self,
            claims: &Claims,
            expires_in: Option<TimeDelta>,
        ) -> Result<String, AuthError> {
            let sub = claims["sub"].as_str().unwrap_or_default();
            let minutes = expires_in.map(|d| d.num_minutes()).unwrap_or_default();
            Ok(format!("token-{sub}-{minutes}"))
        }

        fn verify_token(&self, _token: &str) -> Result<Claims, AuthError> {
            Ok(Claims::new())
        }

        fn hash_password(&self, password: &str) -> Result<String, AuthError> {
            Ok(password.to_string())
        }

        fn verify_password(&self, _password: &str, _password_hash: &str) -> Result<bool, AuthError> {
            Ok(self.accept)
        }
    }

    #[tokio::test]
    async fn rejected_password_is_401() {
        let app = TestApp::with_credentials("login_reject", Arc::new(FixedCredentials { accept: false }));
        let (status, body): (_, ErrorBody) = app
            .send_json(
                Method::POST,
                "/authentication/login",
                Some(json!({ "username": "toad", "password": "wrong" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.detail, "Invalid credentials");
    }

    #[tokio::test]
    async fn accepted_password_issues_bearer_token() {
        let app = TestApp::with_credentials("login_accept", Arc::new(FixedCredentials { accept: true }));
        let (status, token): (_, Token) = app
            .send_json(
                Method::POST,
                "/authentication/login",
                Some(json!({ "username": "toad", "password": "ribbit" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(token, Token::bearer("token-toad-30".to_string(), None));
    }
}
