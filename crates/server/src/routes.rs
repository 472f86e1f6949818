//! Router and request handlers.
//!
//! One inbound operation: `POST /transform` with `{ input, settings? }`.
//! Validation and fetch failures map to 400 with a `{ "error": ... }` body,
//! anything else to 500 with a generic message; generation failures never
//! surface here because the orchestrator degrades them per persona.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::error;

use shapeshift_core::{Transformer, UserSettings};

/// Builds the application router.
pub fn router(transformer: Arc<Transformer>) -> Router {
    Router::new()
        .route("/transform", post(transform))
        .route("/healthz", get(healthz))
        .with_state(transformer)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Handles `POST /transform`.
///
/// The body is taken as a raw JSON value so a missing or non-string `input`
/// produces the contract's `Input is required` message rather than a
/// framework rejection body.
async fn transform(State(transformer): State<Arc<Transformer>>, Json(body): Json<Value>) -> Response {
    let Some(input) = body.get("input").and_then(Value::as_str) else {
        return error_response(StatusCode::BAD_REQUEST, "Input is required");
    };

    let settings = match body.get("settings") {
        Some(value) if !value.is_null() => match serde_json::from_value::<UserSettings>(value.clone()) {
            Ok(settings) => settings,
            Err(e) => {
                return error_response(StatusCode::BAD_REQUEST, &format!("Invalid settings: {}", e));
            }
        },
        _ => UserSettings::default(),
    };

    match transformer.transform(input, &settings).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) if e.is_user_error() => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
        Err(e) => {
            error!(error = %e, "transform failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use shapeshift_core::testing::{MockModel, MockResponse};
    use tower::ServiceExt;

    const ARTICLE_TEXT: &str = "A body of text that is comfortably longer than the fifty character minimum the \
                                transform endpoint enforces.";

    fn test_router() -> (Router, Arc<MockModel>) {
        let draft = Arc::new(MockModel::new("mock-draft", MockResponse::text("draft")));
        let edit = Arc::new(MockModel::new("mock-edit", MockResponse::text("polished")));
        let transformer = Arc::new(Transformer::new(draft.clone(), edit));
        (router(transformer), draft)
    }

    fn post_transform(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/transform")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_input_is_400() {
        let (app, _) = test_router();
        let response = app.oneshot(post_transform(json!({}))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Input is required");
    }

    #[tokio::test]
    async fn test_non_string_input_is_400() {
        let (app, _) = test_router();
        let response = app.oneshot(post_transform(json!({ "input": 42 }))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Input is required");
    }

    #[tokio::test]
    async fn test_short_input_is_400_with_contract_message() {
        let (app, _) = test_router();
        let response = app.oneshot(post_transform(json!({ "input": "short" }))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Content too short. Please provide at least 50 characters."
        );
    }

    #[tokio::test]
    async fn test_successful_transform_returns_persona_results() {
        let (app, draft) = test_router();
        let response = app.oneshot(post_transform(json!({ "input": ARTICLE_TEXT }))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["extractedText"], ARTICLE_TEXT);
        assert_eq!(body["results"].as_array().unwrap().len(), 4);
        assert_eq!(body["results"][0]["platformId"], "twitter");
        assert_eq!(body["results"][0]["content"], "polished");
        assert_eq!(draft.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_settings_are_applied() {
        let (app, draft) = test_router();
        let body = json!({ "input": ARTICLE_TEXT, "settings": { "includeEmojis": false } });
        let response = app.oneshot(post_transform(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(draft.calls().iter().all(|c| c.system_prompt.contains("Do not use any emojis")));
    }

    #[tokio::test]
    async fn test_invalid_settings_is_400() {
        let (app, _) = test_router();
        let body = json!({ "input": ARTICLE_TEXT, "settings": { "lengthPreference": "gigantic" } });
        let response = app.oneshot(post_transform(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = body_json(response).await["error"].as_str().unwrap().to_string();
        assert!(error.starts_with("Invalid settings:"));
    }

    #[tokio::test]
    async fn test_unreachable_url_is_400() {
        let (app, draft) = test_router();
        let response =
            app.oneshot(post_transform(json!({ "input": "http://127.0.0.1:1/article" }))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Could not connect to the server. Please check the URL."
        );
        assert_eq!(draft.calls().len(), 0);
    }

    #[tokio::test]
    async fn test_healthz() {
        let (app, _) = test_router();
        let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
