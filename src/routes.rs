//! HTTP routes: one `GET /api/<source>_news` endpoint per source.
//!
//! A pipeline result is always returned with transport status 200, even when
//! the envelope itself reports a failed fetch (`{"data":{"status":500,...}}`).
//! Only faults that escape the pipeline, a [`PipelineError`] or a panic,
//! become a transport 500 with an `{"error": ...}` body.

use crate::fetcher::Fetcher;
use crate::models::ResponseEnvelope;
use crate::pipeline::{self, PipelineError};
use crate::scrapers::{SourceConfig, mmo_champion, reddit};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use futures::FutureExt;
use serde_json::json;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, instrument};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
    pub ow: Arc<SourceConfig>,
    pub rl: Arc<SourceConfig>,
}

impl AppState {
    pub fn new(fetcher: Fetcher, ow: SourceConfig, rl: SourceConfig) -> Self {
        Self {
            fetcher,
            ow: Arc::new(ow),
            rl: Arc::new(rl),
        }
    }

    /// State wired to the built-in production sources.
    pub fn with_default_sources(fetcher: Fetcher) -> Self {
        Self::new(fetcher, mmo_champion::source(), reddit::source())
    }

    pub fn sources(&self) -> [&SourceConfig; 2] {
        [&self.ow, &self.rl]
    }
}

/// Faults reported to the client as a transport-level 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("pipeline panicked: {0}")]
    Panicked(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ow_news", get(ow_news))
        .route("/api/rl_news", get(rl_news))
        .route("/health", get(health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[instrument(level = "info", skip_all)]
async fn ow_news(State(state): State<AppState>) -> Result<Json<ResponseEnvelope>, ApiError> {
    contain(pipeline::run(&state.fetcher, &state.ow)).await
}

#[instrument(level = "info", skip_all)]
async fn rl_news(State(state): State<AppState>) -> Result<Json<ResponseEnvelope>, ApiError> {
    contain(pipeline::run(&state.fetcher, &state.rl)).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Await a pipeline, turning escaped errors and panics into [`ApiError`].
async fn contain<F>(pipeline: F) -> Result<Json<ResponseEnvelope>, ApiError>
where
    F: Future<Output = Result<ResponseEnvelope, PipelineError>>,
{
    match AssertUnwindSafe(pipeline).catch_unwind().await {
        Ok(result) => Ok(Json(result?)),
        Err(payload) => Err(ApiError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FORUM_PAGE: &str = r##"<html><body>
<div class="message">
  <b><font color="#FFF3A5">[OW] Patch Notes</font></b>
  <b><font color="#FFF3A5">[ow] Hero Update</font></b>
</div>
</body></html>"##;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Rocket League Esports</title>
  <entry>
    <author><name>alice</name></author>
    <content type="html">Great game</content>
    <link href="https://x/1" />
    <updated>2025-01-02T00:00:00Z</updated>
    <title>Finals Recap</title>
  </entry>
</feed>"#;

    async fn mock_upstream() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ow"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FORUM_PAGE))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rl"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
            .mount(&server)
            .await;
        server
    }

    fn state_for(server: &MockServer) -> AppState {
        AppState::new(
            Fetcher::default(),
            mmo_champion::source().with_target_url(format!("{}/ow", server.uri())),
            reddit::source().with_target_url(format!("{}/rl", server.uri())),
        )
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ow_news_splits_titles() {
        let server = mock_upstream().await;
        let (status, body) = get_json(router(state_for(&server)), "/api/ow_news").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], 200);
        let segments = body["data"]["segments"].as_array().unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0]["title"], "Patch Notes");
        assert_eq!(segments[1]["title"], "Hero Update");
        for field in ["author", "date", "description", "url_path"] {
            assert_eq!(segments[0][field], segments[1][field]);
        }
        assert_eq!(segments[0]["url_path"], format!("{}/ow", server.uri()));
    }

    #[tokio::test]
    async fn test_rl_news_feed_entry() {
        let server = mock_upstream().await;
        let (status, body) = get_json(router(state_for(&server)), "/api/rl_news").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "data": {
                    "status": 200,
                    "segments": [{
                        "title": "Finals Recap",
                        "author": "alice",
                        "date": "2025-01-02",
                        "url_path": "https://x/1",
                        "description": "Great game"
                    }]
                }
            })
        );
    }

    #[tokio::test]
    async fn test_upstream_timeout_is_transport_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;
        let state = AppState::new(
            Fetcher::default(),
            mmo_champion::source()
                .with_target_url(server.uri())
                .with_timeout(Duration::from_millis(100)),
            reddit::source()
                .with_target_url(server.uri())
                .with_timeout(Duration::from_millis(100)),
        );

        let (status, body) = get_json(router(state), "/api/rl_news").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "data": { "status": 500, "segments": [] } }));
    }

    #[tokio::test]
    async fn test_pipeline_error_is_transport_500() {
        let server = mock_upstream().await;
        let mut state = state_for(&server);
        let mut broken = reddit::source().with_target_url(format!("{}/rl", server.uri()));
        broken.container_selector = "entry[";
        state.rl = Arc::new(broken);

        let (status, body) = get_json(router(state), "/api/rl_news").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("entry["));
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_contain_catches_panics() {
        let result = contain(async {
            if true {
                panic!("boom");
            }
            Ok(ResponseEnvelope::failed())
        })
        .await;
        match result {
            Err(ApiError::Panicked(message)) => assert_eq!(message, "boom"),
            other => panic!("expected panic to be contained, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_response_shape() {
        let response = ApiError::Panicked("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "pipeline panicked: boom" }));
    }

    #[tokio::test]
    async fn test_news_routes_allow_any_origin() {
        let server = mock_upstream().await;
        let response = router(state_for(&server))
            .oneshot(
                Request::builder()
                    .uri("/api/ow_news")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(AppState::with_default_sources(Fetcher::default()));
        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
