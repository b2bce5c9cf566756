//! Usage statistics for the footer widget.
//!
//! - GET /api/stats
//!   Latest poll result rendered as a `StatsView` (loading/ready/error).
//!
//! - POST /api/stats/refresh
//!   Manual retry: runs one poll cycle now unless one is already in flight,
//!   then returns the view.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::models::StatsView;
use crate::upstream::{PollOutcome, SharedStats};

pub fn routes(stats: SharedStats) -> Router {
    Router::new()
        .route("/api/stats", get(get_stats))
        .route("/api/stats/refresh", post(refresh_stats))
        .with_state(stats)
}

async fn get_stats(State(stats): State<SharedStats>) -> Result<Json<StatsView>> {
    Ok(Json(stats.view()?))
}

async fn refresh_stats(State(stats): State<SharedStats>) -> Result<Json<StatsView>> {
    if stats.poll_once().await? == PollOutcome::Skipped {
        tracing::info!("Refresh requested while a poll was running");
    }
    Ok(Json(stats.view()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use crate::upstream::{StatsPoller, TransportConfig, UpstreamClient};
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn app() -> Router {
        let base = spawn_upstream(Router::new().route(
            "/stats",
            get(|| async {
                Json(json!({ "data": { "total_seconds": 5400, "range": { "date": "2026-10-14" } } }))
            }),
        ))
        .await;
        let client = UpstreamClient::new(&TransportConfig::default()).unwrap();
        routes(Arc::new(StatsPoller::new(client, format!("{}/stats", base))))
    }

    #[tokio::test]
    async fn test_stats_loading_before_first_poll() {
        let (status, body) = call(app().await, Method::GET, "/api/stats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "loading");
        assert!(body["total_time"].is_null());
    }

    #[tokio::test]
    async fn test_refresh_fetches_and_renders() {
        let (status, body) = call(app().await, Method::POST, "/api/stats/refresh").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["total_seconds"], 5400.0);
        assert_eq!(body["total_time"], "1小时 30分钟");
        assert_eq!(body["date"], "2026年10月14日");
        assert!(body["fetched_at"].is_string());
    }
}
