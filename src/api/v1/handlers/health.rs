/*
 * Responsibility
 * - GET /health (readiness 用)
 * - backing store へ SELECT 1 を投げ、database の状態も返す
 */
use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::probe;
use crate::state::AppState;

const HEALTH_PING_TIMEOUT: Duration = Duration::from_secs(2);

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database_ok = match &state.db {
        Some(pool) => probe::ping(pool, HEALTH_PING_TIMEOUT).await.is_ok(),
        None => false,
    };

    if database_ok {
        (StatusCode::OK, Json(json!({"status": "ok", "database": "ok"})))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "degraded", "database": "unavailable"})),
        )
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::api;
    use crate::state::AppState;

    #[tokio::test]
    async fn health_reports_degraded_without_a_pool() {
        let app = axum::Router::new()
            .nest("/api/v1", api::v1::routes())
            .with_state(AppState::new(None));

        let res = app
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = res.into_body().collect().await.unwrap().to_bytes();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["status"], "degraded");
        assert_eq!(v["database"], "unavailable");
    }
}
