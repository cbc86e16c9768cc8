/*
 * Responsibility
 * - GET /hello だけの静的挨拶サーバ
 * - backend とは設定もライフサイクルも共有しない
 */
use anyhow::Result;
use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// リクエストの内容 (query/header/body) は一切見ない
async fn hello() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"message": "Hello World 🌍"})))
}

pub fn router() -> Router {
    Router::new().route("/hello", get(hello))
}

pub async fn run() -> Result<()> {
    init_tracing();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Server running on port {port}");
    axum::serve(listener, router()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::router;

    #[tokio::test]
    async fn hello_returns_the_exact_greeting() {
        let res = router()
            .oneshot(Request::get("/hello").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);

        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], r#"{"message":"Hello World 🌍"}"#.as_bytes());
    }

    #[tokio::test]
    async fn hello_ignores_query_and_headers() {
        let req = Request::get("/hello?name=someone")
            .header("x-anything", "ignored")
            .body(Body::empty())
            .unwrap();

        let res = router().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], r#"{"message":"Hello World 🌍"}"#.as_bytes());
    }
}
