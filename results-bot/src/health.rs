//! Liveness endpoint for hosting platforms that expect an open HTTP port.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tracing::info;

pub const HEALTH_MESSAGE: &str = "Grade 12 Results Bot is running! 🎓";

async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// `GET /` and `GET /health`; anything else is 404.
pub fn router() -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
}

/// Serves [`router`] on `addr` until the task is dropped or aborted.
pub async fn serve(addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind health server to {addr}"))?;
    info!(%addr, "Health server listening");
    axum::serve(listener, router())
        .await
        .context("Health server stopped")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    async fn get_path(path: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_root_and_health_respond() {
        for path in ["/", "/health"] {
            let (status, body) = get_path(path).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, HEALTH_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (status, _) = get_path("/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
