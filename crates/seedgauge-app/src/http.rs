//! Scrape endpoint.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use seedgauge_telemetry::TorrentMetrics;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::{AppError, AppResult};

/// Build the scrape router over `metrics`.
pub fn router(metrics: TorrentMetrics) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(metrics)
}

/// Bind `addr` and serve `router` until the listener fails.
///
/// # Errors
///
/// Returns [`AppError::Bind`] if the address cannot be bound and [`AppError::Serve`] if
/// the server stops with an IO error.
pub async fn serve(addr: SocketAddr, router: Router) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind { addr, source })?;
    info!(%addr, "prometheus scrape listener started");
    axum::serve(listener, router.into_make_service())
        .await
        .map_err(|source| AppError::Serve { source })
}

async fn metrics_handler(
    State(metrics): State<TorrentMetrics>,
) -> Result<Response, (StatusCode, &'static str)> {
    match metrics.render() {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, seedgauge_telemetry::CONTENT_TYPE)
            .body(Body::from(body))
            .map_err(|err| {
                error!(error = %err, "failed to build metrics response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to build metrics response",
                )
            }),
        Err(err) => {
            error!(error = %err, "failed to render metrics");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "failed to render metrics"))
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
