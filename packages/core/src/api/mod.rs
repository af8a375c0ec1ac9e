//! Operational HTTP endpoint.
//!
//! Exposes `/health` for liveness probes and `/metrics` for Prometheus
//! scraping. Served only when a listen address is configured.

pub mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;

use crate::error::AppError;
use crate::metrics::RelayMetrics;

pub fn router(metrics: Arc<RelayMetrics>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/metrics", get(render_metrics))
        .with_state(metrics)
}

async fn render_metrics(State(metrics): State<Arc<RelayMetrics>>) -> Response {
    match metrics.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Failed to render metrics: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics error").into_response()
        }
    }
}

/// Bind `addr` and serve the operational router in the background.
///
/// Bind errors are returned; errors after startup are only logged so the
/// relay loop keeps running.
pub async fn spawn_server(addr: SocketAddr, metrics: Arc<RelayMetrics>) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::Server(format!("failed to bind {}: {}", addr, err)))?;

    tracing::info!("Operational endpoint listening on {}", addr);

    let app = router(metrics);
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!("Operational endpoint stopped: {}", err);
        }
    });

    Ok(())
}

/// Start the operational endpoint if possible.
///
/// The endpoint is optional: a failure is logged and the relay runs on
/// without it. Returns whether the endpoint is serving.
pub async fn start_ops_endpoint(addr: SocketAddr, metrics: Arc<RelayMetrics>) -> bool {
    match spawn_server(addr, metrics).await {
        Ok(()) => true,
        Err(err) => {
            tracing::error!("Operational endpoint disabled: {}", err);
            false
        }
    }
}
