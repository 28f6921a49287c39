//! Prometheus metrics
//!
//! Library crates emit through the `metrics` facade; this module installs the
//! recorder and serves the text exposition at `/metrics`.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::state::AppState;

pub const HTTP_REQUESTS: &str = "terrenos_http_requests_total";

/// Install the global recorder
///
/// Returns `None` if a recorder is already installed (e.g. in tests).
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

pub fn record_request(endpoint: &'static str, status: StatusCode) {
    metrics::counter!(
        HTTP_REQUESTS,
        "endpoint" => endpoint,
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}

pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            "# metrics disabled\n".to_string(),
        ),
    }
}
