use axum::{extract::Request, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use crate::handlers::{energy, health};
use crate::services::EnergyUsageService;

pub fn create_router(service: EnergyUsageService) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/energy-usage/{granularity}", get(energy::get_usage))
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::span!(
                        Level::INFO,
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_response(
                    |response: &axum::response::Response,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::event!(
                            Level::INFO,
                            status = response.status().as_u16(),
                            latency = ?latency,
                            "request completed"
                        );
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     _latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::event!(Level::ERROR, error = %error, "request failed");
                    },
                ),
        )
}
