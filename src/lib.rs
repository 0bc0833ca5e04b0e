pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {
    axum::{
        Router,
        extract::DefaultBodyLimit,
        http::StatusCode,
        routing::{get, post},
    },
    domain::{orders::OrderRepository, signature::SignatureVerifier},
    std::{sync::Arc, time::Duration},
    tower_http::{timeout::TimeoutLayer, trace::TraceLayer},
};

#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderRepository>,
    pub verifier: Arc<dyn SignatureVerifier>,
}

pub const WEBHOOK_PATH: &str = "/api/webhooks";

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route(WEBHOOK_PATH, post(adapters::stripe::webhook::wh_handler))
        .layer(DefaultBodyLimit::max(64 * 1024)) // 64 KB; Stripe events are typically under 20 KB
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
