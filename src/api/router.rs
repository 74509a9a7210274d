//! Router construction for the bridge API

use crate::api::handlers;
use crate::bridge::Bridge;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the full axum router with all routes and middleware
pub fn build_router(bridge: Arc<Bridge>) -> Router {
    // CORS: any origin, the browser extension calls from arbitrary pages
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(86_400));

    Router::new()
        .route(
            "/api/candidates",
            get(handlers::index).options(handlers::preflight),
        )
        .route(
            "/api/candidates/upload",
            post(handlers::upload_candidates).options(handlers::preflight),
        )
        .route(
            "/api/candidates/voice/process",
            post(handlers::process_voice).options(handlers::preflight),
        )
        .route(
            "/api/candidates/voice/recent",
            get(handlers::voice_history).options(handlers::preflight),
        )
        .route(
            "/api/candidates/list",
            get(handlers::list_candidates).options(handlers::preflight),
        )
        .route(
            "/api/candidates/commands/pending",
            get(handlers::pending_commands).options(handlers::preflight),
        )
        .route(
            "/api/candidates/commands/report",
            post(handlers::report_execution).options(handlers::preflight),
        )
        .route(
            "/api/candidates/commands/history",
            get(handlers::execution_history).options(handlers::preflight),
        )
        .route(
            "/api/candidates/dashboard",
            get(handlers::dashboard).options(handlers::preflight),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(bridge)
}
