use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::auth::require_auth;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes: report generation and code resolution
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render))
        .route("/api/wrapped/:address", get(handlers::wrapped::generate))
        .route("/api/pincode/:code", get(handlers::pincode::resolve));

    // Operator routes: require Bearer token when API_TOKEN is set
    let admin = Router::new()
        .route("/api/pincode", post(handlers::pincode::create))
        .layer(middleware::from_fn(require_auth));

    // CORS: the report is consumed by browser frontends on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(admin)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
