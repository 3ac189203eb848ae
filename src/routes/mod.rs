//! API Routes
//!
//! HTTP endpoints for the REST front end:
//! - `/payments` - Payment CRUD and listing
//! - `/api/health` - Health checks

pub mod health;
pub mod payments;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    Router::new()
        .merge(payments::router(state.clone()))
        .merge(health::router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
