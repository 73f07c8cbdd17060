//! HTTP server for the workshop site: JSON content API, image uploads,
//! admin sign-in and editor pages, and the public pages.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod views;

use axum::Router;
use tower::ServiceBuilder;

pub use config::AppConfig;
pub use state::AppState;

/// Router with all routes and the standard middleware stack.
pub fn build_app(state: AppState) -> Router {
    routes::build_router(state).layer(
        ServiceBuilder::new()
            .layer(middleware::request_tracing::trace_layer())
            .layer(middleware::cors::cors_layer()),
    )
}
