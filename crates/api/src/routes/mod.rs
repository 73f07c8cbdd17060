pub mod admin;
pub mod auth;
pub mod content;
pub mod health;
pub mod images;
pub mod pages;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config().upload_max_bytes;
    let images_dir = state.config().images_dir.clone();

    Router::new()
        .merge(health::routes())
        .merge(content::routes())
        .merge(images::routes(upload_limit))
        .merge(auth::routes())
        .merge(admin::routes(upload_limit))
        .merge(pages::routes())
        .nest_service("/images", ServeDir::new(images_dir))
        .with_state(state)
}
