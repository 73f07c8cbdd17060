use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// CORS for the public read API. Writes authenticate with a cookie or
/// bearer token and are not opened to other origins.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
