use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use motoserwis_core::TypeKey;

use crate::state::AppState;
use crate::views::public;

/// Public, read-only pages.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/pages/{page}", get(page))
}

async fn home(State(state): State<AppState>) -> Response {
    render(&state, "home").await
}

async fn page(State(state): State<AppState>, Path(page): Path<String>) -> Response {
    render(&state, &page).await
}

async fn render(state: &AppState, raw_key: &str) -> Response {
    let schema = TypeKey::parse(raw_key)
        .ok()
        .and_then(|key| state.pages().get(&key));
    let Some(schema) = schema else {
        let html = public::not_found(state.pages()).into_string();
        return (StatusCode::NOT_FOUND, Html(html)).into_response();
    };

    let (content, _) = state
        .content()
        .resolve(&schema.type_key, &schema.default_document)
        .await;
    let refresh = match state.config().public_refresh_secs {
        0 => None,
        secs => Some(secs),
    };
    Html(public::render_page(state.pages(), schema, &content, refresh).into_string()).into_response()
}
