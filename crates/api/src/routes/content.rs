use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use motoserwis_core::TypeKey;
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::middleware::auth::ApiSession;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/content/{page}", get(get_content).post(save_content))
        .route("/api/admin/content", get(list_content))
}

/// Stored content verbatim, or `{}` when the page was never saved.
async fn get_content(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> ApiResult<Json<Value>> {
    let type_key = TypeKey::parse(&page)?;
    let content = state.content().get_content(&type_key).await?;
    Ok(Json(content))
}

/// Replace the page's content with the request body.
async fn save_content(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
    Path(page): Path<String>,
    Json(content): Json<Value>,
) -> ApiResult<Json<Value>> {
    let type_key = TypeKey::parse(&page)?;
    state.content().save_content(&type_key, content).await?;
    tracing::info!(type_key = %type_key, by = %session.user.email, "Content updated via API");
    Ok(Json(json!({ "success": true })))
}

async fn list_content(
    State(state): State<AppState>,
    _session: ApiSession,
) -> ApiResult<Json<Value>> {
    let documents = state.content().list().await?;
    Ok(Json(json!({ "success": true, "documents": documents })))
}
