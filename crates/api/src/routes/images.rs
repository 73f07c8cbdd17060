use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::ApiSession;
use crate::state::AppState;

pub fn routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/api/admin/images", get(list_images))
        .route(
            "/api/admin/upload",
            post(upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
}

async fn list_images(State(state): State<AppState>, _session: ApiSession) -> ApiResult<Json<Value>> {
    let images: Vec<String> = state
        .assets()
        .list()
        .await?
        .into_iter()
        .map(|asset| asset.url)
        .collect();
    Ok(Json(json!({ "success": true, "images": images })))
}

/// An uploaded file part.
pub(crate) struct FilePart {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Accepts a multipart form with a `file` field.
async fn upload_image(
    State(state): State<AppState>,
    _session: ApiSession,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            file = read_file_part(field).await?;
        }
    }
    let file = file.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    let asset = state
        .assets()
        .upload(&file.bytes, &file.name, &file.content_type)
        .await?;
    Ok(Json(json!({ "success": true, "url": asset.url })))
}

/// Drain a multipart field into memory. Fields without a file name (an
/// empty file input) read as `None`.
pub(crate) async fn read_file_part(
    field: axum::extract::multipart::Field<'_>,
) -> ApiResult<Option<FilePart>> {
    let name = match field.file_name() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Ok(None),
    };
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await?.to_vec();
    Ok(Some(FilePart {
        name,
        content_type,
        bytes,
    }))
}
