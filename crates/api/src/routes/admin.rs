use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use motoserwis_core::assets::Asset;
use motoserwis_core::document::FieldPath;
use motoserwis_core::editor::ops::get_at;
use motoserwis_core::editor::{EditAction, EditorSession, Notice, PageSchema};
use motoserwis_core::TypeKey;
use serde::Deserialize;
use serde_json::{Number, Value};

use super::images::{read_file_part, FilePart};
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::{
    removal_cookie, session_cookie, session_from_headers, AdminSession, LOGIN_PATH,
};
use crate::state::AppState;
use crate::views::admin::{dashboard, login_page};
use crate::views::leaf_text;
use crate::views::editor::{
    render_editor, ACTION_FIELD, SESSION_FIELD, UPLOAD_PREFIX, VALUE_PREFIX,
};

/// Admin UI: sign-in, dashboard and the per-page editor.
pub fn routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_form).post(login))
        .route("/admin/logout", post(logout))
        .route("/admin", get(index))
        .route(
            "/admin/{page}",
            get(open_editor)
                .post(submit_editor)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    email: String,
    password: String,
}

async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if session_from_headers(&state, &headers).is_some() {
        return Redirect::to("/admin").into_response();
    }
    Html(login_page(None).into_string()).into_response()
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> ApiResult<Response> {
    let Some(user) = state.auth().authenticate(&form.email, &form.password)? else {
        let html = login_page(Some("Invalid email or password.")).into_string();
        return Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response());
    };
    let issued = state.auth().issue(&user)?;
    let jar = jar.add(session_cookie(issued.token, state.config().secure_cookies));
    Ok((jar, Redirect::to("/admin")).into_response())
}

async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.add(removal_cookie()), Redirect::to(LOGIN_PATH))
}

async fn index(State(state): State<AppState>, AdminSession(session): AdminSession) -> Html<String> {
    let stored = match state.content().list().await {
        Ok(stored) => Some(stored),
        Err(err) => {
            tracing::warn!("Listing stored content failed: {err}");
            None
        }
    };
    let images = image_library(&state).await;
    Html(dashboard(&session.user.name, state.pages(), stored.as_deref(), &images).into_string())
}

/// Uploaded images for the picker; a listing failure shows an empty library.
async fn image_library(state: &AppState) -> Vec<Asset> {
    match state.assets().list().await {
        Ok(images) => images,
        Err(err) => {
            tracing::warn!(dir = %state.assets().dir().display(), "Listing images failed: {err}");
            Vec::new()
        }
    }
}

fn schema_for<'a>(state: &'a AppState, page: &str) -> ApiResult<&'a PageSchema> {
    let type_key = TypeKey::parse(page)?;
    state
        .pages()
        .get(&type_key)
        .ok_or_else(|| ApiError::NotFound(format!("no editor for page {type_key}")))
}

async fn open_editor(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(page): Path<String>,
) -> ApiResult<Response> {
    let schema = schema_for(&state, &page)?;
    let mut session = EditorSession::open(
        schema.type_key.clone(),
        state.content(),
        &schema.default_document,
    )
    .await;
    let notice = session.take_notice();
    Ok(respond(&state, schema, &session, notice, StatusCode::OK).await)
}

/// Everything one editor form submission carries.
struct Submission {
    encoded_session: Option<String>,
    action: EditAction,
    values: Vec<(FieldPath, String)>,
    uploads: Vec<(FieldPath, FilePart)>,
}

async fn read_submission(multipart: &mut Multipart) -> ApiResult<Submission> {
    let mut submission = Submission {
        encoded_session: None,
        action: EditAction::Update,
        values: Vec::new(),
        uploads: Vec::new(),
    };
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == SESSION_FIELD {
            submission.encoded_session = Some(field.text().await?);
        } else if name == ACTION_FIELD {
            submission.action = field.text().await?.parse()?;
        } else if let Some(raw) = name.strip_prefix(VALUE_PREFIX) {
            let path = FieldPath::parse(raw)?;
            submission.values.push((path, field.text().await?));
        } else if let Some(raw) = name.strip_prefix(UPLOAD_PREFIX) {
            let path = FieldPath::parse(raw)?;
            if let Some(file) = read_file_part(field).await? {
                submission.uploads.push((path, file));
            }
        }
    }
    Ok(submission)
}

/// Apply posted values, uploads and one action to the session carried
/// in the form. Only `save` writes to the store.
async fn submit_editor(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    Path(page): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let schema = schema_for(&state, &page)?;
    let submission = read_submission(&mut multipart).await?;

    let carried = submission
        .encoded_session
        .and_then(|raw| serde_json::from_str::<EditorSession>(&raw).ok())
        .filter(|s| s.type_key() == &schema.type_key);
    let mut session = match carried {
        Some(session) => session,
        None => {
            EditorSession::open(
                schema.type_key.clone(),
                state.content(),
                &schema.default_document,
            )
            .await
        }
    };
    session.acknowledge();

    for (path, text) in submission.values {
        if let Some(value) = posted_value(session.document(), &path, text) {
            session.set_field(&path, value);
        }
    }

    let mut status = StatusCode::OK;
    let mut upload_notice = None;
    for (path, file) in submission.uploads {
        match state
            .assets()
            .upload(&file.bytes, &file.name, &file.content_type)
            .await
        {
            Ok(asset) => {
                session.set_field(&path, Value::String(asset.url));
            }
            Err(err) => {
                tracing::warn!(path = %path, "Editor upload rejected: {err}");
                let api_err = ApiError::from(err);
                status = match api_err {
                    ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                upload_notice = Some(Notice::error(format!("Image upload failed: {api_err}")));
            }
        }
    }

    submission.action.apply_local(&mut session, schema);
    if submission.action == EditAction::Save && upload_notice.is_none() {
        if session.save(state.content()).await.is_err() {
            status = StatusCode::INTERNAL_SERVER_ERROR;
        } else {
            tracing::info!(type_key = %schema.type_key, by = %admin.user.email, "Content updated via editor");
        }
    }

    let session_notice = session.take_notice();
    let notice = upload_notice.or(session_notice);
    Ok(respond(&state, schema, &session, notice, status).await)
}

/// Value to write for a posted text input, or `None` when the text is
/// what the form was rendered with. Numbers stay numbers while the new
/// text still parses as one.
fn posted_value(doc: &Value, path: &FieldPath, text: String) -> Option<Value> {
    if leaf_text(doc, path) == text {
        return None;
    }
    if let Some(Value::Number(_)) = get_at(doc, path) {
        if let Ok(number) = text.trim().parse::<Number>() {
            return Some(Value::Number(number));
        }
    }
    Some(Value::String(text))
}

async fn respond(
    state: &AppState,
    schema: &PageSchema,
    session: &EditorSession,
    notice: Option<Notice>,
    status: StatusCode,
) -> Response {
    let images = image_library(state).await;
    let html = render_editor(schema, session, notice.as_ref(), &images).into_string();
    (status, Html(html)).into_response()
}
