use axum::{extract::State, routing::{get, post}, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::{removal_cookie, session_cookie, ApiSession};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signin", post(sign_in))
        .route("/api/auth/signout", post(sign_out))
        .route("/api/auth/session", get(current_session))
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignInRequest>,
) -> ApiResult<(CookieJar, Json<Value>)> {
    let user = state
        .auth()
        .authenticate(&body.email, &body.password)?
        .ok_or(ApiError::Unauthorized)?;
    let issued = state.auth().issue(&user)?;
    let jar = jar.add(session_cookie(
        issued.token.clone(),
        state.config().secure_cookies,
    ));
    Ok((
        jar,
        Json(json!({
            "success": true,
            "token": issued.token,
            "expiresAt": issued.expires_at,
            "user": user,
        })),
    ))
}

async fn sign_out(jar: CookieJar) -> (CookieJar, Json<Value>) {
    (jar.add(removal_cookie()), Json(json!({ "success": true })))
}

async fn current_session(ApiSession(session): ApiSession) -> Json<Value> {
    Json(json!({
        "user": session.user,
        "expires": session.expires,
    }))
}
