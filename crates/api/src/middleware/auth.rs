use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use motoserwis_core::Session;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "session";

/// Where unauthenticated admin page requests are sent.
pub const LOGIN_PATH: &str = "/admin/login";

/// Session required by write-capable API endpoints; 401 JSON otherwise.
#[derive(Debug, Clone)]
pub struct ApiSession(pub Session);

/// Session required by admin pages; redirect to the login page otherwise.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

/// Rejection for admin pages.
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to(LOGIN_PATH).into_response()
    }
}

/// Bearer token first, then the session cookie.
fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
    })
}

/// Resolve the request's session, if it carries a valid token.
pub fn session_from_headers(state: &AppState, headers: &HeaderMap) -> Option<Session> {
    let token = token_from_headers(headers)?;
    match state.auth().verify(&token) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::debug!("Session token rejected: {err}");
            None
        }
    }
}

impl FromRequestParts<AppState> for ApiSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        session_from_headers(state, &parts.headers)
            .map(ApiSession)
            .ok_or(ApiError::Unauthorized)
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        session_from_headers(state, &parts.headers)
            .map(AdminSession)
            .ok_or(LoginRedirect)
    }
}

/// Session cookie carrying `token`.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Expired, empty session cookie. Sent on every sign-out whether or not
/// the request carried a session.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").http_only(true).build();
    cookie.make_removal();
    cookie
}
