//! Credential check for the single admin account and stateless signed
//! session tokens.

use argon2::{password_hash::PasswordHash, Argon2, PasswordVerifier};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("stored password hash is malformed: {0}")]
    BadHash(String),
    #[error("invalid duration {0:?}")]
    BadDuration(String),
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// The identity carried in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    user: SessionUser,
    exp: i64,
    iat: i64,
}

/// A verified session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: SessionUser,
    pub expires: DateTime<Utc>,
}

/// A freshly signed token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// The one account allowed into the admin area.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub name: String,
    /// bcrypt (`$2…`) or argon2 (`$argon2…`) PHC string.
    pub password_hash: String,
}

#[derive(Clone)]
pub struct AuthGate {
    admin: AdminAccount,
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("admin", &self.admin.email)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl AuthGate {
    pub fn new(admin: AdminAccount, secret: &str, ttl: Duration) -> Self {
        Self {
            admin,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// `Some(user)` only for the configured email with a matching password.
    pub fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<SessionUser>, AuthError> {
        // Verify the hash on every attempt, matching email or not.
        let email_matches = email.trim().eq_ignore_ascii_case(&self.admin.email);
        let password_matches = verify_password(password, &self.admin.password_hash)?;
        if !email_matches {
            tracing::info!(email = %email, "Sign-in rejected: unknown email");
            return Ok(None);
        }
        if !password_matches {
            tracing::info!(email = %email, "Sign-in rejected: wrong password");
            return Ok(None);
        }
        tracing::info!(email = %email, "Sign-in accepted");
        Ok(Some(SessionUser {
            id: "admin".to_string(),
            email: self.admin.email.clone(),
            name: self.admin.name.clone(),
        }))
    }

    pub fn issue(&self, user: &SessionUser) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            user: user.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Session, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        let expires = Utc
            .timestamp_opt(data.claims.exp, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Ok(Session {
            user: data.claims.user,
            expires,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Verify against a bcrypt or argon2 hash, chosen by the hash prefix.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    if hash.starts_with("$argon2") {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::BadHash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    } else {
        bcrypt::verify(password, hash).map_err(|e| AuthError::BadHash(e.to_string()))
    }
}

/// Parse `12h`, `30d`, `15m`; a bare number means hours.
pub fn parse_duration(raw: &str) -> Result<Duration, AuthError> {
    let raw = raw.trim();
    let bad = || AuthError::BadDuration(raw.to_string());
    let (digits, unit): (&str, fn(i64) -> Duration) = if let Some(d) = raw.strip_suffix('d') {
        (d, Duration::days)
    } else if let Some(h) = raw.strip_suffix('h') {
        (h, Duration::hours)
    } else if let Some(m) = raw.strip_suffix('m') {
        (m, Duration::minutes)
    } else {
        (raw, Duration::hours)
    };
    let n: i64 = digits.parse().map_err(|_| bad())?;
    if n <= 0 {
        return Err(bad());
    }
    Ok(unit(n))
}
