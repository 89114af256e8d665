use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity carried by a verified session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A server-verified claim that the request belongs to an authenticated user
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: SessionUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// `None` when `ttl` pushes the expiry past the representable range
    pub fn new(user: SessionUser, ttl: Duration) -> Option<Self> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl)?;
        Some(Self {
            sub: user.sub,
            name: user.name,
            email: user.email,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Claims without a subject do not identify anyone
    pub fn into_session(self) -> Option<Session> {
        if self.sub.trim().is_empty() {
            return None;
        }
        Some(Session {
            user: SessionUser {
                sub: self.sub,
                name: self.name,
                email: self.email,
            },
        })
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Session secret is not configured")]
    InvalidSecret,

    #[error("Session lifetime is out of range")]
    InvalidTtl,

    #[error("Session token generation error: {0}")]
    TokenGeneration(String),
}

/// Sign a session token the validator will accept. Session issuance belongs
/// to the identity provider; this exists for development and tests.
pub fn issue_session_token(secret: &str, user: SessionUser, ttl: Duration) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let claims = Claims::new(user, ttl).ok_or(AuthError::InvalidTtl)?;
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}
