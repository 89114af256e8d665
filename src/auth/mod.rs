use async_trait::async_trait;
use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

pub mod jwt;
pub mod session;

pub use jwt::JwtSessionValidator;
pub use session::{issue_session_token, AuthError, Claims, Session, SessionUser};

/// Identity provider seam.
///
/// `get_session` is called by the edge gate for session-gated paths and again
/// by every protected handler. `middleware` runs in
/// the edge gate for every gated request and may answer it outright (login,
/// logout, profile); otherwise it must hand the request to `next`.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn get_session(&self, headers: &HeaderMap) -> Option<Session>;

    async fn middleware(&self, request: Request, next: Next) -> Response;
}
