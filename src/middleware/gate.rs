use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::app::AppState;
use crate::error::ApiError;

/// Path prefixes (after the leading `/`) that never pass through the gate:
/// static assets, crawler files and the identity provider's own API.
pub const EXCLUDED_PREFIXES: &[&str] = &[
    "_next/static",
    "_next/image",
    "favicon.ico",
    "sitemap.xml",
    "robots.txt",
    "api/auth",
];

/// Session-gated data endpoints; rejected with 401 rather than redirected.
pub const API_PREFIX: &str = "/api/";

/// Characters that would change the meaning of a `returnTo` query value.
/// `/` stays literal so deep links remain readable.
const RETURN_TO: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'<')
    .add(b'>');

#[derive(Debug, Clone)]
pub struct PathMatcher {
    excluded: Vec<String>,
}

impl Default for PathMatcher {
    fn default() -> Self {
        Self::new(EXCLUDED_PREFIXES.iter().copied())
    }
}

impl PathMatcher {
    pub fn new<'a>(excluded: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            excluded: excluded.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn is_gated(&self, path: &str) -> bool {
        let relative = path.strip_prefix('/').unwrap_or(path);
        !self
            .excluded
            .iter()
            .any(|prefix| relative.starts_with(prefix.as_str()))
    }
}

/// Edge access gate settings
#[derive(Debug, Clone)]
pub struct EdgeGate {
    pub matcher: PathMatcher,
    pub login_path: String,
    pub protected_prefix: String,
}

impl EdgeGate {
    pub fn new(login_path: impl Into<String>, protected_prefix: impl Into<String>) -> Self {
        Self {
            matcher: PathMatcher::default(),
            login_path: login_path.into(),
            protected_prefix: protected_prefix.into(),
        }
    }

    pub fn is_protected(&self, path: &str) -> bool {
        path.starts_with(&self.protected_prefix)
    }

    /// Paths the gate refuses to forward without a session
    pub fn requires_session(&self, path: &str) -> bool {
        self.is_protected(path) || path.starts_with(API_PREFIX)
    }

    /// Login URL that brings the user back to `path` afterwards
    pub fn login_redirect(&self, path: &str) -> String {
        format!(
            "{}?returnTo={}",
            self.login_path,
            utf8_percent_encode(path, RETURN_TO)
        )
    }

    fn reject(&self, path: &str) -> Response {
        if self.is_protected(path) {
            tracing::debug!("Redirecting unauthenticated request for {} to login", path);
            Redirect::temporary(&self.login_redirect(path)).into_response()
        } else {
            ApiError::unauthorized().into_response()
        }
    }
}

/// Runs in front of every route. Session-gated paths need a valid session
/// here, independently of the handler's own check; everything gated then
/// goes through the session validator's middleware, and a 401 on a
/// protected page becomes a login redirect.
pub async fn intercept(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    if !state.gate.matcher.is_gated(&path) {
        return next.run(request).await;
    }

    if state.gate.requires_session(&path) {
        // Body is not Sync; keep only the headers across the await
        let headers = request.headers().clone();
        if state.sessions.get_session(&headers).await.is_none() {
            return state.gate.reject(&path);
        }
    }

    let response = state.sessions.middleware(request, next).await;

    if response.status() == StatusCode::UNAUTHORIZED && state.gate.is_protected(&path) {
        return state.gate.reject(&path);
    }

    response
}
