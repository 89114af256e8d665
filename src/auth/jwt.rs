use async_trait::async_trait;
use axum::{
    extract::Request,
    http::{header, HeaderMap, Method, Uri},
    middleware::Next,
    response::{IntoResponse, Json, Redirect, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{debug, warn};

use super::session::{Claims, Session};
use super::SessionValidator;
use crate::config::AuthConfig;
use crate::error::ApiError;

pub const LOGIN_ROUTE: &str = "/auth/login";
pub const LOGOUT_ROUTE: &str = "/auth/logout";
pub const PROFILE_ROUTE: &str = "/auth/profile";

/// Validates HS256 session tokens from the session cookie or a bearer header
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    cookie_name: String,
    provider_login_url: Option<String>,
}

impl JwtSessionValidator {
    pub fn new(secret: &str, cookie_name: impl Into<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            cookie_name: cookie_name.into(),
            provider_login_url: None,
        }
    }

    pub fn with_provider_login_url(mut self, url: impl Into<String>) -> Self {
        self.provider_login_url = Some(url.into());
        self
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        let validator = Self::new(&config.secret, &config.session_cookie);
        match &config.provider_login_url {
            Some(url) => validator.with_provider_login_url(url),
            None => validator,
        }
    }

    fn decode_session(&self, token: &str) -> Option<Session> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims.into_session(),
            Err(e) => {
                debug!("Session token rejected: {}", e);
                None
            }
        }
    }

    /// GET /auth/login - hand the browser to the identity provider
    fn login(&self, uri: &Uri) -> Response {
        let Some(provider) = &self.provider_login_url else {
            warn!("Login requested but no identity provider login URL is configured");
            return ApiError::service_unavailable("Login provider not configured").into_response();
        };

        let mut target = match url::Url::parse(provider) {
            Ok(url) => url,
            Err(e) => {
                warn!("Invalid identity provider login URL '{}': {}", provider, e);
                return ApiError::service_unavailable("Login provider not configured").into_response();
            }
        };

        target
            .query_pairs_mut()
            .append_pair("returnTo", &return_to(uri));

        Redirect::temporary(target.as_str()).into_response()
    }

    /// GET /auth/logout - drop the session cookie locally
    fn logout(&self) -> Response {
        let expired = format!(
            "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
            self.cookie_name
        );
        ([(header::SET_COOKIE, expired)], Redirect::temporary("/")).into_response()
    }

    /// GET /auth/profile - current session user
    async fn profile(&self, headers: &HeaderMap) -> Response {
        match self.get_session(headers).await {
            Some(session) => Json(session.user).into_response(),
            None => ApiError::unauthorized().into_response(),
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn get_session(&self, headers: &HeaderMap) -> Option<Session> {
        let token = session_cookie(headers, &self.cookie_name).or_else(|| bearer_token(headers))?;
        self.decode_session(&token)
    }

    async fn middleware(&self, request: Request, next: Next) -> Response {
        if *request.method() != Method::GET {
            return next.run(request).await;
        }

        let path = request.uri().path().to_string();
        match path.as_str() {
            LOGIN_ROUTE => self.login(request.uri()),
            LOGOUT_ROUTE => self.logout(),
            PROFILE_ROUTE => {
                // Body is not Sync; keep only the headers across the await
                let headers = request.headers().clone();
                self.profile(&headers).await
            }
            _ => next.run(request).await,
        }
    }
}

/// Local path to come back to after login; anything else falls back to `/`
fn return_to(uri: &Uri) -> String {
    uri.query()
        .and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| *key == "returnTo")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or_else(|| "/".to_string())
}

fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{issue_session_token, SessionUser};
    use axum::http::HeaderValue;
    use chrono::Duration;

    const SECRET: &str = "unit-test-secret";

    fn user(sub: &str) -> SessionUser {
        SessionUser {
            sub: sub.to_string(),
            name: Some("Jordan".to_string()),
            email: None,
        }
    }

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn reads_session_from_cookie() {
        let token = issue_session_token(SECRET, user("auth0|1"), Duration::hours(1)).unwrap();
        let validator = JwtSessionValidator::new(SECRET, "appSession");
        let headers = headers(header::COOKIE, &format!("theme=dark; appSession={}", token));

        let session = validator.get_session(&headers).await.unwrap();
        assert_eq!(session.user.sub, "auth0|1");
        assert_eq!(session.user.name.as_deref(), Some("Jordan"));
    }

    #[tokio::test]
    async fn reads_session_from_bearer_header() {
        let token = issue_session_token(SECRET, user("auth0|2"), Duration::hours(1)).unwrap();
        let validator = JwtSessionValidator::new(SECRET, "appSession");
        let headers = headers(header::AUTHORIZATION, &format!("Bearer {}", token));

        assert!(validator.get_session(&headers).await.is_some());
    }

    #[tokio::test]
    async fn rejects_wrong_secret_expired_and_anonymous_tokens() {
        let validator = JwtSessionValidator::new(SECRET, "appSession");

        let forged = issue_session_token("other-secret", user("auth0|3"), Duration::hours(1)).unwrap();
        let expired = issue_session_token(SECRET, user("auth0|3"), Duration::hours(-2)).unwrap();
        let anonymous = issue_session_token(SECRET, user(" "), Duration::hours(1)).unwrap();

        for token in [forged, expired, anonymous, "not-a-jwt".to_string()] {
            let headers = headers(header::COOKIE, &format!("appSession={}", token));
            assert!(validator.get_session(&headers).await.is_none());
        }
        assert!(validator.get_session(&HeaderMap::new()).await.is_none());
    }

    #[test]
    fn return_to_only_accepts_local_paths() {
        let local: Uri = "/auth/login?returnTo=/dashboard/players".parse().unwrap();
        let external: Uri = "/auth/login?returnTo=https://evil.example".parse().unwrap();
        let protocol_relative: Uri = "/auth/login?returnTo=//evil.example".parse().unwrap();
        let missing: Uri = "/auth/login".parse().unwrap();

        assert_eq!(return_to(&local), "/dashboard/players");
        assert_eq!(return_to(&external), "/");
        assert_eq!(return_to(&protocol_relative), "/");
        assert_eq!(return_to(&missing), "/");
    }

    #[test]
    fn return_to_decodes_escaped_deep_link() {
        let uri: Uri = "/auth/login?returnTo=/dashboard/a%26b%3Dc%2Bd".parse().unwrap();
        assert_eq!(return_to(&uri), "/dashboard/a&b=c+d");
    }
}
