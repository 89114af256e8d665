#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    extract::Request as AxumRequest,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::Response,
    Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;

use roster_stats_api::auth::{issue_session_token, JwtSessionValidator, Session, SessionUser, SessionValidator};
use roster_stats_api::config::SecurityConfig;
use roster_stats_api::database::{BackendError, PlayerStore, Projection};
use roster_stats_api::middleware::EdgeGate;
use roster_stats_api::{app, AppState};

pub const SECRET: &str = "integration-test-secret";
pub const COOKIE: &str = "appSession";

/// What the fake backend answers with
#[derive(Clone)]
pub enum Reply {
    Rows(Vec<Value>),
    Null,
    Fail(String),
}

/// Backend double that counts queries and applies the projection like a real store
pub struct RecordingStore {
    reply: Reply,
    queries: AtomicUsize,
}

impl RecordingStore {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            queries: AtomicUsize::new(0),
        })
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerStore for RecordingStore {
    async fn query(&self, projection: Projection) -> Result<Option<Vec<Value>>, BackendError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Rows(rows) => Ok(Some(
                rows.iter()
                    .map(|row| {
                        let projected: serde_json::Map<String, Value> = projection
                            .column_names()
                            .filter_map(|name| row.get(name).map(|v| (name.to_string(), v.clone())))
                            .collect();
                        Value::Object(projected)
                    })
                    .collect(),
            )),
            Reply::Null => Ok(None),
            Reply::Fail(message) => Err(BackendError::Query(message.clone())),
        }
    }

    async fn ping(&self) -> Result<(), BackendError> {
        match &self.reply {
            Reply::Fail(message) => Err(BackendError::Unavailable(message.clone())),
            _ => Ok(()),
        }
    }
}

pub fn player(name: &str, pts: f64, ast: f64, reb: f64, tpg: f64, fpg: f64, mpg: f64) -> Value {
    json!({
        "id": format!("id-{}", name),
        "name": name,
        "position": "G",
        "pts": pts, "ast": ast, "reb": reb, "tpg": tpg, "fpg": fpg, "mpg": mpg,
        "fg_pct": 45.5, "three_pct": 38.2
    })
}

/// Roster with a team-total row in the middle
pub fn sample_roster() -> Vec<Value> {
    vec![
        player("J. Smith", 20.0, 5.0, 8.0, 3.0, 2.0, 0.0),
        player("Total", 45.0, 12.0, 15.0, 5.0, 5.0, 40.0),
        player("A. Jones", 25.0, 7.0, 7.0, 2.0, 3.0, 10.0),
    ]
}

pub fn jwt_sessions() -> JwtSessionValidator {
    JwtSessionValidator::new(SECRET, COOKIE).with_provider_login_url("https://idp.example.com/authorize")
}

/// Session validator that counts how often a session is looked up
pub struct CountingSessions {
    inner: JwtSessionValidator,
    lookups: AtomicUsize,
}

impl CountingSessions {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: jwt_sessions(),
            lookups: AtomicUsize::new(0),
        })
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionValidator for CountingSessions {
    async fn get_session(&self, headers: &HeaderMap) -> Option<Session> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_session(headers).await
    }

    async fn middleware(&self, request: AxumRequest, next: Next) -> Response {
        self.inner.middleware(request, next).await
    }
}

pub fn build_app(sessions: Arc<dyn SessionValidator>, store: Arc<RecordingStore>, security: SecurityConfig) -> Router {
    let state = AppState::new(sessions, store, EdgeGate::new("/auth/login", "/dashboard"));
    app(state, &security)
}

pub fn test_app(store: Arc<RecordingStore>) -> Router {
    let security = SecurityConfig {
        enable_cors: false,
        cors_origins: Vec::new(),
    };
    build_app(Arc::new(jwt_sessions()), store, security)
}

pub fn session_token(sub: &str) -> String {
    let user = SessionUser {
        sub: sub.to_string(),
        name: Some("Test User".to_string()),
        email: Some("test@example.com".to_string()),
    };
    issue_session_token(SECRET, user, Duration::hours(1)).expect("sign token")
}

pub fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("{}={}", COOKIE, token));
    }
    builder.body(Body::empty()).expect("request")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: Router, request: Request<Body>) -> Result<TestResponse> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok(TestResponse { status, headers, body })
}

pub fn location(response: &TestResponse) -> Option<&str> {
    response
        .headers
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
