use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::SessionValidator;
use crate::config::SecurityConfig;
use crate::database::PlayerStore;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::{intercept, EdgeGate};

/// Shared, read-only request context
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionValidator>,
    pub players: Arc<dyn PlayerStore>,
    pub gate: Arc<EdgeGate>,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionValidator>,
        players: Arc<dyn PlayerStore>,
        gate: EdgeGate,
    ) -> Self {
        Self {
            sessions,
            players,
            gate: Arc::new(gate),
        }
    }
}

pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    Router::new()
        // Public
        .route("/", get(public::service::root))
        .route("/health", get(public::service::health))
        // Session-gated API and dashboard views
        .merge(api_routes())
        .merge(dashboard_routes())
        .fallback(not_found)
        // Edge gate wraps every route, including the fallback
        .layer(middleware::from_fn_with_state(state.clone(), intercept))
        .with_state(state)
        .layer(cors_layer(security))
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/players", get(protected::players::get))
        .route("/api/player-per-minute", get(protected::per_minute::get))
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(protected::dashboard::summary))
        .route("/dashboard/*view", get(protected::dashboard::view))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| {
            if origin == "*" {
                // Credentialed CORS cannot answer with a wildcard origin
                tracing::error!("Ignoring wildcard CORS origin; list allowed origins explicitly");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
