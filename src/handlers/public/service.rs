use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - Service description
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Roster Stats API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "players": "/api/players (session required)",
            "per_minute": "/api/player-per-minute (session required)",
            "dashboard": "/dashboard[/players|/per-minute] (session required, redirects to login)",
            "auth": "/auth/login, /auth/logout, /auth/profile",
            "health": "/health",
        }
    }))
}

/// GET /health - Liveness plus a backend ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.players.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "error": "database unavailable"
                })),
            )
        }
    }
}
