use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::SessionUser;
use crate::error::ApiError;
use crate::roster::{without_sentinels, PlayerPerMinuteRecord, PlayerRecord};
use crate::services::{fetch_per_minute, fetch_roster};

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub user: SessionUser,
    pub players: Vec<PlayerRecord>,
    pub per_minute: Vec<PlayerPerMinuteRecord>,
}

/// GET /dashboard - Both statistics views for the signed-in user, totals removed
pub async fn summary(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardSummary>, ApiError> {
    let Some(session) = state.sessions.get_session(&headers).await else {
        return Err(ApiError::unauthorized());
    };

    let players = without_sentinels(fetch_roster(state.players.as_ref()).await?);
    let per_minute = without_sentinels(fetch_per_minute(state.players.as_ref()).await?);

    Ok(Json(DashboardSummary {
        user: session.user,
        players,
        per_minute,
    }))
}

/// GET /dashboard/*view - A single view, totals removed
pub async fn view(
    State(state): State<AppState>,
    Path(view): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if state.sessions.get_session(&headers).await.is_none() {
        return Err(ApiError::unauthorized());
    }

    match view.trim_end_matches('/') {
        "players" => {
            let players = without_sentinels(fetch_roster(state.players.as_ref()).await?);
            Ok(Json(players).into_response())
        }
        "per-minute" => {
            let records = without_sentinels(fetch_per_minute(state.players.as_ref()).await?);
            Ok(Json(records).into_response())
        }
        other => Err(ApiError::not_found(format!("Unknown dashboard view '{}'", other))),
    }
}
