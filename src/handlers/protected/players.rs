use axum::{extract::State, http::HeaderMap, Json};

use crate::app::AppState;
use crate::error::ApiError;
use crate::roster::PlayerRecord;
use crate::services::fetch_roster;

/// GET /api/players - Unmodified roster
///
/// Responds 401 before touching the backend when no session is present.
/// No sorting or sentinel filtering happens here.
pub async fn get(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<PlayerRecord>>, ApiError> {
    let Some(session) = state.sessions.get_session(&headers).await else {
        tracing::debug!("Rejected roster request without session");
        return Err(ApiError::unauthorized());
    };

    let players = fetch_roster(state.players.as_ref()).await?;
    tracing::debug!("Served {} roster rows to {}", players.len(), session.user.sub);

    Ok(Json(players))
}
