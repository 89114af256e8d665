use axum::{extract::State, http::HeaderMap, Json};

use crate::app::AppState;
use crate::error::ApiError;
use crate::roster::PlayerPerMinuteRecord;
use crate::services::fetch_per_minute;

/// GET /api/player-per-minute - Roster normalized to per-minute rates
///
/// Each rate is `round2(raw / safe_minutes(mpg))`; rows keep backend order.
pub async fn get(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<PlayerPerMinuteRecord>>, ApiError> {
    let Some(session) = state.sessions.get_session(&headers).await else {
        tracing::debug!("Rejected per-minute request without session");
        return Err(ApiError::unauthorized());
    };

    let records = fetch_per_minute(state.players.as_ref()).await?;
    tracing::debug!("Served {} per-minute rows to {}", records.len(), session.user.sub);

    Ok(Json(records))
}
