use crate::database::{decode_rows, PlayerStore, PER_MINUTE_PROJECTION, ROSTER_PROJECTION};
use crate::error::ApiError;
use crate::roster::{per_minute_roster, PlayerPerMinuteRecord, PlayerRecord, PlayerStatLine};

/// Full roster in the backend's natural order. Sentinel rows are kept.
pub async fn fetch_roster(store: &dyn PlayerStore) -> Result<Vec<PlayerRecord>, ApiError> {
    let rows = store.query(ROSTER_PROJECTION).await?.ok_or_else(|| {
        tracing::warn!("Roster query returned no data");
        ApiError::missing_data()
    })?;

    Ok(decode_rows(rows, ROSTER_PROJECTION)?)
}

/// Per-minute rates for every roster row, in backend order. Sentinel rows are kept.
pub async fn fetch_per_minute(store: &dyn PlayerStore) -> Result<Vec<PlayerPerMinuteRecord>, ApiError> {
    let rows = store.query(PER_MINUTE_PROJECTION).await?.ok_or_else(|| {
        tracing::warn!("Per-minute query returned no data");
        ApiError::missing_data()
    })?;

    let lines: Vec<PlayerStatLine> = decode_rows(rows, PER_MINUTE_PROJECTION)?;
    Ok(per_minute_roster(lines)?)
}
