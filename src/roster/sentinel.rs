use super::models::{PlayerPerMinuteRecord, PlayerRecord};

const SENTINEL_NAME: &str = "total";

/// Anything in a roster that carries a player name.
pub trait RosterEntry {
    fn player_name(&self) -> &str;
}

impl RosterEntry for PlayerRecord {
    fn player_name(&self) -> &str {
        &self.name
    }
}

impl RosterEntry for PlayerPerMinuteRecord {
    fn player_name(&self) -> &str {
        &self.name
    }
}

/// Aggregate rows (team totals) injected by the backend are named "total".
pub fn is_sentinel(name: &str) -> bool {
    name.trim().to_lowercase() == SENTINEL_NAME
}

/// Drop sentinel rows, keeping the remaining entries in their original order.
pub fn without_sentinels<T: RosterEntry>(entries: Vec<T>) -> Vec<T> {
    entries
        .into_iter()
        .filter(|entry| !is_sentinel(entry.player_name()))
        .collect()
}
