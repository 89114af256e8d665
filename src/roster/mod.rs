pub mod models;
pub mod per_minute;
pub mod sentinel;

pub use models::{PlayerPerMinuteRecord, PlayerRecord, PlayerStatLine};
pub use per_minute::{per_minute_roster, round2, safe_minutes, to_per_minute, PerMinuteError};
pub use sentinel::{is_sentinel, without_sentinels, RosterEntry};
