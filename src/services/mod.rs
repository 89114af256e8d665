pub mod roster_service;

pub use roster_service::{fetch_per_minute, fetch_roster};
