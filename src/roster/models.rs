use serde::{Deserialize, Serialize};

/// One row of the stored roster as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub position: String,
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
    pub tpg: f64,
    pub fpg: f64,
    pub mpg: f64,
    pub fg_pct: f64,
    pub three_pct: f64,
}

/// Counting stats projection consumed by the per-minute transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub name: String,
    pub position: String,
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
    pub tpg: f64,
    pub fpg: f64,
    pub mpg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPerMinuteRecord {
    pub name: String,
    pub position: String,
    pub mpg: f64,
    pub ppm: f64,
    pub apm: f64,
    pub rpm: f64,
    pub tpm: f64,
    pub fpm: f64,
}
