use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors reported by a roster backend. Messages are client-safe: stores log
/// driver detail themselves and only surface a summary here.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    Query(String),

    #[error("{0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn text(name: &'static str) -> Column {
    Column { name, kind: ColumnKind::Text }
}

const fn number(name: &'static str) -> Column {
    Column { name, kind: ColumnKind::Number }
}

/// Explicit column list requested from the backend.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    columns: &'static [Column],
}

impl Projection {
    pub const fn new(columns: &'static [Column]) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|c| c.name)
    }
}

/// Full player row as exposed by the raw stats endpoint.
pub const ROSTER_PROJECTION: Projection = Projection::new(&[
    text("name"),
    text("position"),
    number("pts"),
    number("ast"),
    number("reb"),
    number("tpg"),
    number("fpg"),
    number("mpg"),
    number("fg_pct"),
    number("three_pct"),
]);

/// Counting stats needed for per-minute rates.
pub const PER_MINUTE_PROJECTION: Projection = Projection::new(&[
    text("name"),
    text("position"),
    number("pts"),
    number("ast"),
    number("reb"),
    number("tpg"),
    number("fpg"),
    number("mpg"),
]);

/// System of record for player statistics.
///
/// `Ok(None)` means the backend answered without data, which callers treat
/// as a failure just like an explicit error.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Rows in the backend's natural order, one JSON object per player.
    async fn query(&self, projection: Projection) -> Result<Option<Vec<Value>>, BackendError>;

    async fn ping(&self) -> Result<(), BackendError>;
}
