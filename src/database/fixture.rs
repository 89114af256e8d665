use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

use super::store::{BackendError, PlayerStore, Projection};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Roster file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Roster file must contain a JSON array of player objects")]
    NotAnArray,
}

/// Read-only roster held in memory, loaded from a JSON array of player rows.
#[derive(Debug, Clone)]
pub struct StaticPlayerStore {
    rows: Vec<Value>,
}

impl StaticPlayerStore {
    pub fn from_rows(rows: Vec<Value>) -> Self {
        Self { rows }
    }

    pub fn from_json(value: Value) -> Result<Self, FixtureError> {
        match value {
            Value::Array(rows) => Ok(Self::from_rows(rows)),
            _ => Err(FixtureError::NotAnArray),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(serde_json::from_str(&contents)?)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn project(row: &Value, projection: Projection) -> Value {
    match row.as_object() {
        Some(object) => {
            let projected: Map<String, Value> = projection
                .column_names()
                .filter_map(|name| object.get(name).map(|v| (name.to_string(), v.clone())))
                .collect();
            Value::Object(projected)
        }
        // Left as-is so row validation reports it
        None => row.clone(),
    }
}

#[async_trait]
impl PlayerStore for StaticPlayerStore {
    async fn query(&self, projection: Projection) -> Result<Option<Vec<Value>>, BackendError> {
        Ok(Some(self.rows.iter().map(|row| project(row, projection)).collect()))
    }

    async fn ping(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
