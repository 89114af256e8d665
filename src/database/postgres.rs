use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

use super::store::{BackendError, PlayerStore, Projection};
use crate::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Roster backed by a Postgres table
pub struct PgPlayerStore {
    pool: PgPool,
    table: String,
}

impl PgPlayerStore {
    pub async fn connect(config: &DatabaseConfig, table: &str) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(url)?;

        info!("Created database pool for roster table: {}", table);
        Self::new(pool, table)
    }

    pub fn new(pool: PgPool, table: &str) -> Result<Self, DatabaseError> {
        if !is_valid_identifier(table) {
            return Err(DatabaseError::InvalidTableName(table.to_string()));
        }
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }

    fn select_sql(&self, projection: Projection) -> String {
        let columns = projection
            .column_names()
            .map(quote_identifier)
            .collect::<Vec<_>>()
            .join(", ");

        // json_agg keeps scan order; COALESCE turns an empty table into []
        format!(
            "SELECT COALESCE(json_agg(t), '[]'::json) FROM (SELECT {} FROM {}) t",
            columns,
            quote_identifier(&self.table)
        )
    }
}

#[async_trait]
impl PlayerStore for PgPlayerStore {
    async fn query(&self, projection: Projection) -> Result<Option<Vec<Value>>, BackendError> {
        let sql = self.select_sql(projection);

        let result = sqlx::query_scalar::<_, Option<Value>>(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(client_safe)?;

        match result.flatten() {
            Some(Value::Array(rows)) => Ok(Some(rows)),
            Some(other) => {
                error!("Roster query returned non-array JSON: {}", other);
                Err(BackendError::Query("Unexpected response from database".to_string()))
            }
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), BackendError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(client_safe)?;
        Ok(())
    }
}

/// Log the driver error and keep table/column detail away from clients
fn client_safe(err: sqlx::Error) -> BackendError {
    error!("SQLx error: {}", err);
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
            BackendError::Unavailable("Database temporarily unavailable".to_string())
        }
        _ => BackendError::Query("Database query failed".to_string()),
    }
}

fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
