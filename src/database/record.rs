use serde::de::DeserializeOwned;
use serde_json::Value;

use super::store::{ColumnKind, Projection};

/// Errors raised while turning backend rows into typed records
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordError {
    #[error("Row {row} is not a JSON object")]
    NotAnObject { row: usize },
    #[error("Row {row} is missing field '{field}'")]
    MissingField { row: usize, field: &'static str },
    #[error("Row {row} has null '{field}'")]
    NullField { row: usize, field: &'static str },
    #[error("Row {row} has non-{expected} '{field}': {value}")]
    InvalidType {
        row: usize,
        field: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("Row {row} could not be decoded: {reason}")]
    Decode { row: usize, reason: String },
}

fn check_row(row: usize, value: &Value, projection: Projection) -> Result<(), RecordError> {
    let object = value.as_object().ok_or(RecordError::NotAnObject { row })?;

    for column in projection.columns() {
        let field = column.name;
        let cell = object
            .get(field)
            .ok_or(RecordError::MissingField { row, field })?;

        let (ok, expected) = match column.kind {
            ColumnKind::Text => (cell.is_string(), "string"),
            ColumnKind::Number => (cell.is_number(), "numeric"),
        };

        if cell.is_null() {
            return Err(RecordError::NullField { row, field });
        }
        if !ok {
            return Err(RecordError::InvalidType {
                row,
                field,
                expected,
                value: cell.to_string(),
            });
        }
    }

    Ok(())
}

/// Validate every row against the projection, then decode into `T`.
///
/// Fails on the first offending row; no partial results are returned.
pub fn decode_rows<T: DeserializeOwned>(
    rows: Vec<Value>,
    projection: Projection,
) -> Result<Vec<T>, RecordError> {
    rows.into_iter()
        .enumerate()
        .map(|(row, value)| {
            check_row(row, &value, projection)?;
            serde_json::from_value(value).map_err(|e| RecordError::Decode {
                row,
                reason: e.to_string(),
            })
        })
        .collect()
}
