//! Schema-less side-channel column.
//!
//! Keys outside the collection schema travel as one JSON object per row in
//! a single Json column flagged dynamic.

use serde_json::{Map, Value};

use crate::column::{Column, ColumnData};
use crate::error::CodecError;

pub fn encode_rows(name: &str, rows: &[Map<String, Value>]) -> Result<Column, CodecError> {
    if rows.is_empty() {
        return Err(CodecError::EmptyColumn);
    }
    let docs = rows
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Column::new(name, ColumnData::Json(docs)).with_dynamic(true))
}

/// Parse every row of a dynamic column back into a JSON object.
pub fn decode_rows(column: &Column) -> Result<Vec<Map<String, Value>>, CodecError> {
    if !column.is_dynamic {
        return Err(CodecError::validation(format!(
            "column '{}' is not dynamic",
            column.name()
        )));
    }
    let ColumnData::Json(docs) = &column.data else {
        return Err(CodecError::validation(format!(
            "dynamic column holds {}, expected json",
            column.data_type()
        )));
    };
    docs.iter()
        .enumerate()
        .map(|(row, doc)| -> Result<Map<String, Value>, CodecError> {
            match serde_json::from_str::<Value>(doc)? {
                Value::Object(map) => Ok(map),
                other => Err(CodecError::validation(format!(
                    "dynamic row {row} is not an object: {other}"
                ))),
            }
        })
        .collect()
}
