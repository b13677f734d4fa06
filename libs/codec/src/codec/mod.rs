//! Column ↔ `FieldData` conversion.
//!
//! One [`ColumnCodec`] per payload family; [`FieldCodec`] dispatches on the
//! column's `DataType` outbound and on the wire discriminant inbound.

pub mod array;
pub mod dense;
pub mod scalar;
pub mod sparse;
mod values;

use vectra_api::{field_data, DataType, FieldData};

use crate::column::{Column, ColumnData};
use crate::config::CodecOptions;
use crate::error::CodecError;

pub use array::ArrayCodec;
pub use dense::DenseVectorCodec;
pub use scalar::ScalarCodec;
pub use sparse::SparseVectorCodec;

/// Codec for one family of column payloads.
///
/// - `encode()`: validates the column and builds the wire payload. Nothing
///   is produced unless the whole column is valid.
/// - `decode()`: rebuilds typed values from a payload tagged `data_type`.
pub trait ColumnCodec: Send + Sync {
    fn encode(&self, data: &ColumnData) -> Result<field_data::Field, CodecError>;
    fn decode(&self, data_type: DataType, field: &field_data::Field)
    -> Result<ColumnData, CodecError>;
}

/// Entry point used by the request-building layer.
pub struct FieldCodec {
    options: CodecOptions,
    scalar: ScalarCodec,
    dense: DenseVectorCodec,
    sparse: SparseVectorCodec,
    array: ArrayCodec,
}

impl Default for FieldCodec {
    fn default() -> Self {
        Self::new(CodecOptions::default())
    }
}

impl FieldCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self {
            scalar: ScalarCodec::new(options.narrowing),
            dense: DenseVectorCodec::new(options.scratch_pool_limit),
            sparse: SparseVectorCodec,
            array: ArrayCodec::new(options.narrowing),
            options,
        }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    fn codec_for(&self, data_type: DataType) -> Result<&dyn ColumnCodec, CodecError> {
        let codec: &dyn ColumnCodec = match data_type {
            DataType::Bool
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Float
            | DataType::Double
            | DataType::String
            | DataType::VarChar
            | DataType::Json => &self.scalar,
            DataType::Array => &self.array,
            DataType::BinaryVector
            | DataType::FloatVector
            | DataType::Float16Vector
            | DataType::BFloat16Vector => &self.dense,
            DataType::SparseFloatVector => &self.sparse,
            DataType::None => return Err(CodecError::unsupported("data type none has no codec")),
        };
        Ok(codec)
    }

    pub fn encode(&self, column: &Column) -> Result<FieldData, CodecError> {
        self.encode_inner(column).map_err(|e| e.with_field(column.name()))
    }

    fn encode_inner(&self, column: &Column) -> Result<FieldData, CodecError> {
        let data_type = column.data_type();
        if column.is_dynamic && data_type != DataType::Json {
            return Err(CodecError::validation(format!(
                "dynamic column must hold json, not {data_type}"
            )));
        }
        let field = self.codec_for(data_type)?.encode(&column.data)?;
        tracing::debug!(
            field = %column.name(),
            %data_type,
            rows = column.row_count(),
            "column encoded"
        );
        Ok(FieldData {
            data_type: data_type as i32,
            field_name: column.name.clone().unwrap_or_default(),
            field: Some(field),
            field_id: 0,
            is_dynamic: column.is_dynamic,
        })
    }

    pub fn decode(&self, field: &FieldData) -> Result<Column, CodecError> {
        self.decode_inner(field).map_err(|e| e.with_field(field.field_name.as_str()))
    }

    fn decode_inner(&self, field: &FieldData) -> Result<Column, CodecError> {
        let data_type = DataType::from_wire(field.data_type).ok_or_else(|| {
            CodecError::unsupported(format!("unknown wire data type {}", field.data_type))
        })?;
        if field.is_dynamic && data_type != DataType::Json {
            return Err(CodecError::shape(format!(
                "dynamic field carries {data_type}, expected json"
            )));
        }
        let payload = field
            .field
            .as_ref()
            .ok_or_else(|| CodecError::shape("field carries no payload"))?;
        let data = self.codec_for(data_type)?.decode(data_type, payload)?;
        tracing::debug!(
            field = %field.field_name,
            %data_type,
            rows = data.row_count(),
            "column decoded"
        );
        Ok(Column {
            name: (!field.field_name.is_empty()).then(|| field.field_name.clone()),
            data,
            is_dynamic: field.is_dynamic,
        })
    }

    /// Encode the columns of one insert batch. All columns must have the
    /// same row count.
    pub fn encode_batch(&self, columns: &[Column]) -> Result<Vec<FieldData>, CodecError> {
        let Some(first) = columns.first() else {
            return Err(CodecError::validation("batch has no columns"));
        };
        let expected = first.row_count();
        for column in &columns[1..] {
            if column.row_count() != expected {
                return Err(CodecError::RowCountMismatch {
                    field: column.name().to_string(),
                    expected,
                    actual: column.row_count(),
                });
            }
        }
        columns.iter().map(|c| self.encode(c)).collect()
    }

    pub fn decode_batch(&self, fields: &[FieldData]) -> Result<Vec<Column>, CodecError> {
        fields.iter().map(|f| self.decode(f)).collect()
    }

    /// Encode schema-less rows as the dynamic side-channel column.
    pub fn encode_dynamic(
        &self,
        rows: &[serde_json::Map<String, serde_json::Value>],
    ) -> Result<FieldData, CodecError> {
        let column = crate::dynamic::encode_rows(self.options.dynamic_field.as_str(), rows)?;
        self.encode(&column)
    }
}
