use std::ops::Range;

use half::{bf16, f16};
use serde::{Deserialize, Serialize};
use vectra_api::DataType;

use crate::error::CodecError;
use crate::registry::NativeType;
use crate::sparse::SparseVector;

// ════════════════════════════════════════════════════════════════
//  Array Data
// ════════════════════════════════════════════════════════════════

/// Rows of an `Array` column. Each row is a variable-length list of one
/// scalar element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayData {
    Bool(Vec<Vec<bool>>),
    Int8(Vec<Vec<i8>>),
    Int16(Vec<Vec<i16>>),
    Int32(Vec<Vec<i32>>),
    Int64(Vec<Vec<i64>>),
    Float(Vec<Vec<f32>>),
    Double(Vec<Vec<f64>>),
    String(Vec<Vec<String>>),
    #[serde(rename = "varchar")]
    VarChar(Vec<Vec<String>>),
    Json(Vec<Vec<String>>),
}

impl ArrayData {
    /// Empty container for `element_type`. Fails for types that cannot be
    /// array elements.
    pub fn new(element_type: DataType) -> Result<Self, CodecError> {
        Ok(match element_type {
            DataType::Bool => ArrayData::Bool(Vec::new()),
            DataType::Int8 => ArrayData::Int8(Vec::new()),
            DataType::Int16 => ArrayData::Int16(Vec::new()),
            DataType::Int32 => ArrayData::Int32(Vec::new()),
            DataType::Int64 => ArrayData::Int64(Vec::new()),
            DataType::Float => ArrayData::Float(Vec::new()),
            DataType::Double => ArrayData::Double(Vec::new()),
            DataType::String => ArrayData::String(Vec::new()),
            DataType::VarChar => ArrayData::VarChar(Vec::new()),
            DataType::Json => ArrayData::Json(Vec::new()),
            other => {
                return Err(CodecError::unsupported(format!(
                    "{other} cannot be an array element type"
                )));
            }
        })
    }

    pub fn element_type(&self) -> DataType {
        match self {
            ArrayData::Bool(_) => DataType::Bool,
            ArrayData::Int8(_) => DataType::Int8,
            ArrayData::Int16(_) => DataType::Int16,
            ArrayData::Int32(_) => DataType::Int32,
            ArrayData::Int64(_) => DataType::Int64,
            ArrayData::Float(_) => DataType::Float,
            ArrayData::Double(_) => DataType::Double,
            ArrayData::String(_) => DataType::String,
            ArrayData::VarChar(_) => DataType::VarChar,
            ArrayData::Json(_) => DataType::Json,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            ArrayData::Bool(r) => r.len(),
            ArrayData::Int8(r) => r.len(),
            ArrayData::Int16(r) => r.len(),
            ArrayData::Int32(r) => r.len(),
            ArrayData::Int64(r) => r.len(),
            ArrayData::Float(r) => r.len(),
            ArrayData::Double(r) => r.len(),
            ArrayData::String(r) | ArrayData::VarChar(r) | ArrayData::Json(r) => r.len(),
        }
    }

    /// Append one decoded row. The row must carry this container's element
    /// type.
    pub fn push_row(&mut self, row: ColumnData) -> Result<(), CodecError> {
        match (self, row) {
            (ArrayData::Bool(rows), ColumnData::Bool(v)) => rows.push(v),
            (ArrayData::Int8(rows), ColumnData::Int8(v)) => rows.push(v),
            (ArrayData::Int16(rows), ColumnData::Int16(v)) => rows.push(v),
            (ArrayData::Int32(rows), ColumnData::Int32(v)) => rows.push(v),
            (ArrayData::Int64(rows), ColumnData::Int64(v)) => rows.push(v),
            (ArrayData::Float(rows), ColumnData::Float(v)) => rows.push(v),
            (ArrayData::Double(rows), ColumnData::Double(v)) => rows.push(v),
            (ArrayData::String(rows), ColumnData::String(v)) => rows.push(v),
            (ArrayData::VarChar(rows), ColumnData::VarChar(v)) => rows.push(v),
            (ArrayData::Json(rows), ColumnData::Json(v)) => rows.push(v),
            (this, row) => {
                return Err(CodecError::shape(format!(
                    "array of {} cannot hold a {} row",
                    this.element_type(),
                    row.data_type()
                )));
            }
        }
        Ok(())
    }

    fn slice(&self, range: Range<usize>) -> Option<Self> {
        Some(match self {
            ArrayData::Bool(r) => ArrayData::Bool(r.get(range)?.to_vec()),
            ArrayData::Int8(r) => ArrayData::Int8(r.get(range)?.to_vec()),
            ArrayData::Int16(r) => ArrayData::Int16(r.get(range)?.to_vec()),
            ArrayData::Int32(r) => ArrayData::Int32(r.get(range)?.to_vec()),
            ArrayData::Int64(r) => ArrayData::Int64(r.get(range)?.to_vec()),
            ArrayData::Float(r) => ArrayData::Float(r.get(range)?.to_vec()),
            ArrayData::Double(r) => ArrayData::Double(r.get(range)?.to_vec()),
            ArrayData::String(r) => ArrayData::String(r.get(range)?.to_vec()),
            ArrayData::VarChar(r) => ArrayData::VarChar(r.get(range)?.to_vec()),
            ArrayData::Json(r) => ArrayData::Json(r.get(range)?.to_vec()),
        })
    }
}

// ════════════════════════════════════════════════════════════════
//  Column Data
// ════════════════════════════════════════════════════════════════

/// Typed values of one column. The variant is the column's `DataType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnData {
    Bool(Vec<bool>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    String(Vec<String>),
    #[serde(rename = "varchar")]
    VarChar(Vec<String>),
    /// JSON documents, opaque to the codec.
    Json(Vec<String>),
    Array(ArrayData),
    FloatVector(Vec<Vec<f32>>),
    Float16Vector(Vec<Vec<f16>>),
    #[serde(rename = "bfloat16_vector")]
    BFloat16Vector(Vec<Vec<bf16>>),
    /// `dim` is in bits; every row holds `ceil(dim / 8)` bytes.
    BinaryVector { dim: usize, rows: Vec<Vec<u8>> },
    SparseFloatVector(Vec<SparseVector<f32>>),
}

impl ColumnData {
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnData::Bool(_) => DataType::Bool,
            ColumnData::Int8(_) => DataType::Int8,
            ColumnData::Int16(_) => DataType::Int16,
            ColumnData::Int32(_) => DataType::Int32,
            ColumnData::Int64(_) => DataType::Int64,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::Double(_) => DataType::Double,
            ColumnData::String(_) => DataType::String,
            ColumnData::VarChar(_) => DataType::VarChar,
            ColumnData::Json(_) => DataType::Json,
            ColumnData::Array(_) => DataType::Array,
            ColumnData::FloatVector(_) => DataType::FloatVector,
            ColumnData::Float16Vector(_) => DataType::Float16Vector,
            ColumnData::BFloat16Vector(_) => DataType::BFloat16Vector,
            ColumnData::BinaryVector { .. } => DataType::BinaryVector,
            ColumnData::SparseFloatVector(_) => DataType::SparseFloatVector,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            ColumnData::Bool(v) => v.len(),
            ColumnData::Int8(v) => v.len(),
            ColumnData::Int16(v) => v.len(),
            ColumnData::Int32(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Double(v) => v.len(),
            ColumnData::String(v) | ColumnData::VarChar(v) | ColumnData::Json(v) => v.len(),
            ColumnData::Array(a) => a.row_count(),
            ColumnData::FloatVector(v) => v.len(),
            ColumnData::Float16Vector(v) => v.len(),
            ColumnData::BFloat16Vector(v) => v.len(),
            ColumnData::BinaryVector { rows, .. } => rows.len(),
            ColumnData::SparseFloatVector(v) => v.len(),
        }
    }

    /// Rows `range` as an independently owned copy. `None` when the range
    /// is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> Option<Self> {
        Some(match self {
            ColumnData::Bool(v) => ColumnData::Bool(v.get(range)?.to_vec()),
            ColumnData::Int8(v) => ColumnData::Int8(v.get(range)?.to_vec()),
            ColumnData::Int16(v) => ColumnData::Int16(v.get(range)?.to_vec()),
            ColumnData::Int32(v) => ColumnData::Int32(v.get(range)?.to_vec()),
            ColumnData::Int64(v) => ColumnData::Int64(v.get(range)?.to_vec()),
            ColumnData::Float(v) => ColumnData::Float(v.get(range)?.to_vec()),
            ColumnData::Double(v) => ColumnData::Double(v.get(range)?.to_vec()),
            ColumnData::String(v) => ColumnData::String(v.get(range)?.to_vec()),
            ColumnData::VarChar(v) => ColumnData::VarChar(v.get(range)?.to_vec()),
            ColumnData::Json(v) => ColumnData::Json(v.get(range)?.to_vec()),
            ColumnData::Array(a) => ColumnData::Array(a.slice(range)?),
            ColumnData::FloatVector(v) => ColumnData::FloatVector(v.get(range)?.to_vec()),
            ColumnData::Float16Vector(v) => ColumnData::Float16Vector(v.get(range)?.to_vec()),
            ColumnData::BFloat16Vector(v) => ColumnData::BFloat16Vector(v.get(range)?.to_vec()),
            ColumnData::BinaryVector { dim, rows } => ColumnData::BinaryVector {
                dim: *dim,
                rows: rows.get(range)?.to_vec(),
            },
            ColumnData::SparseFloatVector(v) => {
                ColumnData::SparseFloatVector(v.get(range)?.to_vec())
            }
        })
    }
}

// ════════════════════════════════════════════════════════════════
//  Column
// ════════════════════════════════════════════════════════════════

/// A named, homogeneous sequence of row values.
///
/// `name` is absent for query-only columns. `is_dynamic` marks the
/// schema-less side-channel column, which always holds JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub name: Option<String>,
    pub data: ColumnData,
    #[serde(default)]
    pub is_dynamic: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: Some(name.into()),
            data,
            is_dynamic: false,
        }
    }

    pub fn unnamed(data: ColumnData) -> Self {
        Self {
            name: None,
            data,
            is_dynamic: false,
        }
    }

    /// Column whose type is inferred from the native value type.
    pub fn from_values<T: NativeType>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::new(name, T::into_column_data(values))
    }

    /// Binary vectors from whole rows; the bit dimension is taken from the
    /// first row.
    pub fn binary_vectors(name: impl Into<String>, rows: Vec<Vec<u8>>) -> Self {
        let dim = rows.first().map_or(0, |r| r.len() * 8);
        Self::new(name, ColumnData::BinaryVector { dim, rows })
    }

    /// Binary vectors cut from a flat buffer in `ceil(dim_bits / 8)`-byte
    /// rows. A trailing partial row is kept as a shorter final row.
    pub fn binary_vectors_from_bytes(
        name: impl Into<String>,
        bytes: &[u8],
        dim_bits: usize,
    ) -> Result<Self, CodecError> {
        let rows = chunk_binary_rows(bytes, dim_bits)?;
        Ok(Self::new(name, ColumnData::BinaryVector { dim: dim_bits, rows }))
    }

    pub fn sparse_vectors(name: impl Into<String>, rows: Vec<SparseVector<f32>>) -> Self {
        Self::new(name, ColumnData::SparseFloatVector(rows))
    }

    pub fn with_dynamic(mut self, is_dynamic: bool) -> Self {
        self.is_dynamic = is_dynamic;
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    /// Element type, only for array columns.
    pub fn element_type(&self) -> Option<DataType> {
        match &self.data {
            ColumnData::Array(a) => Some(a.element_type()),
            _ => None,
        }
    }

    pub fn row_count(&self) -> usize {
        self.data.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn slice(&self, range: Range<usize>) -> Option<Self> {
        Some(Self {
            name: self.name.clone(),
            data: self.data.slice(range)?,
            is_dynamic: self.is_dynamic,
        })
    }
}

/// Split a flat binary-vector buffer into rows of `ceil(dim_bits / 8)` bytes.
pub(crate) fn chunk_binary_rows(bytes: &[u8], dim_bits: usize) -> Result<Vec<Vec<u8>>, CodecError> {
    if dim_bits == 0 {
        return Err(CodecError::shape("binary vector dimension is zero"));
    }
    let row_len = dim_bits.div_ceil(8);
    Ok(bytes.chunks(row_len).map(<[u8]>::to_vec).collect())
}
