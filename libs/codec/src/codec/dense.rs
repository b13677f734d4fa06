use half::{bf16, f16};
use vectra_api::{field_data, vector_field::Data, DataType, VectorField};

use super::ColumnCodec;
use crate::column::{chunk_binary_rows, ColumnData};
use crate::error::CodecError;
use crate::scratch::ScratchBuffer;

// ═══════════════════════════════════════════════════════════════
//  Element layout
// ═══════════════════════════════════════════════════════════════

/// Fixed-width vector element with a little-endian wire layout.
///
/// Writes go through `to_le_bytes`, so the output is identical on big- and
/// little-endian hosts. Half-precision types are written as their raw
/// 16-bit patterns.
pub trait LeElement: Copy {
    const WIDTH: usize;

    fn write_le(self, out: &mut [u8]);
    fn read_le(bytes: &[u8]) -> Self;
}

impl LeElement for f32 {
    const WIDTH: usize = 4;

    fn write_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    fn read_le(b: &[u8]) -> Self {
        f32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }
}

impl LeElement for f16 {
    const WIDTH: usize = 2;

    fn write_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_bits().to_le_bytes());
    }

    fn read_le(b: &[u8]) -> Self {
        f16::from_bits(u16::from_le_bytes([b[0], b[1]]))
    }
}

impl LeElement for bf16 {
    const WIDTH: usize = 2;

    fn write_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_bits().to_le_bytes());
    }

    fn read_le(b: &[u8]) -> Self {
        bf16::from_bits(u16::from_le_bytes([b[0], b[1]]))
    }
}

/// Pack one row into a pooled buffer of exactly `row.len() * WIDTH` bytes.
pub(crate) fn pack_row<T: LeElement>(row: &[T], pool_limit: usize) -> ScratchBuffer {
    let mut buf = ScratchBuffer::acquire(row.len() * T::WIDTH, pool_limit);
    for (out, &value) in buf.chunks_exact_mut(T::WIDTH).zip(row) {
        value.write_le(out);
    }
    buf
}

/// Common row length. The first row is authoritative.
pub(crate) fn uniform_dimension(
    lengths: impl IntoIterator<Item = usize>,
) -> Result<usize, CodecError> {
    let mut lengths = lengths.into_iter();
    let dim = lengths.next().ok_or(CodecError::EmptyColumn)?;
    if dim == 0 {
        return Err(CodecError::validation("vector dimension is zero"));
    }
    for (i, len) in lengths.enumerate() {
        if len != dim {
            return Err(CodecError::DimensionMismatch {
                row: i + 1,
                expected: dim,
                actual: len,
            });
        }
    }
    Ok(dim)
}

/// Inverse of row-major packing: `bytes.len() / (dim * WIDTH)` rows.
pub fn decode_rows<T: LeElement>(bytes: &[u8], dim: usize) -> Result<Vec<Vec<T>>, CodecError> {
    if dim == 0 {
        return Err(CodecError::shape("vector dimension is zero"));
    }
    let row_bytes = dim
        .checked_mul(T::WIDTH)
        .ok_or_else(|| CodecError::shape(format!("vector dimension {dim} is too large")))?;
    if bytes.len() % row_bytes != 0 {
        return Err(CodecError::shape(format!(
            "{} bytes do not divide into rows of dimension {dim}",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(row_bytes)
        .map(|row| row.chunks_exact(T::WIDTH).map(T::read_le).collect())
        .collect())
}

// ═══════════════════════════════════════════════════════════════
//  DenseVectorCodec
// ═══════════════════════════════════════════════════════════════

/// Float32, Float16, BFloat16 and binary vector columns.
pub struct DenseVectorCodec {
    pool_limit: usize,
}

impl DenseVectorCodec {
    pub fn new(pool_limit: usize) -> Self {
        Self { pool_limit }
    }

    /// Flatten rows row-major into one little-endian blob.
    pub fn encode_rows<T: LeElement>(&self, rows: &[Vec<T>]) -> Result<(usize, Vec<u8>), CodecError> {
        let dim = uniform_dimension(rows.iter().map(Vec::len))?;
        let mut out = Vec::with_capacity(rows.len() * dim * T::WIDTH);
        for row in rows {
            out.extend_from_slice(&pack_row(row, self.pool_limit));
        }
        Ok((dim, out))
    }

    /// Concatenate binary rows. Every row must hold `ceil(dim_bits / 8)`
    /// bytes.
    pub fn encode_binary(&self, dim_bits: usize, rows: &[Vec<u8>]) -> Result<Vec<u8>, CodecError> {
        if rows.is_empty() {
            return Err(CodecError::EmptyColumn);
        }
        if dim_bits == 0 {
            return Err(CodecError::validation("binary vector dimension is zero"));
        }
        let row_len = dim_bits.div_ceil(8);
        let mut out = Vec::with_capacity(rows.len() * row_len);
        for (row, bytes) in rows.iter().enumerate() {
            if bytes.len() != row_len {
                return Err(CodecError::DimensionMismatch {
                    row,
                    expected: row_len,
                    actual: bytes.len(),
                });
            }
            out.extend_from_slice(bytes);
        }
        Ok(out)
    }
}

impl ColumnCodec for DenseVectorCodec {
    fn encode(&self, data: &ColumnData) -> Result<field_data::Field, CodecError> {
        let (dim, payload) = match data {
            ColumnData::FloatVector(rows) => {
                let (dim, bytes) = self.encode_rows(rows)?;
                (dim, Data::FloatVector(bytes))
            }
            ColumnData::Float16Vector(rows) => {
                let (dim, bytes) = self.encode_rows(rows)?;
                (dim, Data::Float16Vector(bytes))
            }
            ColumnData::BFloat16Vector(rows) => {
                let (dim, bytes) = self.encode_rows(rows)?;
                (dim, Data::Bfloat16Vector(bytes))
            }
            ColumnData::BinaryVector { dim, rows } => {
                (*dim, Data::BinaryVector(self.encode_binary(*dim, rows)?))
            }
            other => {
                return Err(CodecError::unsupported(format!(
                    "dense vector codec cannot encode {}",
                    other.data_type()
                )));
            }
        };
        Ok(field_data::Field::Vectors(VectorField {
            dim: dim as i64,
            data: Some(payload),
        }))
    }

    fn decode(
        &self,
        data_type: DataType,
        field: &field_data::Field,
    ) -> Result<ColumnData, CodecError> {
        let field_data::Field::Vectors(vectors) = field else {
            return Err(CodecError::shape(format!("{data_type} field carries scalars")));
        };
        let dim = usize::try_from(vectors.dim)
            .map_err(|_| CodecError::shape(format!("negative vector dimension {}", vectors.dim)))?;
        let Some(payload) = vectors.data.as_ref() else {
            return Err(CodecError::shape("vector field has no data"));
        };
        Ok(match (data_type, payload) {
            (DataType::FloatVector, Data::FloatVector(b)) => {
                ColumnData::FloatVector(decode_rows(b, dim)?)
            }
            (DataType::Float16Vector, Data::Float16Vector(b)) => {
                ColumnData::Float16Vector(decode_rows(b, dim)?)
            }
            (DataType::BFloat16Vector, Data::Bfloat16Vector(b)) => {
                ColumnData::BFloat16Vector(decode_rows(b, dim)?)
            }
            (DataType::BinaryVector, Data::BinaryVector(b)) => ColumnData::BinaryVector {
                dim,
                rows: chunk_binary_rows(b, dim)?,
            },
            (
                DataType::FloatVector
                | DataType::Float16Vector
                | DataType::BFloat16Vector
                | DataType::BinaryVector,
                other,
            ) => {
                return Err(CodecError::shape(format!(
                    "{data_type} cannot be read from {}",
                    other.shape()
                )));
            }
            (other, _) => {
                return Err(CodecError::unsupported(format!("{other} is not a dense vector type")));
            }
        })
    }
}
