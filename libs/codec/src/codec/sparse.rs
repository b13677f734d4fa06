use vectra_api::{field_data, vector_field::Data, DataType, SparseFloatArray, VectorField};

use super::ColumnCodec;
use crate::column::ColumnData;
use crate::error::CodecError;
use crate::sparse::SparseVector;

/// Sparse float vector columns: one COO blob per row.
pub struct SparseVectorCodec;

impl SparseVectorCodec {
    /// Declared dimension of a column: `1 + max index`, or 0 when every row
    /// is empty.
    pub fn dimension(rows: &[SparseVector<f32>]) -> i64 {
        rows.iter().map(SparseVector::max_index).max().map_or(0, |max| max + 1)
    }

    pub fn encode_rows(rows: &[SparseVector<f32>]) -> Result<SparseFloatArray, CodecError> {
        if rows.is_empty() {
            return Err(CodecError::EmptyColumn);
        }
        Ok(SparseFloatArray {
            contents: rows.iter().map(SparseVector::to_bytes).collect(),
            dim: Self::dimension(rows),
        })
    }

    pub fn decode_rows(array: &SparseFloatArray) -> Result<Vec<SparseVector<f32>>, CodecError> {
        array
            .contents
            .iter()
            .enumerate()
            .map(|(row, bytes)| {
                SparseVector::from_bytes(bytes)
                    .map_err(|e| CodecError::shape(format!("row {row}: {e}")))
            })
            .collect()
    }
}

impl ColumnCodec for SparseVectorCodec {
    fn encode(&self, data: &ColumnData) -> Result<field_data::Field, CodecError> {
        let ColumnData::SparseFloatVector(rows) = data else {
            return Err(CodecError::unsupported(format!(
                "sparse vector codec cannot encode {}",
                data.data_type()
            )));
        };
        let array = Self::encode_rows(rows)?;
        Ok(field_data::Field::Vectors(VectorField {
            dim: array.dim,
            data: Some(Data::SparseFloatVector(array)),
        }))
    }

    fn decode(
        &self,
        data_type: DataType,
        field: &field_data::Field,
    ) -> Result<ColumnData, CodecError> {
        if data_type != DataType::SparseFloatVector {
            return Err(CodecError::unsupported(format!("{data_type} is not a sparse type")));
        }
        let field_data::Field::Vectors(VectorField { data: Some(payload), .. }) = field else {
            return Err(CodecError::shape("sparse field carries no vector data"));
        };
        let Data::SparseFloatVector(array) = payload else {
            return Err(CodecError::shape(format!(
                "{data_type} cannot be read from {}",
                payload.shape()
            )));
        };
        Ok(ColumnData::SparseFloatVector(Self::decode_rows(array)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn row(indices: Vec<i64>, values: Vec<f32>) -> SparseVector<f32> {
        SparseVector::new(indices, values).unwrap()
    }

    #[test]
    fn dimension_is_one_past_max_index() {
        let rows = vec![row(vec![0, 100], vec![1.0, 2.0]), row(vec![50, 200], vec![3.0, 4.0])];
        assert_eq!(SparseVectorCodec::dimension(&rows), 201);
        assert_eq!(SparseVectorCodec::encode_rows(&rows).unwrap().dim, 201);
    }

    #[test]
    fn all_empty_rows_have_zero_dimension() {
        let rows = vec![SparseVector::empty(), SparseVector::empty()];
        let array = SparseVectorCodec::encode_rows(&rows).unwrap();
        assert_eq!(array.dim, 0);
        assert_eq!(array.contents, vec![Vec::<u8>::new(), Vec::new()]);
    }

    #[test]
    fn empty_column_rejected() {
        let err = SparseVectorCodec::encode_rows(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn column_round_trips() {
        let data = ColumnData::SparseFloatVector(vec![
            row(vec![3, 9], vec![0.5, -1.0]),
            SparseVector::empty(),
        ]);
        let wire = SparseVectorCodec.encode(&data).unwrap();
        assert_eq!(SparseVectorCodec.decode(DataType::SparseFloatVector, &wire).unwrap(), data);
    }

    #[test]
    fn ragged_row_is_shape_error() {
        let array = SparseFloatArray {
            contents: vec![vec![0u8; 8], vec![0u8; 9]],
            dim: 1,
        };
        let err = SparseVectorCodec::decode_rows(&array).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeShape);
        assert!(err.to_string().starts_with("row 1:"));
    }
}
