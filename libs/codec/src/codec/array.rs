use vectra_api::scalar_field::Data;
use vectra_api::{field_data, ArrayArray, DataType, ScalarField};

use super::{values, ColumnCodec};
use crate::column::{ArrayData, ColumnData};
use crate::config::Narrowing;
use crate::error::CodecError;

/// Array-of-scalar columns. Each row becomes one `ScalarField` using the
/// same container mapping as [`ScalarCodec`](super::ScalarCodec), so row
/// grouping survives the round trip.
pub struct ArrayCodec {
    narrowing: Narrowing,
}

impl ArrayCodec {
    pub fn new(narrowing: Narrowing) -> Self {
        Self { narrowing }
    }

    fn rows<T>(rows: &[Vec<T>], encode: impl Fn(&[T]) -> Data) -> Vec<ScalarField> {
        rows.iter()
            .map(|row| ScalarField {
                data: Some(encode(row)),
            })
            .collect()
    }

    pub fn encode_rows(&self, data: &ArrayData) -> Result<ArrayArray, CodecError> {
        if data.row_count() == 0 {
            return Err(CodecError::EmptyColumn);
        }
        let rows = match data {
            ArrayData::Bool(r) => Self::rows(r, values::bools),
            ArrayData::Int8(r) => Self::rows(r, values::ints),
            ArrayData::Int16(r) => Self::rows(r, values::ints),
            ArrayData::Int32(r) => Self::rows(r, values::ints),
            ArrayData::Int64(r) => Self::rows(r, values::longs),
            ArrayData::Float(r) => Self::rows(r, values::floats),
            ArrayData::Double(r) => Self::rows(r, values::doubles),
            ArrayData::String(r) | ArrayData::VarChar(r) => Self::rows(r, values::strings),
            ArrayData::Json(r) => Self::rows(r, values::json),
        };
        Ok(ArrayArray {
            data: rows,
            element_type: data.element_type() as i32,
        })
    }

    pub fn decode_rows(&self, array: &ArrayArray) -> Result<ArrayData, CodecError> {
        let element_type = DataType::from_wire(array.element_type)
            .filter(|t| t.is_array_element())
            .ok_or_else(|| {
                CodecError::unsupported(format!(
                    "array element type {} has no codec",
                    array.element_type
                ))
            })?;
        let mut out = ArrayData::new(element_type)?;
        for (i, row) in array.data.iter().enumerate() {
            let data = row
                .data
                .as_ref()
                .ok_or_else(|| CodecError::shape(format!("array row {i} has no data")))?;
            let values = values::decode(element_type, data, self.narrowing)
                .map_err(|e| CodecError::shape(format!("array row {i}: {e}")))?;
            out.push_row(values)?;
        }
        Ok(out)
    }
}

impl ColumnCodec for ArrayCodec {
    fn encode(&self, data: &ColumnData) -> Result<field_data::Field, CodecError> {
        let ColumnData::Array(array) = data else {
            return Err(CodecError::unsupported(format!(
                "array codec cannot encode {}",
                data.data_type()
            )));
        };
        let wire = self.encode_rows(array)?;
        Ok(field_data::Field::Scalars(ScalarField {
            data: Some(Data::ArrayData(wire)),
        }))
    }

    fn decode(
        &self,
        data_type: DataType,
        field: &field_data::Field,
    ) -> Result<ColumnData, CodecError> {
        if data_type != DataType::Array {
            return Err(CodecError::unsupported(format!("{data_type} is not an array type")));
        }
        let field_data::Field::Scalars(ScalarField { data: Some(payload) }) = field else {
            return Err(CodecError::shape("array field carries no scalar data"));
        };
        let Data::ArrayData(array) = payload else {
            return Err(CodecError::shape(format!(
                "array cannot be read from {}",
                payload.shape()
            )));
        };
        Ok(ColumnData::Array(self.decode_rows(array)?))
    }
}
