use vectra_api::{field_data, DataType, ScalarField};

use super::{values, ColumnCodec};
use crate::column::ColumnData;
use crate::config::Narrowing;
use crate::error::CodecError;

/// Bool, integer, float, string and JSON columns.
///
/// | DataType | wire container |
/// |---|---|
/// | Bool | `bool_data` |
/// | Int8, Int16, Int32 | `int_data` (widened to i32) |
/// | Int64 | `long_data` |
/// | Float / Double | `float_data` / `double_data` |
/// | String, VarChar | `string_data` |
/// | Json | `json_data` (UTF-8 bytes, not parsed) |
pub struct ScalarCodec {
    narrowing: Narrowing,
}

impl ScalarCodec {
    pub fn new(narrowing: Narrowing) -> Self {
        Self { narrowing }
    }
}

impl ColumnCodec for ScalarCodec {
    fn encode(&self, data: &ColumnData) -> Result<field_data::Field, CodecError> {
        if data.row_count() == 0 {
            return Err(CodecError::EmptyColumn);
        }
        let wire = match data {
            ColumnData::Bool(v) => values::bools(v),
            ColumnData::Int8(v) => values::ints(v),
            ColumnData::Int16(v) => values::ints(v),
            ColumnData::Int32(v) => values::ints(v),
            ColumnData::Int64(v) => values::longs(v),
            ColumnData::Float(v) => values::floats(v),
            ColumnData::Double(v) => values::doubles(v),
            ColumnData::String(v) | ColumnData::VarChar(v) => values::strings(v),
            ColumnData::Json(v) => values::json(v),
            other => {
                return Err(CodecError::unsupported(format!(
                    "scalar codec cannot encode {}",
                    other.data_type()
                )));
            }
        };
        Ok(field_data::Field::Scalars(ScalarField { data: Some(wire) }))
    }

    fn decode(
        &self,
        data_type: DataType,
        field: &field_data::Field,
    ) -> Result<ColumnData, CodecError> {
        let field_data::Field::Scalars(scalars) = field else {
            return Err(CodecError::shape(format!("{data_type} field carries vectors")));
        };
        let data = scalars
            .data
            .as_ref()
            .ok_or_else(|| CodecError::shape("scalar field has no data"))?;
        values::decode(data_type, data, self.narrowing)
    }
}
