//! Scalar value lists ↔ wire containers. Shared by the scalar codec (one
//! list per column) and the array codec (one list per row).

use vectra_api::scalar_field::Data;
use vectra_api::{BoolArray, DataType, DoubleArray, FloatArray, IntArray, JsonArray, LongArray, StringArray};

use crate::column::ColumnData;
use crate::config::Narrowing;
use crate::error::CodecError;

// ═══════════════════════════════════════════════════════════════
//  Encode
// ═══════════════════════════════════════════════════════════════

pub(crate) fn bools(values: &[bool]) -> Data {
    Data::BoolData(BoolArray { data: values.to_vec() })
}

/// Int8/Int16/Int32 all travel as 32-bit ints.
pub(crate) fn ints<T: Copy + Into<i32>>(values: &[T]) -> Data {
    Data::IntData(IntArray {
        data: values.iter().map(|&v| v.into()).collect(),
    })
}

pub(crate) fn longs(values: &[i64]) -> Data {
    Data::LongData(LongArray { data: values.to_vec() })
}

pub(crate) fn floats(values: &[f32]) -> Data {
    Data::FloatData(FloatArray { data: values.to_vec() })
}

pub(crate) fn doubles(values: &[f64]) -> Data {
    Data::DoubleData(DoubleArray { data: values.to_vec() })
}

pub(crate) fn strings(values: &[String]) -> Data {
    Data::StringData(StringArray { data: values.to_vec() })
}

pub(crate) fn json(values: &[String]) -> Data {
    Data::JsonData(JsonArray {
        data: values.iter().map(|s| s.as_bytes().to_vec()).collect(),
    })
}

// ═══════════════════════════════════════════════════════════════
//  Decode
// ═══════════════════════════════════════════════════════════════

/// Rebuild the narrowest-typed values for `data_type` from a wire
/// container. The container shape must be the one `data_type` maps to.
pub(crate) fn decode(
    data_type: DataType,
    data: &Data,
    narrowing: Narrowing,
) -> Result<ColumnData, CodecError> {
    Ok(match (data_type, data) {
        (DataType::Bool, Data::BoolData(a)) => ColumnData::Bool(a.data.clone()),
        (DataType::Int8, Data::IntData(a)) => {
            ColumnData::Int8(narrow(&a.data, data_type, narrowing, |v| v as i8)?)
        }
        (DataType::Int16, Data::IntData(a)) => {
            ColumnData::Int16(narrow(&a.data, data_type, narrowing, |v| v as i16)?)
        }
        (DataType::Int32, Data::IntData(a)) => ColumnData::Int32(a.data.clone()),
        (DataType::Int64, Data::LongData(a)) => ColumnData::Int64(a.data.clone()),
        (DataType::Float, Data::FloatData(a)) => ColumnData::Float(a.data.clone()),
        (DataType::Double, Data::DoubleData(a)) => ColumnData::Double(a.data.clone()),
        (DataType::String, Data::StringData(a)) => ColumnData::String(a.data.clone()),
        (DataType::VarChar, Data::StringData(a)) => ColumnData::VarChar(a.data.clone()),
        (DataType::Json, Data::JsonData(a)) => ColumnData::Json(
            a.data
                .iter()
                .map(|b| {
                    String::from_utf8(b.clone())
                        .map_err(|e| CodecError::shape(format!("json row is not UTF-8: {e}")))
                })
                .collect::<Result<_, _>>()?,
        ),
        (
            DataType::Bool
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Float
            | DataType::Double
            | DataType::String
            | DataType::VarChar
            | DataType::Json,
            other,
        ) => {
            return Err(CodecError::shape(format!(
                "{data_type} cannot be read from {}",
                other.shape()
            )));
        }
        (other, _) => {
            return Err(CodecError::unsupported(format!("{other} is not a scalar type")));
        }
    })
}

fn narrow<T>(
    values: &[i32],
    data_type: DataType,
    narrowing: Narrowing,
    truncate: fn(i32) -> T,
) -> Result<Vec<T>, CodecError>
where
    T: TryFrom<i32>,
{
    let mut out = Vec::with_capacity(values.len());
    let mut truncated = 0usize;
    for &v in values {
        match T::try_from(v) {
            Ok(n) => out.push(n),
            Err(_) if narrowing == Narrowing::Truncate => {
                truncated += 1;
                out.push(truncate(v));
            }
            Err(_) => {
                return Err(CodecError::shape(format!(
                    "wire value {v} out of range for {data_type}"
                )));
            }
        }
    }
    if truncated > 0 {
        tracing::warn!(%data_type, truncated, "out-of-range wire integers truncated");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn narrow_ints_widen_on_encode() {
        let Data::IntData(a) = ints(&[-128i8, 127]) else {
            panic!("expected int_data");
        };
        assert_eq!(a.data, vec![-128, 127]);
    }

    #[test]
    fn truncation_wraps() {
        let data = Data::IntData(IntArray { data: vec![300, -129, 5] });
        let col = decode(DataType::Int8, &data, Narrowing::Truncate).unwrap();
        assert_eq!(col, ColumnData::Int8(vec![44, 127, 5]));
    }

    #[test]
    fn reject_refuses_out_of_range() {
        let data = Data::IntData(IntArray { data: vec![40_000] });
        let err = decode(DataType::Int16, &data, Narrowing::Reject).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeShape);
        let ok = decode(DataType::Int16, &Data::IntData(IntArray { data: vec![-32_768] }), Narrowing::Reject);
        assert_eq!(ok.unwrap(), ColumnData::Int16(vec![-32_768]));
    }

    #[test]
    fn shape_must_match_type() {
        let data = Data::LongData(LongArray { data: vec![1] });
        let err = decode(DataType::Int32, &data, Narrowing::Truncate).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeShape);
        assert_eq!(err.to_string(), "int32 cannot be read from long_data");
    }

    #[test]
    fn non_scalar_type_unsupported() {
        let data = Data::LongData(LongArray { data: vec![1] });
        let err = decode(DataType::FloatVector, &data, Narrowing::Truncate).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    }

    #[test]
    fn invalid_utf8_json_rejected() {
        let data = Data::JsonData(JsonArray { data: vec![vec![0xFF, 0xFE]] });
        let err = decode(DataType::Json, &data, Narrowing::Truncate).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeShape);
    }
}
