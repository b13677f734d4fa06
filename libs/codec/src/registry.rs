//! Native Rust types and the `DataType` each one maps to.

use std::any::{type_name, TypeId};

use half::{bf16, f16};
use vectra_api::DataType;

use crate::column::ColumnData;
use crate::error::CodecError;
use crate::sparse::SparseVector;

/// A value type with a fixed column mapping.
pub trait NativeType: Sized + 'static {
    const DATA_TYPE: DataType;

    fn into_column_data(values: Vec<Self>) -> ColumnData;
}

macro_rules! native_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl NativeType for $ty {
                const DATA_TYPE: DataType = DataType::$variant;

                fn into_column_data(values: Vec<Self>) -> ColumnData {
                    ColumnData::$variant(values)
                }
            }
        )*
    };
}

native_scalar! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float,
    f64 => Double,
    String => VarChar,
    Vec<f32> => FloatVector,
    Vec<f16> => Float16Vector,
    Vec<bf16> => BFloat16Vector,
    SparseVector<f32> => SparseFloatVector,
}

impl NativeType for Vec<u8> {
    const DATA_TYPE: DataType = DataType::BinaryVector;

    fn into_column_data(rows: Vec<Self>) -> ColumnData {
        let dim = rows.first().map_or(0, |r| r.len() * 8);
        ColumnData::BinaryVector { dim, rows }
    }
}

/// Resolve the `DataType` of `T` at runtime.
///
/// Covers the same closed set as [`NativeType`]; anything else is an
/// unsupported-type error.
pub fn resolve_type<T: 'static>() -> Result<DataType, CodecError> {
    let id = TypeId::of::<T>();
    let table = [
        (TypeId::of::<bool>(), DataType::Bool),
        (TypeId::of::<i8>(), DataType::Int8),
        (TypeId::of::<i16>(), DataType::Int16),
        (TypeId::of::<i32>(), DataType::Int32),
        (TypeId::of::<i64>(), DataType::Int64),
        (TypeId::of::<f32>(), DataType::Float),
        (TypeId::of::<f64>(), DataType::Double),
        (TypeId::of::<String>(), DataType::VarChar),
        (TypeId::of::<&'static str>(), DataType::VarChar),
        (TypeId::of::<Vec<f32>>(), DataType::FloatVector),
        (TypeId::of::<Vec<f16>>(), DataType::Float16Vector),
        (TypeId::of::<Vec<bf16>>(), DataType::BFloat16Vector),
        (TypeId::of::<Vec<u8>>(), DataType::BinaryVector),
        (TypeId::of::<SparseVector<f32>>(), DataType::SparseFloatVector),
    ];
    table
        .iter()
        .find(|(candidate, _)| *candidate == id)
        .map(|(_, ty)| *ty)
        .ok_or_else(|| CodecError::unsupported(format!("no data type for {}", type_name::<T>())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn agrees<T: NativeType>() {
        assert_eq!(resolve_type::<T>().unwrap(), T::DATA_TYPE, "{}", type_name::<T>());
    }

    #[test]
    fn runtime_and_static_mappings_agree() {
        agrees::<bool>();
        agrees::<i8>();
        agrees::<i16>();
        agrees::<i32>();
        agrees::<i64>();
        agrees::<f32>();
        agrees::<f64>();
        agrees::<String>();
        agrees::<Vec<f32>>();
        agrees::<Vec<f16>>();
        agrees::<Vec<bf16>>();
        agrees::<Vec<u8>>();
        agrees::<SparseVector<f32>>();
    }

    #[test]
    fn outside_closed_set_is_unsupported() {
        let err = resolve_type::<u32>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert!(err.to_string().contains("u32"));
        assert!(resolve_type::<Vec<i64>>().is_err());
    }
}
