pub mod types;
pub mod wire;

pub use types::{DataType, PlaceholderType};
pub use wire::{
    field_data, ids, scalar_field, vector_field, ArrayArray, BoolArray, BytesArray, DoubleArray,
    FieldData, FloatArray, Ids, IntArray, JsonArray, LongArray, PlaceholderGroup,
    PlaceholderValue, ScalarField, SearchResultData, SparseFloatArray, StringArray, VectorField,
};
