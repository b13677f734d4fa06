//! Protobuf messages exchanged with the vector-search service.
//!
//! Declared by hand with `prost` derives; field tags follow the service's
//! schema and must stay stable.

use crate::types::{DataType, PlaceholderType};

// ════════════════════════════════════════════════════════════════
//  Scalar containers
// ════════════════════════════════════════════════════════════════

#[derive(Clone, PartialEq, prost::Message)]
pub struct BoolArray {
    #[prost(bool, repeated, tag = "1")]
    pub data: Vec<bool>,
}

/// Carries Int8, Int16 and Int32 values, widened to 32 bits.
#[derive(Clone, PartialEq, prost::Message)]
pub struct IntArray {
    #[prost(int32, repeated, tag = "1")]
    pub data: Vec<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LongArray {
    #[prost(int64, repeated, tag = "1")]
    pub data: Vec<i64>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FloatArray {
    #[prost(float, repeated, tag = "1")]
    pub data: Vec<f32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DoubleArray {
    #[prost(double, repeated, tag = "1")]
    pub data: Vec<f64>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct StringArray {
    #[prost(string, repeated, tag = "1")]
    pub data: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BytesArray {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub data: Vec<Vec<u8>>,
}

/// JSON documents as UTF-8 bytes, one per row.
#[derive(Clone, PartialEq, prost::Message)]
pub struct JsonArray {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub data: Vec<Vec<u8>>,
}

/// One `ScalarField` per row; every row holds the same element shape.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ArrayArray {
    #[prost(message, repeated, tag = "1")]
    pub data: Vec<ScalarField>,
    #[prost(enumeration = "DataType", tag = "2")]
    pub element_type: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ScalarField {
    #[prost(oneof = "scalar_field::Data", tags = "1, 2, 3, 4, 5, 6, 7, 8, 9")]
    pub data: Option<scalar_field::Data>,
}

pub mod scalar_field {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "1")]
        BoolData(super::BoolArray),
        #[prost(message, tag = "2")]
        IntData(super::IntArray),
        #[prost(message, tag = "3")]
        LongData(super::LongArray),
        #[prost(message, tag = "4")]
        FloatData(super::FloatArray),
        #[prost(message, tag = "5")]
        DoubleData(super::DoubleArray),
        #[prost(message, tag = "6")]
        StringData(super::StringArray),
        #[prost(message, tag = "7")]
        BytesData(super::BytesArray),
        #[prost(message, tag = "8")]
        ArrayData(super::ArrayArray),
        #[prost(message, tag = "9")]
        JsonData(super::JsonArray),
    }

    impl Data {
        /// Shape name for error messages.
        pub fn shape(&self) -> &'static str {
            match self {
                Data::BoolData(_) => "bool_data",
                Data::IntData(_) => "int_data",
                Data::LongData(_) => "long_data",
                Data::FloatData(_) => "float_data",
                Data::DoubleData(_) => "double_data",
                Data::StringData(_) => "string_data",
                Data::BytesData(_) => "bytes_data",
                Data::ArrayData(_) => "array_data",
                Data::JsonData(_) => "json_data",
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  Vector containers
// ════════════════════════════════════════════════════════════════

/// Sparse rows, each `nnz * 8` bytes of `(u32 LE index, f32 LE value)`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SparseFloatArray {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub contents: Vec<Vec<u8>>,
    #[prost(int64, tag = "2")]
    pub dim: i64,
}

/// Vector column: flat row-major blob plus declared dimension.
///
/// `dim` counts elements for float vectors and bits for binary vectors.
#[derive(Clone, PartialEq, prost::Message)]
pub struct VectorField {
    #[prost(int64, tag = "1")]
    pub dim: i64,
    #[prost(oneof = "vector_field::Data", tags = "2, 3, 4, 5, 6")]
    pub data: Option<vector_field::Data>,
}

pub mod vector_field {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Data {
        #[prost(bytes = "vec", tag = "2")]
        FloatVector(Vec<u8>),
        #[prost(bytes = "vec", tag = "3")]
        BinaryVector(Vec<u8>),
        #[prost(bytes = "vec", tag = "4")]
        Float16Vector(Vec<u8>),
        #[prost(bytes = "vec", tag = "5")]
        Bfloat16Vector(Vec<u8>),
        #[prost(message, tag = "6")]
        SparseFloatVector(super::SparseFloatArray),
    }

    impl Data {
        pub fn shape(&self) -> &'static str {
            match self {
                Data::FloatVector(_) => "float_vector",
                Data::BinaryVector(_) => "binary_vector",
                Data::Float16Vector(_) => "float16_vector",
                Data::Bfloat16Vector(_) => "bfloat16_vector",
                Data::SparseFloatVector(_) => "sparse_float_vector",
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  FieldData
// ════════════════════════════════════════════════════════════════

/// Wire form of one column.
#[derive(Clone, PartialEq, prost::Message)]
pub struct FieldData {
    #[prost(enumeration = "DataType", tag = "1")]
    pub data_type: i32,
    #[prost(string, tag = "2")]
    pub field_name: String,
    #[prost(oneof = "field_data::Field", tags = "3, 4")]
    pub field: Option<field_data::Field>,
    #[prost(int64, tag = "5")]
    pub field_id: i64,
    /// Column belongs to the schema-less side channel.
    #[prost(bool, tag = "6")]
    pub is_dynamic: bool,
}

pub mod field_data {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Field {
        #[prost(message, tag = "3")]
        Scalars(super::ScalarField),
        #[prost(message, tag = "4")]
        Vectors(super::VectorField),
    }
}

// ════════════════════════════════════════════════════════════════
//  Query placeholders
// ════════════════════════════════════════════════════════════════

/// Query vectors for one search slot. One blob per query vector.
#[derive(Clone, PartialEq, prost::Message)]
pub struct PlaceholderValue {
    #[prost(string, tag = "1")]
    pub tag: String,
    #[prost(enumeration = "PlaceholderType", tag = "2")]
    pub placeholder_type: i32,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub values: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PlaceholderGroup {
    #[prost(message, repeated, tag = "1")]
    pub placeholders: Vec<PlaceholderValue>,
}

// ════════════════════════════════════════════════════════════════
//  Search results
// ════════════════════════════════════════════════════════════════

/// Primary keys of a result set: either integer or string keys.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Ids {
    #[prost(oneof = "ids::IdField", tags = "1, 2")]
    pub id_field: Option<ids::IdField>,
}

pub mod ids {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum IdField {
        #[prost(message, tag = "1")]
        IntId(super::LongArray),
        #[prost(message, tag = "2")]
        StrId(super::StringArray),
    }
}

/// Flat search response. Hits of all queries are concatenated; `topks[i]`
/// is the hit count of query `i`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SearchResultData {
    #[prost(int64, tag = "1")]
    pub num_queries: i64,
    #[prost(int64, tag = "2")]
    pub top_k: i64,
    #[prost(message, repeated, tag = "3")]
    pub fields_data: Vec<FieldData>,
    #[prost(float, repeated, tag = "4")]
    pub scores: Vec<f32>,
    #[prost(message, optional, tag = "5")]
    pub ids: Option<Ids>,
    #[prost(int64, repeated, tag = "6")]
    pub topks: Vec<i64>,
    #[prost(string, repeated, tag = "7")]
    pub output_fields: Vec<String>,
}
