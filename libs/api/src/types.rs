use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════
//  Data Type
// ════════════════════════════════════════════════════════════════

/// Field type tag carried by every `FieldData` on the wire.
///
/// Discriminants are protocol constants shared with the server and must
/// never be renumbered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    prost::Enumeration,
)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum DataType {
    None = 0,
    Bool = 1,
    Int8 = 2,
    Int16 = 3,
    Int32 = 4,
    Int64 = 5,
    Float = 10,
    Double = 11,
    String = 20,
    #[serde(rename = "varchar")]
    VarChar = 21,
    Array = 22,
    Json = 23,
    BinaryVector = 100,
    FloatVector = 101,
    Float16Vector = 102,
    #[serde(rename = "bfloat16_vector")]
    BFloat16Vector = 103,
    SparseFloatVector = 104,
}

impl DataType {
    /// Look up a wire discriminant. `None` for values outside the closed set.
    pub fn from_wire(value: i32) -> Option<Self> {
        Self::try_from(value).ok()
    }

    pub fn is_vector(self) -> bool {
        matches!(
            self,
            DataType::BinaryVector
                | DataType::FloatVector
                | DataType::Float16Vector
                | DataType::BFloat16Vector
                | DataType::SparseFloatVector
        )
    }

    /// Types allowed as the element type of an `Array` column.
    pub fn is_array_element(self) -> bool {
        matches!(
            self,
            DataType::Bool
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::Float
                | DataType::Double
                | DataType::String
                | DataType::VarChar
                | DataType::Json
        )
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataType::None => "none",
            DataType::Bool => "bool",
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
            DataType::VarChar => "varchar",
            DataType::Array => "array",
            DataType::Json => "json",
            DataType::BinaryVector => "binary_vector",
            DataType::FloatVector => "float_vector",
            DataType::Float16Vector => "float16_vector",
            DataType::BFloat16Vector => "bfloat16_vector",
            DataType::SparseFloatVector => "sparse_float_vector",
        };
        f.write_str(name)
    }
}

// ════════════════════════════════════════════════════════════════
//  Placeholder Type
// ════════════════════════════════════════════════════════════════

/// Vector-kind marker of a query placeholder. Shares discriminants with the
/// matching `DataType` vector variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, prost::Enumeration)]
#[repr(i32)]
pub enum PlaceholderType {
    None = 0,
    BinaryVector = 100,
    FloatVector = 101,
    Float16Vector = 102,
    BFloat16Vector = 103,
    SparseFloatVector = 104,
}

impl From<PlaceholderType> for DataType {
    fn from(value: PlaceholderType) -> Self {
        match value {
            PlaceholderType::None => DataType::None,
            PlaceholderType::BinaryVector => DataType::BinaryVector,
            PlaceholderType::FloatVector => DataType::FloatVector,
            PlaceholderType::Float16Vector => DataType::Float16Vector,
            PlaceholderType::BFloat16Vector => DataType::BFloat16Vector,
            PlaceholderType::SparseFloatVector => DataType::SparseFloatVector,
        }
    }
}
