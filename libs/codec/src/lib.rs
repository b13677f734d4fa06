//! Typed column and query-vector marshalling for the vector-search wire
//! protocol.
//!
//! Outbound, a [`Column`] becomes a `FieldData` message through
//! [`FieldCodec`], and query vectors become a `PlaceholderGroup` through
//! [`AnnQueryEncoder`]. Inbound, `FieldData` and search responses are
//! rebuilt into typed columns.

pub mod codec;
pub mod column;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod query;
pub mod registry;
pub mod results;
pub mod scratch;
pub mod sparse;

pub use codec::{
    ArrayCodec, ColumnCodec, DenseVectorCodec, FieldCodec, ScalarCodec, SparseVectorCodec,
};
pub use column::{ArrayData, Column, ColumnData};
pub use config::{CodecOptions, Narrowing};
pub use error::{CodecError, ErrorKind};
pub use query::{AnnQueryEncoder, QueryVector, QueryVectors};
pub use registry::{resolve_type, NativeType};
pub use results::{decode_search_results, HitIds, QueryHits, SearchResults};
pub use scratch::ScratchBuffer;
pub use sparse::{SparseScalar, SparseVector, SPARSE_ENTRY_SIZE};

pub use half::{bf16, f16};
pub use vectra_api::DataType;
