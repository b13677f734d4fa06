//! Query-time vector encoding into a search placeholder group.
//!
//! Every blob uses the exact byte layout of the storage codecs, so a vector
//! sent as a query is byte-identical to the same vector stored in a column.

use half::{bf16, f16};
use prost::Message;
use serde::{Deserialize, Serialize};
use vectra_api::{PlaceholderGroup, PlaceholderType, PlaceholderValue};

use crate::codec::dense::{pack_row, uniform_dimension, LeElement};
use crate::config::CodecOptions;
use crate::error::CodecError;
use crate::sparse::SparseVector;

/// One query vector of any supported kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryVector {
    Float(Vec<f32>),
    Float16(Vec<f16>),
    #[serde(rename = "bfloat16")]
    BFloat16(Vec<bf16>),
    Binary(Vec<u8>),
    Sparse(SparseVector<f32>),
}

impl QueryVector {
    fn kind(&self) -> PlaceholderType {
        match self {
            QueryVector::Float(_) => PlaceholderType::FloatVector,
            QueryVector::Float16(_) => PlaceholderType::Float16Vector,
            QueryVector::BFloat16(_) => PlaceholderType::BFloat16Vector,
            QueryVector::Binary(_) => PlaceholderType::BinaryVector,
            QueryVector::Sparse(_) => PlaceholderType::SparseFloatVector,
        }
    }
}

/// A homogeneous, non-empty batch of query vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryVectors {
    Float(Vec<Vec<f32>>),
    Float16(Vec<Vec<f16>>),
    BFloat16(Vec<Vec<bf16>>),
    Binary(Vec<Vec<u8>>),
    Sparse(Vec<SparseVector<f32>>),
}

impl QueryVectors {
    /// Group individually tagged vectors into one batch. Fails on an empty
    /// input or when kinds are mixed.
    pub fn from_vectors(vectors: impl IntoIterator<Item = QueryVector>) -> Result<Self, CodecError> {
        let mut iter = vectors.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| CodecError::validation("at least one query vector is required"))?;
        let kind = first.kind();
        let mut batch = match first {
            QueryVector::Float(v) => QueryVectors::Float(vec![v]),
            QueryVector::Float16(v) => QueryVectors::Float16(vec![v]),
            QueryVector::BFloat16(v) => QueryVectors::BFloat16(vec![v]),
            QueryVector::Binary(v) => QueryVectors::Binary(vec![v]),
            QueryVector::Sparse(v) => QueryVectors::Sparse(vec![v]),
        };
        for (i, vector) in iter.enumerate() {
            match (&mut batch, vector) {
                (QueryVectors::Float(rows), QueryVector::Float(v)) => rows.push(v),
                (QueryVectors::Float16(rows), QueryVector::Float16(v)) => rows.push(v),
                (QueryVectors::BFloat16(rows), QueryVector::BFloat16(v)) => rows.push(v),
                (QueryVectors::Binary(rows), QueryVector::Binary(v)) => rows.push(v),
                (QueryVectors::Sparse(rows), QueryVector::Sparse(v)) => rows.push(v),
                (_, other) => {
                    return Err(CodecError::validation(format!(
                        "query vector {} is {:?}, batch is {:?}",
                        i + 1,
                        other.kind(),
                        kind
                    )));
                }
            }
        }
        Ok(batch)
    }

    pub fn len(&self) -> usize {
        match self {
            QueryVectors::Float(v) => v.len(),
            QueryVectors::Float16(v) => v.len(),
            QueryVectors::BFloat16(v) => v.len(),
            QueryVectors::Binary(v) => v.len(),
            QueryVectors::Sparse(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn placeholder_type(&self) -> PlaceholderType {
        match self {
            QueryVectors::Float(_) => PlaceholderType::FloatVector,
            QueryVectors::Float16(_) => PlaceholderType::Float16Vector,
            QueryVectors::BFloat16(_) => PlaceholderType::BFloat16Vector,
            QueryVectors::Binary(_) => PlaceholderType::BinaryVector,
            QueryVectors::Sparse(_) => PlaceholderType::SparseFloatVector,
        }
    }
}

/// Builds the placeholder group of a similarity-search request.
pub struct AnnQueryEncoder {
    tag: String,
    pool_limit: usize,
}

impl Default for AnnQueryEncoder {
    fn default() -> Self {
        Self::new(&CodecOptions::default())
    }
}

impl AnnQueryEncoder {
    pub fn new(options: &CodecOptions) -> Self {
        Self {
            tag: options.query_tag.clone(),
            pool_limit: options.scratch_pool_limit,
        }
    }

    fn dense_blobs<T: LeElement>(&self, rows: &[Vec<T>]) -> Result<Vec<Vec<u8>>, CodecError> {
        uniform_dimension(rows.iter().map(Vec::len)).map_err(empty_batch)?;
        Ok(rows.iter().map(|row| pack_row(row, self.pool_limit).to_vec()).collect())
    }

    pub fn encode(&self, vectors: &QueryVectors) -> Result<PlaceholderGroup, CodecError> {
        let values = match vectors {
            QueryVectors::Float(rows) => self.dense_blobs(rows)?,
            QueryVectors::Float16(rows) => self.dense_blobs(rows)?,
            QueryVectors::BFloat16(rows) => self.dense_blobs(rows)?,
            QueryVectors::Binary(rows) => {
                uniform_dimension(rows.iter().map(Vec::len)).map_err(empty_batch)?;
                rows.clone()
            }
            QueryVectors::Sparse(rows) => {
                if rows.is_empty() {
                    return Err(empty_batch(CodecError::EmptyColumn));
                }
                rows.iter().map(SparseVector::to_bytes).collect()
            }
        };
        tracing::debug!(
            tag = %self.tag,
            kind = ?vectors.placeholder_type(),
            vectors = values.len(),
            "query placeholder encoded"
        );
        Ok(PlaceholderGroup {
            placeholders: vec![PlaceholderValue {
                tag: self.tag.clone(),
                placeholder_type: vectors.placeholder_type() as i32,
                values,
            }],
        })
    }

    /// Serialized placeholder group, as carried by a search request.
    pub fn encode_bytes(&self, vectors: &QueryVectors) -> Result<Vec<u8>, CodecError> {
        Ok(self.encode(vectors)?.encode_to_vec())
    }
}

fn empty_batch(err: CodecError) -> CodecError {
    match err {
        CodecError::EmptyColumn => CodecError::validation("at least one query vector is required"),
        other => other,
    }
}
