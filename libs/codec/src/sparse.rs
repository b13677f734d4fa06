//! One row of a sparse vector in coordinate (COO) form.
//!
//! Wire layout of a row: `nnz` entries of 8 bytes each, a `u32` LE index
//! followed by an `f32` LE value, ascending by index.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Bytes per serialized `(index, value)` entry.
pub const SPARSE_ENTRY_SIZE: usize = 8;

/// Value type of a sparse vector.
pub trait SparseScalar: Copy + PartialEq + std::fmt::Debug {
    fn is_nan(self) -> bool;
    /// Bit pattern used for hashing. `0.0` and `-0.0` compare equal, so
    /// they must map to the same bits.
    fn hash_bits(self) -> u64;
}

impl SparseScalar for f32 {
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    fn hash_bits(self) -> u64 {
        if self == 0.0 { 0 } else { self.to_bits() as u64 }
    }
}

impl SparseScalar for f64 {
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    fn hash_bits(self) -> u64 {
        if self == 0.0 { 0 } else { self.to_bits() }
    }
}

/// Sparse vector with strictly ascending, unique indices and no NaN values.
///
/// The invariants are enforced at construction, so every instance is valid
/// for encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SparseParts<T>", into = "SparseParts<T>")]
pub struct SparseVector<T: SparseScalar = f32> {
    indices: Vec<u32>,
    values: Vec<T>,
}

#[derive(Serialize, Deserialize)]
struct SparseParts<T> {
    indices: Vec<i64>,
    values: Vec<T>,
}

impl<T: SparseScalar> TryFrom<SparseParts<T>> for SparseVector<T> {
    type Error = CodecError;

    fn try_from(parts: SparseParts<T>) -> Result<Self, Self::Error> {
        SparseVector::new(parts.indices, parts.values)
    }
}

impl<T: SparseScalar> From<SparseVector<T>> for SparseParts<T> {
    fn from(v: SparseVector<T>) -> Self {
        SparseParts {
            indices: v.indices.into_iter().map(i64::from).collect(),
            values: v.values,
        }
    }
}

impl<T: SparseScalar> SparseVector<T> {
    /// Build from parallel index/value sequences.
    ///
    /// Fails when the lengths differ, an index is negative or above
    /// `u32::MAX`, indices are not strictly ascending, or a value is NaN.
    pub fn new(indices: Vec<i64>, values: Vec<T>) -> Result<Self, CodecError> {
        if indices.len() != values.len() {
            return Err(CodecError::validation(format!(
                "sparse vector has {} indices but {} values",
                indices.len(),
                values.len()
            )));
        }
        let indices = indices
            .into_iter()
            .map(|i| {
                u32::try_from(i)
                    .map_err(|_| CodecError::validation(format!("sparse index {i} out of range")))
            })
            .collect::<Result<Vec<u32>, CodecError>>()?;
        check_entries(&indices, &values).map_err(CodecError::Validation)?;
        Ok(Self { indices, values })
    }

    /// Build from `(index, value)` pairs in any order. Duplicate indices are
    /// rejected.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, T)>) -> Result<Self, CodecError> {
        let mut pairs: Vec<(u32, T)> = pairs.into_iter().collect();
        pairs.sort_by_key(|(i, _)| *i);
        let (indices, values): (Vec<u32>, Vec<T>) = pairs.into_iter().unzip();
        check_entries(&indices, &values).map_err(CodecError::Validation)?;
        Ok(Self { indices, values })
    }

    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Largest index, or -1 when empty.
    pub fn max_index(&self) -> i64 {
        self.indices.last().map_or(-1, |&i| i64::from(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, T)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn get(&self, index: u32) -> Option<T> {
        self.indices
            .binary_search(&index)
            .ok()
            .map(|pos| self.values[pos])
    }
}

impl SparseVector<f32> {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.nnz() * SPARSE_ENTRY_SIZE);
        for (index, value) in self.iter() {
            out.extend_from_slice(&index.to_le_bytes());
            out.extend_from_slice(&value.to_le_bytes());
        }
        out
    }

    /// Parse one serialized row. The length must be a multiple of 8 and the
    /// entries must satisfy the construction invariants.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() % SPARSE_ENTRY_SIZE != 0 {
            return Err(CodecError::shape(format!(
                "sparse row of {} bytes is not a multiple of {SPARSE_ENTRY_SIZE}",
                bytes.len()
            )));
        }
        let nnz = bytes.len() / SPARSE_ENTRY_SIZE;
        let mut indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        for entry in bytes.chunks_exact(SPARSE_ENTRY_SIZE) {
            let (index, value) = entry.split_at(4);
            indices.push(u32::from_le_bytes([index[0], index[1], index[2], index[3]]));
            values.push(f32::from_le_bytes([value[0], value[1], value[2], value[3]]));
        }
        check_entries(&indices, &values)
            .map_err(|e| CodecError::shape(format!("sparse row: {e}")))?;
        Ok(Self { indices, values })
    }
}

impl<T: SparseScalar> Default for SparseVector<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// NaN is rejected at construction, so equality is reflexive.
impl<T: SparseScalar> Eq for SparseVector<T> {}

impl<T: SparseScalar> Hash for SparseVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.indices.len().hash(state);
        for (index, value) in self.iter() {
            index.hash(state);
            value.hash_bits().hash(state);
        }
    }
}

fn check_entries<T: SparseScalar>(indices: &[u32], values: &[T]) -> Result<(), String> {
    for pair in indices.windows(2) {
        if pair[1] <= pair[0] {
            return Err(format!(
                "sparse indices must be strictly ascending, got {} after {}",
                pair[1], pair[0]
            ));
        }
    }
    if let Some(pos) = values.iter().position(|v| v.is_nan()) {
        return Err(format!("sparse value at index {} is NaN", indices[pos]));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rejects_duplicate_index() {
        let err = SparseVector::new(vec![0, 0], vec![1.0f32, 2.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn rejects_descending_index() {
        assert!(SparseVector::new(vec![5, 2], vec![1.0f32, 2.0]).is_err());
    }

    #[test]
    fn rejects_negative_index() {
        assert!(SparseVector::new(vec![-1, 2], vec![1.0f32, 2.0]).is_err());
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(SparseVector::new(vec![1, 2], vec![1.0f32]).is_err());
    }

    #[test]
    fn rejects_nan_anywhere() {
        assert!(SparseVector::new(vec![0, 1, 2], vec![1.0f32, f32::NAN, 2.0]).is_err());
        assert!(SparseVector::new(vec![3], vec![f64::NAN]).is_err());
    }

    #[test]
    fn accepts_independent_rows() {
        let a = SparseVector::new(vec![0, 100], vec![1.0f32, 2.0]).unwrap();
        let b = SparseVector::new(vec![50, 200], vec![3.0f32, 4.0]).unwrap();
        assert_eq!(a.max_index(), 100);
        assert_eq!(b.max_index(), 200);
    }

    #[test]
    fn empty_max_index_is_negative_one() {
        assert_eq!(SparseVector::<f32>::empty().max_index(), -1);
    }

    #[test]
    fn from_pairs_sorts() {
        let v = SparseVector::from_pairs([(9, 0.5f32), (1, 1.5)]).unwrap();
        assert_eq!(v.indices(), &[1, 9]);
        assert_eq!(v.values(), &[1.5, 0.5]);
        assert_eq!(v.get(9), Some(0.5));
        assert_eq!(v.get(2), None);
    }

    #[test]
    fn byte_layout_is_index_then_value_le() {
        let v = SparseVector::new(vec![1, 258], vec![1.0f32, -2.0]).unwrap();
        assert_eq!(
            v.to_bytes(),
            vec![
                1, 0, 0, 0, 0x00, 0x00, 0x80, 0x3F, //
                2, 1, 0, 0, 0x00, 0x00, 0x00, 0xC0,
            ]
        );
    }

    #[test]
    fn ragged_bytes_rejected() {
        let err = SparseVector::from_bytes(&[0u8; 12]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeShape);
    }

    #[test]
    fn unsorted_bytes_rejected() {
        let mut bytes = SparseVector::new(vec![7], vec![1.0f32]).unwrap().to_bytes();
        bytes.extend(SparseVector::new(vec![3], vec![1.0f32]).unwrap().to_bytes());
        let err = SparseVector::from_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeShape);
    }

    #[test]
    fn equal_values_hash_equal() {
        let a = SparseVector::new(vec![1, 2], vec![0.0f32, 1.0]).unwrap();
        let b = SparseVector::new(vec![1, 2], vec![-0.0f32, 1.0]).unwrap();
        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn serde_validates() {
        let ok: SparseVector = serde_json::from_str(r#"{"indices":[1,4],"values":[0.5,0.25]}"#).unwrap();
        assert_eq!(ok.nnz(), 2);
        let bad = serde_json::from_str::<SparseVector>(r#"{"indices":[4,1],"values":[0.5,0.25]}"#);
        assert!(bad.is_err());
    }
}
