//! Splitting a flat search response into per-query hits.

use serde::Serialize;
use vectra_api::{ids::IdField, SearchResultData};

use crate::codec::FieldCodec;
use crate::column::Column;
use crate::error::CodecError;

/// Primary keys of a hit list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HitIds {
    Int(Vec<i64>),
    Str(Vec<String>),
}

impl HitIds {
    pub fn len(&self) -> usize {
        match self {
            HitIds::Int(v) => v.len(),
            HitIds::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slice(&self, start: usize, end: usize) -> HitIds {
        match self {
            HitIds::Int(v) => HitIds::Int(v[start..end].to_vec()),
            HitIds::Str(v) => HitIds::Str(v[start..end].to_vec()),
        }
    }
}

/// Hits of one query, best first as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryHits {
    pub ids: HitIds,
    pub scores: Vec<f32>,
    /// Requested output fields, one row per hit.
    pub fields: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub top_k: usize,
    pub queries: Vec<QueryHits>,
}

pub fn decode_search_results(
    codec: &FieldCodec,
    data: &SearchResultData,
) -> Result<SearchResults, CodecError> {
    let num_queries = usize::try_from(data.num_queries)
        .map_err(|_| CodecError::shape(format!("negative query count {}", data.num_queries)))?;
    if data.topks.len() != num_queries {
        return Err(CodecError::shape(format!(
            "{} topks for {num_queries} queries",
            data.topks.len()
        )));
    }
    let topks = data
        .topks
        .iter()
        .map(|&k| usize::try_from(k).map_err(|_| CodecError::shape(format!("negative topk {k}"))))
        .collect::<Result<Vec<usize>, _>>()?;
    let total = topks
        .iter()
        .try_fold(0usize, |acc, &k| acc.checked_add(k))
        .ok_or_else(|| CodecError::shape("topks overflow the hit count"))?;
    let top_k = usize::try_from(data.top_k)
        .map_err(|_| CodecError::shape(format!("negative top_k {}", data.top_k)))?;

    let ids = match data.ids.as_ref().and_then(|ids| ids.id_field.as_ref()) {
        Some(IdField::IntId(a)) => HitIds::Int(a.data.clone()),
        Some(IdField::StrId(a)) => HitIds::Str(a.data.clone()),
        None => HitIds::Int(Vec::new()),
    };
    if ids.len() != total {
        return Err(CodecError::shape(format!("{} ids for {total} hits", ids.len())));
    }
    if data.scores.len() != total {
        return Err(CodecError::shape(format!(
            "{} scores for {total} hits",
            data.scores.len()
        )));
    }

    let columns = codec.decode_batch(&data.fields_data)?;
    if let Some(column) = columns.iter().find(|c| c.row_count() != total) {
        return Err(CodecError::shape(format!(
            "output field '{}' has {} rows for {total} hits",
            column.name(),
            column.row_count()
        )));
    }

    let mut queries = Vec::with_capacity(num_queries);
    let mut start = 0;
    for k in topks {
        let end = start + k;
        let fields = columns
            .iter()
            .map(|c| {
                c.slice(start..end)
                    .ok_or_else(|| CodecError::shape("output field slice out of range"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        queries.push(QueryHits {
            ids: ids.slice(start, end),
            scores: data.scores[start..end].to_vec(),
            fields,
        });
        start = end;
    }
    tracing::debug!(queries = queries.len(), hits = total, "search results decoded");

    Ok(SearchResults { top_k, queries })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vectra_api::{Ids, LongArray, StringArray};

    use super::*;
    use crate::column::ColumnData;
    use crate::error::ErrorKind;

    fn response(codec: &FieldCodec) -> SearchResultData {
        SearchResultData {
            num_queries: 2,
            top_k: 2,
            fields_data: vec![
                codec
                    .encode(&Column::new("title", ColumnData::VarChar(vec!["a".into(), "b".into(), "c".into()])))
                    .unwrap(),
            ],
            scores: vec![0.9, 0.8, 0.7],
            ids: Some(Ids {
                id_field: Some(IdField::IntId(LongArray { data: vec![10, 11, 12] })),
            }),
            topks: vec![2, 1],
            output_fields: vec!["title".into()],
        }
    }

    #[test]
    fn hits_split_per_query() {
        let codec = FieldCodec::default();
        let results = decode_search_results(&codec, &response(&codec)).unwrap();
        assert_eq!(results.top_k, 2);
        assert_eq!(results.queries.len(), 2);
        assert_eq!(results.queries[0].ids, HitIds::Int(vec![10, 11]));
        assert_eq!(results.queries[0].scores, vec![0.9, 0.8]);
        assert_eq!(results.queries[1].ids, HitIds::Int(vec![12]));
        assert_eq!(
            results.queries[1].fields[0].data,
            ColumnData::VarChar(vec!["c".into()])
        );
    }

    #[test]
    fn string_ids_supported() {
        let codec = FieldCodec::default();
        let mut data = response(&codec);
        data.ids = Some(Ids {
            id_field: Some(IdField::StrId(StringArray {
                data: vec!["x".into(), "y".into(), "z".into()],
            })),
        });
        let results = decode_search_results(&codec, &data).unwrap();
        assert_eq!(results.queries[0].ids, HitIds::Str(vec!["x".into(), "y".into()]));
    }

    #[test]
    fn score_count_must_match() {
        let codec = FieldCodec::default();
        let mut data = response(&codec);
        data.scores.pop();
        let err = decode_search_results(&codec, &data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeShape);
    }

    #[test]
    fn topks_must_cover_queries() {
        let codec = FieldCodec::default();
        let mut data = response(&codec);
        data.topks = vec![3];
        assert!(decode_search_results(&codec, &data).is_err());
    }

    #[test]
    fn empty_result_set() {
        let data = SearchResultData {
            num_queries: 1,
            topks: vec![0],
            ..Default::default()
        };
        let results = decode_search_results(&FieldCodec::default(), &data).unwrap();
        assert_eq!(results.queries[0].ids, HitIds::Int(vec![]));
        assert!(results.queries[0].scores.is_empty());
    }

    #[test]
    fn huge_topks_rejected() {
        let data = SearchResultData {
            num_queries: 3,
            topks: vec![i64::MAX, i64::MAX, 2],
            ..Default::default()
        };
        let err = decode_search_results(&FieldCodec::default(), &data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeShape);
    }

    #[test]
    fn negative_top_k_rejected() {
        let data = SearchResultData {
            num_queries: 1,
            top_k: -1,
            topks: vec![0],
            ..Default::default()
        };
        let err = decode_search_results(&FieldCodec::default(), &data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeShape);
    }
}
