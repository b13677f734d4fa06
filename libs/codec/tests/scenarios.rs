use std::io::Write as _;

use pretty_assertions::assert_eq;
use serde_json::json;
use vectra_api::{field_data, scalar_field, vector_field, DataType, FieldData, PlaceholderType};
use vectra_codec::codec::dense::decode_rows;
use vectra_codec::{
    f16, AnnQueryEncoder, ArrayData, CodecError, CodecOptions, Column, ColumnData, ErrorKind,
    FieldCodec, Narrowing, QueryVectors, SparseVector, SparseVectorCodec,
};

fn vector_bytes(field: &FieldData) -> (i64, &[u8]) {
    let Some(field_data::Field::Vectors(v)) = &field.field else {
        panic!("expected a vector payload");
    };
    let bytes = match v.data.as_ref() {
        Some(vector_field::Data::FloatVector(b))
        | Some(vector_field::Data::Float16Vector(b))
        | Some(vector_field::Data::Bfloat16Vector(b))
        | Some(vector_field::Data::BinaryVector(b)) => b.as_slice(),
        other => panic!("unexpected vector data {other:?}"),
    };
    (v.dim, bytes)
}

#[test]
fn ragged_dense_column_is_dimension_mismatch() {
    let column = Column::new("emb", ColumnData::FloatVector(vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]]));
    let err = FieldCodec::default().encode(&column).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
}

#[test]
fn sparse_construction_rules() {
    assert_eq!(
        SparseVector::new(vec![0, 0], vec![1.0f32, 2.0]).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert!(SparseVector::new(vec![0, 100], vec![1.0f32, 2.0]).is_ok());
    assert!(SparseVector::new(vec![50, 200], vec![1.0f32, 2.0]).is_ok());
    assert!(SparseVector::new(vec![3], vec![f32::NAN]).is_err());
    assert!(SparseVector::new(vec![-1], vec![1.0f32]).is_err());
    assert!(SparseVector::new(vec![2, 1], vec![1.0f32, 1.0]).is_err());
}

#[test]
fn sparse_dimension_is_derived() {
    let rows = vec![
        SparseVector::new(vec![0, 100], vec![1.0, 2.0]).unwrap(),
        SparseVector::new(vec![50, 200], vec![1.0, 2.0]).unwrap(),
    ];
    assert_eq!(SparseVectorCodec::dimension(&rows), 201);

    let wire = FieldCodec::default().encode(&Column::sparse_vectors("sp", rows)).unwrap();
    let Some(field_data::Field::Vectors(v)) = wire.field else {
        panic!("expected a vector payload");
    };
    assert_eq!(v.dim, 201);
}

#[test]
fn array_rows_keep_grouping() {
    let codec = FieldCodec::default();
    let column = Column::new("tags", ColumnData::Array(ArrayData::Int32(vec![vec![1, 2], vec![3, 4]])));
    let decoded = codec.decode(&codec.encode(&column).unwrap()).unwrap();
    assert_eq!(decoded.data, ColumnData::Array(ArrayData::Int32(vec![vec![1, 2], vec![3, 4]])));
    assert_eq!(decoded.element_type(), Some(DataType::Int32));
}

#[test]
fn empty_scalar_column_is_validation_error() {
    for data in [
        ColumnData::Int64(vec![]),
        ColumnData::VarChar(vec![]),
        ColumnData::FloatVector(vec![]),
        ColumnData::SparseFloatVector(vec![]),
    ] {
        let err = FieldCodec::default().encode(&Column::new("x", data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

#[test]
fn binary_buffer_chunks_into_rows() {
    let column = Column::binary_vectors_from_bytes("bits", &[1, 2, 3, 4, 5, 6], 16).unwrap();
    let codec = FieldCodec::default();
    let wire = codec.encode(&column).unwrap();
    assert_eq!(vector_bytes(&wire), (16, &[1u8, 2, 3, 4, 5, 6][..]));

    let decoded = codec.decode(&wire).unwrap();
    assert_eq!(
        decoded.data,
        ColumnData::BinaryVector {
            dim: 16,
            rows: vec![vec![1, 2], vec![3, 4], vec![5, 6]],
        }
    );
}

#[test]
fn binary_short_tail_cannot_be_reencoded() {
    let column = Column::binary_vectors_from_bytes("bits", &[1, 2, 3], 16).unwrap();
    assert_eq!(column.row_count(), 2);
    let err = FieldCodec::default().encode(&column).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
}

#[test]
fn query_bytes_match_storage_bytes() {
    let rows = vec![vec![0.25f32, -1.5, f32::INFINITY], vec![3.0, 0.0, -0.0]];
    let stored = FieldCodec::default()
        .encode(&Column::new("emb", ColumnData::FloatVector(rows.clone())))
        .unwrap();
    let (dim, storage) = vector_bytes(&stored);
    assert_eq!(dim, 3);

    let group = AnnQueryEncoder::default().encode(&QueryVectors::Float(rows)).unwrap();
    let query = &group.placeholders[0];
    assert_eq!(query.placeholder_type(), PlaceholderType::FloatVector);
    assert_eq!(query.values.concat(), storage);
    assert_eq!(decode_rows::<f32>(&query.values[1], 3).unwrap(), vec![vec![3.0, 0.0, -0.0]]);
}

#[test]
fn half_query_bytes_match_storage_bytes() {
    let rows = vec![vec![f16::from_f32(1.0), f16::from_f32(-2.5)]];
    let stored = FieldCodec::default()
        .encode(&Column::new("h", ColumnData::Float16Vector(rows.clone())))
        .unwrap();
    let group = AnnQueryEncoder::default().encode(&QueryVectors::Float16(rows)).unwrap();
    assert_eq!(group.placeholders[0].values.concat(), vector_bytes(&stored).1);
}

#[test]
fn sparse_query_bytes_match_storage_bytes() {
    let row = SparseVector::new(vec![1, 7], vec![0.5f32, 2.0]).unwrap();
    let stored = FieldCodec::default()
        .encode(&Column::sparse_vectors("sp", vec![row.clone()]))
        .unwrap();
    let Some(field_data::Field::Vectors(v)) = stored.field else {
        panic!("expected a vector payload");
    };
    let Some(vector_field::Data::SparseFloatVector(array)) = v.data else {
        panic!("expected sparse data");
    };
    let group = AnnQueryEncoder::default().encode(&QueryVectors::Sparse(vec![row])).unwrap();
    assert_eq!(group.placeholders[0].values, array.contents);
}

#[test]
fn narrowing_policy_applies_to_small_ints() {
    let wire = FieldData {
        data_type: DataType::Int8 as i32,
        field_name: "age".into(),
        field: Some(field_data::Field::Scalars(vectra_api::ScalarField {
            data: Some(scalar_field::Data::IntData(vectra_api::IntArray { data: vec![1, 300] })),
        })),
        ..Default::default()
    };

    let truncated = FieldCodec::default().decode(&wire).unwrap();
    assert_eq!(truncated.data, ColumnData::Int8(vec![1, 44]));

    let strict = FieldCodec::new(CodecOptions {
        narrowing: Narrowing::Reject,
        ..CodecOptions::default()
    });
    let err = strict.decode(&wire).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeShape);
}

#[test]
fn scalar_batch_round_trip() {
    let codec = FieldCodec::default();
    let columns = vec![
        Column::from_values("id", vec![1i64, 2, 3]),
        Column::from_values("ok", vec![true, false, true]),
        Column::from_values("score", vec![0.5f64, 1.5, -2.0]),
        Column::from_values("name", vec!["a".to_string(), "bb".into(), "".into()]),
        Column::new("doc", ColumnData::Json(vec!["{}".into(), "[1]".into(), "null".into()])),
    ];
    let wire = codec.encode_batch(&columns).unwrap();
    assert_eq!(wire.len(), 5);
    assert_eq!(wire[0].data_type(), DataType::Int64);
    assert_eq!(codec.decode_batch(&wire).unwrap(), columns);
}

#[test]
fn dynamic_rows_use_configured_field() {
    let codec = FieldCodec::new(CodecOptions {
        dynamic_field: "$extra".into(),
        ..CodecOptions::default()
    });
    let row = json!({"color": "red"}).as_object().cloned().unwrap();
    let wire = codec.encode_dynamic(&[row.clone()]).unwrap();
    assert!(wire.is_dynamic);
    assert_eq!(wire.field_name, "$extra");

    let column = codec.decode(&wire).unwrap();
    assert_eq!(vectra_codec::dynamic::decode_rows(&column).unwrap(), vec![row]);
}

#[test]
fn wire_type_mismatch_is_shape_error() {
    let mut wire = FieldCodec::default()
        .encode(&Column::from_values("id", vec![1i64]))
        .unwrap();
    wire.data_type = DataType::Bool as i32;
    let err = FieldCodec::default().decode(&wire).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeShape);
    assert!(err.to_string().starts_with("field 'id':"));
}

#[test]
fn sparse_blob_of_odd_length_is_shape_error() {
    let err = SparseVector::from_bytes(&[0u8; 12]).unwrap_err();
    assert!(matches!(err, CodecError::DecodeShape(_)));
}

#[test]
fn options_load_from_file() {
    let mut file = tempfile_path("codec.toml");
    writeln!(file.1, "narrowing = \"reject\"\nscratch_pool_limit = 2").unwrap();
    let options = CodecOptions::load(&file.0).unwrap();
    assert_eq!(options.narrowing, Narrowing::Reject);
    assert_eq!(options.scratch_pool_limit, 2);
    assert_eq!(options.query_tag, "$0");
    std::fs::remove_file(&file.0).unwrap();

    let err = CodecOptions::load(&file.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

fn tempfile_path(name: &str) -> (std::path::PathBuf, std::fs::File) {
    let path = std::env::temp_dir().join(format!("vectra-{}-{name}", std::process::id()));
    let file = std::fs::File::create(&path).unwrap();
    (path, file)
}
