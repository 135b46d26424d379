use std::sync::Arc;

use apache_avro::{
    Schema as AvroSchema, Writer,
    types::{Record as AvroRecord, Value as AvroValue},
};
use arrow::{
    array::{Array, AsArray},
    datatypes::{DataType, Field, Float64Type, Int64Type, Schema, SchemaRef},
};
use chrono::{DateTime, NaiveDate};
use columnify_core::{DecoderError, RecordType, Value};
use columnify_record::{DecodedRecords, decoder_for};
use serde::Serialize;

fn flat_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("name", DataType::Utf8, true),
        Field::new("score", DataType::Float64, true),
    ]))
}

fn rows(record_type: RecordType, data: &[u8]) -> Vec<Value> {
    match decoder_for(record_type, flat_schema()).unwrap().decode(data).unwrap() {
        DecodedRecords::Rows(rows) => rows,
        DecodedRecords::Columnar(_) => panic!("{record_type} decoded to a batch"),
    }
}

#[test]
fn jsonl_decodes_objects_and_skips_blank_lines() {
    let rows = rows(
        RecordType::Jsonl,
        b"{\"id\": 1, \"name\": \"a\", \"tags\": [\"x\"]}\n\n{\"id\": 2, \"score\": 1.5, \"name\": null}\n",
    );

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get_field("id").unwrap(), Some(&Value::I64(1)));
    assert_eq!(
        rows[0].get_field("tags").unwrap(),
        Some(&Value::List(vec![Value::string("x")]))
    );
    assert_eq!(rows[1].get_field("name").unwrap(), Some(&Value::Null));
    assert_eq!(rows[1].get_field("score").unwrap(), Some(&Value::F64(1.5)));
}

#[test]
fn jsonl_reports_the_failing_line() {
    let decoder = decoder_for(RecordType::Jsonl, flat_schema()).unwrap();

    let err = decoder.decode(b"{\"id\": 1}\n{\"id\": \n").unwrap_err();
    assert!(matches!(err, DecoderError::RecordDecode { line: 2, .. }));

    let err = decoder.decode(b"{\"id\": 1}\n[1, 2]\n").unwrap_err();
    assert!(matches!(err, DecoderError::NotARecord { line: 2, .. }));
}

#[test]
fn ltsv_types_values() {
    let rows = rows(
        RecordType::Ltsv,
        b"id:1\tname:alice\tscore:0.5\tactive:true\n\nid:2\tname:0\n",
    );

    assert_eq!(rows.len(), 2);
    let first = &rows[0];
    assert_eq!(first.get_field("id").unwrap(), Some(&Value::I64(1)));
    assert_eq!(first.get_field("name").unwrap(), Some(&Value::string("alice")));
    assert_eq!(first.get_field("score").unwrap(), Some(&Value::F64(0.5)));
    assert_eq!(first.get_field("active").unwrap(), Some(&Value::Bool(true)));
    assert_eq!(rows[1].get_field("name").unwrap(), Some(&Value::I64(0)));
}

#[test]
fn ltsv_rejects_unlabeled_fields() {
    let err = decoder_for(RecordType::Ltsv, flat_schema())
        .unwrap()
        .decode(b"id:1\n2\n")
        .unwrap_err();
    assert!(matches!(err, DecoderError::RecordDecode { line: 2, .. }));
}

#[derive(Serialize)]
struct Record<'a> {
    id: i64,
    name: Option<&'a str>,
}

#[test]
fn msgpack_decodes_a_stream_of_maps() {
    let mut data = Vec::new();
    for record in [
        Record {
            id: 1,
            name: Some("a"),
        },
        Record { id: 2, name: None },
    ] {
        data.extend(rmp_serde::to_vec_named(&record).unwrap());
    }

    let rows = rows(RecordType::MsgPack, &data);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get_field("name").unwrap(), Some(&Value::string("a")));
    assert_eq!(rows[1].get_field("id").unwrap(), Some(&Value::I64(2)));
    assert!(rows[1].get_field("name").unwrap().unwrap().is_null());
}

#[test]
fn msgpack_rejects_non_maps() {
    let data = rmp_serde::to_vec(&(1, 2)).unwrap();
    let err = decoder_for(RecordType::MsgPack, flat_schema())
        .unwrap()
        .decode(&data)
        .unwrap_err();
    assert!(matches!(err, DecoderError::NotARecord { line: 1, .. }));
}

#[test]
fn csv_and_tsv_decode_positionally() {
    for (record_type, data) in [
        (RecordType::Csv, &b"1,alice,0.5\n2,,\n"[..]),
        (RecordType::Tsv, &b"1\talice\t0.5\n2\t\t\n"[..]),
    ] {
        let decoded = decoder_for(record_type, flat_schema())
            .unwrap()
            .decode(data)
            .unwrap();
        let DecodedRecords::Columnar(batch) = decoded else {
            panic!("{record_type} decoded to rows");
        };

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.column(0).as_primitive::<Int64Type>().values().to_vec(), [1, 2]);
        let names = batch.column(1).as_string::<i32>();
        assert_eq!(names.value(0), "alice");
        assert!(names.is_null(1));
        let scores = batch.column(2).as_primitive::<Float64Type>();
        assert_eq!(scores.value(0), 0.5);
        assert!(scores.is_null(1));
    }
}

#[test]
fn csv_with_wrong_field_count_fails() {
    let err = decoder_for(RecordType::Csv, flat_schema())
        .unwrap()
        .decode(b"1,alice\n")
        .unwrap_err();
    assert!(matches!(err, DecoderError::InvalidInput { .. }));
}

#[test]
fn empty_csv_is_an_empty_batch() {
    let decoded = decoder_for(RecordType::Csv, flat_schema())
        .unwrap()
        .decode(b"")
        .unwrap();
    assert!(decoded.is_empty());
}

const EVENT_AVRO_SCHEMA: &str = r#"{
  "type": "record",
  "name": "event",
  "fields": [
    {"name": "id", "type": "long"},
    {"name": "label", "type": ["null", "string"]},
    {"name": "day", "type": {"type": "int", "logicalType": "date"}},
    {"name": "at", "type": {"type": "long", "logicalType": "timestamp-millis"}},
    {"name": "tags", "type": {"type": "array", "items": "string"}},
    {"name": "origin", "type": ["null", {
      "type": "record", "name": "origin",
      "fields": [{"name": "host", "type": "string"}]
    }]}
  ]
}"#;

#[test]
fn avro_container_files_decode_with_unions_flattened() {
    let schema = AvroSchema::parse_str(EVENT_AVRO_SCHEMA).unwrap();
    let mut writer = Writer::new(&schema, Vec::new());

    let mut first = AvroRecord::new(&schema).unwrap();
    first.put("id", 1i64);
    first.put(
        "label",
        AvroValue::Union(1, Box::new(AvroValue::String("a".into()))),
    );
    first.put("day", AvroValue::Date(10));
    first.put("at", AvroValue::TimestampMillis(1500));
    first.put(
        "tags",
        AvroValue::Array(vec![AvroValue::String("x".into()), AvroValue::String("y".into())]),
    );
    first.put(
        "origin",
        AvroValue::Union(
            1,
            Box::new(AvroValue::Record(vec![(
                "host".into(),
                AvroValue::String("h1".into()),
            )])),
        ),
    );
    writer.append(first).unwrap();

    let mut second = AvroRecord::new(&schema).unwrap();
    second.put("id", 2i64);
    second.put("label", AvroValue::Union(0, Box::new(AvroValue::Null)));
    second.put("day", AvroValue::Date(0));
    second.put("at", AvroValue::TimestampMillis(0));
    second.put("tags", AvroValue::Array(Vec::new()));
    second.put("origin", AvroValue::Union(0, Box::new(AvroValue::Null)));
    writer.append(second).unwrap();

    let data = writer.into_inner().unwrap();
    let rows = rows(RecordType::Avro, &data);

    assert_eq!(rows.len(), 2);
    let first = &rows[0];
    assert_eq!(first.get_field("id").unwrap(), Some(&Value::I64(1)));
    assert_eq!(first.get_field("label").unwrap(), Some(&Value::string("a")));
    assert_eq!(
        first.get_field("day").unwrap(),
        Some(&Value::Date(NaiveDate::from_ymd_opt(1970, 1, 11).unwrap()))
    );
    assert_eq!(
        first.get_field("at").unwrap(),
        Some(&Value::DateTime(DateTime::from_timestamp_millis(1500).unwrap()))
    );
    assert_eq!(
        first.get_field("tags").unwrap(),
        Some(&Value::List(vec![Value::string("x"), Value::string("y")]))
    );
    assert_eq!(
        first.get_field("origin").unwrap(),
        Some(&Value::record([("host", Value::string("h1"))]))
    );

    let second = &rows[1];
    assert!(second.get_field("label").unwrap().unwrap().is_null());
    assert!(second.get_field("origin").unwrap().unwrap().is_null());
    assert_eq!(second.get_field("tags").unwrap(), Some(&Value::List(Vec::new())));
}

#[test]
fn avro_rejects_input_without_a_container_header() {
    let decoder = decoder_for(RecordType::Avro, flat_schema()).unwrap();

    let err = decoder.decode(b"{\"id\": 1}\n").unwrap_err();
    assert!(matches!(err, DecoderError::InvalidInput { .. }));

    assert!(decoder.decode(b"").unwrap().is_empty());
}
