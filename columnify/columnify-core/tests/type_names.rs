use columnify_core::{RecordType, SchemaType};

#[test]
fn schema_type_known_value_mapping() {
    let st: SchemaType = "avro".parse().unwrap();
    assert_eq!(st, SchemaType::Avro);
    assert_eq!(st.as_str(), "avro");
    assert_eq!("BigQuery".parse::<SchemaType>().unwrap(), SchemaType::BigQuery);
    assert_eq!(SchemaType::BigQuery.to_string(), "bigquery");
}

#[test]
fn schema_type_unknown_is_rejected() {
    let err = "thrift".parse::<SchemaType>().unwrap_err();
    assert_eq!(err, "unsupported schema type: thrift");
}

#[test]
fn record_type_known_mappings() {
    assert_eq!("avro".parse::<RecordType>().unwrap(), RecordType::Avro);
    assert_eq!("csv".parse::<RecordType>().unwrap(), RecordType::Csv);
    assert_eq!("jsonl".parse::<RecordType>().unwrap(), RecordType::Jsonl);
    assert_eq!("ltsv".parse::<RecordType>().unwrap(), RecordType::Ltsv);
    assert_eq!("msgpack".parse::<RecordType>().unwrap(), RecordType::MsgPack);
    assert_eq!("TSV".parse::<RecordType>().unwrap(), RecordType::Tsv);
    assert!("parquet".parse::<RecordType>().is_err());
}

#[test]
fn record_type_display_matches_as_str() {
    let values = [
        RecordType::Avro,
        RecordType::Csv,
        RecordType::Jsonl,
        RecordType::Ltsv,
        RecordType::MsgPack,
        RecordType::Tsv,
    ];
    for value in values {
        assert_eq!(value.to_string(), value.as_str());
        assert_eq!(value.as_str().parse::<RecordType>().unwrap(), value);
    }
}
