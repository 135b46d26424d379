use columnify_bigquery::bigquery_schema_to_intermediate;
use columnify_core::{DataTypeDef, ElementDef, FieldDef, SchemaError, TimeUnit};

#[test]
fn repeated_string_becomes_list() {
    let schema =
        bigquery_schema_to_intermediate(br#"[{"name":"tags","type":"STRING","mode":"REPEATED"}]"#)
            .unwrap();

    assert_eq!(
        schema.fields.as_slice(),
        &[FieldDef::new(
            "tags",
            DataTypeDef::List(Box::new(ElementDef::new(DataTypeDef::String, false))),
            false,
        )]
    );
}

#[test]
fn primitive_types_and_modes() {
    let schema = bigquery_schema_to_intermediate(
        br#"[
            {"name":"b","type":"BOOLEAN","mode":"REQUIRED"},
            {"name":"i","type":"INTEGER","mode":"NULLABLE"},
            {"name":"n","type":"NUMERIC"},
            {"name":"f","type":"FLOAT","mode":"REQUIRED"},
            {"name":"s","type":"STRING","mode":"REQUIRED"},
            {"name":"y","type":"BYTES","mode":"NULLABLE"},
            {"name":"d","type":"DATE","mode":"REQUIRED"},
            {"name":"t","type":"TIME","mode":"REQUIRED"},
            {"name":"ts","type":"TIMESTAMP","mode":"REQUIRED"}
        ]"#,
    )
    .unwrap();

    let expected = [
        FieldDef::new("b", DataTypeDef::Bool, false),
        FieldDef::new("i", DataTypeDef::I64, true),
        FieldDef::new("n", DataTypeDef::I64, true),
        FieldDef::new("f", DataTypeDef::F64, false),
        FieldDef::new("s", DataTypeDef::String, false),
        FieldDef::new("y", DataTypeDef::Bytes, true),
        FieldDef::new("d", DataTypeDef::Date, false),
        FieldDef::new("t", DataTypeDef::Time(TimeUnit::Micros), false),
        FieldDef::new("ts", DataTypeDef::Timestamp(TimeUnit::Micros), false),
    ];
    assert_eq!(schema.fields.as_slice(), &expected);
    assert_eq!(schema.name, "");
}

#[test]
fn standard_sql_aliases() {
    let schema = bigquery_schema_to_intermediate(
        br#"[
            {"name":"b","type":"BOOL","mode":"REQUIRED"},
            {"name":"i","type":"INT64","mode":"REQUIRED"},
            {"name":"f","type":"FLOAT64","mode":"REQUIRED"}
        ]"#,
    )
    .unwrap();

    let types: Vec<_> = schema.fields.iter().map(|f| f.data_type().clone()).collect();
    assert_eq!(types, [DataTypeDef::Bool, DataTypeDef::I64, DataTypeDef::F64]);
}

#[test]
fn nested_repeated_records_recurse() {
    let schema = bigquery_schema_to_intermediate(
        br#"[
            {"name":"outer","type":"RECORD","mode":"REPEATED","fields":[
                {"name":"id","type":"INTEGER","mode":"REQUIRED"},
                {"name":"inner","type":"RECORD","mode":"NULLABLE","fields":[
                    {"name":"labels","type":"STRING","mode":"REPEATED"}
                ]}
            ]}
        ]"#,
    )
    .unwrap();

    let labels = FieldDef::new(
        "labels",
        DataTypeDef::List(Box::new(ElementDef::new(DataTypeDef::String, false))),
        false,
    );
    let inner = FieldDef::new("inner", DataTypeDef::Struct(vec![labels].into()), true);
    let outer_struct = DataTypeDef::Struct(
        vec![FieldDef::new("id", DataTypeDef::I64, false), inner].into(),
    );
    let outer = FieldDef::new(
        "outer",
        DataTypeDef::List(Box::new(ElementDef::new(outer_struct, false))),
        false,
    );

    assert_eq!(schema.fields.as_slice(), &[outer]);
}

#[test]
fn unmapped_types_are_unsupported() {
    for ty in ["GEOGRAPHY", "DATETIME", "JSON"] {
        let doc = format!(r#"[{{"name":"g","type":"{ty}","mode":"NULLABLE"}}]"#);
        let err = bigquery_schema_to_intermediate(doc.as_bytes()).unwrap_err();
        assert!(
            matches!(
                err,
                SchemaError::UnsupportedFieldType { ref field, ref field_type }
                    if field == "g" && field_type == ty
            ),
            "{err}"
        );
    }
}

#[test]
fn unsupported_type_inside_record_is_reported() {
    let err = bigquery_schema_to_intermediate(
        br#"[{"name":"r","type":"RECORD","fields":[{"name":"geo","type":"GEOGRAPHY"}]}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedFieldType { ref field, .. } if field == "geo"));
}

#[test]
fn unknown_mode_is_invalid() {
    let err = bigquery_schema_to_intermediate(br#"[{"name":"a","type":"STRING","mode":"SOMETIMES"}]"#)
        .unwrap_err();
    assert!(matches!(err, SchemaError::Invalid { .. }));
}

#[test]
fn malformed_document_is_a_parse_error() {
    let err = bigquery_schema_to_intermediate(br#"{"name":"a"}"#).unwrap_err();
    assert!(matches!(err, SchemaError::Parse { ref schema_type, .. } if schema_type == "bigquery"));
}
