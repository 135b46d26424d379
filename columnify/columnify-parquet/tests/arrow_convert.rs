
use arrow::{
    array::{Array, AsArray},
    datatypes::{DataType, Int32Type, TimeUnit as ArrowTimeUnit},
};
use columnify_core::{DataTypeDef, FieldDef, IntermediateSchema, TimeUnit, Value};
use columnify_parquet::{
    ArrowConvertError, field_defs_to_arrow_schema, rows_to_record_batch,
    schema_convert::TIMESTAMP_TZ,
};
use test_helpers::*;

#[test]
fn schema_maps_temporal_types() {
    let schema = IntermediateSchema::new(
        "t",
        vec![
            FieldDef::new("d", DataTypeDef::Date, false),
            FieldDef::new("tm", DataTypeDef::Time(TimeUnit::Millis), true),
            FieldDef::new("tu", DataTypeDef::Time(TimeUnit::Micros), true),
            FieldDef::new("ts", DataTypeDef::Timestamp(TimeUnit::Millis), false),
        ],
    );
    let arrow_schema = field_defs_to_arrow_schema(&schema.fields);

    let types: Vec<&DataType> = arrow_schema.fields().iter().map(|f| f.data_type()).collect();
    assert_eq!(
        types,
        [
            &DataType::Date32,
            &DataType::Time32(ArrowTimeUnit::Millisecond),
            &DataType::Time64(ArrowTimeUnit::Microsecond),
            &DataType::Timestamp(ArrowTimeUnit::Millisecond, Some(TIMESTAMP_TZ.into())),
        ]
    );
    assert!(!arrow_schema.field(0).is_nullable());
    assert!(arrow_schema.field(1).is_nullable());
}

#[test]
fn lists_and_structs_nest() {
    let arrow_schema = field_defs_to_arrow_schema(&nested_schema().fields);

    let DataType::Struct(b) = arrow_schema.field_with_name("b").unwrap().data_type() else {
        panic!("b is not a struct");
    };
    let DataType::List(item) = b[1].data_type() else {
        panic!("b.d is not a list");
    };
    assert_eq!(item.name(), "item");
    assert!(!item.is_nullable());
    assert!(matches!(item.data_type(), DataType::Struct(_)));
}

#[test]
fn builds_batch_from_rows() {
    let schema = nested_schema();
    let rows = vec![
        Value::record([
            ("A", Value::I64(1)),
            ("f", Value::List(vec![Value::F64(1.0), Value::I32(2)])),
        ]),
        Value::record([
            ("a", Value::I32(2)),
            ("b", Value::record([("c", Value::string("x"))])),
        ]),
    ];

    let batch = rows_to_record_batch(&field_defs_to_arrow_schema(&schema.fields), &rows).unwrap();
    assert_eq!(batch.num_rows(), 2);

    let a = batch.column(0).as_primitive::<Int32Type>();
    assert_eq!(a.values().to_vec(), [1, 2]);

    let b = batch.column(1).as_struct();
    assert!(b.is_null(0));
    assert_eq!(b.column(0).as_string::<i32>().value(1), "x");

    let f = batch.column(2).as_list::<i32>();
    assert_eq!(f.value_length(0), 2);
    assert_eq!(f.value_length(1), 0);
    assert!(!f.is_null(1));
}

#[test]
fn empty_rows_build_empty_batch() {
    let schema = field_defs_to_arrow_schema(&nested_schema().fields);
    let batch = rows_to_record_batch(&schema, &[]).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 3);
}

#[test]
fn null_in_required_field_fails() {
    let schema = field_defs_to_arrow_schema(&nested_schema().fields);
    let err = rows_to_record_batch(&schema, &[Value::record([("a", Value::Null)])]).unwrap_err();
    assert!(matches!(err, ArrowConvertError::NullInNonNullableField { ref field } if field == "a"));
}

#[test]
fn mismatched_value_fails() {
    let schema = field_defs_to_arrow_schema(&nested_schema().fields);
    let err = rows_to_record_batch(
        &schema,
        &[Value::record([("a", Value::string("one"))])],
    )
    .unwrap_err();
    assert!(matches!(err, ArrowConvertError::TypeMismatch { ref field, .. } if field == "a"));

    let err = rows_to_record_batch(&schema, &[Value::I32(1)]).unwrap_err();
    assert!(matches!(err, ArrowConvertError::TypeMismatch { .. }));
}
