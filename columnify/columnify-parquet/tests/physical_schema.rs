
use columnify_core::{DataTypeDef, FieldDef, IntermediateSchema, SchemaError, TimeUnit};
use columnify_parquet::{LeafType, NodeKind, PhysicalSchema};
use parquet::basic::{ConvertedType, Repetition, Type as PhysicalType};
use test_helpers::*;

#[test]
fn levels_follow_the_ancestor_chain() {
    let physical = compile(&nested_schema());

    let expected = [
        ("a", Repetition::REQUIRED, 0, 0),
        ("b", Repetition::OPTIONAL, 1, 0),
        ("b.c", Repetition::OPTIONAL, 2, 0),
        ("b.d", Repetition::REPEATED, 2, 1),
        ("b.d.e", Repetition::REQUIRED, 2, 1),
        ("f", Repetition::REPEATED, 1, 1),
    ];
    for (path, repetition, def, rep) in expected {
        let node = physical.get(path).unwrap();
        assert_eq!(node.repetition, repetition, "{path}");
        assert_eq!(node.max_definition_level, def, "{path}");
        assert_eq!(node.max_repetition_level, rep, "{path}");
    }

    let root = physical.root();
    assert_eq!(root.repetition, Repetition::REQUIRED);
    assert_eq!(root.kind, NodeKind::Group { child_count: 3 });
    assert_eq!(root.max_definition_level, 0);
}

#[test]
fn nodes_are_in_pre_order() {
    let physical = compile(&nested_schema());
    let paths: Vec<_> = physical.nodes().iter().map(|n| n.path.as_str()).collect();
    assert_eq!(paths, ["", "a", "b", "b.c", "b.d", "b.d.e", "f"]);

    let leaves: Vec<_> = physical.leaves().map(|n| n.path.as_str()).collect();
    assert_eq!(leaves, ["a", "b.c", "b.d.e", "f"]);
    assert_eq!(physical.num_leaves(), 4);
}

#[test]
fn list_of_primitives_is_a_repeated_leaf() {
    let physical = compile(&boolean_values_schema());
    let values = physical.get("values").unwrap();

    assert_eq!(values.kind, NodeKind::Leaf(LeafType::Int64));
    assert_eq!(values.repetition, Repetition::REPEATED);
    assert_eq!(values.max_definition_level, 1);
    assert_eq!(values.max_repetition_level, 1);
}

#[test]
fn nested_lists_accumulate_repetition() {
    let physical = compile(&two_level_schema());
    assert_eq!(physical.max_repetition_level("g"), Some(1));
    assert_eq!(physical.max_repetition_level("g.h"), Some(2));
    assert_eq!(physical.max_definition_level("g.h"), Some(2));
}

#[test]
fn paths_are_canonical() {
    let schema = IntermediateSchema::new(
        "r",
        vec![FieldDef::new(
            "UserInfo",
            struct_of(vec![FieldDef::new("UserId", DataTypeDef::I64, false)]),
            false,
        )],
    );
    let physical = compile(&schema);

    let leaf = physical.leaves().next().unwrap();
    assert_eq!(leaf.path, "userInfo.userId");
    assert_eq!(leaf.name, "UserId");
    assert!(physical.get("UserInfo.UserId").is_some());
    assert_eq!(physical.index_of("userInfo.userId"), Some(2));
}

#[test]
fn duplicate_canonical_paths_are_rejected() {
    let schema = IntermediateSchema::new(
        "r",
        vec![
            FieldDef::new("Name", DataTypeDef::String, true),
            FieldDef::new("name", DataTypeDef::String, true),
        ],
    );
    let err = PhysicalSchema::compile(&schema).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicatePath { ref path } if path == "name"));
}

#[test]
fn unsupported_shapes_are_rejected() {
    let list_of_lists = IntermediateSchema::new(
        "r",
        vec![FieldDef::new("m", list_of(list_of(DataTypeDef::I32)), false)],
    );
    let empty_struct = IntermediateSchema::new(
        "r",
        vec![FieldDef::new("s", struct_of(vec![]), true)],
    );
    let no_fields = IntermediateSchema::new("r", Vec::new());

    for schema in [list_of_lists, empty_struct, no_fields] {
        let err = PhysicalSchema::compile(&schema).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedType { .. }), "{err}");
    }
}

#[test]
fn parquet_schema_matches_physical_levels() {
    let schema = IntermediateSchema::new(
        "",
        vec![
            FieldDef::new("s", DataTypeDef::String, true),
            FieldDef::new("d", DataTypeDef::Date, false),
            FieldDef::new("t", DataTypeDef::Time(TimeUnit::Millis), true),
            FieldDef::new("tu", DataTypeDef::Time(TimeUnit::Micros), true),
            FieldDef::new("ts", DataTypeDef::Timestamp(TimeUnit::Millis), true),
            FieldDef::new("raw", list_of(DataTypeDef::Bytes), false),
        ],
    );
    let physical = compile(&schema);
    let descr = physical.to_schema_descriptor().unwrap();

    assert_eq!(descr.root_schema().name(), "schema");
    assert_eq!(descr.num_columns(), physical.num_leaves());

    let expected = [
        ("s", PhysicalType::BYTE_ARRAY, ConvertedType::UTF8),
        ("d", PhysicalType::INT32, ConvertedType::DATE),
        ("t", PhysicalType::INT32, ConvertedType::TIME_MILLIS),
        ("tu", PhysicalType::INT64, ConvertedType::TIME_MICROS),
        ("ts", PhysicalType::INT64, ConvertedType::TIMESTAMP_MILLIS),
        ("raw", PhysicalType::BYTE_ARRAY, ConvertedType::NONE),
    ];
    for (i, (leaf, (path, physical_type, converted))) in
        physical.leaves().zip(expected).enumerate()
    {
        let column = descr.column(i);
        assert_eq!(column.path().string(), path);
        assert_eq!(column.physical_type(), physical_type, "{path}");
        assert_eq!(column.converted_type(), converted, "{path}");
        assert_eq!(column.max_def_level(), leaf.max_definition_level, "{path}");
        assert_eq!(column.max_rep_level(), leaf.max_repetition_level, "{path}");
    }
}

#[test]
fn nested_parquet_schema_levels() {
    let physical = compile(&nested_schema());
    let descr = physical.to_schema_descriptor().unwrap();

    assert_eq!(descr.root_schema().name(), "nested");
    for (i, leaf) in physical.leaves().enumerate() {
        let column = descr.column(i);
        assert_eq!(column.path().string(), leaf.path);
        assert_eq!(column.max_def_level(), leaf.max_definition_level);
        assert_eq!(column.max_rep_level(), leaf.max_repetition_level);
    }
}
