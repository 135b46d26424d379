use columnify_core::{
    DataTypeDef, ElementDef, FieldDef, FieldDefs, IntermediateSchema, TimeUnit, format_field_defs,
};

#[test]
fn nested_structs_are_indented() -> Result<(), std::fmt::Error> {
    let fields = vec![FieldDef::new(
        "field_root",
        DataTypeDef::Struct(
            vec![
                FieldDef::new("field_a", DataTypeDef::F64, true),
                FieldDef::new(
                    "field_b",
                    DataTypeDef::Struct(
                        vec![FieldDef::new("field_c", DataTypeDef::String, true)].into(),
                    ),
                    false,
                ),
                FieldDef::new("field_d", DataTypeDef::Date, false),
            ]
            .into(),
        ),
        true,
    )];

    let expected = "\
field_root: struct?
  field_a: f64?
  field_b: struct
    field_c: string?
  field_d: date
";
    assert_eq!(format_field_defs(&fields)?, expected);
    Ok(())
}

#[test]
fn list_of_structs_lists_element_members() -> Result<(), std::fmt::Error> {
    let fields = vec![
        FieldDef::new(
            "events",
            DataTypeDef::List(Box::new(ElementDef::new(
                DataTypeDef::Struct(
                    vec![
                        FieldDef::new("at", DataTypeDef::Timestamp(TimeUnit::Micros), false),
                        FieldDef::new("kind", DataTypeDef::String, true),
                    ]
                    .into(),
                ),
                false,
            ))),
            false,
        ),
        FieldDef::new("id", DataTypeDef::I64, false),
    ];

    let expected = "\
events: list<struct>
  at: timestamp_us
  kind: string?
id: i64
";
    assert_eq!(format_field_defs(&fields)?, expected);
    Ok(())
}

#[test]
fn list_element_nullability_is_shown() -> Result<(), std::fmt::Error> {
    let fields = vec![
        FieldDef::new(
            "tags",
            DataTypeDef::List(Box::new(ElementDef::new(DataTypeDef::String, false))),
            false,
        ),
        FieldDef::new(
            "scores",
            DataTypeDef::List(Box::new(ElementDef::new(DataTypeDef::F32, true))),
            true,
        ),
    ];

    assert_eq!(
        format_field_defs(&fields)?,
        "tags: list<string>\nscores: list<f32?>?\n"
    );
    Ok(())
}

#[test]
fn display_matches_formatter() -> Result<(), std::fmt::Error> {
    let fields: FieldDefs = vec![FieldDef::new("field_a", DataTypeDef::I32, false)].into();
    assert_eq!(fields.to_string(), format_field_defs(fields.as_slice())?);
    assert_eq!(fields.to_string(), "field_a: i32\n");

    let schema = IntermediateSchema::new("R", fields.clone());
    assert_eq!(schema.to_string(), fields.to_string());
    Ok(())
}
