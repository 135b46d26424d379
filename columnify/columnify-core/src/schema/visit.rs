use super::{DataTypeDef, FieldDef, FieldDefs, IntermediateSchema};

/// Depth-first, pre-order visitor over the fields of an [`IntermediateSchema`].
///
/// `depth` is `1` for top-level fields. The members of a struct, and of a
/// struct that is the element of a list, are visited at `depth + 1` right
/// after their parent.
pub trait SchemaVisitor {
    type Error;

    fn visit_field(&mut self, depth: usize, field: &FieldDef) -> Result<(), Self::Error>;
}

impl IntermediateSchema {
    /// Walk every field in declaration order with an explicit work stack.
    pub fn visit<V: SchemaVisitor>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut stack: Vec<(usize, &FieldDef)> =
            self.fields.iter().rev().map(|f| (1, f)).collect();

        while let Some((depth, field)) = stack.pop() {
            visitor.visit_field(depth, field)?;
            if let Some(children) = nested_fields(&field.element.data_type) {
                stack.extend(children.iter().rev().map(|c| (depth + 1, c)));
            }
        }

        Ok(())
    }
}

fn nested_fields(data_type: &DataTypeDef) -> Option<&FieldDefs> {
    match data_type {
        DataTypeDef::Struct(fields) => Some(fields),
        DataTypeDef::List(elem) => match &elem.data_type {
            DataTypeDef::Struct(fields) => Some(fields),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::ElementDef;

    struct Names(Vec<(usize, String)>);

    impl SchemaVisitor for Names {
        type Error = Infallible;

        fn visit_field(&mut self, depth: usize, field: &FieldDef) -> Result<(), Infallible> {
            self.0.push((depth, field.name.clone()));
            Ok(())
        }
    }

    #[test]
    fn visits_in_pre_order_through_structs_and_lists() {
        let schema = IntermediateSchema::new(
            "root",
            vec![
                FieldDef::new("a", DataTypeDef::I32, false),
                FieldDef::new(
                    "b",
                    DataTypeDef::Struct(
                        vec![
                            FieldDef::new("c", DataTypeDef::String, true),
                            FieldDef::new(
                                "d",
                                DataTypeDef::List(Box::new(ElementDef::new(
                                    DataTypeDef::Struct(
                                        vec![FieldDef::new("e", DataTypeDef::Bool, false)].into(),
                                    ),
                                    false,
                                ))),
                                true,
                            ),
                        ]
                        .into(),
                    ),
                    true,
                ),
                FieldDef::new("f", DataTypeDef::F64, true),
            ],
        );

        let mut names = Names(Vec::new());
        schema.visit(&mut names).unwrap();

        let expected = [(1, "a"), (1, "b"), (2, "c"), (2, "d"), (3, "e"), (1, "f")];
        assert_eq!(names.0.len(), expected.len());
        for ((depth, name), (exp_depth, exp_name)) in names.0.iter().zip(expected) {
            assert_eq!(*depth, exp_depth);
            assert_eq!(name, exp_name);
        }
    }
}
