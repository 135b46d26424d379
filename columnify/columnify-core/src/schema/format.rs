use std::fmt::{Error, Write as _};

use super::{DataTypeDef, FieldDef};

/// Render field definitions as an indented tree, one field per line.
///
/// Each line reads `name: type`, with `?` marking a nullable field or list
/// element. Struct members, including those of a list's struct element, are
/// listed below their field with two more spaces of indentation:
///
/// ```text
/// id: i64
/// tags: list<string>
/// address: struct?
///   city: string
/// ```
pub fn format_field_defs(fields: impl AsRef<[FieldDef]>) -> Result<String, Error> {
    let mut out = String::new();
    let mut stack: Vec<(usize, &FieldDef)> = fields.as_ref().iter().rev().map(|f| (0, f)).collect();

    while let Some((depth, field)) = stack.pop() {
        writeln!(
            out,
            "{:indent$}{}: {}",
            "",
            field.name,
            type_label(field.data_type(), field.nullable()),
            indent = depth * 2
        )?;

        let members = match field.data_type() {
            DataTypeDef::Struct(members) => Some(members),
            DataTypeDef::List(elem) => match &elem.data_type {
                DataTypeDef::Struct(members) => Some(members),
                _ => None,
            },
            _ => None,
        };
        if let Some(members) = members {
            stack.extend(members.iter().rev().map(|m| (depth + 1, m)));
        }
    }

    Ok(out)
}

fn type_label(data_type: &DataTypeDef, nullable: bool) -> String {
    let base = match data_type {
        DataTypeDef::List(elem) => format!("list<{}>", type_label(&elem.data_type, elem.nullable)),
        other => other.type_name().to_string(),
    };
    if nullable { format!("{base}?") } else { base }
}
