use std::{
    fmt::{self, Display, Formatter},
    ops::Deref,
};

/// Resolution of integer-encoded time and timestamp columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Millis,
    Micros,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Millis => "ms",
            TimeUnit::Micros => "us",
        }
    }
}

/// Format-independent logical type of an intermediate schema field.
///
/// Variant names mirror the scalar [`Value`](crate::Value) variants they
/// accept where one exists.
#[derive(Debug, Clone, PartialEq)]
pub enum DataTypeDef {
    Bool,
    I32,
    I64,
    F32,
    F64,
    Bytes,
    String,
    /// Days since the Unix epoch.
    Date,
    /// Time of day in the given unit.
    Time(TimeUnit),
    /// Instant since the Unix epoch (UTC) in the given unit.
    Timestamp(TimeUnit),
    Struct(FieldDefs),
    List(Box<ElementDef>),
}

impl DataTypeDef {
    pub fn is_primitive(&self) -> bool {
        !matches!(self, DataTypeDef::Struct(_) | DataTypeDef::List(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DataTypeDef::Bool => "bool",
            DataTypeDef::I32 => "i32",
            DataTypeDef::I64 => "i64",
            DataTypeDef::F32 => "f32",
            DataTypeDef::F64 => "f64",
            DataTypeDef::Bytes => "bytes",
            DataTypeDef::String => "string",
            DataTypeDef::Date => "date",
            DataTypeDef::Time(TimeUnit::Millis) => "time_ms",
            DataTypeDef::Time(TimeUnit::Micros) => "time_us",
            DataTypeDef::Timestamp(TimeUnit::Millis) => "timestamp_ms",
            DataTypeDef::Timestamp(TimeUnit::Micros) => "timestamp_us",
            DataTypeDef::Struct(_) => "struct",
            DataTypeDef::List(_) => "list",
        }
    }
}

/// Typed collection of [`FieldDef`] used for schema bodies and struct members.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDefs(pub Vec<FieldDef>);

impl FieldDefs {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self(fields)
    }

    pub fn as_slice(&self) -> &[FieldDef] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &FieldDef> {
        self.0.iter()
    }
}

impl From<Vec<FieldDef>> for FieldDefs {
    fn from(value: Vec<FieldDef>) -> Self {
        Self(value)
    }
}

impl From<FieldDefs> for Vec<FieldDef> {
    fn from(value: FieldDefs) -> Self {
        value.0
    }
}

impl AsRef<[FieldDef]> for FieldDefs {
    fn as_ref(&self) -> &[FieldDef] {
        self.as_slice()
    }
}

impl Deref for FieldDefs {
    type Target = [FieldDef];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl Display for FieldDefs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = super::format_field_defs(self.as_slice())?;
        f.write_str(&text)
    }
}

/// Nested element definition used for list items.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDef {
    pub data_type: DataTypeDef,
    pub nullable: bool,
}

impl ElementDef {
    pub fn new(data_type: DataTypeDef, nullable: bool) -> Self {
        Self {
            data_type,
            nullable,
        }
    }
}

/// Named field of a record or struct.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub element: ElementDef,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, data_type: DataTypeDef, nullable: bool) -> Self {
        Self {
            name: name.into(),
            element: ElementDef::new(data_type, nullable),
        }
    }

    pub fn data_type(&self) -> &DataTypeDef {
        &self.element.data_type
    }

    pub fn nullable(&self) -> bool {
        self.element.nullable
    }
}

/// Root of a normalized source schema. The root itself is an implicit,
/// required struct.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntermediateSchema {
    pub name: String,
    pub fields: FieldDefs,
}

impl IntermediateSchema {
    pub fn new(name: impl Into<String>, fields: impl Into<FieldDefs>) -> Self {
        Self {
            name: name.into(),
            fields: fields.into(),
        }
    }
}

impl Display for IntermediateSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.fields, f)
    }
}
