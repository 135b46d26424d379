use indexmap::IndexMap;

use crate::physical::PhysicalSchema;

/// Leaf value in physical column representation.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
}

impl LeafValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            LeafValue::Boolean(_) => "BOOLEAN",
            LeafValue::Int32(_) => "INT32",
            LeafValue::Int64(_) => "INT64",
            LeafValue::Float(_) => "FLOAT",
            LeafValue::Double(_) => "DOUBLE",
            LeafValue::ByteArray(_) => "BYTE_ARRAY",
        }
    }
}

/// Striped data of one leaf: three parallel sequences of equal length.
///
/// A `None` value is a null or a placeholder for a missing ancestor; its
/// definition level tells which.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    pub values: Vec<Option<LeafValue>>,
    pub definition_levels: Vec<i16>,
    pub repetition_levels: Vec<i16>,
}

impl Column {
    pub(crate) fn push(&mut self, value: Option<LeafValue>, def: i16, rep: i16) {
        self.values.push(value);
        self.definition_levels.push(def);
        self.repetition_levels.push(rep);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of records in the column: every record starts at repetition
    /// level `0`.
    pub fn num_rows(&self) -> usize {
        self.repetition_levels.iter().filter(|&&r| r == 0).count()
    }

    fn append(&mut self, mut other: Column) {
        self.values.append(&mut other.values);
        self.definition_levels.append(&mut other.definition_levels);
        self.repetition_levels.append(&mut other.repetition_levels);
    }
}

/// Output of a striping call: one [`Column`] per leaf path, in schema column
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Column>,
}

impl Table {
    /// Empty table with one column per leaf of `schema`.
    pub fn new(schema: &PhysicalSchema) -> Self {
        Self {
            columns: schema
                .leaves()
                .map(|leaf| (leaf.path.clone(), Column::default()))
                .collect(),
        }
    }

    pub fn column(&self, path: &str) -> Option<&Column> {
        self.columns.get(path)
    }

    /// Column by leaf ordinal.
    pub(crate) fn column_at_mut(&mut self, ordinal: usize) -> &mut Column {
        &mut self.columns[ordinal]
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = (&str, &Column)> + '_ {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.num_rows())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.values().all(Column::is_empty)
    }

    /// Append `other` path-wise after the rows already in `self`.
    ///
    /// Columns missing from `self` are added at the end.
    pub fn append(&mut self, other: Table) {
        for (path, column) in other.columns {
            self.columns.entry(path).or_default().append(column);
        }
    }

    /// Concatenate tables in order.
    pub fn concat(tables: impl IntoIterator<Item = Table>) -> Table {
        let mut tables = tables.into_iter();
        let Some(mut out) = tables.next() else {
            return Table::default();
        };
        for table in tables {
            out.append(table);
        }
        out
    }

    pub fn into_columns(self) -> IndexMap<String, Column> {
        self.columns
    }
}
