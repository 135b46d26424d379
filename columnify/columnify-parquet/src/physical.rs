//! Physical schema: the flattened, leaf-addressed layout of an
//! [`IntermediateSchema`], with the maximum definition and repetition level
//! of every node.

use std::{collections::HashMap, ops::Range, sync::Arc};

use columnify_core::{
    DataTypeDef, FieldDef, IntermediateSchema, SchemaError, SchemaVisitor, TimeUnit,
    canonical_name,
};
use parquet::{
    basic::{ConvertedType, Repetition, Type as PhysicalType},
    schema::types::{SchemaDescriptor, Type, TypePtr},
};

/// Root name used when the source schema has none (BigQuery schemas).
pub const DEFAULT_ROOT_NAME: &str = "schema";

/// Column type of a leaf node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafType {
    Bool,
    Int32,
    Int64,
    Float,
    Double,
    Binary,
    String,
    Date,
    Time(TimeUnit),
    Timestamp(TimeUnit),
}

impl LeafType {
    /// Leaf type for a primitive intermediate type; `None` for structs and
    /// lists.
    pub fn from_data_type(data_type: &DataTypeDef) -> Option<Self> {
        Some(match data_type {
            DataTypeDef::Bool => LeafType::Bool,
            DataTypeDef::I32 => LeafType::Int32,
            DataTypeDef::I64 => LeafType::Int64,
            DataTypeDef::F32 => LeafType::Float,
            DataTypeDef::F64 => LeafType::Double,
            DataTypeDef::Bytes => LeafType::Binary,
            DataTypeDef::String => LeafType::String,
            DataTypeDef::Date => LeafType::Date,
            DataTypeDef::Time(unit) => LeafType::Time(*unit),
            DataTypeDef::Timestamp(unit) => LeafType::Timestamp(*unit),
            DataTypeDef::Struct(_) | DataTypeDef::List(_) => return None,
        })
    }

    pub fn physical_type(&self) -> PhysicalType {
        match self {
            LeafType::Bool => PhysicalType::BOOLEAN,
            LeafType::Int32 | LeafType::Date | LeafType::Time(TimeUnit::Millis) => {
                PhysicalType::INT32
            }
            LeafType::Int64 | LeafType::Time(TimeUnit::Micros) | LeafType::Timestamp(_) => {
                PhysicalType::INT64
            }
            LeafType::Float => PhysicalType::FLOAT,
            LeafType::Double => PhysicalType::DOUBLE,
            LeafType::Binary | LeafType::String => PhysicalType::BYTE_ARRAY,
        }
    }

    pub fn converted_type(&self) -> ConvertedType {
        match self {
            LeafType::String => ConvertedType::UTF8,
            LeafType::Date => ConvertedType::DATE,
            LeafType::Time(TimeUnit::Millis) => ConvertedType::TIME_MILLIS,
            LeafType::Time(TimeUnit::Micros) => ConvertedType::TIME_MICROS,
            LeafType::Timestamp(TimeUnit::Millis) => ConvertedType::TIMESTAMP_MILLIS,
            LeafType::Timestamp(TimeUnit::Micros) => ConvertedType::TIMESTAMP_MICROS,
            _ => ConvertedType::NONE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LeafType::Bool => "bool",
            LeafType::Int32 => "int32",
            LeafType::Int64 => "int64",
            LeafType::Float => "float",
            LeafType::Double => "double",
            LeafType::Binary => "binary",
            LeafType::String => "string",
            LeafType::Date => "date",
            LeafType::Time(TimeUnit::Millis) => "time_ms",
            LeafType::Time(TimeUnit::Micros) => "time_us",
            LeafType::Timestamp(TimeUnit::Millis) => "timestamp_ms",
            LeafType::Timestamp(TimeUnit::Micros) => "timestamp_us",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Group { child_count: usize },
    Leaf(LeafType),
}

/// One node of the flattened schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalNode {
    /// Dot-joined canonical names from the root (excluded) to this node.
    /// The root itself has an empty path.
    pub path: String,
    /// Field name as declared in the source schema.
    pub name: String,
    pub kind: NodeKind,
    pub repetition: Repetition,
    pub max_definition_level: i16,
    pub max_repetition_level: i16,
    children: Vec<usize>,
    leaves: Range<usize>,
}

impl PhysicalNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn leaf_type(&self) -> Option<LeafType> {
        match self.kind {
            NodeKind::Leaf(t) => Some(t),
            NodeKind::Group { .. } => None,
        }
    }

    /// Node indices of the direct children, in declaration order.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Leaf ordinals (positions in [`PhysicalSchema::leaves`]) of every leaf
    /// in this node's subtree.
    pub fn leaf_range(&self) -> Range<usize> {
        self.leaves.clone()
    }
}

/// Compiled, immutable physical schema.
///
/// Nodes are stored in depth-first pre-order; index `0` is the root. Safe to
/// share across threads for concurrent striping calls.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalSchema {
    name: String,
    nodes: Vec<PhysicalNode>,
    leaves: Vec<usize>,
    index: HashMap<String, usize>,
}

impl PhysicalSchema {
    /// Flatten `schema` into physical nodes.
    ///
    /// Structs become groups (`OPTIONAL` when nullable), lists become a single
    /// `REPEATED` node wrapping their element, and primitives become leaves.
    /// Lists directly nested in lists and structs without members are
    /// rejected with [`SchemaError::UnsupportedType`]; two fields whose paths
    /// canonicalize to the same string are a [`SchemaError::DuplicatePath`].
    pub fn compile(schema: &IntermediateSchema) -> Result<Self, SchemaError> {
        if schema.fields.is_empty() {
            return Err(SchemaError::UnsupportedType {
                path: String::new(),
                detail: "schema has no fields".to_string(),
            });
        }

        let name = if schema.name.is_empty() {
            DEFAULT_ROOT_NAME.to_string()
        } else {
            schema.name.clone()
        };

        let mut compiler = Compiler::new(name.clone(), schema.fields.len());
        schema.visit(&mut compiler)?;
        let physical = compiler.finish(name);

        tracing::debug!(
            schema = %physical.name,
            nodes = physical.nodes.len(),
            leaves = physical.leaves.len(),
            "compiled physical schema"
        );
        Ok(physical)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &PhysicalNode {
        &self.nodes[0]
    }

    pub fn nodes(&self) -> &[PhysicalNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &PhysicalNode {
        &self.nodes[index]
    }

    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.index.get(path).copied()
    }

    /// Look up a node by path. Each segment is canonicalized first, so
    /// `Address.City` finds `address.city`.
    pub fn get(&self, path: &str) -> Option<&PhysicalNode> {
        let idx = self.index_of(path).or_else(|| {
            let canonical: Vec<_> = path.split('.').map(canonical_name).collect();
            self.index_of(&canonical.join("."))
        })?;
        Some(&self.nodes[idx])
    }

    /// Leaf nodes in column order.
    pub fn leaves(&self) -> impl ExactSizeIterator<Item = &PhysicalNode> + '_ {
        self.leaves.iter().map(|&i| &self.nodes[i])
    }

    pub fn num_leaves(&self) -> usize {
        self.leaves.len()
    }

    pub fn max_definition_level(&self, path: &str) -> Option<i16> {
        self.get(path).map(|n| n.max_definition_level)
    }

    pub fn max_repetition_level(&self, path: &str) -> Option<i16> {
        self.get(path).map(|n| n.max_repetition_level)
    }

    /// Build the equivalent Parquet schema tree.
    pub fn to_parquet_schema(&self) -> Result<TypePtr, SchemaError> {
        let fields = self
            .root()
            .children
            .iter()
            .map(|&c| self.parquet_type(c))
            .collect::<Result<Vec<_>, _>>()?;

        Type::group_type_builder(&self.name)
            .with_fields(fields)
            .build()
            .map(Arc::new)
            .map_err(|e| invalid_parquet_schema(&self.name, e))
    }

    /// Parquet column descriptors, one per leaf in column order.
    pub fn to_schema_descriptor(&self) -> Result<SchemaDescriptor, SchemaError> {
        Ok(SchemaDescriptor::new(self.to_parquet_schema()?))
    }

    fn parquet_type(&self, index: usize) -> Result<TypePtr, SchemaError> {
        let node = &self.nodes[index];
        let built = match node.kind {
            NodeKind::Leaf(leaf_type) => Type::primitive_type_builder(&node.name, leaf_type.physical_type())
                .with_repetition(node.repetition)
                .with_converted_type(leaf_type.converted_type())
                .build(),
            NodeKind::Group { .. } => {
                let fields = node
                    .children
                    .iter()
                    .map(|&c| self.parquet_type(c))
                    .collect::<Result<Vec<_>, _>>()?;
                Type::group_type_builder(&node.name)
                    .with_repetition(node.repetition)
                    .with_fields(fields)
                    .build()
            }
        };
        built
            .map(Arc::new)
            .map_err(|e| invalid_parquet_schema(&node.path, e))
    }
}

fn invalid_parquet_schema(path: &str, err: parquet::errors::ParquetError) -> SchemaError {
    SchemaError::UnsupportedType {
        path: path.to_string(),
        detail: err.to_string(),
    }
}

/// Builds nodes from the pre-order field walk of [`IntermediateSchema::visit`].
struct Compiler {
    nodes: Vec<PhysicalNode>,
    index: HashMap<String, usize>,
    leaves: Vec<usize>,
    /// `open[d]` is the group receiving fields visited at depth `d + 1`.
    open: Vec<usize>,
}

impl Compiler {
    fn new(root_name: String, child_count: usize) -> Self {
        let root = PhysicalNode {
            path: String::new(),
            name: root_name,
            kind: NodeKind::Group { child_count },
            repetition: Repetition::REQUIRED,
            max_definition_level: 0,
            max_repetition_level: 0,
            children: Vec::new(),
            leaves: 0..0,
        };
        Self {
            nodes: vec![root],
            index: HashMap::new(),
            leaves: Vec::new(),
            open: vec![0],
        }
    }

    fn add_node(
        &mut self,
        parent: usize,
        field: &FieldDef,
        kind: NodeKind,
        repetition: Repetition,
    ) -> Result<usize, SchemaError> {
        let parent_node = &self.nodes[parent];
        let segment = canonical_name(&field.name);
        let path = if parent_node.path.is_empty() {
            segment.into_owned()
        } else {
            format!("{}.{segment}", parent_node.path)
        };

        let (def, rep) = match repetition {
            Repetition::REQUIRED => (0, 0),
            Repetition::OPTIONAL => (1, 0),
            Repetition::REPEATED => (1, 1),
        };
        let max_definition_level = parent_node.max_definition_level + def;
        let max_repetition_level = parent_node.max_repetition_level + rep;

        if self.index.contains_key(&path) {
            return Err(SchemaError::DuplicatePath { path });
        }

        let idx = self.nodes.len();
        self.index.insert(path.clone(), idx);
        self.nodes[parent].children.push(idx);
        if matches!(kind, NodeKind::Leaf(_)) {
            self.leaves.push(idx);
        }
        self.nodes.push(PhysicalNode {
            path,
            name: field.name.clone(),
            kind,
            repetition,
            max_definition_level,
            max_repetition_level,
            children: Vec::new(),
            leaves: 0..0,
        });
        Ok(idx)
    }

    fn add_group(
        &mut self,
        depth: usize,
        parent: usize,
        field: &FieldDef,
        members: usize,
        repetition: Repetition,
    ) -> Result<(), SchemaError> {
        if members == 0 {
            return Err(SchemaError::UnsupportedType {
                path: field.name.clone(),
                detail: "struct has no fields".to_string(),
            });
        }
        let idx = self.add_node(
            parent,
            field,
            NodeKind::Group {
                child_count: members,
            },
            repetition,
        )?;
        self.open.truncate(depth);
        self.open.push(idx);
        Ok(())
    }

    /// Assign leaf ranges. Nodes are in pre-order, so walking backwards sees
    /// every child before its parent.
    fn finish(mut self, name: String) -> PhysicalSchema {
        let ordinal: HashMap<usize, usize> = self
            .leaves
            .iter()
            .enumerate()
            .map(|(ord, &idx)| (idx, ord))
            .collect();

        for idx in (0..self.nodes.len()).rev() {
            let range = match (ordinal.get(&idx), self.nodes[idx].children.as_slice()) {
                (Some(&ord), _) => ord..ord + 1,
                (None, [first, .., last]) => {
                    self.nodes[*first].leaves.start..self.nodes[*last].leaves.end
                }
                (None, [only]) => self.nodes[*only].leaves.clone(),
                (None, []) => 0..0,
            };
            self.nodes[idx].leaves = range;
        }

        PhysicalSchema {
            name,
            nodes: self.nodes,
            leaves: self.leaves,
            index: self.index,
        }
    }
}

impl SchemaVisitor for Compiler {
    type Error = SchemaError;

    fn visit_field(&mut self, depth: usize, field: &FieldDef) -> Result<(), SchemaError> {
        self.open.truncate(depth);
        let parent = *self.open.last().ok_or_else(|| SchemaError::Invalid {
            detail: format!("field '{}' visited without an enclosing group", field.name),
        })?;

        let repetition = if field.nullable() {
            Repetition::OPTIONAL
        } else {
            Repetition::REQUIRED
        };

        match field.data_type() {
            DataTypeDef::Struct(members) => {
                self.add_group(depth, parent, field, members.len(), repetition)
            }
            DataTypeDef::List(elem) => match &elem.data_type {
                DataTypeDef::Struct(members) => {
                    self.add_group(depth, parent, field, members.len(), Repetition::REPEATED)
                }
                DataTypeDef::List(_) => Err(SchemaError::UnsupportedType {
                    path: field.name.clone(),
                    detail: "lists of lists are not supported".to_string(),
                }),
                primitive => {
                    let leaf = leaf_type(field, primitive)?;
                    self.add_node(parent, field, NodeKind::Leaf(leaf), Repetition::REPEATED)
                        .map(drop)
                }
            },
            primitive => {
                let leaf = leaf_type(field, primitive)?;
                self.add_node(parent, field, NodeKind::Leaf(leaf), repetition)
                    .map(drop)
            }
        }
    }
}

fn leaf_type(field: &FieldDef, data_type: &DataTypeDef) -> Result<LeafType, SchemaError> {
    LeafType::from_data_type(data_type).ok_or_else(|| SchemaError::UnsupportedType {
        path: field.name.clone(),
        detail: format!("'{}' is not a primitive type", data_type.type_name()),
    })
}

#[cfg(test)]
mod tests {
    use columnify_core::ElementDef;

    use super::*;

    fn list_of(dt: DataTypeDef) -> DataTypeDef {
        DataTypeDef::List(Box::new(ElementDef::new(dt, false)))
    }

    #[test]
    fn leaf_ranges_cover_subtrees() {
        let schema = IntermediateSchema::new(
            "r",
            vec![
                FieldDef::new("a", DataTypeDef::I32, false),
                FieldDef::new(
                    "b",
                    DataTypeDef::Struct(
                        vec![
                            FieldDef::new("c", DataTypeDef::I32, true),
                            FieldDef::new("d", list_of(DataTypeDef::String), false),
                        ]
                        .into(),
                    ),
                    true,
                ),
                FieldDef::new("e", DataTypeDef::Bool, false),
            ],
        );
        let physical = PhysicalSchema::compile(&schema).unwrap();

        assert_eq!(physical.root().leaf_range(), 0..4);
        assert_eq!(physical.get("b").unwrap().leaf_range(), 1..3);
        assert_eq!(physical.get("b.d").unwrap().leaf_range(), 2..3);
        assert_eq!(physical.get("e").unwrap().leaf_range(), 3..4);
        assert_eq!(physical.root().children().len(), 3);
    }

    #[test]
    fn sibling_after_nested_group_attaches_to_parent() {
        let schema = IntermediateSchema::new(
            "r",
            vec![FieldDef::new(
                "outer",
                DataTypeDef::Struct(
                    vec![
                        FieldDef::new(
                            "inner",
                            DataTypeDef::Struct(
                                vec![FieldDef::new("x", DataTypeDef::I64, false)].into(),
                            ),
                            false,
                        ),
                        FieldDef::new("y", DataTypeDef::I64, false),
                    ]
                    .into(),
                ),
                false,
            )],
        );
        let physical = PhysicalSchema::compile(&schema).unwrap();
        let paths: Vec<_> = physical.leaves().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, ["outer.inner.x", "outer.y"]);
    }
}
