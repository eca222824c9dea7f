//! Tree building
//!
//! Walks an entity's schema (and, where available, its live values) and
//! keeps only the fields that carry a map for the requested
//! [`MapAttribute`]. Branches with nothing mapped beneath them are pruned.

use log::debug;

use crate::entity::{FieldRef, Mapped};
use crate::error::{MapError, MapResult};
use crate::schema::{CellMap, Field, MapAttribute, Schema};
use crate::shape::{Container, ScalarKind, Shape};

/// A scalar field selected for mapping
#[derive(Debug, Clone)]
pub struct MappedLeaf {
    pub(crate) field: &'static Field,
    pub(crate) map: CellMap,
    pub(crate) kind: ScalarKind,
    /// Set for collections of scalars, which map to a run of cells
    pub(crate) run: Option<Container>,
}

impl MappedLeaf {
    pub fn name(&self) -> &'static str {
        self.field.name
    }

    pub fn original_row(&self) -> Option<u32> {
        self.map.row
    }

    pub fn original_column(&self) -> Option<u32> {
        self.map.column
    }

    pub fn is_formula(&self) -> bool {
        self.map.formula
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn is_run(&self) -> bool {
        self.run.is_some()
    }
}

/// How a node hangs off its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Composite,
    /// Template for every element of a collection of composites
    Repeated(Container),
}

/// One level of the traversal
///
/// `owner` is the live entity when the node was built from one. Repeated
/// nodes are templates built from the element type and have no owner.
pub struct TreeNode<'a> {
    pub(crate) owner: Option<&'a dyn Mapped>,
    pub(crate) schema: &'static Schema,
    pub(crate) field: Option<&'static Field>,
    pub(crate) kind: NodeKind,
    pub(crate) leaves: Vec<MappedLeaf>,
    pub(crate) children: Vec<TreeNode<'a>>,
}

impl<'a> TreeNode<'a> {
    pub fn leaves(&self) -> &[MappedLeaf] {
        &self.leaves
    }

    pub fn children(&self) -> &[TreeNode<'a>] {
        &self.children
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.schema.type_name()
    }

    /// Name of the parent field this node was reached through
    pub fn field_name(&self) -> Option<&'static str> {
        self.field.map(|f| f.name)
    }

    /// Whether nothing is mapped anywhere beneath this node
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.children.is_empty()
    }

    /// Number of leaves in the whole subtree
    pub fn leaf_count(&self) -> usize {
        self.leaves.len() + self.children.iter().map(TreeNode::leaf_count).sum::<usize>()
    }
}

/// Build the mapping tree for a live entity
pub fn build<'a>(
    root: &'a dyn Mapped,
    schema: &'static Schema,
    attribute: MapAttribute,
) -> MapResult<TreeNode<'a>> {
    let mut builder = Builder {
        attribute,
        stack: Vec::new(),
    };
    builder.node(Some(root), schema, None, NodeKind::Root)
}

struct Builder {
    attribute: MapAttribute,
    /// Types on the current template path
    stack: Vec<&'static str>,
}

impl Builder {
    fn node<'a>(
        &mut self,
        owner: Option<&'a dyn Mapped>,
        schema: &'static Schema,
        field: Option<&'static Field>,
        kind: NodeKind,
    ) -> MapResult<TreeNode<'a>> {
        self.stack.push(schema.type_name());
        let mut node = TreeNode {
            owner,
            schema,
            field,
            kind,
            leaves: Vec::new(),
            children: Vec::new(),
        };

        for field in schema.fields() {
            if let Err(err) = self.field(&mut node, field) {
                self.stack.pop();
                return Err(err);
            }
        }

        self.stack.pop();
        Ok(node)
    }

    fn field<'a>(&mut self, node: &mut TreeNode<'a>, field: &'static Field) -> MapResult<()> {
        let schema = node.schema;
        match &field.shape {
            Shape::Primitive(kind) | Shape::NearPrimitive(kind) => {
                if let Some(map) = field.attrs.map_for(self.attribute) {
                    node.leaves.push(MappedLeaf {
                        field,
                        map: *map,
                        kind: *kind,
                        run: None,
                    });
                }
            }
            Shape::Composite(child_schema) => {
                let child_owner = match node.owner {
                    Some(owner) => match owner.field(field.name) {
                        FieldRef::Entity(Some(child)) => Some(child),
                        FieldRef::Entity(None) => return Ok(()),
                        other => return Err(mismatch(schema, field, "entity", &other)),
                    },
                    None => None,
                };
                let child_schema = child_schema();
                if child_owner.is_none() && self.is_recursive(child_schema) {
                    return Ok(());
                }
                let child = self.node(child_owner, child_schema, Some(field), NodeKind::Composite)?;
                attach(node, child);
            }
            Shape::Repeated { container, element } => match element.as_ref() {
                Shape::Primitive(kind) | Shape::NearPrimitive(kind) => {
                    let Some(map) = field.attrs.map_for(self.attribute) else {
                        return Ok(());
                    };
                    if let Some(owner) = node.owner {
                        match owner.field(field.name) {
                            FieldRef::Values(Some(_)) => {}
                            FieldRef::Values(None) => return Ok(()),
                            other => return Err(mismatch(schema, field, "values", &other)),
                        }
                    }
                    node.leaves.push(MappedLeaf {
                        field,
                        map: *map,
                        kind: *kind,
                        run: Some(*container),
                    });
                }
                Shape::Composite(element_schema) => {
                    if let Some(owner) = node.owner {
                        match owner.field(field.name) {
                            FieldRef::Entities(Some(_)) => {}
                            FieldRef::Entities(None) => return Ok(()),
                            other => return Err(mismatch(schema, field, "entities", &other)),
                        }
                    }
                    let element_schema = element_schema();
                    if self.is_recursive(element_schema) {
                        return Ok(());
                    }
                    let template = self.node(
                        None,
                        element_schema,
                        Some(field),
                        NodeKind::Repeated(*container),
                    )?;
                    attach(node, template);
                }
                other => {
                    debug!(
                        "{}.{}: {} elements are not mapped",
                        schema.type_name(),
                        field.name,
                        other.describe()
                    );
                }
            },
            Shape::Unknown => {
                debug!(
                    "{}.{}: unknown shape, skipped",
                    schema.type_name(),
                    field.name
                );
            }
        }
        Ok(())
    }

    fn is_recursive(&self, schema: &'static Schema) -> bool {
        let recursive = self.stack.contains(&schema.type_name());
        if recursive {
            debug!(
                "{}: recursive template through {}, not expanded",
                self.stack.join(" > "),
                schema.type_name()
            );
        }
        recursive
    }
}

fn attach<'a>(parent: &mut TreeNode<'a>, child: TreeNode<'a>) {
    if child.is_empty() {
        debug!(
            "{}.{}: nothing mapped, pruned",
            parent.schema.type_name(),
            child.field_name().unwrap_or("?")
        );
    } else {
        parent.children.push(child);
    }
}

fn mismatch(
    schema: &Schema,
    field: &Field,
    expected: &'static str,
    found: &FieldRef<'_>,
) -> MapError {
    MapError::ShapeMismatch {
        type_name: schema.type_name(),
        field: field.name.to_string(),
        expected,
        found: found.describe(),
    }
}
