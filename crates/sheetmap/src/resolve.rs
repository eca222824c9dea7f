//! Position and merge resolution
//!
//! Turns a built tree into a flat list of [`ResolvedLeaf`]s in traversal
//! order. For every leaf: fill unspecified axes from the cursor, run the
//! configure hook, run the ignore hook (write pass only), then apply the
//! merge target relative to the fully resolved start.

use std::any::Any;
use std::fmt;

use log::trace;
use sheetmap_core::{CellAddress, CellRange, CellValue, MAX_INDEX};

use crate::entity::{CellPosition, FieldRef, Hooks, Mapped};
use crate::error::{MapError, MapResult};
use crate::options::{Axis, MapDirection};
use crate::schema::{Attrs, MergeSpec, Schema};
use crate::shape::ScalarKind;
use crate::tree::{MappedLeaf, NodeKind, TreeNode};

/// Running index used to fill unspecified coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingCursor {
    pub index: i64,
    pub direction: MapDirection,
}

impl MappingCursor {
    pub fn new(index: u32, direction: MapDirection) -> Self {
        Self {
            index: i64::from(index),
            direction,
        }
    }

    fn advanced(self, by: i64) -> Self {
        Self {
            index: self.index + by,
            ..self
        }
    }
}

/// Read-only description of where a leaf lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    name: String,
    original_row: Option<u32>,
    original_column: Option<u32>,
    start_row: u32,
    start_column: u32,
    end_row: u32,
    end_column: u32,
    formula: bool,
}

impl Placement {
    /// Path of the field, e.g. `lines[2].qty`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn original_row(&self) -> Option<u32> {
        self.original_row
    }

    pub fn original_column(&self) -> Option<u32> {
        self.original_column
    }

    pub fn start_row(&self) -> u32 {
        self.start_row
    }

    pub fn start_column(&self) -> u32 {
        self.start_column
    }

    pub fn end_row(&self) -> u32 {
        self.end_row
    }

    pub fn end_column(&self) -> u32 {
        self.end_column
    }

    pub fn is_formula(&self) -> bool {
        self.formula
    }

    /// Whether the placement spans more than one cell
    pub fn is_merged(&self) -> bool {
        self.start_row != self.end_row || self.start_column != self.end_column
    }

    pub fn start(&self) -> CellAddress {
        CellAddress::new(self.start_row, self.start_column)
    }

    pub fn range(&self) -> CellRange {
        CellRange::from_indices(self.start_row, self.start_column, self.end_row, self.end_column)
    }

    /// A1 address of the start cell
    pub fn address(&self) -> String {
        self.start().to_string()
    }

    fn shifted(&self, axis: Axis, offset: u64) -> MapResult<Placement> {
        let (start, end) = match axis {
            Axis::Row => (self.start_row, self.end_row),
            Axis::Column => (self.start_column, self.end_column),
        };
        let start = bounded(&self.name, axis, start as u64 + offset)?;
        let end = bounded(&self.name, axis, end as u64 + offset)?;
        let mut shifted = self.clone();
        match axis {
            Axis::Row => {
                shifted.start_row = start;
                shifted.end_row = end;
            }
            Axis::Column => {
                shifted.start_column = start;
                shifted.end_column = end;
            }
        }
        Ok(shifted)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.range())
    }
}

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub field: &'static str,
    /// Element index within a repeated field
    pub element: Option<usize>,
}

/// Location of a leaf within the entity graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathStep>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, field: &'static str, element: Option<usize>) -> Self {
        let mut steps = self.0.clone();
        steps.push(PathStep { field, element });
        Self(steps)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// Steps leading to the entity that owns the leaf
    pub fn owner_steps(&self) -> &[PathStep] {
        match self.0.split_last() {
            Some((_, owner)) => owner,
            None => &[],
        }
    }

    /// Name of the final field
    pub fn leaf_name(&self) -> Option<&'static str> {
        self.0.last().map(|step| step.field)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(step.field)?;
            if let Some(element) = step.element {
                write!(f, "[{}]", element)?;
            }
        }
        Ok(())
    }
}

/// Value captured from the entity during a write pass
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedValue {
    Single(CellValue),
    Run(Vec<CellValue>),
}

/// Layout of a scalar collection written as consecutive cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLayout {
    pub axis: Axis,
    pub step: u32,
}

/// A leaf with its final position
#[derive(Debug, Clone)]
pub struct ResolvedLeaf {
    pub path: FieldPath,
    pub placement: Placement,
    pub kind: ScalarKind,
    pub attrs: &'static Attrs,
    pub run: Option<RunLayout>,
    /// Captured on write passes only
    pub value: Option<CapturedValue>,
    /// Vetoed by the ignore hook; never emitted
    pub ignored: bool,
}

impl ResolvedLeaf {
    /// Placement of element `index` of a run; the leaf's own placement otherwise
    pub fn run_placement(&self, index: usize) -> MapResult<Placement> {
        match self.run {
            Some(run) => self
                .placement
                .shifted(run.axis, index as u64 * u64::from(run.step)),
            None => Ok(self.placement.clone()),
        }
    }

    /// One past the furthest cell this leaf occupies on `axis`
    pub(crate) fn extent(&self, axis: Axis) -> u64 {
        let end = match axis {
            Axis::Row => self.placement.end_row,
            Axis::Column => self.placement.end_column,
        } as u64;
        let run_tail = match (&self.run, &self.value) {
            (Some(run), Some(CapturedValue::Run(values))) if run.axis == axis => {
                values.len().saturating_sub(1) as u64 * u64::from(run.step)
            }
            _ => 0,
        };
        end + run_tail + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    Write,
    Read,
}

pub(crate) struct Resolver<'r> {
    pub direction: MapDirection,
    pub shift: u32,
    pub param: Option<&'r dyn Any>,
    pub pass: Pass,
    /// Root-level fields to resolve; every field when `None`
    pub fields: Option<&'r [&'r str]>,
}

impl Resolver<'_> {
    pub(crate) fn resolve<'a>(
        &self,
        tree: &TreeNode<'a>,
        root: &'a dyn Mapped,
        start_index: u32,
    ) -> MapResult<Vec<ResolvedLeaf>> {
        let mut resolved = Vec::with_capacity(tree.leaf_count());
        let cursor = MappingCursor::new(start_index, self.direction);
        self.node(tree, root, &FieldPath::root(), cursor, &mut resolved)?;
        Ok(resolved)
    }

    fn node<'a>(
        &self,
        node: &TreeNode<'a>,
        owner: &'a dyn Mapped,
        path: &FieldPath,
        cursor: MappingCursor,
        resolved: &mut Vec<ResolvedLeaf>,
    ) -> MapResult<()> {
        let hooks = owner.hooks();
        for leaf in &node.leaves {
            if !self.selected(path, leaf.name()) {
                continue;
            }
            let path = path.child(leaf.name(), None);
            resolved.push(self.leaf(node.schema, leaf, owner, hooks, path, cursor)?);
        }

        for child in &node.children {
            let Some(field) = child.field else {
                continue;
            };
            if !self.selected(path, field.name) {
                continue;
            }
            match child.kind {
                NodeKind::Repeated(_) => {
                    let elements = match owner.field(field.name) {
                        FieldRef::Entities(Some(elements)) => elements,
                        FieldRef::Entities(None) => continue,
                        other => return Err(mismatch(node.schema, field.name, "entities", &other)),
                    };
                    let step = i64::from(field.attrs.shift.unwrap_or(self.shift));
                    for (i, element) in elements.into_iter().enumerate() {
                        let element_cursor = cursor.advanced(i as i64 * step);
                        let element_path = path.child(field.name, Some(i));
                        self.node(child, element, &element_path, element_cursor, resolved)?;
                    }
                }
                NodeKind::Composite | NodeKind::Root => {
                    let child_owner = match child.owner {
                        Some(child_owner) => child_owner,
                        None => match owner.field(field.name) {
                            FieldRef::Entity(Some(child_owner)) => child_owner,
                            FieldRef::Entity(None) => continue,
                            other => {
                                return Err(mismatch(node.schema, field.name, "entity", &other))
                            }
                        },
                    };
                    let child_path = path.child(field.name, None);
                    self.node(child, child_owner, &child_path, cursor, resolved)?;
                }
            }
        }
        Ok(())
    }

    fn leaf(
        &self,
        schema: &Schema,
        leaf: &MappedLeaf,
        owner: &dyn Mapped,
        hooks: Hooks<'_>,
        path: FieldPath,
        cursor: MappingCursor,
    ) -> MapResult<ResolvedLeaf> {
        let name = path.to_string();
        let row = self.initial(&name, Axis::Row, leaf.original_row(), cursor)?;
        let column = self.initial(&name, Axis::Column, leaf.original_column(), cursor)?;

        let mut position = CellPosition::new(
            name.clone(),
            leaf.original_row(),
            leaf.original_column(),
            row,
            column,
            leaf.is_formula(),
        );
        // a field selection keeps declared positions
        if self.fields.is_none() {
            if let Some(hook) = hooks.configure() {
                hook.configure_cell(&mut position, self.param);
            }
        }

        let start_row = checked(&name, Axis::Row, position.row)?;
        let start_column = checked(&name, Axis::Column, position.column)?;
        let mut placement = Placement {
            name,
            original_row: leaf.original_row(),
            original_column: leaf.original_column(),
            start_row,
            start_column,
            end_row: start_row,
            end_column: start_column,
            formula: position.formula,
        };

        let ignored = self.pass == Pass::Write
            && hooks
                .ignore()
                .map_or(false, |hook| hook.ignore_output(&placement, self.param));

        let attrs = &leaf.field.attrs;
        if let Some(merge) = attrs.merge {
            if leaf.is_run() && matches!(merge, MergeSpec::Absolute { .. }) {
                return Err(MapError::AbsoluteMergeOnRun {
                    field: placement.name,
                });
            }
            apply_merge(&mut placement, merge)?;
        }

        let value = match self.pass {
            Pass::Write => Some(capture(schema, leaf, owner)?),
            Pass::Read => None,
        };
        let run = leaf.run.map(|_| RunLayout {
            axis: self.direction.axis().unwrap_or(Axis::Row),
            step: attrs.shift.unwrap_or(self.shift),
        });

        trace!(
            "{} -> {}{}",
            placement.name(),
            placement,
            if ignored { " (ignored)" } else { "" }
        );

        Ok(ResolvedLeaf {
            path,
            placement,
            kind: leaf.kind(),
            attrs,
            run,
            value,
            ignored,
        })
    }

    fn selected(&self, path: &FieldPath, name: &str) -> bool {
        match self.fields {
            Some(fields) if path.steps().is_empty() => fields.iter().any(|field| *field == name),
            _ => true,
        }
    }

    fn initial(
        &self,
        name: &str,
        axis: Axis,
        declared: Option<u32>,
        cursor: MappingCursor,
    ) -> MapResult<i64> {
        match declared {
            Some(value) => Ok(i64::from(value)),
            None if cursor.direction.axis() == Some(axis) => Ok(cursor.index),
            None => Err(MapError::UnspecifiedCoordinate {
                field: name.to_string(),
                axis,
            }),
        }
    }
}

fn apply_merge(placement: &mut Placement, merge: MergeSpec) -> MapResult<()> {
    let (end_row, end_column) = match merge {
        MergeSpec::Absolute { row, column } => {
            for (axis, value) in [(Axis::Row, row), (Axis::Column, column)] {
                if value < 0 {
                    return Err(MapError::NegativeMergeTarget {
                        field: placement.name.clone(),
                        axis,
                        value,
                    });
                }
            }
            (row, column)
        }
        MergeSpec::Relative { rows, columns } => (
            i64::from(placement.start_row) + rows,
            i64::from(placement.start_column) + columns,
        ),
    };

    let end_row = checked(&placement.name, Axis::Row, end_row)?;
    let end_column = checked(&placement.name, Axis::Column, end_column)?;

    let (start_row, start_column) = (placement.start_row, placement.start_column);
    placement.start_row = start_row.min(end_row);
    placement.end_row = start_row.max(end_row);
    placement.start_column = start_column.min(end_column);
    placement.end_column = start_column.max(end_column);
    Ok(())
}

fn capture(schema: &Schema, leaf: &MappedLeaf, owner: &dyn Mapped) -> MapResult<CapturedValue> {
    match (owner.field(leaf.name()), leaf.is_run()) {
        (FieldRef::Value(value), false) => Ok(CapturedValue::Single(value)),
        (FieldRef::Values(values), true) => Ok(CapturedValue::Run(values.unwrap_or_default())),
        (other, run) => Err(mismatch(
            schema,
            leaf.name(),
            if run { "values" } else { "value" },
            &other,
        )),
    }
}

fn mismatch(
    schema: &Schema,
    field: &str,
    expected: &'static str,
    found: &FieldRef<'_>,
) -> MapError {
    MapError::ShapeMismatch {
        type_name: schema.type_name(),
        field: field.to_string(),
        expected,
        found: found.describe(),
    }
}

fn checked(name: &str, axis: Axis, value: i64) -> MapResult<u32> {
    if value < 0 {
        return Err(MapError::NegativeCoordinate {
            field: name.to_string(),
            axis,
            value,
        });
    }
    bounded(name, axis, value as u64)
}

fn bounded(name: &str, axis: Axis, value: u64) -> MapResult<u32> {
    if value > u64::from(MAX_INDEX) {
        return Err(MapError::CoordinateOverflow {
            field: name.to_string(),
            axis,
            value: i64::try_from(value).unwrap_or(i64::MAX),
            max: MAX_INDEX,
        });
    }
    Ok(value as u32)
}
