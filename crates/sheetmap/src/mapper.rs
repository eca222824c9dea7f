//! Write and read entry points

use std::any::Any;

use log::debug;

use crate::emit::{self, SheetReader, SheetWriter};
use crate::entity::Mapped;
use crate::error::{MapError, MapResult};
use crate::options::{MapDirection, MapOptions};
use crate::resolve::{Pass, ResolvedLeaf, Resolver};
use crate::schema::MapAttribute;
use crate::tree;

/// Outcome of one write or read call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapReport {
    /// Cells written or read
    pub written: usize,
    /// Leaves vetoed by the ignore hook
    pub ignored: usize,
    /// One past the furthest cell on the active axis, ready for the next call
    ///
    /// `None` when the direction is [`MapDirection::None`].
    pub next_index: Option<u32>,
    /// The backend declined the call before anything was resolved
    pub cancelled: bool,
}

impl MapReport {
    fn declined(start_index: u32, direction: MapDirection) -> Self {
        Self {
            next_index: next_index(&[], direction, start_index),
            cancelled: true,
            ..Self::default()
        }
    }
}

/// Maps entities onto a sheet and back
///
/// # Example
///
/// ```rust,ignore
/// let mapper = SheetMapper::new().with_options(
///     MapOptions::new()
///         .with_direction(MapDirection::Row)
///         .with_start_index(1),
/// );
/// let report = mapper.write(&mut sheet, &invoice)?;
/// let copy: Invoice = mapper.read(&sheet)?;
/// ```
#[derive(Clone, Default)]
pub struct SheetMapper<'p> {
    options: MapOptions,
    param: Option<&'p dyn Any>,
}

impl<'p> SheetMapper<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    /// Opaque value handed to every hook call
    pub fn with_param(mut self, param: &'p dyn Any) -> Self {
        self.param = Some(param);
        self
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Write `entity` using the configured options
    pub fn write<W, T>(&self, sheet: &mut W, entity: &T) -> MapResult<MapReport>
    where
        W: SheetWriter + ?Sized,
        T: Mapped,
    {
        self.write_at(sheet, entity, self.options.start_index, self.options.direction)
    }

    /// Write `entity` with an explicit cursor start and direction
    ///
    /// Positions for every leaf are resolved before the first cell is
    /// touched, so a configuration error leaves the sheet unchanged.
    pub fn write_at<W, T>(
        &self,
        sheet: &mut W,
        entity: &T,
        start_index: u32,
        direction: MapDirection,
    ) -> MapResult<MapReport>
    where
        W: SheetWriter + ?Sized,
        T: Mapped,
    {
        self.write_selected(sheet, entity, start_index, direction, None)
    }

    /// Write only the named top-level fields of `entity`
    ///
    /// A composite or repeated field brings everything mapped beneath it.
    /// The configure hook is not called, so every leaf keeps its declared
    /// position; the ignore hook still applies.
    pub fn write_fields<W, T>(
        &self,
        sheet: &mut W,
        entity: &T,
        fields: &[&str],
    ) -> MapResult<MapReport>
    where
        W: SheetWriter + ?Sized,
        T: Mapped,
    {
        let schema = T::schema();
        if let Some(unknown) = fields.iter().find(|name| schema.field_named(name).is_none()) {
            return Err(MapError::UnknownField {
                type_name: schema.type_name(),
                field: unknown.to_string(),
            });
        }
        self.write_selected(
            sheet,
            entity,
            self.options.start_index,
            self.options.direction,
            Some(fields),
        )
    }

    fn write_selected<W, T>(
        &self,
        sheet: &mut W,
        entity: &T,
        start_index: u32,
        direction: MapDirection,
        fields: Option<&[&str]>,
    ) -> MapResult<MapReport>
    where
        W: SheetWriter + ?Sized,
        T: Mapped,
    {
        if !sheet.before_write()? {
            debug!("{}: write cancelled by the sheet", T::schema().type_name());
            return Ok(MapReport::declined(start_index, direction));
        }

        let leaves = self.resolve_selected(entity, start_index, direction, fields)?;
        let mut report = MapReport {
            next_index: next_index(&leaves, direction, start_index),
            ..MapReport::default()
        };
        for leaf in &leaves {
            if leaf.ignored {
                report.ignored += 1;
                continue;
            }
            report.written += emit::emit(sheet, leaf)?;
        }

        sheet.after_write(&report)?;
        Ok(report)
    }

    /// Resolve where every output leaf of `entity` lands without writing
    ///
    /// Leaves vetoed by the ignore hook are included with `ignored` set.
    pub fn resolve<T: Mapped>(
        &self,
        entity: &T,
        start_index: u32,
        direction: MapDirection,
    ) -> MapResult<Vec<ResolvedLeaf>> {
        self.resolve_selected(entity, start_index, direction, None)
    }

    fn resolve_selected<T: Mapped>(
        &self,
        entity: &T,
        start_index: u32,
        direction: MapDirection,
        fields: Option<&[&str]>,
    ) -> MapResult<Vec<ResolvedLeaf>> {
        let tree = tree::build(entity, T::schema(), MapAttribute::Output)?;
        if tree.is_empty() {
            debug!("{}: nothing mapped for output", T::schema().type_name());
        }
        self.resolver(direction, Pass::Write, fields)
            .resolve(&tree, entity, start_index)
    }

    /// Read a new `T` from the sheet
    pub fn read<R, T>(&self, sheet: &R) -> MapResult<T>
    where
        R: SheetReader + ?Sized,
        T: Mapped + Default,
    {
        let mut entity = T::default();
        self.read_into(sheet, &mut entity)?;
        Ok(entity)
    }

    /// Populate an existing entity from the sheet
    ///
    /// Only composite children and repeated elements already present on
    /// `entity` are populated.
    pub fn read_into<R, T>(&self, sheet: &R, entity: &mut T) -> MapResult<MapReport>
    where
        R: SheetReader + ?Sized,
        T: Mapped,
    {
        let direction = self.options.direction;
        let start_index = self.options.start_index;
        if !sheet.before_read()? {
            debug!("{}: read cancelled by the sheet", T::schema().type_name());
            return Ok(MapReport::declined(start_index, direction));
        }

        let leaves = {
            let shared: &T = entity;
            let tree = tree::build(shared, T::schema(), MapAttribute::Input)?;
            self.resolver(direction, Pass::Read, None)
                .resolve(&tree, shared, start_index)?
        };

        let mut report = MapReport {
            next_index: next_index(&leaves, direction, start_index),
            ..MapReport::default()
        };
        for leaf in &leaves {
            let (value, count) = emit::read(sheet, leaf, self.options.run_limit)?;
            let target = owner_of(entity, leaf)?;
            let Some(name) = leaf.path.leaf_name() else {
                continue;
            };
            target.assign(name, value)?;
            report.written += count;
        }

        sheet.after_read(&report)?;
        Ok(report)
    }

    fn resolver<'r>(
        &'r self,
        direction: MapDirection,
        pass: Pass,
        fields: Option<&'r [&'r str]>,
    ) -> Resolver<'r> {
        Resolver {
            direction,
            shift: self.options.shift,
            param: self.param,
            pass,
            fields,
        }
    }
}

/// Walk from the root to the entity that owns `leaf`
fn owner_of<'e>(root: &'e mut dyn Mapped, leaf: &ResolvedLeaf) -> MapResult<&'e mut dyn Mapped> {
    let mut current = root;
    for step in leaf.path.owner_steps() {
        current = current
            .child_mut(step.field, step.element)
            .ok_or_else(|| MapError::MissingChild(leaf.path.to_string()))?;
    }
    Ok(current)
}

fn next_index(leaves: &[ResolvedLeaf], direction: MapDirection, start_index: u32) -> Option<u32> {
    let axis = direction.axis()?;
    let furthest = leaves
        .iter()
        .map(|leaf| leaf.extent(axis))
        .max()
        .unwrap_or(u64::from(start_index));
    Some(u32::try_from(furthest).unwrap_or(u32::MAX))
}
