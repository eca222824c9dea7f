//! The entity side of a mapping: field access, population and hooks

use std::any::Any;

use sheetmap_core::CellValue;

use crate::error::{MapError, MapResult};
use crate::resolve::Placement;
use crate::scalar::Scalar;
use crate::schema::Schema;

/// An entity whose fields can be mapped onto cells
///
/// `field` must answer every field named in the schema with a [`FieldRef`]
/// of the matching kind. `assign` and `child_mut` are only needed for read
/// population.
///
/// ```ignore
/// impl Mapped for Line {
///     fn schema() -> &'static Schema {
///         static SCHEMA: Lazy<Schema> = Lazy::new(|| {
///             Schema::new("Line").field::<String>("sku", Attrs::mapped(CellMap::column(0)))
///         });
///         &SCHEMA
///     }
///
///     fn field(&self, name: &str) -> FieldRef<'_> {
///         match name {
///             "sku" => FieldRef::value(&self.sku),
///             _ => FieldRef::Absent,
///         }
///     }
/// }
/// ```
pub trait Mapped {
    fn schema() -> &'static Schema
    where
        Self: Sized;

    fn field(&self, name: &str) -> FieldRef<'_>;

    /// Store a value read for the leaf field `name`
    fn assign(&mut self, name: &str, value: Assign) -> MapResult<()> {
        log::trace!("{}: no assignment for field '{}'", value.location(), name);
        Ok(())
    }

    /// The composite child `name`, or element `element` of the repeated field `name`
    fn child_mut(&mut self, _name: &str, _element: Option<usize>) -> Option<&mut dyn Mapped> {
        None
    }

    fn hooks(&self) -> Hooks<'_> {
        Hooks::None
    }
}

/// The current value of one field, as seen by the mapper
pub enum FieldRef<'a> {
    /// A scalar leaf
    Value(CellValue),
    /// A collection of scalars; `None` for an absent collection
    Values(Option<Vec<CellValue>>),
    /// A composite child; `None` for an absent child
    Entity(Option<&'a dyn Mapped>),
    /// Composite elements of a collection; `None` for an absent collection
    Entities(Option<Vec<&'a dyn Mapped>>),
    /// The entity does not expose this field
    Absent,
}

impl<'a> FieldRef<'a> {
    pub fn value<T: Scalar>(value: &T) -> Self {
        FieldRef::Value(value.to_cell())
    }

    pub fn values<T, I>(items: I) -> Self
    where
        T: Scalar + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        FieldRef::Values(Some(items.into_iter().map(Scalar::to_cell).collect()))
    }

    pub fn entity<T: Mapped>(child: &'a T) -> Self {
        FieldRef::Entity(Some(child))
    }

    pub fn optional_entity<T: Mapped>(child: Option<&'a T>) -> Self {
        FieldRef::Entity(child.map(|c| c as &dyn Mapped))
    }

    pub fn entities<T, I>(items: I) -> Self
    where
        T: Mapped + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        FieldRef::Entities(Some(
            items.into_iter().map(|item| item as &dyn Mapped).collect(),
        ))
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            FieldRef::Value(_) => "value",
            FieldRef::Values(_) => "values",
            FieldRef::Entity(_) => "entity",
            FieldRef::Entities(_) => "entities",
            FieldRef::Absent => "nothing",
        }
    }
}

/// A value read from the sheet for one leaf, ready to store
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    location: String,
    payload: Payload,
}

#[derive(Debug, Clone, PartialEq)]
enum Payload {
    Single(CellValue),
    Run(Vec<CellValue>),
}

impl Assign {
    pub(crate) fn single(location: String, value: CellValue) -> Self {
        Self {
            location,
            payload: Payload::Single(value),
        }
    }

    pub(crate) fn run(location: String, values: Vec<CellValue>) -> Self {
        Self {
            location,
            payload: Payload::Run(values),
        }
    }

    /// A1 address the value was read from
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The value, or the first cell of a run
    pub fn value(&self) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        match &self.payload {
            Payload::Single(value) => value,
            Payload::Run(values) => values.first().unwrap_or(&EMPTY),
        }
    }

    pub fn into_scalar<T: Scalar>(self) -> MapResult<T> {
        let value = match self.payload {
            Payload::Single(value) => value,
            Payload::Run(values) => values.into_iter().next().unwrap_or_default(),
        };
        convert(&self.location, value)
    }

    /// Every cell of a run; a single value becomes a one-element run
    pub fn into_scalars<T: Scalar>(self) -> MapResult<Vec<T>> {
        let values = match self.payload {
            Payload::Single(value) => vec![value],
            Payload::Run(values) => values,
        };
        values
            .into_iter()
            .map(|value| convert(&self.location, value))
            .collect()
    }
}

fn convert<T: Scalar>(location: &str, value: CellValue) -> MapResult<T> {
    let text = value.to_string();
    T::from_cell(value).ok_or_else(|| MapError::Conversion {
        address: location.to_string(),
        value: text,
        target: std::any::type_name::<T>(),
    })
}

/// Position of a leaf as handed to [`ConfigureCell`]
///
/// Only `row`, `column` and `formula` may be changed; whatever they hold
/// when the hook returns is used from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPosition {
    pub row: i64,
    pub column: i64,
    pub formula: bool,
    name: String,
    original_row: Option<u32>,
    original_column: Option<u32>,
}

impl CellPosition {
    pub(crate) fn new(
        name: String,
        original_row: Option<u32>,
        original_column: Option<u32>,
        row: i64,
        column: i64,
        formula: bool,
    ) -> Self {
        Self {
            row,
            column,
            formula,
            name,
            original_row,
            original_column,
        }
    }

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
}

/// Rewrites a leaf's position before it is placed
pub trait ConfigureCell {
    fn configure_cell(&self, position: &mut CellPosition, param: Option<&dyn Any>);
}

/// Vetoes writing a leaf
pub trait IgnoreOutput {
    fn ignore_output(&self, placement: &Placement, param: Option<&dyn Any>) -> bool;
}

/// Hooks an entity provides
#[derive(Clone, Copy, Default)]
pub enum Hooks<'a> {
    #[default]
    None,
    Configure(&'a dyn ConfigureCell),
    Ignore(&'a dyn IgnoreOutput),
    Both(&'a dyn ConfigureCell, &'a dyn IgnoreOutput),
}

impl<'a> Hooks<'a> {
    pub fn configure(&self) -> Option<&'a dyn ConfigureCell> {
        match *self {
            Hooks::Configure(hook) | Hooks::Both(hook, _) => Some(hook),
            _ => None,
        }
    }

    pub fn ignore(&self) -> Option<&'a dyn IgnoreOutput> {
        match *self {
            Hooks::Ignore(hook) | Hooks::Both(_, hook) => Some(hook),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_scalar_reports_location() {
        let assign = Assign::single("C4".to_string(), CellValue::Number(300.0));
        let err = assign.into_scalar::<u8>().unwrap_err();
        match err {
            MapError::Conversion { address, value, .. } => {
                assert_eq!(address, "C4");
                assert_eq!(value, "300");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_into_scalars() {
        let assign = Assign::run(
            "A1".to_string(),
            vec![CellValue::Number(1.0), CellValue::Number(2.0)],
        );
        assert_eq!(assign.value(), &CellValue::Number(1.0));
        assert_eq!(assign.into_scalars::<i32>().unwrap(), vec![1, 2]);
    }
}
