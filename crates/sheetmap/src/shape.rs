//! Type classification
//!
//! Every mappable field type implements [`Classify`], which reports its
//! [`Shape`]. Precedence is fixed by the impls themselves: numeric and
//! boolean primitives, then the near-primitive set (text, decimal,
//! date/time, duration), then composite entities (via [`composite!`]),
//! then arrays, lists and dictionaries. `Option<T>` classifies as `T`.
//!
//! [`composite!`]: crate::composite

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::schema::Schema;

/// Scalar value kinds a leaf can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Integer,
    Float,
    Char,
    Text,
    Decimal,
    DateTime,
    Date,
    Duration,
}

impl ScalarKind {
    /// Whether this is a numeric/boolean primitive rather than a near-primitive
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            ScalarKind::Bool | ScalarKind::Integer | ScalarKind::Float | ScalarKind::Char
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Char => "character",
            ScalarKind::Text => "text",
            ScalarKind::Decimal => "decimal",
            ScalarKind::DateTime => "date/time",
            ScalarKind::Date => "date",
            ScalarKind::Duration => "duration",
        }
    }
}

/// Collection kind of a repeated field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Array,
    List,
    /// Keyed collection; only the values are mapped
    Dictionary,
}

/// Classification of a field type
#[derive(Clone)]
pub enum Shape {
    /// Numeric, boolean or character value
    Primitive(ScalarKind),
    /// Text, decimal, date/time or duration
    NearPrimitive(ScalarKind),
    /// A mapped entity with its own schema
    Composite(fn() -> &'static Schema),
    /// A collection of elements of one shape
    Repeated {
        container: Container,
        element: Box<Shape>,
    },
    /// Anything else; never mapped
    Unknown,
}

/// Flat view of a [`Shape`] for comparisons and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Primitive,
    NearPrimitive,
    Composite,
    Array,
    List,
    Dictionary,
    Unknown,
}

impl Shape {
    pub(crate) fn scalar(kind: ScalarKind) -> Self {
        if kind.is_primitive() {
            Shape::Primitive(kind)
        } else {
            Shape::NearPrimitive(kind)
        }
    }

    pub(crate) fn repeated(container: Container, element: Shape) -> Self {
        Shape::Repeated {
            container,
            element: Box::new(element),
        }
    }

    /// The scalar kind for primitive and near-primitive shapes
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Shape::Primitive(kind) | Shape::NearPrimitive(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Shape::Primitive(_) => Category::Primitive,
            Shape::NearPrimitive(_) => Category::NearPrimitive,
            Shape::Composite(_) => Category::Composite,
            Shape::Repeated { container, .. } => match container {
                Container::Array => Category::Array,
                Container::List => Category::List,
                Container::Dictionary => Category::Dictionary,
            },
            Shape::Unknown => Category::Unknown,
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self.category() {
            Category::Primitive => "primitive",
            Category::NearPrimitive => "near-primitive",
            Category::Composite => "composite",
            Category::Array => "array",
            Category::List => "list",
            Category::Dictionary => "dictionary",
            Category::Unknown => "unknown",
        }
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Primitive(kind) => f.debug_tuple("Primitive").field(kind).finish(),
            Shape::NearPrimitive(kind) => f.debug_tuple("NearPrimitive").field(kind).finish(),
            Shape::Composite(schema) => f
                .debug_tuple("Composite")
                .field(&schema().type_name())
                .finish(),
            Shape::Repeated { container, element } => f
                .debug_struct("Repeated")
                .field("container", container)
                .field("element", element)
                .finish(),
            Shape::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Reports the [`Shape`] of a field type
pub trait Classify {
    fn shape() -> Shape;
}

/// Classify `T`
pub fn classify<T: Classify + ?Sized>() -> Shape {
    T::shape()
}

macro_rules! classify_scalar {
    ($kind:ident => $($ty:ty),+) => {
        $(
            impl Classify for $ty {
                fn shape() -> Shape {
                    Shape::scalar(ScalarKind::$kind)
                }
            }
        )+
    };
}

classify_scalar!(Bool => bool);
classify_scalar!(Integer => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
classify_scalar!(Float => f32, f64);
classify_scalar!(Char => char);
classify_scalar!(Text => String);
classify_scalar!(Decimal => Decimal);
classify_scalar!(DateTime => NaiveDateTime);
classify_scalar!(Date => NaiveDate);
classify_scalar!(Duration => chrono::Duration, std::time::Duration);

impl<T: Classify> Classify for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: Classify, const N: usize> Classify for [T; N] {
    fn shape() -> Shape {
        Shape::repeated(Container::Array, T::shape())
    }
}

impl<T: Classify> Classify for Box<[T]> {
    fn shape() -> Shape {
        Shape::repeated(Container::Array, T::shape())
    }
}

impl<T: Classify> Classify for Vec<T> {
    fn shape() -> Shape {
        Shape::repeated(Container::List, T::shape())
    }
}

impl<T: Classify> Classify for VecDeque<T> {
    fn shape() -> Shape {
        Shape::repeated(Container::List, T::shape())
    }
}

impl<K, V: Classify, S> Classify for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::repeated(Container::Dictionary, V::shape())
    }
}

impl<K, V: Classify> Classify for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::repeated(Container::Dictionary, V::shape())
    }
}

// Iterable but neither indexed nor keyed
impl<T, S> Classify for HashSet<T, S> {
    fn shape() -> Shape {
        Shape::Unknown
    }
}

impl<T> Classify for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::Unknown
    }
}

/// Implement [`Classify`] for entity types, classifying them as composites.
///
/// ```ignore
/// sheetmap::composite!(Invoice, Customer);
/// ```
#[macro_export]
macro_rules! composite {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Classify for $ty {
                fn shape() -> $crate::Shape {
                    $crate::Shape::Composite(<$ty as $crate::Mapped>::schema)
                }
            }
        )+
    };
}
