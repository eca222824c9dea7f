//! Conversion between leaf field values and cell values

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sheetmap_core::cell::serial_to_datetime;
use sheetmap_core::CellValue;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Largest magnitude below which every integer has an exact `f64`
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A value that can be written to and read from a single cell
///
/// `from_cell` receives a value already coerced to the field's
/// [`ScalarKind`](crate::ScalarKind); [`CellValue::Empty`] yields the
/// type's default. It returns `None` when the value does not fit.
///
/// Integers are written as numbers while `f64` holds them exactly and as
/// decimals beyond that, so large values survive a write and read.
pub trait Scalar: Sized {
    fn to_cell(&self) -> CellValue;
    fn from_cell(value: CellValue) -> Option<Self>;
}

impl Scalar for bool {
    fn to_cell(&self) -> CellValue {
        CellValue::Boolean(*self)
    }

    fn from_cell(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Empty => Some(false),
            other => other.as_bool(),
        }
    }
}

macro_rules! integer_scalar {
    ($($ty:ty),+) => {
        $(
            impl Scalar for $ty {
                fn to_cell(&self) -> CellValue {
                    let n = *self as f64;
                    if n.abs() > MAX_EXACT_INTEGER {
                        CellValue::Decimal(Decimal::from(*self))
                    } else {
                        CellValue::Number(n)
                    }
                }

                fn from_cell(value: CellValue) -> Option<Self> {
                    match value {
                        CellValue::Empty => Some(0),
                        CellValue::Decimal(d) => d.round().to_i128().and_then(|n| <$ty>::try_from(n).ok()),
                        other => {
                            let n = other.as_number()?.round();
                            if n.is_finite() && n >= <$ty>::MIN as f64 && n <= <$ty>::MAX as f64 {
                                Some(n as $ty)
                            } else {
                                None
                            }
                        }
                    }
                }
            }
        )+
    };
}

integer_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Scalar for f64 {
    fn to_cell(&self) -> CellValue {
        CellValue::Number(*self)
    }

    fn from_cell(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Empty => Some(0.0),
            other => other.as_number(),
        }
    }
}

impl Scalar for f32 {
    fn to_cell(&self) -> CellValue {
        CellValue::Number(f64::from(*self))
    }

    fn from_cell(value: CellValue) -> Option<Self> {
        f64::from_cell(value).map(|n| n as f32)
    }
}

impl Scalar for char {
    fn to_cell(&self) -> CellValue {
        CellValue::String(self.to_string())
    }

    fn from_cell(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Empty => Some('\0'),
            CellValue::String(s) => s.chars().next(),
            _ => None,
        }
    }
}

impl Scalar for String {
    fn to_cell(&self) -> CellValue {
        CellValue::String(self.clone())
    }

    fn from_cell(value: CellValue) -> Option<Self> {
        match value {
            CellValue::String(s) | CellValue::Formula(s) => Some(s),
            other => Some(other.to_string()),
        }
    }
}

impl Scalar for Decimal {
    fn to_cell(&self) -> CellValue {
        CellValue::Decimal(*self)
    }

    fn from_cell(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Empty => Some(Decimal::ZERO),
            CellValue::Decimal(d) => Some(d),
            other => Decimal::from_f64(other.as_number()?),
        }
    }
}

impl Scalar for NaiveDateTime {
    fn to_cell(&self) -> CellValue {
        CellValue::DateTime(*self)
    }

    fn from_cell(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Empty => Some(NaiveDateTime::default()),
            CellValue::DateTime(dt) => Some(dt),
            CellValue::Number(n) => serial_to_datetime(n),
            _ => None,
        }
    }
}

impl Scalar for NaiveDate {
    fn to_cell(&self) -> CellValue {
        match self.and_hms_opt(0, 0, 0) {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::Empty,
        }
    }

    fn from_cell(value: CellValue) -> Option<Self> {
        NaiveDateTime::from_cell(value).map(|dt| dt.date())
    }
}

impl Scalar for chrono::Duration {
    fn to_cell(&self) -> CellValue {
        CellValue::Duration(*self)
    }

    fn from_cell(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Empty => Some(chrono::Duration::zero()),
            CellValue::Duration(d) => Some(d),
            CellValue::Number(days) => days_to_duration(days),
            _ => None,
        }
    }
}

impl Scalar for std::time::Duration {
    fn to_cell(&self) -> CellValue {
        chrono::Duration::from_std(*self)
            .map(CellValue::Duration)
            .unwrap_or(CellValue::Empty)
    }

    fn from_cell(value: CellValue) -> Option<Self> {
        chrono::Duration::from_cell(value)?.to_std().ok()
    }
}

impl<T: Scalar> Scalar for Option<T> {
    fn to_cell(&self) -> CellValue {
        match self {
            Some(value) => value.to_cell(),
            None => CellValue::Empty,
        }
    }

    fn from_cell(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Empty => Some(None),
            other => T::from_cell(other).map(Some),
        }
    }
}

/// Fractional days to a duration, rounded to the millisecond
pub(crate) fn days_to_duration(days: f64) -> Option<chrono::Duration> {
    let millis = (days * MILLIS_PER_DAY).round();
    if millis.is_finite() && millis.abs() < i64::MAX as f64 {
        chrono::Duration::try_milliseconds(millis as i64)
    } else {
        None
    }
}
