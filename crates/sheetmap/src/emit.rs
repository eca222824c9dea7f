//! Emission to and population from a sheet collaborator

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sheetmap_core::cell::serial_to_datetime;
use sheetmap_core::{Alignment, Border, CellValue, Color, Decoration, FontStyle, NumberFormat};

use crate::entity::Assign;
use crate::error::{MapError, MapResult};
use crate::mapper::MapReport;
use crate::resolve::{CapturedValue, Placement, ResolvedLeaf};
use crate::scalar::days_to_duration;
use crate::schema::Attrs;
use crate::shape::ScalarKind;

/// Write side of a spreadsheet backend
///
/// Style operations default to doing nothing so value-only backends need
/// only [`apply_merge`](SheetWriter::apply_merge) and
/// [`write_value`](SheetWriter::write_value).
pub trait SheetWriter {
    /// Called before anything is resolved; `false` cancels the write
    fn before_write(&mut self) -> MapResult<bool> {
        Ok(true)
    }

    /// Called once every leaf has been emitted
    fn after_write(&mut self, _report: &MapReport) -> MapResult<()> {
        Ok(())
    }

    fn apply_merge(&mut self, placement: &Placement) -> MapResult<()>;

    fn apply_format(&mut self, _placement: &Placement, _format: &NumberFormat) -> MapResult<()> {
        Ok(())
    }

    fn apply_font(&mut self, _placement: &Placement, _font: &FontStyle) -> MapResult<()> {
        Ok(())
    }

    fn apply_decoration(
        &mut self,
        _placement: &Placement,
        _decoration: &Decoration,
    ) -> MapResult<()> {
        Ok(())
    }

    fn apply_alignment(&mut self, _placement: &Placement, _alignment: &Alignment) -> MapResult<()> {
        Ok(())
    }

    fn apply_background(&mut self, _placement: &Placement, _color: &Color) -> MapResult<()> {
        Ok(())
    }

    fn apply_border(&mut self, _placement: &Placement, _border: &Border) -> MapResult<()> {
        Ok(())
    }

    fn write_value(&mut self, placement: &Placement, value: &CellValue) -> MapResult<()>;
}

/// Read side of a spreadsheet backend
pub trait SheetReader {
    /// Called before anything is resolved; `false` cancels the read
    fn before_read(&self) -> MapResult<bool> {
        Ok(true)
    }

    /// Called once every leaf has been assigned
    fn after_read(&self, _report: &MapReport) -> MapResult<()> {
        Ok(())
    }

    /// Raw value at the start cell of `placement`
    fn read_value(&self, placement: &Placement) -> MapResult<CellValue>;
}

/// Emit one leaf, returning the number of cells written
pub(crate) fn emit<W: SheetWriter + ?Sized>(sheet: &mut W, leaf: &ResolvedLeaf) -> MapResult<usize> {
    match &leaf.value {
        Some(CapturedValue::Single(value)) => {
            emit_cell(sheet, &leaf.placement, leaf.attrs, value)?;
            Ok(1)
        }
        Some(CapturedValue::Run(values)) => {
            for (i, value) in values.iter().enumerate() {
                let placement = leaf.run_placement(i)?;
                emit_cell(sheet, &placement, leaf.attrs, value)?;
            }
            Ok(values.len())
        }
        None => Ok(0),
    }
}

fn emit_cell<W: SheetWriter + ?Sized>(
    sheet: &mut W,
    placement: &Placement,
    attrs: &Attrs,
    value: &CellValue,
) -> MapResult<()> {
    if attrs.merge.is_some() {
        sheet.apply_merge(placement)?;
    }
    if let Some(format) = &attrs.format {
        sheet.apply_format(placement, format)?;
    }
    if let Some(font) = &attrs.font {
        sheet.apply_font(placement, font)?;
    }
    if let Some(decoration) = &attrs.decoration {
        sheet.apply_decoration(placement, decoration)?;
    }
    if let Some(alignment) = &attrs.alignment {
        sheet.apply_alignment(placement, alignment)?;
    }
    if let Some(color) = &attrs.background {
        sheet.apply_background(placement, color)?;
    }
    for border in &attrs.borders {
        sheet.apply_border(placement, border)?;
    }

    match value {
        CellValue::String(text) if placement.is_formula() => {
            sheet.write_value(placement, &CellValue::formula(text.as_str()))
        }
        _ => sheet.write_value(placement, value),
    }
}

/// Read one leaf, returning the value to assign and the number of cells read
pub(crate) fn read<R: SheetReader + ?Sized>(
    sheet: &R,
    leaf: &ResolvedLeaf,
    run_limit: usize,
) -> MapResult<(Assign, usize)> {
    let address = leaf.placement.address();
    if leaf.run.is_none() {
        let raw = sheet.read_value(&leaf.placement)?;
        let value = coerce(raw, leaf.kind, &address)?;
        return Ok((Assign::single(address, value), 1));
    }

    let mut values = Vec::new();
    for i in 0..run_limit {
        let Ok(placement) = leaf.run_placement(i) else {
            break;
        };
        let raw = sheet.read_value(&placement)?;
        if raw.is_blank() {
            break;
        }
        values.push(coerce(raw, leaf.kind, &placement.address())?);
    }
    let count = values.len();
    Ok((Assign::run(address, values), count))
}

/// Coerce a raw cell value into the representation of `kind`
///
/// A blank cell becomes an empty string for text and [`CellValue::Empty`]
/// for everything else.
pub fn coerce(raw: CellValue, kind: ScalarKind, address: &str) -> MapResult<CellValue> {
    let raw = match raw {
        CellValue::Formula(text) => CellValue::String(text),
        other => other,
    };
    if raw.is_blank() {
        return Ok(match kind {
            ScalarKind::Text => CellValue::String(String::new()),
            _ => CellValue::Empty,
        });
    }

    let text = raw.to_string();
    let fail = || MapError::Conversion {
        address: address.to_string(),
        value: text.clone(),
        target: kind.name(),
    };

    match kind {
        ScalarKind::Text => Ok(CellValue::String(text.clone())),
        ScalarKind::Char => {
            if text.chars().count() == 1 {
                Ok(CellValue::String(text.clone()))
            } else {
                Err(fail())
            }
        }
        ScalarKind::Bool => match raw {
            CellValue::Boolean(_) => Ok(raw),
            CellValue::Number(n) => Ok(CellValue::Boolean(n != 0.0)),
            CellValue::String(s) => parse_bool(&s).map(CellValue::Boolean).ok_or_else(fail),
            _ => Err(fail()),
        },
        ScalarKind::Integer => match raw {
            CellValue::Number(_) | CellValue::Decimal(_) => Ok(raw),
            CellValue::Boolean(b) => Ok(CellValue::Number(if b { 1.0 } else { 0.0 })),
            // integer text beyond f64 precision stays exact as a decimal
            CellValue::String(s) => Decimal::from_str(s.trim())
                .map(CellValue::Decimal)
                .or_else(|_| s.trim().parse::<f64>().map(CellValue::Number))
                .map_err(|_| fail()),
            _ => Err(fail()),
        },
        ScalarKind::Float => match raw {
            CellValue::Number(_) | CellValue::Decimal(_) => Ok(raw),
            CellValue::Boolean(b) => Ok(CellValue::Number(if b { 1.0 } else { 0.0 })),
            CellValue::String(s) => s
                .trim()
                .parse::<f64>()
                .map(CellValue::Number)
                .map_err(|_| fail()),
            _ => Err(fail()),
        },
        ScalarKind::Decimal => match raw {
            CellValue::Decimal(_) => Ok(raw),
            CellValue::Number(n) => Decimal::from_f64(n).map(CellValue::Decimal).ok_or_else(fail),
            CellValue::Boolean(b) => Ok(CellValue::Decimal(if b { Decimal::ONE } else { Decimal::ZERO })),
            CellValue::String(s) => Decimal::from_str(s.trim())
                .map(CellValue::Decimal)
                .map_err(|_| fail()),
            _ => Err(fail()),
        },
        ScalarKind::DateTime | ScalarKind::Date => match raw {
            CellValue::DateTime(_) => Ok(raw),
            CellValue::Number(n) => serial_to_datetime(n).map(CellValue::DateTime).ok_or_else(fail),
            CellValue::String(s) => parse_datetime(&s).map(CellValue::DateTime).ok_or_else(fail),
            _ => Err(fail()),
        },
        ScalarKind::Duration => match raw {
            CellValue::Duration(_) => Ok(raw),
            CellValue::Number(days) => days_to_duration(days).map(CellValue::Duration).ok_or_else(fail),
            CellValue::String(s) => parse_duration(&s).map(CellValue::Duration).ok_or_else(fail),
            _ => Err(fail()),
        },
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// `h:mm`, `h:mm:ss` or a number of days
///
/// Values beyond the range of [`chrono::Duration`] yield `None`.
fn parse_duration(text: &str) -> Option<chrono::Duration> {
    let text = text.trim();
    let parts: Vec<&str> = text.split(':').collect();
    match parts.as_slice() {
        [days] => days_to_duration(days.parse().ok()?),
        [hours, minutes] => chrono::Duration::try_minutes(total_minutes(hours, minutes)?),
        [hours, minutes, seconds] => {
            let seconds: f64 = seconds.parse().ok()?;
            let fraction = (seconds * 1000.0).round();
            if !fraction.is_finite() || fraction.abs() >= i64::MAX as f64 {
                return None;
            }
            let millis = total_minutes(hours, minutes)?
                .checked_mul(60_000)?
                .checked_add(fraction as i64)?;
            chrono::Duration::try_milliseconds(millis)
        }
        _ => None,
    }
}

fn total_minutes(hours: &str, minutes: &str) -> Option<i64> {
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_coercion() {
        assert_eq!(
            coerce(CellValue::Empty, ScalarKind::Text, "A1").unwrap(),
            CellValue::string("")
        );
        assert_eq!(
            coerce(CellValue::string(""), ScalarKind::Integer, "A1").unwrap(),
            CellValue::Empty
        );
        assert_eq!(
            coerce(CellValue::Empty, ScalarKind::DateTime, "A1").unwrap(),
            CellValue::Empty
        );
    }

    #[test]
    fn test_text_and_numbers() {
        assert_eq!(
            coerce(CellValue::Number(42.0), ScalarKind::Text, "A1").unwrap(),
            CellValue::string("42")
        );
        assert_eq!(
            coerce(CellValue::string(" 2.5 "), ScalarKind::Float, "A1").unwrap(),
            CellValue::Number(2.5)
        );
        assert_eq!(
            coerce(CellValue::string("19.99"), ScalarKind::Decimal, "A1").unwrap(),
            CellValue::Decimal(Decimal::new(1999, 2))
        );
        assert_eq!(
            coerce(CellValue::string("YES"), ScalarKind::Bool, "A1").unwrap(),
            CellValue::Boolean(true)
        );
    }

    #[test]
    fn test_serial_dates_and_durations() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            coerce(CellValue::Number(45306.0), ScalarKind::Date, "A1").unwrap(),
            CellValue::DateTime(expected)
        );
        assert_eq!(
            coerce(CellValue::string("2024-01-15"), ScalarKind::DateTime, "A1").unwrap(),
            CellValue::DateTime(expected)
        );
        assert_eq!(
            coerce(CellValue::string("1:30"), ScalarKind::Duration, "A1").unwrap(),
            CellValue::Duration(chrono::Duration::minutes(90))
        );
        assert_eq!(
            coerce(CellValue::Number(0.25), ScalarKind::Duration, "A1").unwrap(),
            CellValue::Duration(chrono::Duration::hours(6))
        );
    }

    #[test]
    fn test_large_integer_text_stays_exact() {
        assert_eq!(
            coerce(CellValue::string("9007199254740993"), ScalarKind::Integer, "A1").unwrap(),
            CellValue::Decimal(Decimal::from(9_007_199_254_740_993i64))
        );
        assert_eq!(
            coerce(CellValue::string("1e3"), ScalarKind::Integer, "A1").unwrap(),
            CellValue::Number(1000.0)
        );
    }

    #[test]
    fn test_duration_text_with_seconds() {
        assert_eq!(
            coerce(CellValue::string("1:02:03.5"), ScalarKind::Duration, "A1").unwrap(),
            CellValue::Duration(chrono::Duration::milliseconds(3_723_500))
        );
    }

    #[test]
    fn test_out_of_range_duration_text_is_a_conversion_error() {
        for text in [
            "3000000000000:00",
            "200000000000000000:00",
            "9223372036854775807:00:00",
            "0:00:1e300",
        ] {
            let err = coerce(CellValue::string(text), ScalarKind::Duration, "E2").unwrap_err();
            assert!(
                matches!(err, MapError::Conversion { ref address, .. } if address == "E2"),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn test_conversion_errors_carry_address() {
        let err = coerce(CellValue::string("abc"), ScalarKind::Integer, "D7").unwrap_err();
        match err {
            MapError::Conversion {
                address,
                value,
                target,
            } => {
                assert_eq!(address, "D7");
                assert_eq!(value, "abc");
                assert_eq!(target, "integer");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(coerce(CellValue::string("ab"), ScalarKind::Char, "A1").is_err());
    }
}
