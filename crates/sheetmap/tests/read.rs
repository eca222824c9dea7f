//! Read population integration tests

mod common;

use common::{Customer, Invoice, Line};
use std::cell::Cell;

use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use sheetmap::prelude::*;

fn row_mapper() -> SheetMapper<'static> {
    SheetMapper::new().with_options(
        MapOptions::new()
            .with_direction(MapDirection::Row)
            .with_start_index(5),
    )
}

fn written_invoice() -> Worksheet {
    let mut sheet = Worksheet::new("Invoice");
    row_mapper().write(&mut sheet, &Invoice::sample()).unwrap();
    sheet
}

#[test]
fn test_round_trip_into_shaped_entity() {
    let sheet = written_invoice();
    let mut invoice = Invoice {
        customer: Some(Customer::default()),
        lines: vec![Line::default(); 3],
        ..Default::default()
    };

    let report = row_mapper().read_into(&sheet, &mut invoice).unwrap();
    assert_eq!(invoice, Invoice::sample());
    assert_eq!(report.written, 12);
    assert_eq!(report.next_index, Some(8));
}

#[test]
fn test_read_default_entity_populates_present_fields_only() {
    let sheet = written_invoice();
    let invoice: Invoice = row_mapper().read(&sheet).unwrap();
    assert_eq!(
        invoice,
        Invoice {
            number: "INV-001".to_string(),
            ..Default::default()
        }
    );
}

#[test]
fn test_blank_cells_read_as_defaults() {
    let mut sheet = Worksheet::new("Sheet1");
    sheet.set_cell_value("C2", "yes").unwrap();

    let customer: Customer = SheetMapper::new().read(&sheet).unwrap();
    assert_eq!(
        customer,
        Customer {
            name: String::new(),
            vip: true,
        }
    );
}

#[test]
fn test_unreadable_cell_reports_address() {
    let mut sheet = written_invoice();
    sheet.set_cell_value("B7", "many").unwrap();

    let mut invoice = Invoice {
        lines: vec![Line::default(); 3],
        ..Default::default()
    };
    let err = row_mapper().read_into(&sheet, &mut invoice).unwrap_err();
    match err {
        MapError::Conversion {
            address,
            value,
            target,
        } => {
            assert_eq!(address, "B7");
            assert_eq!(value, "many");
            assert_eq!(target, "integer");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[derive(Debug, Default, PartialEq)]
struct Pair {
    value: i32,
}

impl Mapped for Pair {
    fn schema() -> &'static Schema {
        static SCHEMA: Lazy<Schema> = Lazy::new(|| {
            Schema::new("Pair").field::<i32>(
                "value",
                Attrs::mapped(CellMap::at(0, 0)).input(CellMap::at(5, 5)),
            )
        });
        &SCHEMA
    }

    fn field(&self, name: &str) -> FieldRef<'_> {
        match name {
            "value" => FieldRef::value(&self.value),
            _ => FieldRef::Absent,
        }
    }

    fn assign(&mut self, name: &str, value: Assign) -> MapResult<()> {
        if name == "value" {
            self.value = value.into_scalar()?;
        }
        Ok(())
    }
}

#[test]
fn test_input_map_overrides_shared_map() {
    let mut sheet = Worksheet::new("Sheet1");
    SheetMapper::new()
        .write(&mut sheet, &Pair { value: 3 })
        .unwrap();
    assert_eq!(sheet.get_value("A1").unwrap(), CellValue::Number(3.0));

    sheet.set_cell_value("F6", 7.0).unwrap();
    let pair: Pair = SheetMapper::new().read(&sheet).unwrap();
    assert_eq!(pair, Pair { value: 7 });
}

#[derive(Debug, Default, PartialEq)]
struct Readings {
    values: Vec<f64>,
}

impl Mapped for Readings {
    fn schema() -> &'static Schema {
        static SCHEMA: Lazy<Schema> = Lazy::new(|| {
            Schema::new("Readings").field::<Vec<f64>>("values", Attrs::mapped(CellMap::at(1, 0)))
        });
        &SCHEMA
    }

    fn field(&self, name: &str) -> FieldRef<'_> {
        match name {
            "values" => FieldRef::values(&self.values),
            _ => FieldRef::Absent,
        }
    }

    fn assign(&mut self, name: &str, value: Assign) -> MapResult<()> {
        if name == "values" {
            self.values = value.into_scalars()?;
        }
        Ok(())
    }
}

#[test]
fn test_run_stops_at_first_blank_cell() {
    let mut sheet = Worksheet::new("Sheet1");
    sheet.set_cell_value("A2", 1.0).unwrap();
    sheet.set_cell_value("A3", "2.5").unwrap();
    sheet.set_cell_value("A4", 4.0).unwrap();
    sheet.set_cell_value("A6", 9.0).unwrap();

    let readings: Readings = SheetMapper::new().read(&sheet).unwrap();
    assert_eq!(readings.values, vec![1.0, 2.5, 4.0]);

    let limited: Readings = SheetMapper::new()
        .with_options(MapOptions::new().with_run_limit(2))
        .read(&sheet)
        .unwrap();
    assert_eq!(limited.values, vec![1.0, 2.5]);
}

/// Has a mapped child but never hands it out for population
#[derive(Debug, Default)]
struct Sealed {
    customer: Customer,
}

impl Mapped for Sealed {
    fn schema() -> &'static Schema {
        static SCHEMA: Lazy<Schema> =
            Lazy::new(|| Schema::new("Sealed").child::<Customer>("customer"));
        &SCHEMA
    }

    fn field(&self, name: &str) -> FieldRef<'_> {
        match name {
            "customer" => FieldRef::entity(&self.customer),
            _ => FieldRef::Absent,
        }
    }
}

#[test]
fn test_missing_child_during_population() {
    let sheet = Worksheet::new("Sheet1");
    let err = SheetMapper::new().read::<_, Sealed>(&sheet).unwrap_err();
    match err {
        MapError::MissingChild(path) => assert_eq!(path, "customer.name"),
        other => panic!("unexpected error: {other}"),
    }
}

/// Reader over a worksheet that can decline reads and remembers the last report
struct Gate<'s> {
    sheet: &'s Worksheet,
    open: bool,
    finished: Cell<Option<MapReport>>,
}

impl<'s> Gate<'s> {
    fn new(sheet: &'s Worksheet, open: bool) -> Self {
        Self {
            sheet,
            open,
            finished: Cell::new(None),
        }
    }
}

impl SheetReader for Gate<'_> {
    fn before_read(&self) -> MapResult<bool> {
        Ok(self.open)
    }

    fn after_read(&self, report: &MapReport) -> MapResult<()> {
        self.finished.set(Some(*report));
        Ok(())
    }

    fn read_value(&self, placement: &Placement) -> MapResult<CellValue> {
        self.sheet.read_value(placement)
    }
}

#[test]
fn test_after_read_sees_the_report() {
    let sheet = written_invoice();
    let gate = Gate::new(&sheet, true);
    let invoice: Invoice = row_mapper().read(&gate).unwrap();

    assert_eq!(invoice.number, "INV-001");
    let report = gate.finished.get().unwrap();
    assert_eq!(report.written, 1);
    assert!(!report.cancelled);
}

#[test]
fn test_backend_can_cancel_a_read() {
    let sheet = written_invoice();
    let gate = Gate::new(&sheet, false);
    let mut invoice = Invoice {
        lines: vec![Line::default(); 3],
        ..Default::default()
    };
    let report = row_mapper().read_into(&gate, &mut invoice).unwrap();

    assert!(report.cancelled);
    assert_eq!(report.next_index, Some(5));
    assert_eq!(invoice.lines, vec![Line::default(); 3]);
    assert_eq!(gate.finished.get(), None);
}
