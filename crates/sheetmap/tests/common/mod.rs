//! Entity fixtures shared by the integration tests

#![allow(dead_code)]

use std::any::Any;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use sheetmap::prelude::*;
use sheetmap::{composite, BorderPosition};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    pub name: String,
    pub vip: bool,
}

composite!(Customer);

impl Mapped for Customer {
    fn schema() -> &'static Schema {
        static SCHEMA: Lazy<Schema> = Lazy::new(|| {
            Schema::new("Customer")
                .field::<String>(
                    "name",
                    Attrs::mapped(CellMap::at(1, 1)).font(FontStyle::new().with_bold(true)),
                )
                .field::<bool>("vip", Attrs::mapped(CellMap::at(1, 2)))
        });
        &SCHEMA
    }

    fn field(&self, name: &str) -> FieldRef<'_> {
        match name {
            "name" => FieldRef::value(&self.name),
            "vip" => FieldRef::value(&self.vip),
            _ => FieldRef::Absent,
        }
    }

    fn assign(&mut self, name: &str, value: Assign) -> MapResult<()> {
        match name {
            "name" => self.name = value.into_scalar()?,
            "vip" => self.vip = value.into_scalar()?,
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub sku: String,
    pub qty: u32,
    pub price: Decimal,
}

composite!(Line);

impl Line {
    pub fn new(sku: &str, qty: u32, price: Decimal) -> Self {
        Self {
            sku: sku.to_string(),
            qty,
            price,
        }
    }
}

impl Mapped for Line {
    fn schema() -> &'static Schema {
        static SCHEMA: Lazy<Schema> = Lazy::new(|| {
            Schema::new("Line")
                .field::<String>("sku", Attrs::mapped(CellMap::column(0)))
                .field::<u32>("qty", Attrs::mapped(CellMap::column(1)))
                .field::<Decimal>(
                    "price",
                    Attrs::mapped(CellMap::column(2))
                        .format("0.00")
                        .border(Border::new(BorderPosition::EdgeBottom)),
                )
        });
        &SCHEMA
    }

    fn field(&self, name: &str) -> FieldRef<'_> {
        match name {
            "sku" => FieldRef::value(&self.sku),
            "qty" => FieldRef::value(&self.qty),
            "price" => FieldRef::value(&self.price),
            _ => FieldRef::Absent,
        }
    }

    fn assign(&mut self, name: &str, value: Assign) -> MapResult<()> {
        match name {
            "sku" => self.sku = value.into_scalar()?,
            "qty" => self.qty = value.into_scalar()?,
            "price" => self.price = value.into_scalar()?,
            _ => {}
        }
        Ok(())
    }
}

/// Header cells at fixed positions, lines placed by the cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invoice {
    pub number: String,
    pub customer: Option<Customer>,
    pub lines: Vec<Line>,
}

composite!(Invoice);

impl Invoice {
    pub fn sample() -> Self {
        Self {
            number: "INV-001".to_string(),
            customer: Some(Customer {
                name: "Acme".to_string(),
                vip: true,
            }),
            lines: vec![
                Line::new("A-1", 2, Decimal::new(1050, 2)),
                Line::new("B-2", 1, Decimal::new(399, 2)),
                Line::new("C-3", 5, Decimal::new(100, 2)),
            ],
        }
    }
}

impl Mapped for Invoice {
    fn schema() -> &'static Schema {
        static SCHEMA: Lazy<Schema> = Lazy::new(|| {
            Schema::new("Invoice")
                .field::<String>(
                    "number",
                    Attrs::mapped(CellMap::at(0, 0)).merge(MergeSpec::Relative {
                        rows: 0,
                        columns: 2,
                    }),
                )
                .child::<Option<Customer>>("customer")
                .child::<Vec<Line>>("lines")
        });
        &SCHEMA
    }

    fn field(&self, name: &str) -> FieldRef<'_> {
        match name {
            "number" => FieldRef::value(&self.number),
            "customer" => FieldRef::optional_entity(self.customer.as_ref()),
            "lines" => FieldRef::entities(&self.lines),
            _ => FieldRef::Absent,
        }
    }

    fn assign(&mut self, name: &str, value: Assign) -> MapResult<()> {
        if name == "number" {
            self.number = value.into_scalar()?;
        }
        Ok(())
    }

    fn child_mut(&mut self, name: &str, element: Option<usize>) -> Option<&mut dyn Mapped> {
        match (name, element) {
            ("customer", None) => self.customer.as_mut().map(|c| c as &mut dyn Mapped),
            ("lines", Some(i)) => self.lines.get_mut(i).map(|l| l as &mut dyn Mapped),
            _ => None,
        }
    }
}

/// Fields with no mapping anywhere
#[derive(Debug, Clone, Default)]
pub struct Unmapped {
    pub label: String,
    pub note: Note,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Note {
    pub text: String,
}

composite!(Note);

impl Mapped for Note {
    fn schema() -> &'static Schema {
        static SCHEMA: Lazy<Schema> = Lazy::new(|| Schema::new("Note").child::<String>("text"));
        &SCHEMA
    }

    fn field(&self, name: &str) -> FieldRef<'_> {
        match name {
            "text" => FieldRef::value(&self.text),
            _ => FieldRef::Absent,
        }
    }
}

impl Mapped for Unmapped {
    fn schema() -> &'static Schema {
        static SCHEMA: Lazy<Schema> = Lazy::new(|| {
            Schema::new("Unmapped")
                .child::<String>("label")
                .child::<Note>("note")
                .child::<Vec<String>>("tags")
        });
        &SCHEMA
    }

    fn field(&self, name: &str) -> FieldRef<'_> {
        match name {
            "label" => FieldRef::value(&self.label),
            "note" => FieldRef::entity(&self.note),
            "tags" => FieldRef::values(&self.tags),
            _ => FieldRef::Absent,
        }
    }
}

/// A report whose `secret` cell is vetoed and whose `total` can be moved
/// through the hook parameter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub title: String,
    pub secret: String,
    pub total: f64,
}

/// Row offset handed to [`Summary`]'s configure hook
pub struct RowOffset(pub i64);

impl Mapped for Summary {
    fn schema() -> &'static Schema {
        static SCHEMA: Lazy<Schema> = Lazy::new(|| {
            Schema::new("Summary")
                .field::<String>(
                    "title",
                    Attrs::mapped(CellMap::at(0, 0)).background(Color::YELLOW),
                )
                .field::<String>(
                    "secret",
                    Attrs::mapped(CellMap::at(0, 1)).background(Color::RED),
                )
                .field::<f64>(
                    "total",
                    Attrs::mapped(CellMap::at(3, 2)).merge(MergeSpec::Relative {
                        rows: 1,
                        columns: 1,
                    }),
                )
        });
        &SCHEMA
    }

    fn field(&self, name: &str) -> FieldRef<'_> {
        match name {
            "title" => FieldRef::value(&self.title),
            "secret" => FieldRef::value(&self.secret),
            "total" => FieldRef::value(&self.total),
            _ => FieldRef::Absent,
        }
    }

    fn hooks(&self) -> Hooks<'_> {
        Hooks::Both(self, self)
    }
}

impl ConfigureCell for Summary {
    fn configure_cell(&self, position: &mut CellPosition, param: Option<&dyn Any>) {
        if position.name() != "total" {
            return;
        }
        if let Some(RowOffset(offset)) = param.and_then(|p| p.downcast_ref::<RowOffset>()) {
            position.row += offset;
        }
    }
}

impl IgnoreOutput for Summary {
    fn ignore_output(&self, placement: &Placement, _param: Option<&dyn Any>) -> bool {
        placement.name() == "secret"
    }
}

pub fn summary() -> Summary {
    Summary {
        title: "Quarter".to_string(),
        secret: "hidden".to_string(),
        total: 12.5,
    }
}

/// Backend that records each collaborator call instead of storing cells
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<String>,
    /// Answer `before_write` with `false`
    pub refuse: bool,
}

impl Recorder {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    fn record(&mut self, call: &str, placement: &Placement) -> MapResult<()> {
        self.calls.push(format!("{call} {placement}"));
        Ok(())
    }
}

impl SheetWriter for Recorder {
    fn before_write(&mut self) -> MapResult<bool> {
        self.calls.push("before".to_string());
        Ok(!self.refuse)
    }

    fn after_write(&mut self, report: &MapReport) -> MapResult<()> {
        self.calls.push(format!("after {}", report.written));
        Ok(())
    }

    fn apply_merge(&mut self, placement: &Placement) -> MapResult<()> {
        self.record("merge", placement)
    }

    fn apply_format(&mut self, placement: &Placement, _format: &NumberFormat) -> MapResult<()> {
        self.record("format", placement)
    }

    fn apply_font(&mut self, placement: &Placement, _font: &FontStyle) -> MapResult<()> {
        self.record("font", placement)
    }

    fn apply_decoration(&mut self, placement: &Placement, _decoration: &Decoration) -> MapResult<()> {
        self.record("decoration", placement)
    }

    fn apply_alignment(&mut self, placement: &Placement, _alignment: &Alignment) -> MapResult<()> {
        self.record("alignment", placement)
    }

    fn apply_background(&mut self, placement: &Placement, _color: &Color) -> MapResult<()> {
        self.record("background", placement)
    }

    fn apply_border(&mut self, placement: &Placement, border: &Border) -> MapResult<()> {
        self.calls
            .push(format!("border {placement} {:?}", border.position));
        Ok(())
    }

    fn write_value(&mut self, placement: &Placement, value: &CellValue) -> MapResult<()> {
        self.calls.push(format!("value {placement} {value}"));
        Ok(())
    }
}
