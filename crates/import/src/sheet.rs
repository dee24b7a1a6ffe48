//! Worksheet model and the workbook loader.
//!
//! The reconciler works on [`Worksheet`], a header row plus numbered data
//! rows of [`Cell`] values. Only [`load_first_worksheet`] knows about the
//! on-disk format.

use crate::error::{ImportError, ImportResult};
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;
use time::{Date, Duration, macros::date};

/// Day zero of the spreadsheet serial date system.
const SERIAL_EPOCH: Date = date!(1899 - 12 - 30);

/// One spreadsheet cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(Date),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell as a column value.
    ///
    /// Dates become `YYYY-MM-DD` and whole numbers drop their fractional
    /// part, so phone and Aadhaar numbers typed as numbers survive intact.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Date(d) => Some(d.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Borrowed view of one data row.
#[derive(Clone, Copy, Debug)]
pub struct RowView<'a> {
    /// 1-based row number as shown in the spreadsheet.
    pub number: u32,
    headers: &'a [String],
    cells: &'a [Cell],
}

impl<'a> RowView<'a> {
    /// Non-empty cell under `header`, if the column exists.
    pub fn get(&self, header: &str) -> Option<&'a Cell> {
        let idx = self.headers.iter().position(|h| h == header)?;
        self.cells.get(idx).filter(|cell| !cell.is_empty())
    }

    pub fn text(&self, header: &str) -> Option<String> {
        self.get(header).and_then(Cell::as_text)
    }

    pub fn has_values(&self) -> bool {
        self.cells.iter().any(|cell| !cell.is_empty())
    }
}

#[derive(Clone, Debug)]
struct Row {
    number: u32,
    cells: Vec<Cell>,
}

/// A header row and the data rows below it.
#[derive(Clone, Debug, Default)]
pub struct Worksheet {
    pub name: String,
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, number: u32, cells: Vec<Cell>) {
        self.rows.push(Row { number, cells });
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows, including blank ones.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(|row| RowView {
            number: row.number,
            headers: &self.headers,
            cells: &row.cells,
        })
    }
}

fn serial_to_date(serial: f64) -> Option<Date> {
    if !serial.is_finite() {
        return None;
    }
    SERIAL_EPOCH.checked_add(Duration::days(serial.floor() as i64))
}

fn convert(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => serial_to_date(dt.as_f64())
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => {
            let day = s.get(..10).unwrap_or(s);
            Cell::Text(day.to_string())
        }
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Load the first worksheet of an xlsx/xls/ods file. Row 1 is the header.
pub fn load_first_worksheet(path: &Path) -> ImportResult<Worksheet> {
    let mut workbook = open_workbook_auto(path).map_err(|source| ImportError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ImportError::NoWorksheet(path.to_path_buf()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::NoWorksheet(path.to_path_buf()))?
        .map_err(|source| ImportError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    // Ranges start at the first used cell; keep row numbers as the user sees them.
    let first_row = range.start().map(|(row, _)| row).unwrap_or(0);
    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|cells| {
            cells
                .iter()
                .map(|cell| convert(cell).as_text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    let mut sheet = Worksheet::new(name, headers);
    for (offset, cells) in rows.enumerate() {
        let number = first_row + offset as u32 + 2;
        sheet.push_row(number, cells.iter().map(convert).collect());
    }
    tracing::debug!(
        path = %path.display(),
        sheet = %sheet.name,
        rows = sheet.row_count(),
        "worksheet loaded"
    );
    Ok(sheet)
}
