//! Dataset — the user-loaded table and column type inference.

use std::fmt;
use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date formats accepted when voting a column as temporal.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Datetime formats accepted for the same vote (time-of-day is dropped).
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Inferred type of a column. Inference prefers `Temporal` over `Numeric`
/// so that e.g. a column of `2024-01-02` strings is never read as math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Temporal,
    Text,
}

impl ColumnType {
    pub fn label(self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Temporal => "temporal",
            ColumnType::Text => "text",
        }
    }
}

/// A single cell in the domain of some column.
///
/// The source text is retained for temporal and text cells so that exports
/// reproduce whatever form the input file used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Date { raw: String, value: NaiveDate },
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Date { raw, .. } => f.write_str(raw),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One named column: inferred type, raw cells, and a numeric view for
/// numeric columns (empty cells become NaN there).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    cells: Vec<String>,
    numeric: Option<Vec<f64>>,
}

impl Column {
    fn new(name: String, cells: Vec<String>) -> Self {
        let ty = infer_type(&cells);
        let numeric = match ty {
            ColumnType::Numeric => Some(
                cells
                    .iter()
                    .map(|c| parse_number(c).unwrap_or(f64::NAN))
                    .collect(),
            ),
            _ => None,
        };
        Self {
            name,
            ty,
            cells,
            numeric,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw cell text at a row index.
    pub fn raw(&self, row: usize) -> Option<&str> {
        self.cells.get(row).map(String::as_str)
    }

    /// Typed view of a cell, driven by the column's inferred type.
    pub fn value(&self, row: usize) -> Option<CellValue> {
        let raw = self.cells.get(row)?;
        Some(match self.ty {
            ColumnType::Numeric => CellValue::Number(parse_number(raw).unwrap_or(f64::NAN)),
            ColumnType::Temporal => match parse_date(raw) {
                Some(value) => CellValue::Date {
                    raw: raw.clone(),
                    value,
                },
                None => CellValue::Text(raw.clone()),
            },
            ColumnType::Text => CellValue::Text(raw.clone()),
        })
    }

    /// Numeric view of the column. `None` unless the column is numeric.
    pub fn numeric_values(&self) -> Option<&[f64]> {
        self.numeric.as_deref()
    }
}

/// Malformed or unreadable upload. The session keeps its previous dataset
/// when this surfaces.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("empty input: no header row found")]
    Empty,

    #[error("malformed CSV: {0}")]
    Malformed(String),
}

/// The loaded table. Immutable once built; a new upload replaces it
/// wholesale. All columns are guaranteed equal length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Parse delimited UTF-8 text with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParseError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| ParseError::Malformed(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ParseError::Empty);
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in rdr.records() {
            let record = record.map_err(|e| ParseError::Malformed(e.to_string()))?;
            for (i, field) in record.iter().enumerate() {
                cells[i].push(field.to_string());
            }
        }

        let rows = cells.first().map_or(0, Vec::len);
        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, col)| Column::new(name, col))
            .collect();

        Ok(Self { columns, rows })
    }

    /// Parse from in-memory bytes (the "file upload" path).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        Self::from_reader(bytes)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

/// Pick the default X column: first all-temporal column, else the first
/// column whose name contains "date" or "index" (case-insensitive), else
/// the first column.
pub fn infer_default_x_column(dataset: &Dataset) -> &str {
    if let Some(col) = dataset
        .columns()
        .iter()
        .find(|c| c.ty == ColumnType::Temporal)
    {
        return &col.name;
    }
    if let Some(col) = dataset.columns().iter().find(|c| {
        let lower = c.name.to_lowercase();
        lower.contains("date") || lower.contains("index")
    }) {
        return &col.name;
    }
    &dataset.columns()[0].name
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Vote a column's type from its non-empty cells. An all-empty column is
/// text.
fn infer_type(cells: &[String]) -> ColumnType {
    let filled: Vec<&str> = cells
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    if filled.is_empty() {
        return ColumnType::Text;
    }
    if filled.iter().all(|c| parse_date(c).is_some()) {
        return ColumnType::Temporal;
    }
    if filled.iter().all(|c| parse_number(c).is_some()) {
        return ColumnType::Numeric;
    }
    ColumnType::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Date,Price,Note\n2024-01-02,100.5,open\n2024-01-03,101.0,\n2024-01-04,99.25,dip\n";

    #[test]
    fn parses_sample_csv() {
        let ds = Dataset::from_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.column_count(), 3);
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.column("Date").unwrap().ty, ColumnType::Temporal);
        assert_eq!(ds.column("Price").unwrap().ty, ColumnType::Numeric);
        assert_eq!(ds.column("Note").unwrap().ty, ColumnType::Text);
    }

    #[test]
    fn numeric_view_handles_empty_cells() {
        let ds = Dataset::from_bytes("v\n1.5\n\n2.5\n".as_bytes()).unwrap();
        let vals = ds.column("v").unwrap().numeric_values().unwrap();
        assert_eq!(vals.len(), 3);
        assert_eq!(vals[0], 1.5);
        assert!(vals[1].is_nan());
        assert_eq!(vals[2], 2.5);
    }

    #[test]
    fn temporal_cell_keeps_source_text() {
        let ds = Dataset::from_bytes("d\n2024/01/02\n".as_bytes()).unwrap();
        let cell = ds.column("d").unwrap().value(0).unwrap();
        assert_eq!(cell.to_string(), "2024/01/02");
        match cell {
            CellValue::Date { value, .. } => {
                assert_eq!(value, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
            }
            other => panic!("expected date cell, got {other:?}"),
        }
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let err = Dataset::from_bytes("a,b\n1,2\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(matches!(
            Dataset::from_bytes(b""),
            Err(ParseError::Empty) | Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn default_x_prefers_temporal_column() {
        let ds = Dataset::from_bytes("Price,When\n1.0,2024-01-02\n".as_bytes()).unwrap();
        assert_eq!(infer_default_x_column(&ds), "When");
    }

    #[test]
    fn default_x_falls_back_to_name_match() {
        let ds = Dataset::from_bytes("Price,TradeDate\n1.0,n/a\n".as_bytes()).unwrap();
        assert_eq!(infer_default_x_column(&ds), "TradeDate");
    }

    #[test]
    fn default_x_falls_back_to_first_column() {
        let ds = Dataset::from_bytes("a,b\n1,x\n".as_bytes()).unwrap();
        assert_eq!(infer_default_x_column(&ds), "a");
    }
}
