//! Generic tabular data: headers, typed cells, CSV export and HTML rendering.
//!
//! A [`Table`] is an ordered list of [`Header`]s (`key` + `label`) and an
//! ordered list of [`TableRow`]s mapping keys to [`CellValue`]s. Typed rows
//! implement [`TableRecord`] so their keys always agree with their headers.

use crate::error::TableError;
use crate::number::format_number;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

/// Column header: lookup key and display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Field key used to look up cells
    pub key: String,
    /// Display label
    pub label: String,
}

impl Header {
    /// Create a new header.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// A cell value in the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Text value
    Text(String),
    /// Numeric value (may be `NaN`)
    Number(f64),
    /// Absent value
    Empty,
}

impl CellValue {
    /// Get display text for the cell.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Empty => String::new(),
        }
    }

    /// Numeric value, if any.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// A row of data in the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cell values by header key
    pub cells: HashMap<String, CellValue>,
}

impl TableRow {
    /// Create a new empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell value.
    #[must_use]
    pub fn cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    /// Get a cell value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    /// Display text for a key; missing cells display as empty.
    #[must_use]
    pub fn display(&self, key: &str) -> String {
        self.get(key).map(CellValue::display).unwrap_or_default()
    }
}

/// A typed row that knows its own column layout.
pub trait TableRecord {
    /// Headers in display order.
    fn headers() -> Vec<Header>;

    /// Convert to a keyed row.
    fn to_row(&self) -> TableRow;
}

/// Headers plus rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Headers in display order
    pub headers: Vec<Header>,
    /// Rows in display order
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a table from raw headers and rows.
    #[must_use]
    pub const fn new(headers: Vec<Header>, rows: Vec<TableRow>) -> Self {
        Self { headers, rows }
    }

    /// Create a table from typed records.
    #[must_use]
    pub fn from_records<R: TableRecord>(records: &[R]) -> Self {
        Self {
            headers: R::headers(),
            rows: records.iter().map(TableRecord::to_row).collect(),
        }
    }

    /// Check that header keys are unique and every row key is declared.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut keys = HashSet::with_capacity(self.headers.len());
        for header in &self.headers {
            if !keys.insert(header.key.as_str()) {
                return Err(TableError::DuplicateHeader(header.key.clone()));
            }
        }

        for (index, row) in self.rows.iter().enumerate() {
            let mut row_keys: Vec<&String> = row.cells.keys().collect();
            row_keys.sort();
            if let Some(key) = row_keys.into_iter().find(|k| !keys.contains(k.as_str())) {
                return Err(TableError::UndeclaredKey {
                    row: index,
                    key: key.clone(),
                });
            }
        }

        Ok(())
    }

    /// Render as delimited text.
    #[must_use]
    pub fn to_csv(&self, delimiter: &str) -> String {
        export_csv(&self.headers, &self.rows, delimiter)
    }

    /// Render as an HTML table with escaped cell text.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<table class="areakit-table"><thead><tr>"#);
        for header in &self.headers {
            let _ = write!(html, "<th>{}</th>", escape_html(&header.label));
        }
        html.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            html.push_str("<tr>");
            for header in &self.headers {
                let _ = write!(html, "<td>{}</td>", escape_html(&row.display(&header.key)));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        html
    }
}

/// Export headers and rows as delimited text.
///
/// The first line holds the header labels; each following line holds the
/// row's values in header order. Cells are written verbatim: values that
/// contain the delimiter or a newline are not quoted.
// TODO: quote cells containing the delimiter, a quote or a newline.
#[must_use]
pub fn export_csv(headers: &[Header], rows: &[TableRow], delimiter: &str) -> String {
    let header_line = headers
        .iter()
        .map(|h| h.label.as_str())
        .collect::<Vec<_>>()
        .join(delimiter);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header_line);
    for row in rows {
        lines.push(
            headers
                .iter()
                .map(|h| row.display(&h.key))
                .collect::<Vec<_>>()
                .join(delimiter),
        );
    }
    lines.join("\n")
}

/// Escape text for inclusion in HTML element content or attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
