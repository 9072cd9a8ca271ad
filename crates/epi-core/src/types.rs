//! Core table types
//!
//! `Sheet` is the raw table as read from a spreadsheet; the remaining types
//! are the typed rows the transform produces from it.

use serde::{Deserialize, Serialize};
use std::fmt;

static EMPTY: CellValue = CellValue::Empty;

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Numeric cell (integers are widened to f64)
    Number(f64),
    /// Text cell, stored as read
    Text(String),
    /// Blank cell
    Empty,
}

impl CellValue {
    /// Interpret as a non-negative whole count
    ///
    /// Numeric text is accepted (`" 42 "`), anything else yields `None`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn as_count(&self) -> Option<u64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Empty => return None,
        };
        let in_range = n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64;
        in_range.then(|| n as u64)
    }

    /// Interpret as a trimmed, non-empty label
    #[must_use]
    pub fn as_label(&self) -> Option<String> {
        match self {
            Self::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Self::Number(_) => Some(self.to_string()),
            Self::Empty => None,
        }
    }

    /// Check for a blank cell
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for CellValue {
    #[allow(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Empty => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
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

/// Raw tabular data: one header row plus data rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Column headers, trimmed
    pub headers: Vec<String>,
    /// Data rows; rows may be shorter than `headers`
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create sheet, trimming every header
    #[must_use]
    pub fn new<H: Into<String>>(headers: impl IntoIterator<Item = H>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            headers: headers
                .into_iter()
                .map(|h| h.into().trim().to_string())
                .collect(),
            rows,
        }
    }

    /// Index of the column with exactly this header
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at (row, column); missing trailing cells read as empty
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    /// Number of data rows
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// One region of the reference case table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    /// Regency or city name
    pub region: String,
    /// Reported cases in the reference year
    pub cases: u64,
    /// Population in the reference year
    pub population: u64,
}

impl RegionRecord {
    /// Create record
    #[inline]
    #[must_use]
    pub fn new(region: impl Into<String>, cases: u64, population: u64) -> Self {
        Self {
            region: region.into(),
            cases,
            population,
        }
    }

    /// Cases per 100 000 inhabitants; `None` when population is zero
    #[inline]
    #[must_use]
    pub fn prevalence_per_100k(&self) -> Option<f64> {
        crate::prevalence::per_100k(self.cases, self.population)
    }
}

/// A header recognised as carrying a year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearColumn {
    /// Position in the sheet
    pub index: usize,
    /// Header as written, e.g. "Tahun 2023"
    pub header: String,
    /// Extracted year
    pub year: u16,
}

/// One region of the wide trend table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendWideRow {
    /// Regency or city name
    pub region: String,
    /// Year → parsed count, in column order
    pub values: Vec<(u16, Option<u64>)>,
}

impl TrendWideRow {
    /// Count for the first column carrying `year`
    #[must_use]
    pub fn value_for(&self, year: u16) -> Option<u64> {
        self.values
            .iter()
            .find(|(y, _)| *y == year)
            .and_then(|(_, v)| *v)
    }
}

/// One (region, year) observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendLongRecord {
    /// Regency or city name
    pub region: String,
    /// Observation year
    pub year: u16,
    /// Case count; `None` when the source cell was not a count
    pub cases: Option<u64>,
}
