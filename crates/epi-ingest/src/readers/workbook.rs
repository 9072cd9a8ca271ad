//! Workbook reader (first worksheet)

use super::SheetReader;
use crate::error::{IngestError, IngestResult};
use calamine::{open_workbook_auto, Data, Reader};
use epi_core::{CellValue, Sheet};
use std::path::Path;

/// Excel / OpenDocument reader backed by calamine
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookReader;

#[allow(clippy::cast_precision_loss)]
fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Float(n) => CellValue::Number(*n),
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Empty => CellValue::Empty,
        other => CellValue::Text(format!("{other:?}")),
    }
}

impl SheetReader for WorkbookReader {
    fn read(&self, path: &Path) -> IngestResult<Sheet> {
        let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::workbook(path, e))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| IngestError::workbook(path, "workbook has no worksheets"))?
            .map_err(|e| IngestError::workbook(path, e))?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or_else(|| IngestError::MissingHeader {
                path: path.to_path_buf(),
            })?
            .iter()
            .map(|d| to_cell(d).to_string())
            .collect();

        let rows = rows
            .map(|row| row.iter().map(to_cell).collect())
            .filter(|row: &Vec<CellValue>| !row.iter().all(CellValue::is_empty))
            .collect();
        Ok(Sheet::new(headers, rows))
    }

    fn extensions(&self) -> &[&str] {
        &["xlsx", "xlsm", "xlsb", "xls", "ods"]
    }
}
