//! Delimited text reader

use super::SheetReader;
use crate::error::{IngestError, IngestResult};
use epi_core::{CellValue, Sheet};
use std::fs::File;
use std::path::Path;

/// CSV reader; numeric-looking fields become numbers
#[derive(Debug, Clone, Copy)]
pub struct CsvReader {
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvReader {
    /// Reader with a custom field delimiter
    #[inline]
    #[must_use]
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Parse CSV from any reader
    ///
    /// # Errors
    ///
    /// [`IngestError::Csv`] on malformed input, [`IngestError::MissingHeader`]
    /// when the input is empty.
    pub fn read_from<R: std::io::Read>(&self, input: R, path: &Path) -> IngestResult<Sheet> {
        let csv_err = |source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.iter().all(String::is_empty) {
            return Err(IngestError::MissingHeader {
                path: path.to_path_buf(),
            });
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            rows.push(record.iter().map(parse_field).collect());
        }
        Ok(Sheet::new(headers, rows))
    }
}

fn parse_field(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else if let Ok(n) = field.parse::<f64>() {
        CellValue::Number(n)
    } else {
        CellValue::Text(field.to_string())
    }
}

impl SheetReader for CsvReader {
    fn read(&self, path: &Path) -> IngestResult<Sheet> {
        let file = File::open(path).map_err(|e| IngestError::io_error(path, e))?;
        self.read_from(file, path)
    }

    fn extensions(&self) -> &[&str] {
        &["csv"]
    }
}
