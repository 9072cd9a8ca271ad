//! Sheet readers for different file formats
//!
//! Reads external spreadsheet files into a raw [`Sheet`]:
//! - Delimited text (CSV) via the `csv` crate
//! - Workbooks (xlsx, xlsm, xlsb, xls, ods) via `calamine`, first worksheet

use crate::error::{IngestError, IngestResult};
use epi_core::Sheet;
use std::path::Path;

mod delimited;
mod workbook;

pub use delimited::CsvReader;
pub use workbook::WorkbookReader;

/// Reader trait for turning a file into a [`Sheet`]
///
/// Implement this trait to add support for new file formats.
pub trait SheetReader: Send + Sync + 'static {
    /// Read the whole file; the first row is the header row
    ///
    /// # Errors
    ///
    /// Format-specific [`IngestError`] on unreadable input.
    fn read(&self, path: &Path) -> IngestResult<Sheet>;

    /// Supported file extensions (without dot, lowercase)
    fn extensions(&self) -> &[&str];

    /// Check if this reader can handle the given path
    fn can_read(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions().contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }
}

/// Reader lookup by file extension
pub struct ReaderRegistry {
    readers: Vec<Box<dyn SheetReader>>,
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        default_readers()
    }
}

impl std::fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderRegistry")
            .field("reader_count", &self.readers.len())
            .field("extensions", &self.all_extensions())
            .finish()
    }
}

impl ReaderRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
        }
    }

    /// Register a reader; later registrations take precedence
    pub fn register<R: SheetReader>(&mut self, reader: R) {
        self.readers.insert(0, Box::new(reader));
    }

    /// Find reader for path
    #[must_use]
    pub fn find_for_path(&self, path: &Path) -> Option<&dyn SheetReader> {
        self.readers.iter().find(|r| r.can_read(path)).map(|r| &**r)
    }

    /// Read path with the matching reader
    ///
    /// # Errors
    ///
    /// [`IngestError::UnsupportedFormat`] when no reader matches, otherwise
    /// whatever the reader reports.
    pub fn read(&self, path: &Path) -> IngestResult<Sheet> {
        let reader = self
            .find_for_path(path)
            .ok_or_else(|| IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        reader.read(path)
    }

    /// Get all registered extensions
    #[must_use]
    pub fn all_extensions(&self) -> Vec<&str> {
        self.readers
            .iter()
            .flat_map(|r| r.extensions())
            .copied()
            .collect()
    }
}

/// Create registry with the built-in readers
#[must_use]
pub fn default_readers() -> ReaderRegistry {
    let mut registry = ReaderRegistry::new();
    registry.register(CsvReader::default());
    registry.register(WorkbookReader);
    registry
}
