//! Error types for spreadsheet ingestion

use std::path::PathBuf;
use std::sync::Arc;

/// Errors while reading a source file
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// No reader registered for the file extension
    #[error("unsupported file type: {}", path.display())]
    UnsupportedFormat {
        /// Offending path
        path: PathBuf,
    },

    /// IO error opening or reading the file
    #[error("io error reading {}: {source}", path.display())]
    Io {
        /// Source path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV
    #[error("csv error in {}: {source}", path.display())]
    Csv {
        /// Source path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: csv::Error,
    },

    /// Workbook could not be opened or decoded
    #[error("workbook error in {}: {message}", path.display())]
    Workbook {
        /// Source path
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// File contains no header row
    #[error("no header row in {}", path.display())]
    MissingHeader {
        /// Source path
        path: PathBuf,
    },

    /// Failure of a read that several concurrent loads waited on
    #[error(transparent)]
    Shared(Arc<IngestError>),
}

impl IngestError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create workbook error for path
    pub fn workbook(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::Workbook {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Path of the file that failed
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::UnsupportedFormat { path }
            | Self::Io { path, .. }
            | Self::Csv { path, .. }
            | Self::Workbook { path, .. }
            | Self::MissingHeader { path } => path,
            Self::Shared(inner) => inner.path(),
        }
    }

    /// The underlying error, looking through [`IngestError::Shared`]
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Shared(inner) => inner.root(),
            other => other,
        }
    }
}

impl From<Arc<IngestError>> for IngestError {
    /// Take the error back out of the `Arc` when no other caller holds it
    fn from(shared: Arc<IngestError>) -> Self {
        Arc::try_unwrap(shared).unwrap_or_else(Self::Shared)
    }
}

/// Result type alias for ingestion
pub type IngestResult<T> = Result<T, IngestError>;
