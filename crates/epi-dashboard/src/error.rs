//! Error types for the dashboard

use epi_core::CoreError;
use epi_ingest::IngestError;
use std::path::PathBuf;

/// Main dashboard error type
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Configuration file unreadable
    #[error("cannot read configuration {}: {source}", path.display())]
    ConfigIo {
        /// Configuration path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration did not parse
    #[error("configuration error: {0}")]
    Config(String),

    /// Source data could not be loaded
    #[error("data load failed: {0}")]
    Ingest(#[from] IngestError),

    /// Source data did not fit the expected layout
    #[error("data error: {0}")]
    Core(#[from] CoreError),

    /// No page with that name
    #[error("unknown page '{0}' (expected one of: home, disease, epidemiology, trend, about)")]
    UnknownPage(String),

    /// JSON rendering failed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    /// Create configuration error
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if the error comes from the source files rather than the caller
    #[inline]
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::Ingest(_) | Self::Core(_))
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
