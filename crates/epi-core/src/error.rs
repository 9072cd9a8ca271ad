//! Error types for the statistics transform
//!
//! Covers:
//! - Header resolution against the accepted alias lists
//! - Invalid cells in the reference case table
//! - Association metrics over degenerate 2×2 tables

/// Errors raised while turning loaded sheets into typed tables
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// None of the accepted header spellings is present
    #[error("no column matches any of {aliases:?} (headers: {headers:?})")]
    UnresolvedHeader {
        /// Accepted spellings, in priority order
        aliases: Vec<String>,
        /// Headers actually present in the sheet
        headers: Vec<String>,
    },

    /// A required column is absent
    #[error("missing column: '{0}'")]
    MissingColumn(String),

    /// No header carries the requested year
    #[error("no column for year {0}")]
    MissingYearColumn(u16),

    /// A cell in the reference table is not a non-negative whole number
    #[error("invalid value in row {row}, column '{column}': {value}")]
    InvalidCell {
        /// 1-based data row (header excluded)
        row: usize,
        /// Column header
        column: String,
        /// Rendered cell content
        value: String,
    },

    /// Histogram requested with zero buckets
    #[error("histogram needs at least one bin")]
    ZeroBins,

    /// Association metric could not be computed
    #[error("association error: {0}")]
    Association(#[from] AssociationError),
}

impl CoreError {
    /// Create unresolved-header error from alias and header lists
    pub fn unresolved_header<A, H>(aliases: A, headers: H) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        H: IntoIterator,
        H::Item: Into<String>,
    {
        Self::UnresolvedHeader {
            aliases: aliases.into_iter().map(Into::into).collect(),
            headers: headers.into_iter().map(Into::into).collect(),
        }
    }

    /// Create invalid-cell error
    pub fn invalid_cell(row: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidCell {
            row,
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Errors from prevalence ratio / odds ratio computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AssociationError {
    /// A denominator term of the named metric is zero
    #[error("{metric} is undefined: {term} is zero")]
    ZeroDenominator {
        /// Metric name ("PR" or "POR")
        metric: &'static str,
        /// Offending term, e.g. "a+b"
        term: &'static str,
    },
}

/// Result type alias for transform operations
pub type CoreResult<T> = Result<T, CoreError>;
