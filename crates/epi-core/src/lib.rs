//! epidash core - statistics transform
//!
//! Turns two loaded spreadsheets into the tables a dashboard displays:
//!
//! - **Case table** (one year): prevalence per 100k per region, provincial
//!   prevalence, top-N ranking, summary statistics, histogram
//! - **Trend table** (many years): long-format records, yearly totals,
//!   percent change between two years
//! - **Association**: prevalence ratio and odds ratio of a 2×2 table
//!
//! # Architecture
//!
//! ```text
//! Sheet (cases) ─→ region_records ─→ prevalence / ranking
//! Sheet (trend) ─→ TrendTable ─────→ yearly_totals / change_ranking
//! AssociationTable ───────────────→ metrics
//! ```
//!
//! Every function is pure: the same input produces the same output and
//! nothing is cached or mutated here.
//!
//! # Example
//!
//! ```rust
//! use epi_core::{HeaderPolicy, Sheet, TrendTable};
//!
//! let sheet = Sheet::new(
//!     ["kabupaten", "Tahun 2022", "Tahun 2024"],
//!     vec![vec!["X".into(), 10i64.into(), 30i64.into()]],
//! );
//! let trend = TrendTable::from_sheet(&sheet, &HeaderPolicy::trend_region()).unwrap();
//! let ranking = epi_core::change_ranking(&trend, 2022, 2024).unwrap();
//! assert_eq!(ranking[0].percent, Some(200.0));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod association;
pub mod cases;
pub mod change;
pub mod error;
pub mod header;
pub mod prevalence;
pub mod ranking;
pub mod trend;
pub mod types;

pub use association::{
    AssociationMetrics, AssociationTable, ExposureLevel, PROVINCIAL_DENSITY_TABLE,
};
pub use cases::{region_records, CaseColumns};
pub use change::{change_ranking, percent_change, ChangeRow};
pub use error::{AssociationError, CoreError, CoreResult};
pub use header::{extract_year, year_columns, HeaderPolicy};
pub use prevalence::{
    per_100k, prevalence_table, provincial_prevalence, PrevalenceRow, ProvincialPrevalence,
};
pub use ranking::{by_cases_desc, case_histogram, top_n, CaseSummary, HistogramBin};
pub use trend::{unpivot, yearly_totals, TrendTable, YearTotal};
pub use types::{CellValue, RegionRecord, Sheet, TrendLongRecord, TrendWideRow, YearColumn};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the statistics transform
    pub use crate::{
        AssociationTable, CaseColumns, CoreError, HeaderPolicy, RegionRecord, Sheet, TrendTable,
    };
}
