//! epidash ingestion layer
//!
//! The only place source files are read. Callers ask a [`SheetCache`] for a
//! path and receive a shared, immutable [`epi_core::Sheet`]; the statistics
//! transform never touches the filesystem.
//!
//! ```text
//! File System → ReaderRegistry (csv | calamine) → Sheet → SheetCache (moka)
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod error;
pub mod readers;

pub use cache::{CacheStats, SheetCache};
pub use error::{IngestError, IngestResult};
pub use readers::{default_readers, CsvReader, ReaderRegistry, SheetReader, WorkbookReader};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
