//! Loaded and parsed source data
//!
//! [`DataLoader`] owns the memoized sheet cache; [`Dataset`] is the typed
//! view every page is built from.

use crate::config::DashboardConfig;
use crate::error::DashboardResult;
use epi_core::{region_records, RegionRecord, Sheet, TrendTable};
use epi_ingest::{CacheStats, SheetCache};

/// Both source tables, parsed
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Reference-year case table
    pub records: Vec<RegionRecord>,
    /// Multi-year trend table
    pub trend: TrendTable,
}

impl Dataset {
    /// Parse already-loaded sheets
    ///
    /// # Errors
    ///
    /// [`crate::DashboardError::Core`] when a sheet does not match the
    /// configured layout.
    pub fn from_sheets(cases: &Sheet, trend: &Sheet, config: &DashboardConfig) -> DashboardResult<Self> {
        let records = region_records(cases, &config.columns)?;
        let trend = TrendTable::from_sheet(trend, &config.trend.region)?;
        Ok(Self { records, trend })
    }
}

/// Reads the configured source files through a shared cache
#[derive(Debug, Clone)]
pub struct DataLoader {
    cache: SheetCache,
}

impl DataLoader {
    /// Create loader with the configured cache capacity
    #[must_use]
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            cache: SheetCache::new(config.data.cache_capacity),
        }
    }

    /// Create loader over an existing cache
    #[inline]
    #[must_use]
    pub fn with_cache(cache: SheetCache) -> Self {
        Self { cache }
    }

    /// Load and parse both source files
    ///
    /// # Errors
    ///
    /// Any missing or unreadable file, or a sheet that does not match the
    /// configured layout.
    pub fn load(&self, config: &DashboardConfig) -> DashboardResult<Dataset> {
        let _span = tracing::info_span!("load_dataset").entered();
        let cases = self.cache.load(&config.data.cases)?;
        let trend = self.cache.load(&config.data.trend)?;
        Dataset::from_sheets(&cases, &trend, config)
    }

    /// Cache statistics
    #[inline]
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epi_core::CellValue;

    #[test]
    fn from_sheets_parses_both_tables() {
        let cases = Sheet::new(
            ["kabupaten", "kasus_2024", "populasi_2024"],
            vec![vec![CellValue::from("X"), 10i64.into(), 1_000i64.into()]],
        );
        let trend = Sheet::new(
            ["Kabupaten", "2023", "2024"],
            vec![vec![CellValue::from("X"), 8i64.into(), 10i64.into()]],
        );
        let data = Dataset::from_sheets(&cases, &trend, &DashboardConfig::default()).unwrap();
        assert_eq!(data.records.len(), 1);
        assert_eq!(data.trend.long.len(), 2);
    }

    #[test]
    fn missing_files_fail_the_load() {
        let config = DashboardConfig::default().with_data("/nonexistent/a.csv", "/nonexistent/b.csv");
        let err = DataLoader::new(&config).load(&config).unwrap_err();
        assert!(err.is_data_error());
    }
}
