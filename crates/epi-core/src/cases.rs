//! Reference case table
//!
//! Builds [`RegionRecord`]s from the per-region case/population sheet.

use crate::error::{CoreError, CoreResult};
use crate::header::HeaderPolicy;
use crate::types::{RegionRecord, Sheet};
use serde::{Deserialize, Serialize};

/// Column layout of the case/population sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseColumns {
    /// Accepted spellings of the region column
    pub region: HeaderPolicy,
    /// Exact header of the case count column
    pub cases: String,
    /// Exact header of the population column
    pub population: String,
}

impl Default for CaseColumns {
    fn default() -> Self {
        Self {
            region: HeaderPolicy::case_region(),
            cases: "kasus_2024".to_string(),
            population: "populasi_2024".to_string(),
        }
    }
}

/// Parse the case/population sheet
///
/// Rows with a blank region cell are skipped. Every remaining row must carry
/// whole, non-negative case and population counts.
///
/// # Errors
///
/// - [`CoreError::UnresolvedHeader`] when no region alias matches
/// - [`CoreError::MissingColumn`] when the case or population column is absent
/// - [`CoreError::InvalidCell`] for a non-count value
pub fn region_records(sheet: &Sheet, columns: &CaseColumns) -> CoreResult<Vec<RegionRecord>> {
    let region_idx = columns.region.resolve_in(sheet)?;
    let cases_idx = sheet
        .column_index(&columns.cases)
        .ok_or_else(|| CoreError::MissingColumn(columns.cases.clone()))?;
    let population_idx = sheet
        .column_index(&columns.population)
        .ok_or_else(|| CoreError::MissingColumn(columns.population.clone()))?;

    let mut records = Vec::with_capacity(sheet.row_count());
    for row in 0..sheet.row_count() {
        let Some(region) = sheet.cell(row, region_idx).as_label() else {
            tracing::warn!(row = row + 1, "skipping case row without region");
            continue;
        };
        let count = |idx: usize, name: &str| {
            let cell = sheet.cell(row, idx);
            cell.as_count()
                .ok_or_else(|| CoreError::invalid_cell(row + 1, name, cell.to_string()))
        };
        let cases = count(cases_idx, columns.cases.as_str())?;
        let population = count(population_idx, columns.population.as_str())?;
        records.push(RegionRecord::new(region, cases, population));
    }

    tracing::debug!(regions = records.len(), "parsed case table");
    Ok(records)
}
