//! Multi-year case trend
//!
//! The trend sheet is wide: one row per region, one column per year. This
//! module reshapes it into long (region, year, cases) records and aggregates
//! them per year.
//!
//! Missing or non-numeric cells become `None` in the long table and are
//! excluded from yearly sums.

use crate::error::CoreResult;
use crate::header::{year_columns, HeaderPolicy};
use crate::types::{Sheet, TrendLongRecord, TrendWideRow, YearColumn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed trend sheet in both shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendTable {
    /// Year-bearing columns, in sheet order
    pub year_columns: Vec<YearColumn>,
    /// One row per region, in sheet order
    pub wide: Vec<TrendWideRow>,
    /// One record per (region, year column), sorted by region then year
    pub long: Vec<TrendLongRecord>,
}

impl TrendTable {
    /// Parse the wide trend sheet
    ///
    /// # Errors
    ///
    /// [`crate::CoreError::UnresolvedHeader`] when the region column cannot
    /// be resolved with `policy`.
    pub fn from_sheet(sheet: &Sheet, policy: &HeaderPolicy) -> CoreResult<Self> {
        let (year_columns, wide) = wide_rows(sheet, policy)?;
        let long = unpivot(&wide);
        Ok(Self {
            year_columns,
            wide,
            long,
        })
    }

    /// Distinct years, ascending
    #[must_use]
    pub fn years(&self) -> Vec<u16> {
        let mut years: Vec<u16> = self.year_columns.iter().map(|c| c.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Region names in sheet order, without duplicates
    #[must_use]
    pub fn regions(&self) -> Vec<String> {
        let mut seen = Vec::<String>::new();
        for row in &self.wide {
            if !seen.contains(&row.region) {
                seen.push(row.region.clone());
            }
        }
        seen
    }

    /// Long records of a single region; empty for an unknown region
    #[must_use]
    pub fn for_region(&self, region: &str) -> Vec<TrendLongRecord> {
        self.long
            .iter()
            .filter(|r| r.region == region)
            .cloned()
            .collect()
    }

    /// Province-wide totals per year
    #[must_use]
    pub fn yearly_totals(&self) -> Vec<YearTotal> {
        yearly_totals(&self.long)
    }
}

/// Read the wide rows of a trend sheet
///
/// Rows with a blank region cell are skipped.
///
/// # Errors
///
/// [`crate::CoreError::UnresolvedHeader`] when no region alias matches.
pub fn wide_rows(
    sheet: &Sheet,
    policy: &HeaderPolicy,
) -> CoreResult<(Vec<YearColumn>, Vec<TrendWideRow>)> {
    let region_idx = policy.resolve_in(sheet)?;
    let columns = year_columns(&sheet.headers, &[region_idx]);
    if columns.is_empty() {
        tracing::warn!(headers = ?sheet.headers, "trend sheet has no year columns");
    }

    let mut rows = Vec::with_capacity(sheet.row_count());
    for row in 0..sheet.row_count() {
        let Some(region) = sheet.cell(row, region_idx).as_label() else {
            tracing::warn!(row = row + 1, "skipping trend row without region");
            continue;
        };
        let values = columns
            .iter()
            .map(|col| {
                let cell = sheet.cell(row, col.index);
                let count = cell.as_count();
                if count.is_none() && !cell.is_empty() {
                    tracing::debug!(%region, column = %col.header, value = %cell, "non-numeric trend cell");
                }
                (col.year, count)
            })
            .collect();
        rows.push(TrendWideRow { region, values });
    }

    tracing::debug!(
        regions = rows.len(),
        years = columns.len(),
        "parsed trend table"
    );
    Ok((columns, rows))
}

/// Reshape wide rows into long records sorted by (region, year)
///
/// The sort is stable, so duplicate (region, year) pairs keep column order.
#[must_use]
pub fn unpivot(wide: &[TrendWideRow]) -> Vec<TrendLongRecord> {
    let mut long: Vec<TrendLongRecord> = wide
        .iter()
        .flat_map(|row| {
            row.values.iter().map(move |&(year, cases)| TrendLongRecord {
                region: row.region.clone(),
                year,
                cases,
            })
        })
        .collect();
    long.sort_by(|a, b| a.region.cmp(&b.region).then(a.year.cmp(&b.year)));
    long
}

/// Province-wide case total for one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTotal {
    /// Year
    pub year: u16,
    /// Sum of reported cases; missing values excluded
    pub cases: u128,
    /// Records with a reported value
    pub reported: usize,
    /// Records with a missing value
    pub missing: usize,
}

/// Sum cases per year, ascending by year
///
/// Missing values are excluded from the sum and counted separately; a year
/// with only missing values totals zero.
#[must_use]
pub fn yearly_totals(long: &[TrendLongRecord]) -> Vec<YearTotal> {
    let mut by_year: BTreeMap<u16, YearTotal> = BTreeMap::new();
    for record in long {
        let entry = by_year.entry(record.year).or_insert(YearTotal {
            year: record.year,
            cases: 0,
            reported: 0,
            missing: 0,
        });
        match record.cases {
            Some(n) => {
                entry.cases += u128::from(n);
                entry.reported += 1;
            }
            None => entry.missing += 1,
        }
    }
    by_year.into_values().collect()
}
