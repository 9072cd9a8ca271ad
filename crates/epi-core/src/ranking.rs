//! Ranking and descriptive statistics over the reference case table

use crate::error::{CoreError, CoreResult};
use crate::types::RegionRecord;
use serde::{Deserialize, Serialize};

/// Default size of the "highest case count" table
pub const DEFAULT_TOP_N: usize = 10;

/// Default bucket count of the case histogram
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Records ordered by descending case count
///
/// The sort is stable: equal counts keep their input order.
#[must_use]
pub fn by_cases_desc(records: &[RegionRecord]) -> Vec<RegionRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.cases.cmp(&a.cases));
    sorted
}

/// The `n` records with the most cases, ties in input order
#[must_use]
pub fn top_n(records: &[RegionRecord], n: usize) -> Vec<RegionRecord> {
    let mut ranked = by_cases_desc(records);
    ranked.truncate(n);
    ranked
}

/// Descriptive statistics of regional case counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    /// Number of regions
    pub regions: usize,
    /// Sum of cases
    pub total: u128,
    /// Arithmetic mean
    pub mean: f64,
    /// Median (mean of the two middle values for even counts)
    pub median: f64,
    /// Smallest regional count
    pub min: u64,
    /// Largest regional count
    pub max: u64,
}

impl CaseSummary {
    /// Summarise case counts; `None` for an empty table
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(records: &[RegionRecord]) -> Option<Self> {
        let mut counts: Vec<u64> = records.iter().map(|r| r.cases).collect();
        counts.sort_unstable();
        let (&min, &max) = (counts.first()?, counts.last()?);

        let total: u128 = counts.iter().copied().map(u128::from).sum();
        let mid = counts.len() / 2;
        let median = if counts.len() % 2 == 0 {
            (counts[mid - 1] as f64 + counts[mid] as f64) / 2.0
        } else {
            counts[mid] as f64
        };

        Some(Self {
            regions: counts.len(),
            total,
            mean: total as f64 / counts.len() as f64,
            median,
            min,
            max,
        })
    }
}

/// One histogram bucket `[lower, upper)`; the last bucket includes `upper`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub lower: f64,
    /// Upper edge
    pub upper: f64,
    /// Regions falling in the bucket
    pub count: usize,
}

/// Equal-width histogram of case counts between min and max
///
/// # Errors
///
/// [`CoreError::ZeroBins`] when `bins` is zero.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn case_histogram(records: &[RegionRecord], bins: usize) -> CoreResult<Vec<HistogramBin>> {
    if bins == 0 {
        return Err(CoreError::ZeroBins);
    }
    let Some(summary) = CaseSummary::compute(records) else {
        return Ok(Vec::new());
    };

    let (lo, hi) = (summary.min as f64, summary.max as f64);
    if summary.min == summary.max {
        return Ok(vec![HistogramBin {
            lower: lo,
            upper: hi,
            count: records.len(),
        }]);
    }

    let width = (hi - lo) / bins as f64;
    let mut buckets: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for record in records {
        let idx = (((record.cases as f64 - lo) / width) as usize).min(bins - 1);
        buckets[idx].count += 1;
    }
    Ok(buckets)
}
