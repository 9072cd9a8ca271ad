//! Prevalence per 100 000 inhabitants
//!
//! Regional prevalence is computed row by row; the provincial figure is the
//! ratio of summed cases to summed population, never the mean of the
//! regional rates.

use crate::types::RegionRecord;
use serde::{Deserialize, Serialize};

/// Scale factor for "per 100 000" rates
pub const PER_100K: f64 = 100_000.0;

/// `cases / population × 100 000`; `None` when population is zero
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn per_100k(cases: u64, population: u64) -> Option<f64> {
    (population > 0).then(|| cases as f64 / population as f64 * PER_100K)
}

/// A region with its derived prevalence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrevalenceRow {
    /// Regency or city name
    pub region: String,
    /// Reported cases
    pub cases: u64,
    /// Population
    pub population: u64,
    /// Cases per 100 000; `None` when population is zero
    pub per_100k: Option<f64>,
}

impl From<&RegionRecord> for PrevalenceRow {
    fn from(record: &RegionRecord) -> Self {
        Self {
            region: record.region.clone(),
            cases: record.cases,
            population: record.population,
            per_100k: record.prevalence_per_100k(),
        }
    }
}

/// Province-wide prevalence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProvincialPrevalence {
    /// Sum of cases over all regions
    pub total_cases: u128,
    /// Sum of population over all regions
    pub total_population: u128,
    /// `total_cases / total_population`
    pub ratio: Option<f64>,
    /// Ratio × 100 000
    pub per_100k: Option<f64>,
    /// Ratio × 100
    pub percent: Option<f64>,
}

/// Prevalence row for every record, in input order
#[must_use]
pub fn prevalence_table(records: &[RegionRecord]) -> Vec<PrevalenceRow> {
    let rows: Vec<PrevalenceRow> = records.iter().map(PrevalenceRow::from).collect();
    let undefined = rows.iter().filter(|r| r.per_100k.is_none()).count();
    if undefined > 0 {
        tracing::warn!(undefined, "regions with zero population have no prevalence");
    }
    rows
}

/// Aggregate prevalence over all records
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn provincial_prevalence(records: &[RegionRecord]) -> ProvincialPrevalence {
    let total_cases: u128 = records.iter().map(|r| u128::from(r.cases)).sum();
    let total_population: u128 = records.iter().map(|r| u128::from(r.population)).sum();
    let ratio = (total_population > 0).then(|| total_cases as f64 / total_population as f64);

    ProvincialPrevalence {
        total_cases,
        total_population,
        ratio,
        per_100k: ratio.map(|r| r * PER_100K),
        percent: ratio.map(|r| r * 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_100k_exact() {
        assert_eq!(per_100k(50, 1_000_000), Some(5.0));
        assert_eq!(per_100k(0, 10), Some(0.0));
        assert_eq!(per_100k(3, 0), None);
    }

    #[test]
    fn provincial_is_ratio_of_sums() {
        let records = vec![
            RegionRecord::new("A", 10, 1_000),
            RegionRecord::new("B", 10, 100_000),
        ];
        let p = provincial_prevalence(&records);

        let expected = 20.0 / 101_000.0 * PER_100K;
        assert!((p.per_100k.unwrap() - expected).abs() < 1e-9);

        let mean_of_rates = (1000.0 + 10.0) / 2.0;
        assert!((p.per_100k.unwrap() - mean_of_rates).abs() > 1.0);
        assert!((p.percent.unwrap() - expected / 1000.0).abs() < 1e-12);
    }

    #[test]
    fn provincial_empty_is_undefined() {
        let p = provincial_prevalence(&[]);
        assert_eq!(p.total_cases, 0);
        assert_eq!(p.ratio, None);
        assert_eq!(p.per_100k, None);
        assert_eq!(p.percent, None);
    }

    #[test]
    fn provincial_sums_past_u64() {
        let half = u64::MAX / 2 + 1;
        let records = vec![RegionRecord::new("A", half, half), RegionRecord::new("B", half, half)];
        let p = provincial_prevalence(&records);
        assert_eq!(p.total_cases, u128::from(u64::MAX) + 1);
        assert_eq!(p.total_population, p.total_cases);
        assert_eq!(p.ratio, Some(1.0));
        assert_eq!(p.per_100k, Some(PER_100K));
    }

    #[test]
    fn table_keeps_order_and_flags_zero_population() {
        let records = vec![
            RegionRecord::new("A", 5, 0),
            RegionRecord::new("B", 1, 100_000),
        ];
        let table = prevalence_table(&records);
        assert_eq!(table[0].region, "A");
        assert_eq!(table[0].per_100k, None);
        assert_eq!(table[1].per_100k, Some(1.0));
    }
}
