//! Percentage change of regional case counts between two years

use crate::error::{CoreError, CoreResult};
use crate::trend::TrendTable;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// `(end − start) / start × 100`; `None` without a positive baseline
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent_change(start: Option<u64>, end: Option<u64>) -> Option<f64> {
    match (start, end) {
        (Some(s), Some(e)) if s > 0 => Some((e as f64 - s as f64) / s as f64 * 100.0),
        _ => None,
    }
}

/// One row of the percent-change ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRow {
    /// Regency or city name
    pub region: String,
    /// Every year of the trend table with its count, ascending by year
    pub series: Vec<(u16, Option<u64>)>,
    /// Count in the start year
    pub start: Option<u64>,
    /// Count in the end year
    pub end: Option<u64>,
    /// Percent change; `None` means "no baseline"
    pub percent: Option<f64>,
}

/// Percent change per region, descending
///
/// Rows without a baseline sort after all defined rows; equal values keep
/// sheet order.
///
/// # Errors
///
/// [`CoreError::MissingYearColumn`] when the trend table has no column for
/// `start_year` or `end_year`.
pub fn change_ranking(
    table: &TrendTable,
    start_year: u16,
    end_year: u16,
) -> CoreResult<Vec<ChangeRow>> {
    for year in [start_year, end_year] {
        if !table.year_columns.iter().any(|c| c.year == year) {
            return Err(CoreError::MissingYearColumn(year));
        }
    }
    let years = table.years();

    let mut rows: Vec<ChangeRow> = table
        .wide
        .iter()
        .map(|row| {
            let start = row.value_for(start_year);
            let end = row.value_for(end_year);
            ChangeRow {
                region: row.region.clone(),
                series: years.iter().map(|&y| (y, row.value_for(y))).collect(),
                start,
                end,
                percent: percent_change(start, end),
            }
        })
        .collect();

    rows.sort_by(|a, b| descending_none_last(a.percent, b.percent));

    let undefined = rows.iter().filter(|r| r.percent.is_none()).count();
    tracing::debug!(regions = rows.len(), undefined, start_year, end_year, "ranked percent change");
    Ok(rows)
}

fn descending_none_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HeaderPolicy;
    use crate::types::{CellValue, Sheet};

    fn table(rows: Vec<Vec<CellValue>>) -> TrendTable {
        let sheet = Sheet::new(["kabupaten", "Tahun 2022", "Tahun 2023", "Tahun 2024"], rows);
        TrendTable::from_sheet(&sheet, &HeaderPolicy::trend_region()).unwrap()
    }

    #[test]
    fn percent_change_values() {
        assert_eq!(percent_change(Some(10), Some(30)), Some(200.0));
        assert_eq!(percent_change(Some(10), Some(5)), Some(-50.0));
        assert_eq!(percent_change(Some(0), Some(30)), None);
        assert_eq!(percent_change(None, Some(30)), None);
        assert_eq!(percent_change(Some(10), None), None);
    }

    #[test]
    fn ranking_descending_with_undefined_last() {
        let t = table(vec![
            vec!["Zero".into(), 0i64.into(), 1i64.into(), 5i64.into()],
            vec!["Down".into(), 10i64.into(), 8i64.into(), 5i64.into()],
            vec!["Up".into(), 10i64.into(), 20i64.into(), 30i64.into()],
            vec!["Gap".into(), "?".into(), 1i64.into(), 5i64.into()],
            vec!["Flat".into(), 10i64.into(), 10i64.into(), 10i64.into()],
        ]);
        let ranking = change_ranking(&t, 2022, 2024).unwrap();
        let order: Vec<&str> = ranking.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(order, vec!["Up", "Flat", "Down", "Zero", "Gap"]);
        assert_eq!(ranking[0].percent, Some(200.0));
        assert_eq!(ranking[0].series, vec![(2022, Some(10)), (2023, Some(20)), (2024, Some(30))]);
        assert_eq!(ranking[3].percent, None);
    }

    #[test]
    fn missing_year_column() {
        let t = table(vec![]);
        assert_eq!(
            change_ranking(&t, 2021, 2024).unwrap_err(),
            CoreError::MissingYearColumn(2021)
        );
    }
}
