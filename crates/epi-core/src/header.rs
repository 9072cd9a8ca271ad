//! Header resolution
//!
//! Source spreadsheets spell the region column differently and embed years in
//! free-form headers ("Tahun 2022", "2023", "Kasus 2024 (final)"). This module
//! turns both into explicit, testable rules:
//!
//! - [`HeaderPolicy`]: ordered alias list, first alias present wins
//! - [`year_columns`]: every header containing a 4-digit run

use crate::error::{CoreError, CoreResult};
use crate::types::{Sheet, YearColumn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static YEAR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").expect("static regex"));

/// Region header spellings accepted in the multi-year trend table
pub const TREND_REGION_ALIASES: [&str; 4] =
    ["Kabupaten/Kota", "Kabupaten", "kabupaten", "Kota/Kabupaten"];

/// Region header spellings accepted in the reference case table
pub const CASE_REGION_ALIASES: [&str; 4] =
    ["kabupaten", "Kabupaten/Kota", "Kabupaten", "Kota/Kabupaten"];

/// Ordered list of accepted spellings for one logical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderPolicy {
    aliases: Vec<String>,
}

impl HeaderPolicy {
    /// Create policy from aliases in priority order
    #[must_use]
    pub fn new<S: Into<String>>(aliases: impl IntoIterator<Item = S>) -> Self {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    /// Policy for the trend table region column
    #[must_use]
    pub fn trend_region() -> Self {
        Self::new(TREND_REGION_ALIASES)
    }

    /// Policy for the case table region column
    #[must_use]
    pub fn case_region() -> Self {
        Self::new(CASE_REGION_ALIASES)
    }

    /// Accepted spellings, highest priority first
    #[inline]
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Resolve against a header row
    ///
    /// Aliases are tried in order; the first one present in `headers`
    /// (exact match after trimming) wins.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnresolvedHeader`] when no alias is present.
    pub fn resolve(&self, headers: &[String]) -> CoreResult<usize> {
        self.aliases
            .iter()
            .find_map(|alias| headers.iter().position(|h| h.trim() == alias))
            .ok_or_else(|| CoreError::unresolved_header(self.aliases.clone(), headers.to_vec()))
    }

    /// Resolve against a sheet's header row
    ///
    /// # Errors
    ///
    /// [`CoreError::UnresolvedHeader`] when no alias is present.
    pub fn resolve_in(&self, sheet: &Sheet) -> CoreResult<usize> {
        self.resolve(&sheet.headers)
    }
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self::trend_region()
    }
}

/// Year embedded in a header: the first run of four digits
#[must_use]
pub fn extract_year(header: &str) -> Option<u16> {
    YEAR_RUN
        .find(header)
        .and_then(|m| m.as_str().parse::<u16>().ok())
}

/// All year-bearing columns of a sheet, in column order
///
/// Columns listed in `exclude` (the resolved region column) are skipped.
#[must_use]
pub fn year_columns(headers: &[String], exclude: &[usize]) -> Vec<YearColumn> {
    headers
        .iter()
        .enumerate()
        .filter(|(index, _)| !exclude.contains(index))
        .filter_map(|(index, header)| {
            extract_year(header).map(|year| YearColumn {
                index,
                header: header.clone(),
                year,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn first_alias_wins() {
        let policy = HeaderPolicy::trend_region();
        let h = headers(&["kabupaten", "Kabupaten/Kota", "Tahun 2022"]);
        // "Kabupaten/Kota" has priority over "kabupaten"
        assert_eq!(policy.resolve(&h).unwrap(), 1);
    }

    #[test]
    fn lowercase_alias_accepted() {
        let policy = HeaderPolicy::trend_region();
        let h = headers(&["kabupaten", "Tahun 2022"]);
        assert_eq!(policy.resolve(&h).unwrap(), 0);
    }

    #[test]
    fn unresolved_is_an_error() {
        let policy = HeaderPolicy::trend_region();
        let h = headers(&["Region", "2022"]);
        let err = policy.resolve(&h).unwrap_err();
        assert!(matches!(err, CoreError::UnresolvedHeader { .. }));
    }

    #[test]
    fn custom_policy() {
        let policy = HeaderPolicy::new(["Region"]);
        assert_eq!(policy.resolve(&headers(&["x", "Region"])).unwrap(), 1);
        assert_eq!(policy.aliases(), &["Region".to_string()]);
    }

    #[test]
    fn extract_year_variants() {
        assert_eq!(extract_year("Tahun 2022"), Some(2022));
        assert_eq!(extract_year("2023"), Some(2023));
        assert_eq!(extract_year("kasus_2024_final"), Some(2024));
        assert_eq!(extract_year("2019-2020"), Some(2019));
        assert_eq!(extract_year("Tahun 22"), None);
        assert_eq!(extract_year("kabupaten"), None);
    }

    #[test]
    fn year_columns_skip_excluded() {
        let h = headers(&["Kota 1234", "Tahun 2022", "notes", "Tahun 2023"]);
        let cols = year_columns(&h, &[0]);
        let years: Vec<u16> = cols.iter().map(|c| c.year).collect();
        assert_eq!(years, vec![2022, 2023]);
        assert_eq!(cols[0].index, 1);
        assert_eq!(cols[1].header, "Tahun 2023");
    }

    #[test]
    fn no_year_columns() {
        let h = headers(&["kabupaten", "notes"]);
        assert!(year_columns(&h, &[0]).is_empty());
    }
}
