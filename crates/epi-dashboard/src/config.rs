//! Dashboard configuration
//!
//! Loaded from TOML; every field has a default so an empty file (or no file)
//! yields the West Java 2024 layout.

use crate::error::{DashboardError, DashboardResult};
use epi_core::{AssociationTable, CaseColumns, HeaderPolicy, PROVINCIAL_DENSITY_TABLE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Source files
    pub data: DataConfig,
    /// Case table column layout
    pub columns: CaseColumns,
    /// Trend table settings
    pub trend: TrendConfig,
    /// Display settings
    pub display: DisplayConfig,
    /// Density/TB contingency table
    pub association: AssociationTable,
    /// About page content
    pub about: AboutConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            columns: CaseColumns::default(),
            trend: TrendConfig::default(),
            display: DisplayConfig::default(),
            association: PROVINCIAL_DENSITY_TABLE,
            about: AboutConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// [`DashboardError::Config`] on invalid TOML or unknown value types.
    pub fn from_toml(text: &str) -> DashboardResult<Self> {
        toml::from_str(text).map_err(|e| DashboardError::config(e.to_string()))
    }

    /// Load configuration from a TOML file
    ///
    /// Relative data paths are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// [`DashboardError::ConfigIo`] when the file cannot be read,
    /// [`DashboardError::Config`] when it does not parse.
    pub fn load(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DashboardError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&text)?;
        if let Some(base) = path.parent() {
            config.data.resolve_against(base);
        }
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// With source file paths
    #[inline]
    #[must_use]
    pub fn with_data(mut self, cases: impl Into<PathBuf>, trend: impl Into<PathBuf>) -> Self {
        self.data.cases = cases.into();
        self.data.trend = trend.into();
        self
    }

    /// With top-N table size
    #[inline]
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.display.top_n = n;
        self
    }

    /// With percent-change years
    #[inline]
    #[must_use]
    pub fn with_change_years(mut self, start: u16, end: u16) -> Self {
        self.trend.start_year = start;
        self.trend.end_year = end;
        self
    }
}

/// Source file locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Per-region cases and population for the reference year
    pub cases: PathBuf,
    /// Per-region cases, one column per year
    pub trend: PathBuf,
    /// Static prevalence map shown on the home page
    pub map_image: Option<PathBuf>,
    /// Maximum number of memoized sheets
    pub cache_capacity: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            cases: PathBuf::from("datatbc_jabar_2024.xlsx"),
            trend: PathBuf::from("kasus_tbc_jabar.xlsx"),
            map_image: Some(PathBuf::from("leafletshp.png")),
            cache_capacity: 16,
        }
    }
}

impl DataConfig {
    fn resolve_against(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.cases);
        join(&mut self.trend);
        if let Some(map) = self.map_image.as_mut() {
            join(map);
        }
    }
}

/// Trend table settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Accepted spellings of the region column
    pub region: HeaderPolicy,
    /// Baseline year of the percent-change ranking
    pub start_year: u16,
    /// Final year of the percent-change ranking
    pub end_year: u16,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            region: HeaderPolicy::trend_region(),
            start_year: 2022,
            end_year: 2024,
        }
    }
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Province name used in titles
    pub province: String,
    /// Year of the case table
    pub reference_year: u16,
    /// Rows in the "highest case count" table
    pub top_n: usize,
    /// Buckets in the case histogram
    pub histogram_bins: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            province: "Jawa Barat".to_string(),
            reference_year: 2024,
            top_n: epi_core::ranking::DEFAULT_TOP_N,
            histogram_bins: epi_core::ranking::DEFAULT_HISTOGRAM_BINS,
        }
    }
}

/// About page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    /// Study title
    pub title: String,
    /// Authors
    pub authors: Vec<String>,
    /// Supervisor
    pub supervisor: Option<String>,
    /// Institution
    pub institution: Option<String>,
    /// Publication year
    pub year: Option<u16>,
    /// Study objective
    pub objective: Option<String>,
    /// Data sources
    pub sources: Vec<String>,
    /// Study design notes
    pub methodology: Vec<String>,
    /// Tools and help credited by the authors
    pub acknowledgement: Option<String>,
    /// Copyright and usage terms
    pub license: Option<String>,
}

impl Default for AboutConfig {
    fn default() -> Self {
        let authors = ["Ghaitsa Shafiyyah", "Gina Kustiana", "Charles Joshua Nathaniel Waruwu"];
        Self {
            title: "Epidemiological analysis of tuberculosis cases in West Java, 2024".to_string(),
            authors: authors.iter().map(ToString::to_string).collect(),
            supervisor: Some("Dr. I Gede Nyoman Mindra Jaya, M.Si".to_string()),
            institution: Some("Universitas Padjadjaran".to_string()),
            year: Some(2025),
            objective: Some(
                "Descriptive analysis of tuberculosis cases per regency/city in West Java: \
                 prevalence per 100,000 population, association with population density, \
                 and the case trend over 2022-2024."
                    .to_string(),
            ),
            sources: vec![
                "West Java Provincial Health Office: TB cases 2022-2024".to_string(),
                "BPS Kabupaten Bandung: population by regency/city in West Java, 2024".to_string(),
            ],
            methodology: vec![
                "Design: cross-sectional".to_string(),
                "Unit of analysis: regency/city".to_string(),
                "Period: 2024".to_string(),
            ],
            acknowledgement: Some(
                "Code and visualisation design were drafted with help from ChatGPT (OpenAI); \
                 all results were checked and edited by the authors."
                    .to_string(),
            ),
            license: Some(format!(
                "For academic and educational use. All data come from official government \
                 publications. (c) 2025 {}.",
                authors.join(", ")
            )),
        }
    }
}
