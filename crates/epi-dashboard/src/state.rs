//! Navigation state
//!
//! The selected page is an explicit value handed to the page builder and
//! renderer; nothing about navigation lives in process-wide state.

use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Menu entries, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    /// Overview cards, top regions, distribution, map
    #[default]
    Home,
    /// What tuberculosis is and how it spreads
    DiseaseDescription,
    /// Prevalence and association measures
    EpidemiologyMeasures,
    /// Multi-year trend and percent change
    CaseTrend,
    /// Study metadata
    About,
}

impl Page {
    /// All pages, in menu order
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::DiseaseDescription,
        Page::EpidemiologyMeasures,
        Page::CaseTrend,
        Page::About,
    ];

    /// Menu label
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::DiseaseDescription => "Disease Description",
            Self::EpidemiologyMeasures => "Epidemiology Measures",
            Self::CaseTrend => "Case Trend",
            Self::About => "About",
        }
    }

    /// Short name used on the command line
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::DiseaseDescription => "disease",
            Self::EpidemiologyMeasures => "epidemiology",
            Self::CaseTrend => "trend",
            Self::About => "about",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Page {
    type Err = DashboardError;

    /// Accepts the slug or the menu label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(wanted) || p.title().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DashboardError::UnknownPage(wanted.to_string()))
    }
}

/// Per-session UI state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    /// Page currently shown
    pub selected: Page,
    /// Region chosen in the trend page filter; `None` shows all regions
    pub region_filter: Option<String>,
}

impl UiState {
    /// State showing `page`
    #[inline]
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            selected: page,
            region_filter: None,
        }
    }

    /// Switch page, keeping the region filter
    #[inline]
    #[must_use]
    pub fn select(self, page: Page) -> Self {
        Self {
            selected: page,
            ..self
        }
    }

    /// Restrict the trend page to one region
    #[inline]
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region_filter = Some(region.into());
        self
    }
}
