//! Page models
//!
//! Each menu entry is built into a plain serializable struct holding exactly
//! what the page displays. Rendering (text or JSON) happens elsewhere.

use crate::config::{AboutConfig, DashboardConfig};
use crate::dataset::Dataset;
use crate::error::DashboardResult;
use crate::state::{Page, UiState};
use epi_core::association::round2;
use epi_core::{
    by_cases_desc, case_histogram, change_ranking, prevalence_table, provincial_prevalence, top_n,
    AssociationTable, CaseSummary, ChangeRow, CoreError, ExposureLevel, HistogramBin, PrevalenceRow,
    ProvincialPrevalence, TrendLongRecord, YearTotal,
};
use serde::Serialize;
use std::path::PathBuf;

/// A built page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum PageView {
    /// Overview
    Home(HomePage),
    /// Disease description
    DiseaseDescription(TextPage),
    /// Prevalence and association
    EpidemiologyMeasures(EpidemiologyPage),
    /// Trend
    CaseTrend(TrendPage),
    /// Study metadata
    About(AboutPage),
}

impl PageView {
    /// Page this view belongs to
    #[must_use]
    pub fn page(&self) -> Page {
        match self {
            Self::Home(_) => Page::Home,
            Self::DiseaseDescription(_) => Page::DiseaseDescription,
            Self::EpidemiologyMeasures(_) => Page::EpidemiologyMeasures,
            Self::CaseTrend(_) => Page::CaseTrend,
            Self::About(_) => Page::About,
        }
    }
}

/// Build the page selected in `state`
///
/// # Errors
///
/// Only the home page can fail, when the configured histogram has zero bins.
pub fn build_page(state: &UiState, data: &Dataset, config: &DashboardConfig) -> DashboardResult<PageView> {
    tracing::debug!(page = state.selected.slug(), "building page");
    Ok(match state.selected {
        Page::Home => PageView::Home(HomePage::build(data, config)?),
        Page::DiseaseDescription => PageView::DiseaseDescription(TextPage::disease_description()),
        Page::EpidemiologyMeasures => {
            PageView::EpidemiologyMeasures(EpidemiologyPage::build(data, config))
        }
        Page::CaseTrend => PageView::CaseTrend(TrendPage::build(data, config, state.region_filter.as_deref())?),
        Page::About => PageView::About(AboutPage::from(&config.about)),
    })
}

/// Home page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    /// Page title
    pub title: String,
    /// Metric cards; `None` for an empty case table
    pub summary: Option<CaseSummary>,
    /// Regions with the most cases
    pub top: Vec<PrevalenceRow>,
    /// Every region, descending by cases (bar chart series)
    pub distribution: Vec<PrevalenceRow>,
    /// Case count histogram
    pub histogram: Vec<HistogramBin>,
    /// Static prevalence map, when configured
    pub map_image: Option<PathBuf>,
}

impl HomePage {
    /// Build from the case table
    ///
    /// # Errors
    ///
    /// When the configured histogram has zero bins.
    pub fn build(data: &Dataset, config: &DashboardConfig) -> DashboardResult<Self> {
        let display = &config.display;
        let rows = |records: Vec<epi_core::RegionRecord>| prevalence_table(&records);
        Ok(Self {
            title: format!(
                "Tuberculosis cases - {} ({})",
                display.province, display.reference_year
            ),
            summary: CaseSummary::compute(&data.records),
            top: rows(top_n(&data.records, display.top_n)),
            distribution: rows(by_cases_desc(&data.records)),
            histogram: case_histogram(&data.records, display.histogram_bins)?,
            map_image: config.data.map_image.clone(),
        })
    }
}

/// A titled block of prose
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSection {
    /// Heading
    pub heading: &'static str,
    /// Paragraph, if any
    pub body: Option<&'static str>,
    /// Bullet points
    pub items: Vec<&'static str>,
}

/// Static text page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextPage {
    /// Page title
    pub title: &'static str,
    /// Sections in display order
    pub sections: Vec<TextSection>,
}

impl TextPage {
    /// Tuberculosis background
    #[must_use]
    pub fn disease_description() -> Self {
        let section = |heading, body, items: &[&'static str]| TextSection {
            heading,
            body,
            items: items.to_vec(),
        };
        Self {
            title: "Tuberculosis",
            sections: vec![
                section(
                    "Definition",
                    Some(
                        "Tuberculosis (TB) is a chronic infectious disease caused by \
                         Mycobacterium tuberculosis. It can affect many organs, most often \
                         the lungs (pulmonary TB), and remains one of the infectious diseases \
                         with the highest incidence worldwide.",
                    ),
                    &[],
                ),
                section(
                    "Transmission",
                    Some(
                        "TB spreads through the air. When a person with active TB coughs or \
                         sneezes, droplets carrying the bacteria are released and may be \
                         inhaled by others.",
                    ),
                    &[],
                ),
                section(
                    "Symptoms of active pulmonary TB",
                    None,
                    &[
                        "Severe cough lasting three weeks or more",
                        "Chest pain",
                        "Coughing up blood or bloody sputum",
                    ],
                ),
                section(
                    "General symptoms",
                    None,
                    &[
                        "Fatigue and weakness",
                        "Weight loss",
                        "Loss of appetite",
                        "Fever and chills",
                        "Night sweats",
                    ],
                ),
                section(
                    "Extrapulmonary symptoms (by organ)",
                    None,
                    &[
                        "Swollen lymph nodes (lymph node TB)",
                        "Blood in urine (renal TB)",
                        "Back pain (spinal TB)",
                        "Headache and seizures (TB meningitis)",
                        "Severe abdominal pain (intestinal TB)",
                    ],
                ),
                section(
                    "Risk factors",
                    None,
                    &[
                        "Weakened immunity",
                        "Crowded, poorly ventilated housing",
                        "Close contact with an active case",
                        "Other conditions such as HIV/AIDS",
                        "Malnutrition",
                        "Immunosuppressive medication",
                        "Poor hygiene and sanitation",
                    ],
                ),
                section(
                    "References",
                    None,
                    &[
                        "Pusat Nasional Penanggulangan TBC, UMUM_PNPK revisi (2021): \
                         https://www.tbindonesia.or.id/wp-content/uploads/2021/06/UMUM_PNPK_revisi.pdf",
                        "Jurnal Global Health Science (2021): \
                         https://jurnal.globalhealthsciencegroup.com/index.php/JPPP/article/download/1270/998/",
                        "Alodokter, Proses Terjadinya Penularan TBC: \
                         https://www.alodokter.com/proses-terjadinya-penularan-tbc",
                        "CDC, Signs & Symptoms of Tuberculosis: \
                         https://www.cdc.gov/tb/signs-symptoms/index.html",
                        "Halodoc, Faktor Risiko Alami TBC yang Terjadi di Usia Muda: \
                         https://www.halodoc.com/artikel/faktor-risiko-alami-tbc-yang-terjadi-di-usia-muda",
                    ],
                ),
            ],
        }
    }
}

/// One row of the 2×2 association table as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssociationRow {
    /// Row label
    pub label: &'static str,
    /// Outcome present
    pub present: u128,
    /// Outcome absent
    pub absent: u128,
    /// Row total
    pub total: u128,
}

/// Association section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationView {
    /// High density, low density, total
    pub rows: Vec<AssociationRow>,
    /// Prevalence ratio; `None` when undefined
    pub prevalence_ratio: Option<f64>,
    /// Prevalence odds ratio; `None` when undefined
    pub prevalence_odds_ratio: Option<f64>,
    /// Reason a metric is undefined
    pub note: Option<String>,
}

impl From<&AssociationTable> for AssociationView {
    fn from(table: &AssociationTable) -> Self {
        let row = |label, level| {
            let (present, absent) = table.row(level);
            AssociationRow {
                label,
                present: present.into(),
                absent: absent.into(),
                total: table.row_total(level),
            }
        };
        let (present, absent) = table.column_totals();
        let pr = table.prevalence_ratio();
        let por = table.prevalence_odds_ratio();
        let note = match (&pr, &por) {
            (Err(e), _) | (_, Err(e)) => Some(e.to_string()),
            _ => None,
        };
        Self {
            rows: vec![
                row("High density (above mean)", ExposureLevel::High),
                row("Low density (below mean)", ExposureLevel::Low),
                AssociationRow {
                    label: "Total",
                    present,
                    absent,
                    total: table.total(),
                },
            ],
            prevalence_ratio: pr.ok(),
            prevalence_odds_ratio: por.ok(),
            note,
        }
    }
}

/// Epidemiology measures page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpidemiologyPage {
    /// Province-wide prevalence
    pub provincial: ProvincialPrevalence,
    /// Prevalence per region, sheet order
    pub regions: Vec<PrevalenceRow>,
    /// Density vs TB association
    pub association: AssociationView,
    /// Plain-language reading of the figures
    pub interpretation: Vec<String>,
}

impl EpidemiologyPage {
    /// Build from the case table and configured contingency table
    #[must_use]
    pub fn build(data: &Dataset, config: &DashboardConfig) -> Self {
        let provincial = provincial_prevalence(&data.records);
        let association = AssociationView::from(&config.association);

        let mut interpretation = Vec::new();
        if let (Some(per_100k), Some(percent)) = (provincial.per_100k, provincial.percent) {
            interpretation.push(format!(
                "Tuberculosis prevalence in {} in {} is {per_100k:.2} per 100,000 population, \
                 or {percent:.4}% of the total population.",
                config.display.province, config.display.reference_year
            ));
        }
        if let (Some(pr), Some(por)) = (association.prevalence_ratio, association.prevalence_odds_ratio) {
            let direction = if pr > 1.0 { "higher" } else { "not higher" };
            interpretation.push(format!(
                "PR = {:.2}: prevalence in high-density areas is {direction} than in \
                 low-density areas ({:.2} times). POR = {:.2}: the odds of TB follow the \
                 same direction.",
                round2(pr),
                round2(pr),
                round2(por)
            ));
        }

        Self {
            provincial,
            regions: prevalence_table(&data.records),
            association,
            interpretation,
        }
    }
}

/// Case trend page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPage {
    /// Years present in the trend table
    pub years: Vec<u16>,
    /// Province totals per year (line chart)
    pub yearly_totals: Vec<YearTotal>,
    /// Regions available in the filter
    pub regions: Vec<String>,
    /// Active filter
    pub region_filter: Option<String>,
    /// Long-format series, filtered when a region is selected
    pub series: Vec<TrendLongRecord>,
    /// Baseline year of the ranking
    pub start_year: u16,
    /// Final year of the ranking
    pub end_year: u16,
    /// Percent change ranking
    pub change: Vec<ChangeRow>,
    /// Why the ranking is empty, when a ranking year has no column
    pub change_note: Option<String>,
}

impl TrendPage {
    /// Build from the trend table
    ///
    /// A ranking year without a column leaves `change` empty and sets
    /// `change_note`; totals and series are still shown.
    ///
    /// # Errors
    ///
    /// Any transform error other than a missing ranking year.
    pub fn build(data: &Dataset, config: &DashboardConfig, region: Option<&str>) -> DashboardResult<Self> {
        let trend = &data.trend;
        let series = match region {
            Some(name) => trend.for_region(name),
            None => trend.long.clone(),
        };
        if region.is_some() && series.is_empty() {
            tracing::warn!(region = ?region, "region filter matches no trend rows");
        }
        let (start_year, end_year) = (config.trend.start_year, config.trend.end_year);
        let (change, change_note) = match change_ranking(trend, start_year, end_year) {
            Ok(rows) => (rows, None),
            Err(err @ CoreError::MissingYearColumn(_)) => {
                tracing::warn!(start_year, end_year, %err, "percent change unavailable");
                (Vec::new(), Some(err.to_string()))
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            years: trend.years(),
            yearly_totals: trend.yearly_totals(),
            regions: trend.regions(),
            region_filter: region.map(str::to_string),
            series,
            start_year,
            end_year,
            change,
            change_note,
        })
    }
}

/// About page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutPage {
    /// Study metadata
    #[serde(flatten)]
    pub about: AboutConfig,
}

impl From<&AboutConfig> for AboutPage {
    fn from(about: &AboutConfig) -> Self {
        Self {
            about: about.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epi_core::{CellValue, Sheet};

    fn dataset() -> Dataset {
        let cases = Sheet::new(
            ["kabupaten", "kasus_2024", "populasi_2024"],
            vec![
                vec![CellValue::from("A"), 10i64.into(), 1_000i64.into()],
                vec![CellValue::from("B"), 30i64.into(), 100_000i64.into()],
            ],
        );
        let trend = Sheet::new(
            ["Kabupaten", "Tahun 2022", "Tahun 2024"],
            vec![
                vec![CellValue::from("A"), 5i64.into(), 10i64.into()],
                vec![CellValue::from("B"), 0i64.into(), 30i64.into()],
            ],
        );
        Dataset::from_sheets(&cases, &trend, &DashboardConfig::default()).unwrap()
    }

    #[test]
    fn every_page_builds() {
        let data = dataset();
        let config = DashboardConfig::default();
        for page in Page::ALL {
            let view = build_page(&UiState::new(page), &data, &config).unwrap();
            assert_eq!(view.page(), page);
        }
    }

    #[test]
    fn home_orders_by_cases() {
        let page = HomePage::build(&dataset(), &DashboardConfig::default()).unwrap();
        assert_eq!(page.top[0].region, "B");
        assert_eq!(page.summary.unwrap().total, 40);
        assert_eq!(page.histogram.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn association_rows_and_metrics() {
        let view = AssociationView::from(&epi_core::PROVINCIAL_DENSITY_TABLE);
        assert_eq!(view.rows[2].total, 50_345_190);
        assert_eq!(view.prevalence_ratio.map(round2), Some(1.65));
        assert!(view.note.is_none());

        let degenerate = AssociationView::from(&AssociationTable::new(1, 0, 0, 1));
        assert!(degenerate.prevalence_ratio.is_none());
        assert!(degenerate.note.is_some());
    }

    #[test]
    fn association_rows_hold_extreme_counts() {
        let view = AssociationView::from(&AssociationTable::new(u64::MAX, 1, 1, 1));
        assert_eq!(view.rows[0].total, u128::from(u64::MAX) + 1);
        assert_eq!(view.rows[2].total, u128::from(u64::MAX) + 3);
        assert!(view.prevalence_ratio.is_some());
        assert!(view.note.is_none());
    }

    #[test]
    fn trend_filter_and_ranking() {
        let data = dataset();
        let page = TrendPage::build(&data, &DashboardConfig::default(), Some("A")).unwrap();
        assert!(page.series.iter().all(|r| r.region == "A"));
        assert_eq!(page.change[0].region, "A");
        assert_eq!(page.change[0].percent, Some(100.0));
        assert_eq!(page.change[1].percent, None);
    }

    #[test]
    fn trend_missing_year_keeps_the_rest_of_the_page() {
        let config = DashboardConfig::default().with_change_years(2023, 2024);
        let page = TrendPage::build(&dataset(), &config, None).unwrap();
        assert!(page.change.is_empty());
        assert_eq!(page.change_note.as_deref(), Some("no column for year 2023"));
        assert_eq!(page.yearly_totals.len(), 2);
        assert_eq!(page.series.len(), 4);
    }

    #[test]
    fn trend_without_year_columns() {
        let cases = Sheet::new(
            ["kabupaten", "kasus_2024", "populasi_2024"],
            vec![vec![CellValue::from("A"), 1i64.into(), 10i64.into()]],
        );
        let trend = Sheet::new(["Kabupaten", "catatan"], vec![vec![CellValue::from("A"), "-".into()]]);
        let data = Dataset::from_sheets(&cases, &trend, &DashboardConfig::default()).unwrap();

        let view = build_page(&UiState::new(Page::CaseTrend), &data, &DashboardConfig::default()).unwrap();
        let PageView::CaseTrend(page) = view else {
            panic!("expected trend page");
        };
        assert!(page.years.is_empty());
        assert!(page.series.is_empty());
        assert!(page.change.is_empty());
        assert!(page.change_note.is_some());
    }
}
