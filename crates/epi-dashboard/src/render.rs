//! Terminal and JSON rendering of page models

use crate::error::DashboardResult;
use crate::pages::{
    AboutPage, AssociationView, EpidemiologyPage, HomePage, PageView, TextPage, TrendPage,
};
use crate::state::{Page, UiState};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use epi_core::{HistogramBin, PrevalenceRow};
use std::fmt::Write as _;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Render a page in the requested format
///
/// # Errors
///
/// Only JSON serialization can fail.
pub fn render(view: &PageView, state: &UiState, format: OutputFormat) -> DashboardResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
        OutputFormat::Text => Ok(render_text(view, state)),
    }
}

/// Sidebar menu with the selected entry marked
#[must_use]
pub fn render_menu(state: &UiState) -> String {
    Page::ALL
        .iter()
        .map(|&page| {
            let marker = if page == state.selected { '>' } else { ' ' };
            format!("{marker} {:<22} ({})", page.title(), page.slug())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_text(view: &PageView, state: &UiState) -> String {
    let mut out = render_menu(state);
    out.push_str("\n\n");
    match view {
        PageView::Home(p) => home(&mut out, p),
        PageView::DiseaseDescription(p) => text_page(&mut out, p),
        PageView::EpidemiologyMeasures(p) => epidemiology(&mut out, p),
        PageView::CaseTrend(p) => trend(&mut out, p),
        PageView::About(p) => about(&mut out, p),
    }
    out
}

/// `1234567` → `"1,234,567"`
#[must_use]
pub fn thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn opt_f64(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.decimals$}"))
}

fn opt_count(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| thousands(v.into()))
}

fn table(header: &[&str]) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_content_arrangement(ContentArrangement::Dynamic);
    t.set_width(120);
    t.set_header(header.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
    t
}

fn num(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn heading(out: &mut String, text: &str) {
    let _ = writeln!(out, "{text}\n{}", "=".repeat(text.chars().count()));
}

fn subheading(out: &mut String, text: &str) {
    let _ = writeln!(out, "\n{text}\n{}", "-".repeat(text.chars().count()));
}

fn prevalence_rows(rows: &[PrevalenceRow]) -> Table {
    let mut t = table(&["Regency/City", "Cases", "Population", "Prevalence per 100k"]);
    for r in rows {
        t.add_row(vec![
            Cell::new(&r.region),
            num(thousands(r.cases.into())),
            num(thousands(r.population.into())),
            num(opt_f64(r.per_100k, 2)),
        ]);
    }
    t
}

fn histogram_rows(bins: &[HistogramBin]) -> Table {
    let mut t = table(&["Cases from", "Cases to", "Regions", ""]);
    for b in bins {
        t.add_row(vec![
            num(format!("{:.0}", b.lower)),
            num(format!("{:.0}", b.upper)),
            num(b.count.to_string()),
            Cell::new("#".repeat(b.count)),
        ]);
    }
    t
}

fn home(out: &mut String, p: &HomePage) {
    heading(out, &p.title);
    match &p.summary {
        Some(s) => {
            let _ = writeln!(out, "Total cases:            {}", thousands(s.total));
            let _ = writeln!(out, "Mean per regency/city:  {:.0}", s.mean);
            let _ = writeln!(out, "Median cases:           {:.0}", s.median);
            let _ = writeln!(out, "Case range:             {} - {}", thousands(s.min.into()), thousands(s.max.into()));
        }
        None => out.push_str("No regions in the case table.\n"),
    }

    subheading(out, &format!("Top {} regencies/cities by cases", p.top.len()));
    let _ = writeln!(out, "{}", prevalence_rows(&p.top));

    subheading(out, "Cases per regency/city");
    let mut bars = table(&["Regency/City", "Cases"]);
    for r in &p.distribution {
        bars.add_row(vec![Cell::new(&r.region), num(thousands(r.cases.into()))]);
    }
    let _ = writeln!(out, "{bars}");

    subheading(out, "Case distribution (histogram)");
    let _ = writeln!(out, "{}", histogram_rows(&p.histogram));

    if let Some(map) = &p.map_image {
        subheading(out, "Prevalence map");
        let _ = writeln!(out, "See {}", map.display());
    }
}

fn text_page(out: &mut String, p: &TextPage) {
    heading(out, p.title);
    for section in &p.sections {
        subheading(out, section.heading);
        if let Some(body) = section.body {
            let _ = writeln!(out, "{body}");
        }
        for item in &section.items {
            let _ = writeln!(out, "  - {item}");
        }
    }
}

fn association(out: &mut String, a: &AssociationView) {
    let mut t = table(&["Population density", "TB (+)", "TB (-)", "Total"]);
    for row in &a.rows {
        t.add_row(vec![
            Cell::new(row.label),
            num(thousands(row.present)),
            num(thousands(row.absent)),
            num(thousands(row.total)),
        ]);
    }
    let _ = writeln!(out, "{t}");
    let _ = writeln!(out, "Prevalence Ratio (PR):       {}", opt_f64(a.prevalence_ratio, 2));
    let _ = writeln!(out, "Prevalence Odds Ratio (POR): {}", opt_f64(a.prevalence_odds_ratio, 2));
    out.push_str("  PR  = (a / (a + b)) / (c / (c + d))\n");
    out.push_str("  POR = (a x d) / (b x c)\n");
    if let Some(note) = &a.note {
        let _ = writeln!(out, "Note: {note}");
    }
}

fn epidemiology(out: &mut String, p: &EpidemiologyPage) {
    heading(out, "Epidemiology measures: frequency and association");

    subheading(out, "Prevalence");
    out.push_str("Prevalence = TB cases / population\n");
    let _ = writeln!(out, "Per 100,000 population: {}", opt_f64(p.provincial.per_100k, 2));
    let _ = writeln!(out, "Percent of population:  {}%", opt_f64(p.provincial.percent, 4));
    let _ = writeln!(out, "{}", prevalence_rows(&p.regions));

    subheading(out, "Association: population density vs TB");
    association(out, &p.association);

    if !p.interpretation.is_empty() {
        subheading(out, "Interpretation");
        for line in &p.interpretation {
            let _ = writeln!(out, "{line}");
        }
    }
}

fn trend(out: &mut String, p: &TrendPage) {
    let span = match (p.years.first(), p.years.last()) {
        (Some(first), Some(last)) => format!(" ({first}-{last})"),
        _ => String::new(),
    };
    heading(out, &format!("Case trend{span}"));

    subheading(out, "Province total per year");
    let mut totals = table(&["Year", "Cases", "Regions reporting", "Missing"]);
    for t in &p.yearly_totals {
        totals.add_row(vec![
            Cell::new(t.year),
            num(thousands(t.cases)),
            num(t.reported.to_string()),
            num(t.missing.to_string()),
        ]);
    }
    let _ = writeln!(out, "{totals}");

    let filter = p.region_filter.as_deref().unwrap_or("all regencies/cities");
    subheading(out, &format!("Cases per regency/city: {filter}"));
    let mut series = table(&["Regency/City", "Year", "Cases"]);
    for r in &p.series {
        series.add_row(vec![Cell::new(&r.region), Cell::new(r.year), num(opt_count(r.cases))]);
    }
    let _ = writeln!(out, "{series}");

    subheading(out, &format!("Percent change ({} -> {})", p.start_year, p.end_year));
    let mut header: Vec<String> = vec!["Regency/City".to_string()];
    header.extend(p.years.iter().map(|y| y.to_string()));
    header.push("% change".to_string());
    let header_refs: Vec<&str> = header.iter().map(String::as_str).collect();
    let mut change = table(&header_refs);
    for row in &p.change {
        let mut cells = vec![Cell::new(&row.region)];
        cells.extend(row.series.iter().map(|(_, v)| num(opt_count(*v))));
        cells.push(num(opt_f64(row.percent, 1)));
        change.add_row(cells);
    }
    let _ = writeln!(out, "{change}");
    if let Some(note) = &p.change_note {
        let _ = writeln!(out, "Note: {note}");
    }
}

fn about(out: &mut String, p: &AboutPage) {
    let a = &p.about;
    heading(out, "About this study");
    let _ = writeln!(out, "Title: {}", a.title);
    if !a.authors.is_empty() {
        let _ = writeln!(out, "Authors: {}", a.authors.join(", "));
    }
    if let Some(supervisor) = &a.supervisor {
        let _ = writeln!(out, "Supervisor: {supervisor}");
    }
    if let Some(institution) = &a.institution {
        let _ = writeln!(out, "Institution: {institution}");
    }
    if let Some(year) = a.year {
        let _ = writeln!(out, "Year: {year}");
    }
    if let Some(objective) = &a.objective {
        subheading(out, "Objective");
        let _ = writeln!(out, "{objective}");
    }
    for (title, items) in [("Data sources", &a.sources), ("Methodology", &a.methodology)] {
        if !items.is_empty() {
            subheading(out, title);
            for item in items {
                let _ = writeln!(out, "  - {item}");
            }
        }
    }
    for (title, text) in [("Acknowledgement", &a.acknowledgement), ("License", &a.license)] {
        if let Some(text) = text {
            subheading(out, title);
            let _ = writeln!(out, "{text}");
        }
    }
}
