use epi_dashboard::pages::PageView;
use epi_dashboard::{
    build_page, render, DashboardConfig, DashboardError, DataLoader, OutputFormat, Page, UiState,
};
use epi_test_utils::{sample_data_dir, write_file, DataDir};
use pretty_assertions::assert_eq;

fn config_for(data: &DataDir) -> DashboardConfig {
    let toml = r#"
        [data]
        cases = "cases.csv"
        trend = "trend.csv"

        [display]
        top_n = 3

        [about]
        title = "Test study"
        authors = ["A. Author", "B. Author"]
        institution = "Test University"
        year = 2025
    "#;
    let path = write_file(&data.dir, "epidash.toml", toml);
    DashboardConfig::load(path).unwrap()
}

#[test]
fn every_page_renders_from_files() {
    let data = sample_data_dir();
    let config = config_for(&data);
    let loader = DataLoader::new(&config);
    let dataset = loader.load(&config).unwrap();

    for page in Page::ALL {
        let state = UiState::new(page);
        let view = build_page(&state, &dataset, &config).unwrap();
        let text = render(&view, &state, OutputFormat::Text).unwrap();
        assert!(text.contains(page.title()), "menu missing on {page}");
        let json = render(&view, &state, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("page").is_some());
    }
}

#[test]
fn home_page_contents() {
    let data = sample_data_dir();
    let config = config_for(&data);
    let dataset = DataLoader::new(&config).load(&config).unwrap();

    let PageView::Home(home) = build_page(&UiState::default(), &dataset, &config).unwrap() else {
        panic!("expected home page");
    };
    let top: Vec<&str> = home.top.iter().map(|r| r.region.as_str()).collect();
    assert_eq!(top, vec!["Kabupaten Bogor", "Kabupaten Bekasi", "Kabupaten Garut"]);
    assert_eq!(home.distribution.len(), 5);

    let summary = home.summary.unwrap();
    assert_eq!(summary.total, 47_400);
    assert_eq!(summary.median, 9_800.0);
    assert_eq!((summary.min, summary.max), (300, 21_000));
}

#[test]
fn trend_page_with_region_filter() {
    let data = sample_data_dir();
    let config = config_for(&data);
    let dataset = DataLoader::new(&config).load(&config).unwrap();
    let state = UiState::new(Page::CaseTrend).with_region("Kota Depok");

    let PageView::CaseTrend(trend) = build_page(&state, &dataset, &config).unwrap() else {
        panic!("expected trend page");
    };
    assert_eq!(trend.series.len(), 3);
    assert!(trend.series.iter().all(|r| r.region == "Kota Depok"));
    assert_eq!(trend.yearly_totals.len(), 3);
    assert_eq!(trend.yearly_totals[0].cases, 30_800);
    assert_eq!(trend.change.last().unwrap().region, "Kota Banjar");
    assert_eq!(trend.change.last().unwrap().percent, None);

    let text = render(&PageView::CaseTrend(trend), &state, OutputFormat::Text).unwrap();
    assert!(text.contains("Kota Depok"));
    assert!(text.contains("% change"));
}

#[test]
fn rendering_is_byte_identical_across_runs() {
    let data = sample_data_dir();
    let config = config_for(&data);
    let render_all = || {
        let dataset = DataLoader::new(&config).load(&config).unwrap();
        Page::ALL
            .iter()
            .map(|&page| {
                let state = UiState::new(page);
                let view = build_page(&state, &dataset, &config).unwrap();
                render(&view, &state, OutputFormat::Json).unwrap()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(render_all(), render_all());
}

#[test]
fn loader_memoizes_source_files() {
    let data = sample_data_dir();
    let config = config_for(&data);
    let loader = DataLoader::new(&config);
    for _ in 0..4 {
        loader.load(&config).unwrap();
    }
    let stats = loader.stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 6);
}

#[test]
fn unrecognised_region_header_is_surfaced() {
    let data = sample_data_dir();
    write_file(&data.dir, "trend.csv", "Region,Tahun 2022,Tahun 2024\nX,1,2\n");
    let config = config_for(&data);
    let err = DataLoader::new(&config).load(&config).unwrap_err();
    assert!(matches!(err, DashboardError::Core(epi_core::CoreError::UnresolvedHeader { .. })));
}

#[test]
fn trend_file_without_year_columns_still_renders() {
    let data = sample_data_dir();
    write_file(&data.dir, "trend.csv", "Kabupaten/Kota,catatan\nKota Depok,-\n");
    let config = config_for(&data);
    let dataset = DataLoader::new(&config).load(&config).unwrap();
    let state = UiState::new(Page::CaseTrend);

    let view = build_page(&state, &dataset, &config).unwrap();
    let text = render(&view, &state, OutputFormat::Text).unwrap();
    assert!(text.contains("Note: no column for year 2022"));
}

#[test]
fn about_page_uses_configuration() {
    let data = sample_data_dir();
    let config = config_for(&data);
    let dataset = DataLoader::new(&config).load(&config).unwrap();
    let state = UiState::new(Page::About);
    let view = build_page(&state, &dataset, &config).unwrap();
    let text = render(&view, &state, OutputFormat::Text).unwrap();
    assert!(text.contains("Test study"));
    assert!(text.contains("A. Author, B. Author"));
    assert!(text.contains("Year: 2025"));
    assert!(text.contains("Supervisor: Dr. I Gede Nyoman Mindra Jaya, M.Si"));
    assert!(!text.contains("Universitas Padjadjaran"));
}
