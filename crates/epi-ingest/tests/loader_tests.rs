use epi_core::{region_records, CaseColumns, CellValue, HeaderPolicy, Sheet, TrendTable};
use epi_ingest::{IngestError, SheetCache};
use epi_test_utils::{
    case_sheet, count, sample_data_dir, sample_records, sheet_to_csv, trend_sheet, write_file,
};
use pretty_assertions::assert_eq;

#[test]
fn csv_round_trip_matches_fixture_sheets() {
    let data = sample_data_dir();
    let cache = SheetCache::default();

    assert_eq!(*cache.load(&data.cases).unwrap(), case_sheet());
    assert_eq!(*cache.load(&data.trend).unwrap(), trend_sheet());
}

#[test]
fn region_names_with_commas_and_quotes_survive() {
    let sheet = Sheet::new(
        ["kabupaten", "kasus_2024", "populasi_2024"],
        vec![
            vec![CellValue::from("Kota Bandung, Jawa Barat"), count(7_000), count(2_500_000)],
            vec![CellValue::from("Kabupaten \"Bandung\" Barat"), count(1_800), count(1_900_000)],
        ],
    );
    let data = sample_data_dir();
    let path = write_file(&data.dir, "quoted.csv", &sheet_to_csv(&sheet));

    let loaded = SheetCache::default().load(&path).unwrap();
    assert_eq!(*loaded, sheet);
    let records = region_records(&loaded, &CaseColumns::default()).unwrap();
    assert_eq!(records[0].region, "Kota Bandung, Jawa Barat");
}

#[test]
fn loaded_sheets_feed_the_transform() {
    let data = sample_data_dir();
    let cache = SheetCache::default();

    let cases = cache.load(&data.cases).unwrap();
    let records = region_records(&cases, &CaseColumns::default()).unwrap();
    assert_eq!(records, sample_records());

    let trend = cache.load(&data.trend).unwrap();
    let table = TrendTable::from_sheet(&trend, &HeaderPolicy::trend_region()).unwrap();
    assert_eq!(table.years(), vec![2022, 2023, 2024]);
    assert_eq!(table.long.len(), 15);
}

#[test]
fn repeated_loads_read_each_file_once() {
    let data = sample_data_dir();
    let cache = SheetCache::default();
    for _ in 0..3 {
        cache.load(&data.cases).unwrap();
        cache.load(&data.trend).unwrap();
    }
    let stats = cache.stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 4);
}

#[test]
fn missing_file_is_fatal() {
    let data = sample_data_dir();
    let cache = SheetCache::default();
    let err = cache.load(data.dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}

#[test]
fn corrupt_workbook_is_reported() {
    let data = sample_data_dir();
    let path = write_file(&data.dir, "broken.xlsx", "not a zip archive");
    let err = SheetCache::default().load(&path).unwrap_err();
    assert!(matches!(err, IngestError::Workbook { .. }));
    assert_eq!(err.path(), path.as_path());
}
