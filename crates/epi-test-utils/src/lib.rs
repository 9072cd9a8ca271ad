//! Testing utilities for epidash workspace
//!
//! Shared sheet fixtures, record builders and on-disk CSV helpers.

#![allow(missing_docs)]

use epi_core::{CellValue, RegionRecord, Sheet};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Five regions with 2024 cases and population
pub const SAMPLE_CASES: [(&str, u64, u64); 5] = [
    ("Kabupaten Bogor", 21_000, 5_600_000),
    ("Kota Depok", 6_500, 2_100_000),
    ("Kabupaten Bekasi", 9_800, 3_300_000),
    ("Kota Banjar", 300, 210_000),
    ("Kabupaten Garut", 9_800, 2_700_000),
];

/// Three-year trend for the same regions (2022, 2023, 2024)
pub const SAMPLE_TREND: [(&str, [u64; 3]); 5] = [
    ("Kabupaten Bogor", [12_000, 17_500, 21_000]),
    ("Kota Depok", [4_000, 5_200, 6_500]),
    ("Kabupaten Bekasi", [9_800, 9_000, 9_800]),
    ("Kota Banjar", [0, 120, 300]),
    ("Kabupaten Garut", [5_000, 7_400, 9_800]),
];

pub fn sample_records() -> Vec<RegionRecord> {
    SAMPLE_CASES
        .iter()
        .map(|&(region, cases, population)| RegionRecord::new(region, cases, population))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
pub fn count(n: u64) -> CellValue {
    CellValue::Number(n as f64)
}

pub fn case_sheet() -> Sheet {
    let rows = SAMPLE_CASES
        .iter()
        .map(|&(region, cases, population)| vec![region.into(), count(cases), count(population)])
        .collect();
    Sheet::new(["kabupaten", "kasus_2024", "populasi_2024"], rows)
}

pub fn trend_sheet() -> Sheet {
    let rows = SAMPLE_TREND
        .iter()
        .map(|&(region, years)| {
            let mut row = vec![CellValue::from(region)];
            row.extend(years.iter().map(|&n| count(n)));
            row
        })
        .collect();
    Sheet::new(["Kabupaten/Kota", "Tahun 2022", "Tahun 2023", "Tahun 2024"], rows)
}

/// Render a sheet as CSV text, quoting fields that need it
pub fn sheet_to_csv(sheet: &Sheet) -> String {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    writer.write_record(&sheet.headers).unwrap();
    for row in &sheet.rows {
        writer.write_record(row.iter().map(ToString::to_string)).unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

/// Temporary directory holding `cases.csv` and `trend.csv`
pub struct DataDir {
    pub dir: TempDir,
    pub cases: PathBuf,
    pub trend: PathBuf,
}

pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

pub fn sample_data_dir() -> DataDir {
    let dir = tempfile::tempdir().unwrap();
    let cases = write_file(&dir, "cases.csv", &sheet_to_csv(&case_sheet()));
    let trend = write_file(&dir, "trend.csv", &sheet_to_csv(&trend_sheet()));
    DataDir { dir, cases, trend }
}
