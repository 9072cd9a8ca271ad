use epi_core::{
    change_ranking, provincial_prevalence, prevalence_table, region_records, top_n, CaseColumns,
    CellValue, HeaderPolicy, RegionRecord, Sheet, TrendLongRecord, TrendTable,
};
use epi_test_utils::{case_sheet, sample_records, trend_sheet};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn arb_records() -> impl Strategy<Value = Vec<RegionRecord>> {
    proptest::collection::vec((0u64..50_000, 1u64..10_000_000), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (cases, population))| RegionRecord::new(format!("R{i:02}"), cases, population))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_prevalence_is_exact(cases in 0u64..1_000_000, population in 1u64..100_000_000) {
        let record = RegionRecord::new("X", cases, population);
        let expected = cases as f64 / population as f64 * 100_000.0;
        prop_assert_eq!(record.prevalence_per_100k(), Some(expected));
    }

    #[test]
    fn prop_top_n_is_sorted_prefix(records in arb_records(), n in 0usize..15) {
        let top = top_n(&records, n);
        prop_assert_eq!(top.len(), n.min(records.len()));
        for pair in top.windows(2) {
            prop_assert!(pair[0].cases >= pair[1].cases);
        }
        // nothing outside the selection beats its smallest member
        if let Some(last) = top.last() {
            let outside = records.iter().filter(|r| !top.contains(r));
            for r in outside {
                prop_assert!(r.cases <= last.cases);
            }
        }
    }

    #[test]
    fn prop_provincial_matches_sums(records in arb_records()) {
        let p = provincial_prevalence(&records);
        let cases: u128 = records.iter().map(|r| u128::from(r.cases)).sum();
        let population: u128 = records.iter().map(|r| u128::from(r.population)).sum();
        prop_assert_eq!(p.total_cases, cases);
        if population == 0 {
            prop_assert!(p.per_100k.is_none());
        } else {
            let expected = cases as f64 / population as f64 * 100_000.0;
            prop_assert!((p.per_100k.unwrap() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_unpivot_emits_one_record_per_cell(
        rows in proptest::collection::vec(
            ("[A-Z][a-z]{1,6}", proptest::collection::vec(proptest::option::of(0u64..1000), 3)),
            0..20,
        )
    ) {
        let sheet_rows: Vec<Vec<CellValue>> = rows
            .iter()
            .map(|(region, values)| {
                let mut row = vec![CellValue::from(region.as_str())];
                row.extend(values.iter().map(|v| match v {
                    Some(n) => CellValue::Number(*n as f64),
                    None => CellValue::from("n/a"),
                }));
                row
            })
            .collect();
        let sheet = Sheet::new(["Kabupaten", "Tahun 2024", "Tahun 2022", "Tahun 2023"], sheet_rows);
        let table = TrendTable::from_sheet(&sheet, &HeaderPolicy::trend_region()).unwrap();

        prop_assert_eq!(table.long.len(), rows.len() * 3);
        for pair in table.long.windows(2) {
            let key = |r: &TrendLongRecord| (r.region.clone(), r.year);
            prop_assert!(key(&pair[0]) <= key(&pair[1]));
        }

        let total: u128 = rows.iter().flat_map(|(_, v)| v.iter().flatten()).map(|&n| u128::from(n)).sum();
        let summed: u128 = table.yearly_totals().iter().map(|t| t.cases).sum();
        prop_assert_eq!(summed, total);
    }
}

#[test]
fn unpivot_reference_example() {
    let sheet = Sheet::new(
        ["kabupaten", "Tahun 2022", "Tahun 2023", "Tahun 2024"],
        vec![vec!["X".into(), 10i64.into(), 20i64.into(), 30i64.into()]],
    );
    let table = TrendTable::from_sheet(&sheet, &HeaderPolicy::trend_region()).unwrap();
    let got: Vec<(&str, u16, Option<u64>)> = table
        .long
        .iter()
        .map(|r| (r.region.as_str(), r.year, r.cases))
        .collect();
    assert_eq!(
        got,
        vec![("X", 2022, Some(10)), ("X", 2023, Some(20)), ("X", 2024, Some(30))]
    );
}

#[test]
fn fixture_case_sheet_parses() {
    let records = region_records(&case_sheet(), &CaseColumns::default()).unwrap();
    assert_eq!(records, sample_records());

    // Bekasi and Garut tie on 9 800; Bekasi comes first in the sheet
    let top = top_n(&records, 3);
    let names: Vec<&str> = top.iter().map(|r| r.region.as_str()).collect();
    assert_eq!(names, vec!["Kabupaten Bogor", "Kabupaten Bekasi", "Kabupaten Garut"]);
}

#[test]
fn transform_is_idempotent() {
    let run = || {
        let records = region_records(&case_sheet(), &CaseColumns::default()).unwrap();
        let trend = TrendTable::from_sheet(&trend_sheet(), &HeaderPolicy::trend_region()).unwrap();
        let ranking = change_ranking(&trend, 2022, 2024).unwrap();
        serde_json::to_string(&(
            prevalence_table(&records),
            provincial_prevalence(&records),
            &trend.long,
            trend.yearly_totals(),
            ranking,
        ))
        .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn fixture_change_ranking() {
    let trend = TrendTable::from_sheet(&trend_sheet(), &HeaderPolicy::trend_region()).unwrap();
    let ranking = change_ranking(&trend, 2022, 2024).unwrap();
    let order: Vec<&str> = ranking.iter().map(|r| r.region.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "Kabupaten Garut",  // +96%
            "Kabupaten Bogor",  // +75%
            "Kota Depok",       // +62.5%
            "Kabupaten Bekasi", // 0%
            "Kota Banjar",      // no baseline
        ]
    );
    assert_eq!(ranking.last().unwrap().percent, None);
}
