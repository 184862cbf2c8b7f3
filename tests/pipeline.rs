//! End-to-end tests of the load → filter → reshape → query pipeline.

use std::collections::HashMap;
use std::io::Write;

use reading_dashboard::data::{
    build_dataset, distinct_age_groups, distinct_years, filter_age_records, load,
    load_dataset_file, query, to_tidy, DataError, ErrorKind, FilterSelection, TextEncoding,
    TidyRow,
};

const SCENARIO: &str = "구분1,연령대,2022,2023\n연령,10대,5.0,-\n연령,20대,3.2,4.1\n";

/// A KOSIS-style export: totals, age, sex and education breakdowns mixed.
const SURVEY: &str = "\
구분별(1),구분별(2),2015,2017,2019,2021
전체,소계,9.1,8.3,7.5,4.5
연령별,10대,,,,
연령별,20대,12.5,11.1,10.2,7.3
연령별,30대,10.1,-,8.7,5.1
성별,남자,8.7,7.8,7.0,4.2
연령별,60대 이상,4.4,-,-,2.3
";

fn utf8() -> TextEncoding {
    TextEncoding::utf_8()
}

fn survey_without_blank_row() -> String {
    SURVEY
        .lines()
        .filter(|l| !l.ends_with(",,,,"))
        .map(|l| format!("{l}\n"))
        .collect()
}

#[test]
fn test_scenario_tidy_rows() {
    let table = load(SCENARIO.as_bytes(), utf8()).unwrap();
    let rows = to_tidy(filter_age_records(table.rows())).unwrap();
    assert_eq!(
        rows,
        vec![
            TidyRow::new("10대", "2022", 5.0),
            TidyRow::new("20대", "2022", 3.2),
            TidyRow::new("20대", "2023", 4.1),
        ]
    );
}

#[test]
fn test_scenario_bad_cell_is_parse_error() {
    let input = SCENARIO.replace("3.2", "abc");
    let table = load(input.as_bytes(), utf8()).unwrap();
    let err = to_tidy(filter_age_records(table.rows())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("\"abc\""));
}

#[test]
fn test_headers_renamed_whatever_they_say() {
    for header in ["x,y,2022", "category,age_group,2022", "연령대,구분1,2022"] {
        let input = format!("{header}\n연령,10대,1\n");
        let table = load(input.as_bytes(), utf8()).unwrap();
        assert_eq!(&table.headers()[..2], &["category", "age_group"]);
    }
}

#[test]
fn test_blank_age_row_is_parse_error() {
    let table = load(SURVEY.as_bytes(), utf8()).unwrap();
    let err = build_dataset(&table).unwrap_err();
    match err {
        DataError::Parse {
            age_group, raw, ..
        } => {
            assert_eq!(age_group, "10대");
            assert_eq!(raw, "");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_row_count_accounts_for_sentinels() {
    let input = survey_without_blank_row();
    let table = load(input.as_bytes(), utf8()).unwrap();
    let records: Vec<_> = filter_age_records(table.rows()).collect();
    let sentinels = records
        .iter()
        .flat_map(|r| r.value_cells())
        .filter(|(_, cell)| *cell == Some("-"))
        .count();

    let rows = to_tidy(records.iter().copied()).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(sentinels, 3);
    assert_eq!(
        rows.len(),
        records.len() * table.value_columns().len() - sentinels
    );
}

#[test]
fn test_per_group_sums_survive_reshape() {
    let input = survey_without_blank_row();
    let table = load(input.as_bytes(), utf8()).unwrap();
    let records: Vec<_> = filter_age_records(table.rows()).collect();

    let mut wide_sums: HashMap<String, f64> = HashMap::new();
    for r in &records {
        let total: f64 = r
            .value_cells()
            .filter_map(|(_, cell)| cell)
            .filter(|cell| *cell != "-")
            .map(|cell| cell.parse::<f64>().unwrap())
            .sum();
        wide_sums.insert(r.age_group().unwrap().to_string(), total);
    }

    let mut tidy_sums: HashMap<String, f64> = HashMap::new();
    for row in to_tidy(records.iter().copied()).unwrap() {
        *tidy_sums.entry(row.age_group).or_default() += row.value;
    }

    assert_eq!(wide_sums.len(), tidy_sums.len());
    for (group, wide) in &wide_sums {
        assert!((tidy_sums[group] - wide).abs() < 1e-9, "{group}");
    }
}

#[test]
fn test_full_selection_query_is_identity() {
    let input = survey_without_blank_row();
    let ds = build_dataset(&load(input.as_bytes(), utf8()).unwrap()).unwrap();
    let selection = FilterSelection {
        years: distinct_years(&ds.rows),
        age_groups: distinct_age_groups(&ds.rows),
    };
    let out: Vec<TidyRow> = query(&ds.rows, &selection).into_iter().cloned().collect();
    assert_eq!(out, ds.rows);
}

#[test]
fn test_empty_selection_query_is_empty() {
    let ds = build_dataset(&load(SCENARIO.as_bytes(), utf8()).unwrap()).unwrap();

    let no_years = FilterSelection {
        years: Default::default(),
        age_groups: ds.age_groups.clone(),
    };
    assert!(query(&ds.rows, &no_years).is_empty());

    let no_groups = FilterSelection {
        years: ds.years.clone(),
        age_groups: Default::default(),
    };
    assert!(query(&ds.rows, &no_groups).is_empty());
}

#[test]
fn test_no_age_rows_is_empty_not_error() {
    let input = "구분1,구분2,2022\n성별,남자,4.0\n전체,소계,4.1\n";
    let ds = build_dataset(&load(input.as_bytes(), utf8()).unwrap()).unwrap();
    assert!(ds.is_empty());
    assert!(ds.years.is_empty());
    assert_eq!(ds.summary.raw_rows, 2);
}

#[test]
fn test_load_euc_kr_file() {
    let (bytes, _, _) = encoding_rs::EUC_KR.encode(SCENARIO);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();

    let ds = load_dataset_file(file.path(), TextEncoding::euc_kr()).unwrap();
    assert_eq!(ds.len(), 3);
    assert!(ds.age_groups.contains("20대"));

    let err = load_dataset_file(file.path(), utf8()).unwrap_err();
    let data_err = err.downcast_ref::<DataError>().unwrap();
    assert_eq!(data_err.kind(), ErrorKind::Format);
}

#[test]
fn test_missing_file_has_path_context() {
    let err = load_dataset_file("/nonexistent/survey.csv".as_ref(), utf8()).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/survey.csv"));
    assert!(err.downcast_ref::<DataError>().is_none());
}
