use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::error::{DataError, Result};
use super::model::{LoadSummary, RawTable, ReadingDataset, RowView, TidyRow};

/// Substring of the `category` cell that marks an age-group breakdown row.
pub const AGE_MARKER: &str = "연령";

/// Cell content meaning "no data" in the survey export.
pub const SENTINEL: &str = "-";

// ---------------------------------------------------------------------------
// Age record selection
// ---------------------------------------------------------------------------

/// Keep only rows whose `category` contains [`AGE_MARKER`].
///
/// Lazy and restartable: clone the iterator to walk it again.  Rows with no
/// category cell never match.
pub fn filter_age_records<'a, I>(records: I) -> impl Iterator<Item = RowView<'a>> + Clone
where
    I: IntoIterator<Item = RowView<'a>>,
    I::IntoIter: Clone,
{
    records.into_iter().filter(is_age_record)
}

fn is_age_record(row: &RowView<'_>) -> bool {
    row.category().is_some_and(|c| c.contains(AGE_MARKER))
}

// ---------------------------------------------------------------------------
// Wide → long
// ---------------------------------------------------------------------------

/// Pivot age records into one [`TidyRow`] per (age group, year column).
///
/// Sentinel cells are dropped.  Every other cell must parse as a finite
/// number, otherwise the whole reshape fails with [`DataError::Parse`].
/// Output order is record order, then column order.
pub fn to_tidy<'a>(records: impl IntoIterator<Item = RowView<'a>>) -> Result<Vec<TidyRow>> {
    pivot(records).map(|(rows, _)| rows)
}

/// Like [`to_tidy`], also returning how many sentinel cells were dropped.
fn pivot<'a>(records: impl IntoIterator<Item = RowView<'a>>) -> Result<(Vec<TidyRow>, usize)> {
    let mut rows = Vec::new();
    let mut dropped = 0;

    for record in records {
        let age_group = record.age_group().unwrap_or_default();
        for (year, cell) in record.value_cells() {
            if cell == Some(SENTINEL) {
                dropped += 1;
                continue;
            }
            let value = cell.and_then(parse_value).ok_or_else(|| DataError::Parse {
                age_group: age_group.to_string(),
                year: year.to_string(),
                raw: cell.unwrap_or_default().to_string(),
            })?;
            rows.push(TidyRow::new(age_group, year, value));
        }
    }

    Ok((rows, dropped))
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Filter and reshape a whole table into an indexed dataset.
pub fn build_dataset(table: &RawTable) -> Result<ReadingDataset> {
    let records = filter_age_records(table.rows());
    let age_records = records.clone().count();
    let (rows, dropped_sentinels) = pivot(records)?;

    let summary = LoadSummary {
        raw_rows: table.len(),
        age_records,
        value_columns: table.value_columns().len(),
        dropped_sentinels,
    };
    log::debug!(
        "{} of {} rows are age records; {} tidy rows, {} sentinel cells dropped",
        summary.age_records,
        summary.raw_rows,
        rows.len(),
        summary.dropped_sentinels
    );

    Ok(ReadingDataset::from_rows(rows, summary))
}

// ---------------------------------------------------------------------------
// Distinct values
// ---------------------------------------------------------------------------

/// Distinct year labels, sorted lexicographically on the raw text.
pub fn distinct_years(rows: &[TidyRow]) -> BTreeSet<String> {
    rows.iter().map(|r| r.year.clone()).collect()
}

/// Distinct age groups, sorted lexicographically on the raw text.
pub fn distinct_age_groups(rows: &[TidyRow]) -> BTreeSet<String> {
    rows.iter().map(|r| r.age_group.clone()).collect()
}

/// How year labels are ordered on chart axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearOrder {
    /// Raw label text order; `"10"` sorts before `"9"`.
    #[default]
    Lexicographic,
    /// Labels that parse as numbers first, in numeric order, then the rest
    /// lexicographically.
    Numeric,
}

impl YearOrder {
    pub const ALL: [YearOrder; 2] = [YearOrder::Lexicographic, YearOrder::Numeric];
}

impl fmt::Display for YearOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearOrder::Lexicographic => f.write_str("lexicographic"),
            YearOrder::Numeric => f.write_str("numeric"),
        }
    }
}

impl FromStr for YearOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexicographic" | "lex" => Ok(YearOrder::Lexicographic),
            "numeric" | "num" => Ok(YearOrder::Numeric),
            other => Err(format!("unknown year order '{other}'")),
        }
    }
}

/// Year labels in display order.
pub fn sorted_years<'a>(
    years: impl IntoIterator<Item = &'a String>,
    order: YearOrder,
) -> Vec<&'a str> {
    let mut out: Vec<&str> = years.into_iter().map(String::as_str).collect();
    match order {
        YearOrder::Lexicographic => out.sort_unstable(),
        YearOrder::Numeric => out.sort_by(|a, b| numeric_cmp(a, b)),
    }
    out
}

fn numeric_cmp(a: &str, b: &str) -> Ordering {
    let na = a.trim().parse::<f64>().ok();
    let nb = b.trim().parse::<f64>().ok();
    match (na, nb) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
