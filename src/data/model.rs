use std::collections::BTreeSet;

use super::error::{DataError, Result};

/// Name given to column 0 on load, whatever its header says.
pub const CATEGORY_COLUMN: &str = "category";
/// Name given to column 1 on load, whatever its header says.
pub const AGE_GROUP_COLUMN: &str = "age_group";

const CATEGORY_IDX: usize = 0;
const AGE_GROUP_IDX: usize = 1;
const FIRST_VALUE_IDX: usize = 2;

// ---------------------------------------------------------------------------
// RawTable – the parsed upload, all cells as text
// ---------------------------------------------------------------------------

/// A rectangular text table as read from the uploaded CSV.
///
/// The layout is fixed by position: column 0 classifies the row, column 1
/// names the age group, and every further column holds one year's value.
/// Header text of the first two columns is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from a header row and data rows, renaming the two
    /// leading columns.
    ///
    /// Rows shorter than the header are kept (missing cells read as absent);
    /// rows wider than the header are rejected.
    pub fn from_records(mut headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if headers.len() < FIRST_VALUE_IDX {
            return Err(DataError::TooFewColumns {
                found: headers.len(),
            });
        }
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() > headers.len())
        {
            return Err(DataError::RaggedRow {
                row,
                expected: headers.len(),
                found: cells.len(),
            });
        }

        headers[CATEGORY_IDX] = CATEGORY_COLUMN.to_string();
        headers[AGE_GROUP_IDX] = AGE_GROUP_COLUMN.to_string();

        Ok(RawTable { headers, rows })
    }

    /// Column labels after renaming.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Labels of the year columns, in source order.
    pub fn value_columns(&self) -> &[String] {
        &self.headers[FIRST_VALUE_IDX..]
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrowed views of every data row, in source order.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> + Clone {
        let headers = self.headers.as_slice();
        self.rows
            .iter()
            .enumerate()
            .map(move |(index, cells)| RowView {
                index,
                headers,
                cells,
            })
    }
}

// ---------------------------------------------------------------------------
// RowView – one borrowed row of a RawTable
// ---------------------------------------------------------------------------

/// A borrowed row of a [`RawTable`].  Age records are the row views that
/// pass [`filter_age_records`](super::reshape::filter_age_records).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowView<'a> {
    index: usize,
    headers: &'a [String],
    cells: &'a [String],
}

impl<'a> RowView<'a> {
    /// Position of the row in its table (0 = first data row).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cell(&self, column: usize) -> Option<&'a str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn category(&self) -> Option<&'a str> {
        self.cell(CATEGORY_IDX)
    }

    pub fn age_group(&self) -> Option<&'a str> {
        self.cell(AGE_GROUP_IDX)
    }

    /// `(column label, cell)` for every year column; the cell is `None` when
    /// the row is shorter than the header.
    pub fn value_cells(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + 'a {
        let (headers, cells) = (self.headers, self.cells);
        headers
            .iter()
            .enumerate()
            .skip(FIRST_VALUE_IDX)
            .map(move |(col, label)| (label.as_str(), cells.get(col).map(String::as_str)))
    }
}

// ---------------------------------------------------------------------------
// TidyRow – one (age group, year, value) observation
// ---------------------------------------------------------------------------

/// One observation of the long-form table.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyRow {
    pub age_group: String,
    /// Column label the value came from; not necessarily numeric.
    pub year: String,
    /// Always finite.
    pub value: f64,
}

impl TidyRow {
    pub fn new(age_group: impl Into<String>, year: impl Into<String>, value: f64) -> Self {
        TidyRow {
            age_group: age_group.into(),
            year: year.into(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// ReadingDataset – the complete reshaped upload
// ---------------------------------------------------------------------------

/// Counters describing how a table was reduced to tidy rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub raw_rows: usize,
    pub age_records: usize,
    pub value_columns: usize,
    pub dropped_sentinels: usize,
}

/// Tidy rows plus the distinct years and age groups observed in them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingDataset {
    /// Rows in source order (record-major, then column order).
    pub rows: Vec<TidyRow>,
    /// Distinct year labels, lexicographic.
    pub years: BTreeSet<String>,
    /// Distinct age groups, lexicographic.
    pub age_groups: BTreeSet<String>,
    pub summary: LoadSummary,
}

impl ReadingDataset {
    /// Index the distinct values of `rows`.
    pub fn from_rows(rows: Vec<TidyRow>, summary: LoadSummary) -> Self {
        let years = super::reshape::distinct_years(&rows);
        let age_groups = super::reshape::distinct_age_groups(&rows);
        ReadingDataset {
            rows,
            years,
            age_groups,
            summary,
        }
    }

    /// Number of tidy rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Smallest and largest value among `rows`, or `None` when there are none.
pub fn value_range<'a>(rows: impl IntoIterator<Item = &'a TidyRow>) -> Option<(f64, f64)> {
    rows.into_iter().fold(None, |acc, r| match acc {
        None => Some((r.value, r.value)),
        Some((lo, hi)) => Some((lo.min(r.value), hi.max(r.value))),
    })
}
