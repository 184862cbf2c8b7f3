use thiserror::Error;

/// Broad classification of a [`DataError`], used by the UI to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be turned into a table at all.
    Format,
    /// The table was read but a value cell is not a number.
    Parse,
}

/// Errors raised while ingesting or reshaping survey data.
#[derive(Debug, Error)]
pub enum DataError {
    /// The bytes are not valid text under the declared encoding.
    #[error("input is not valid {encoding} text")]
    Undecodable { encoding: &'static str },

    /// The header row has fewer than the two fixed leading columns.
    #[error("expected at least two columns, found {found}")]
    TooFewColumns { found: usize },

    /// A data row is wider than the header row.
    #[error("row {row}: expected at most {expected} cells, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The CSV reader rejected the input.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A retained value cell failed numeric coercion.
    #[error("cannot read {raw:?} as a number (age group {age_group:?}, year {year:?})")]
    Parse {
        age_group: String,
        year: String,
        raw: String,
    },
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::Parse { .. } => ErrorKind::Parse,
            DataError::Undecodable { .. }
            | DataError::TooFewColumns { .. }
            | DataError::RaggedRow { .. }
            | DataError::Csv(_) => ErrorKind::Format,
        }
    }
}

/// A convenience `Result` alias for the data layer.
pub type Result<T> = std::result::Result<T, DataError>;
