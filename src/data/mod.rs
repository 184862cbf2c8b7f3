/// Data layer: core types, loading, reshaping and filtering.
///
/// Architecture:
/// ```text
///  CSV bytes + declared encoding
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + parse → RawTable (category, age_group, years…)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reshape   │  age records → TidyRow (age_group, year, value)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ ReadingDataset │  Vec<TidyRow>, distinct years / age groups
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → filtered indices
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod reshape;

pub use error::{DataError, ErrorKind};
pub use filter::{filtered_indices, query, FilterSelection};
pub use loader::{load, load_dataset_file, load_file, TextEncoding};
pub use model::{RawTable, ReadingDataset, RowView, TidyRow};
pub use reshape::{
    build_dataset, distinct_age_groups, distinct_years, filter_age_records, sorted_years,
    to_tidy, YearOrder,
};
