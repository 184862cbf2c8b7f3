//! Load age-stratified reading-volume survey CSVs, reshape them into tidy
//! `(age_group, year, value)` rows and query them by year and age group.
//!
//! ```no_run
//! use reading_dashboard::data::{self, FilterSelection, TextEncoding};
//!
//! let bytes = std::fs::read("survey.csv")?;
//! let table = data::load(&bytes, TextEncoding::euc_kr())?;
//! let dataset = data::build_dataset(&table)?;
//! let visible = data::query(&dataset.rows, &FilterSelection::all(&dataset));
//! println!("{} rows visible", visible.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod data;
