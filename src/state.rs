use std::path::{Path, PathBuf};

use reading_dashboard::config::DashboardConfig;
use reading_dashboard::data::{
    filtered_indices, load_dataset_file, sorted_years, DataError, ErrorKind, FilterSelection,
    ReadingDataset, TextEncoding, TidyRow, YearOrder,
};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which visualisation the central panel shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartTab {
    #[default]
    Line,
    Bar,
    Heatmap,
    Table,
}

impl ChartTab {
    pub const ALL: [ChartTab; 4] = [
        ChartTab::Line,
        ChartTab::Bar,
        ChartTab::Heatmap,
        ChartTab::Table,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartTab::Line => "📈 Trend",
            ChartTab::Bar => "📊 Bars",
            ChartTab::Heatmap => "Heatmap",
            ChartTab::Table => "🔍 Data",
        }
    }
}

/// What the central panel should present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    /// Nothing opened yet.
    NoFile,
    /// The last file could not be loaded.
    Failed(&'a str),
    /// The file parsed but holds no age-group rows.
    NoAgeRecords,
    /// Rows exist but the current selection hides all of them.
    EmptySelection,
    Ready(&'a ReadingDataset),
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<ReadingDataset>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Selected years and age groups.
    pub selection: FilterSelection,

    /// Indices of rows passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Colours for the age groups of the loaded dataset.
    pub color_map: Option<ColorMap>,

    /// Declared encoding of the next file to open.
    pub encoding: Option<TextEncoding>,

    pub year_order: YearOrder,

    pub tab: ChartTab,

    /// Error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn from_config(config: &DashboardConfig) -> Self {
        let mut state = AppState {
            encoding: config.encoding,
            year_order: config.year_order,
            ..Default::default()
        };
        if let Some(path) = &config.file {
            state.open(path);
        }
        state
    }

    /// Load, reshape and show a file, replacing whatever was shown before.
    pub fn open(&mut self, path: &Path) {
        self.clear();
        self.source = Some(path.to_path_buf());

        let Some(encoding) = self.encoding else {
            self.status_message = Some("Choose the file's text encoding first.".to_string());
            return;
        };

        match load_dataset_file(path, encoding) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} ({encoding}): {} tidy rows, {} age groups, {} years",
                    path.display(),
                    dataset.len(),
                    dataset.age_groups.len(),
                    dataset.years.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(failure_message(&e, encoding));
            }
        }
    }

    /// Change the declared encoding and re-read the current file with it.
    pub fn set_encoding(&mut self, encoding: TextEncoding) {
        if self.encoding == Some(encoding) {
            return;
        }
        self.encoding = Some(encoding);
        if let Some(path) = self.source.clone() {
            self.open(&path);
        }
    }

    /// Ingest a newly reshaped dataset, select everything and build colours.
    pub fn set_dataset(&mut self, dataset: ReadingDataset) {
        self.selection = FilterSelection::all(&dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.color_map = Some(ColorMap::new(&dataset.age_groups));
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    fn clear(&mut self) {
        self.dataset = None;
        self.source = None;
        self.selection = FilterSelection::default();
        self.visible_indices.clear();
        self.color_map = None;
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(&ds.rows, &self.selection);
        }
    }

    pub fn toggle_year(&mut self, year: &str) {
        self.selection.toggle_year(year);
        self.refilter();
    }

    pub fn toggle_age_group(&mut self, age_group: &str) {
        self.selection.toggle_age_group(age_group);
        self.refilter();
    }

    pub fn select_all_years(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.select_all_years(ds);
            self.refilter();
        }
    }

    pub fn select_no_years(&mut self) {
        self.selection.select_no_years();
        self.refilter();
    }

    pub fn select_all_age_groups(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.select_all_age_groups(ds);
            self.refilter();
        }
    }

    pub fn select_no_age_groups(&mut self) {
        self.selection.select_no_age_groups();
        self.refilter();
    }

    pub fn view(&self) -> View<'_> {
        match (&self.dataset, &self.status_message) {
            (Some(ds), _) if ds.is_empty() => View::NoAgeRecords,
            (Some(_), _) if self.visible_indices.is_empty() => View::EmptySelection,
            (Some(ds), _) => View::Ready(ds),
            (None, Some(msg)) => View::Failed(msg),
            (None, None) => View::NoFile,
        }
    }

    /// Rows passing the selection, in source order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &TidyRow> {
        let rows = self.dataset.as_ref().map(|ds| ds.rows.as_slice()).unwrap_or_default();
        self.visible_indices.iter().filter_map(move |&i| rows.get(i))
    }

    /// All observed years in axis order.
    pub fn axis_years(&self) -> Vec<&str> {
        match &self.dataset {
            Some(ds) => sorted_years(&ds.years, self.year_order),
            None => Vec::new(),
        }
    }

    /// Selected years in axis order.
    pub fn selected_years(&self) -> Vec<&str> {
        sorted_years(&self.selection.years, self.year_order)
    }

    /// Selected age groups in legend order.
    pub fn selected_age_groups(&self) -> Vec<&str> {
        self.selection.age_groups.iter().map(String::as_str).collect()
    }
}

fn failure_message(err: &anyhow::Error, encoding: TextEncoding) -> String {
    let hint = match err.downcast_ref::<DataError>().map(DataError::kind) {
        Some(ErrorKind::Format) => {
            format!("The file is not a readable survey table in {encoding}.")
        }
        Some(ErrorKind::Parse) => "The file has a value that is not a number.".to_string(),
        None => "The file could not be read.".to_string(),
    };
    format!("{hint}\n{err:#}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    fn utf8_state() -> AppState {
        AppState {
            encoding: Some(TextEncoding::utf_8()),
            ..Default::default()
        }
    }

    const SAMPLE: &str = "구분1,연령대,2022,2023\n연령,10대,5.0,-\n연령,20대,3.2,4.1\n";

    #[test]
    fn test_initial_view_is_no_file() {
        assert_eq!(AppState::default().view(), View::NoFile);
    }

    #[test]
    fn test_open_selects_everything() {
        let file = write_csv(SAMPLE.as_bytes());
        let mut state = utf8_state();
        state.open(file.path());

        assert!(matches!(state.view(), View::Ready(_)));
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.selected_years(), vec!["2022", "2023"]);
        assert_eq!(state.selected_age_groups(), vec!["10대", "20대"]);
    }

    #[test]
    fn test_open_without_encoding_refuses() {
        let file = write_csv(SAMPLE.as_bytes());
        let mut state = AppState::default();
        state.open(file.path());
        assert!(matches!(state.view(), View::Failed(_)));
        assert!(state.dataset.is_none());
    }

    #[test]
    fn test_unparseable_file_discards_previous_dataset() {
        let good = write_csv(SAMPLE.as_bytes());
        let bad = write_csv("a,b,2022\n연령,10대,abc\n".as_bytes());
        let mut state = utf8_state();

        state.open(good.path());
        state.open(bad.path());

        assert!(state.dataset.is_none());
        match state.view() {
            View::Failed(msg) => assert!(msg.contains("not a number")),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_wrong_encoding_then_reopen() {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode(SAMPLE);
        let file = write_csv(&bytes);
        let mut state = utf8_state();

        state.open(file.path());
        assert!(matches!(state.view(), View::Failed(_)));

        state.set_encoding(TextEncoding::euc_kr());
        assert!(matches!(state.view(), View::Ready(_)));
    }

    #[test]
    fn test_no_age_rows_is_not_an_error() {
        let file = write_csv("구분1,구분2,2022\n성별,남자,4.0\n".as_bytes());
        let mut state = utf8_state();
        state.open(file.path());
        assert_eq!(state.view(), View::NoAgeRecords);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_empty_selection_view() {
        let file = write_csv(SAMPLE.as_bytes());
        let mut state = utf8_state();
        state.open(file.path());

        state.select_no_age_groups();
        assert_eq!(state.view(), View::EmptySelection);

        state.select_all_age_groups();
        state.toggle_year("2022");
        let rows: Vec<_> = state.visible_rows().collect();
        assert_eq!(rows, vec![&TidyRow::new("20대", "2023", 4.1)]);
    }
}
