use std::collections::BTreeSet;

use super::model::{ReadingDataset, TidyRow};

// ---------------------------------------------------------------------------
// Filter selection: which years and age groups are shown
// ---------------------------------------------------------------------------

/// The years and age groups currently selected for display.
///
/// An empty set selects nothing; it never means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: BTreeSet<String>,
    pub age_groups: BTreeSet<String>,
}

impl FilterSelection {
    /// Select every observed year and age group (show everything).
    pub fn all(dataset: &ReadingDataset) -> Self {
        FilterSelection {
            years: dataset.years.clone(),
            age_groups: dataset.age_groups.clone(),
        }
    }

    pub fn matches(&self, row: &TidyRow) -> bool {
        self.years.contains(&row.year) && self.age_groups.contains(&row.age_group)
    }

    pub fn toggle_year(&mut self, year: &str) {
        toggle(&mut self.years, year);
    }

    pub fn toggle_age_group(&mut self, age_group: &str) {
        toggle(&mut self.age_groups, age_group);
    }

    pub fn select_all_years(&mut self, dataset: &ReadingDataset) {
        self.years = dataset.years.clone();
    }

    pub fn select_no_years(&mut self) {
        self.years.clear();
    }

    pub fn select_all_age_groups(&mut self, dataset: &ReadingDataset) {
        self.age_groups = dataset.age_groups.clone();
    }

    pub fn select_no_age_groups(&mut self) {
        self.age_groups.clear();
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Return indices of rows whose year and age group are both selected,
/// in source order.
pub fn filtered_indices(rows: &[TidyRow], selection: &FilterSelection) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| selection.matches(row))
        .map(|(i, _)| i)
        .collect()
}

/// The selected subsequence of `rows`.  `rows` is left untouched, so the
/// same base collection can be queried with any number of selections.
pub fn query<'a>(rows: &'a [TidyRow], selection: &FilterSelection) -> Vec<&'a TidyRow> {
    rows.iter().filter(|row| selection.matches(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LoadSummary;

    fn dataset() -> ReadingDataset {
        ReadingDataset::from_rows(
            vec![
                TidyRow::new("10대", "2022", 5.0),
                TidyRow::new("20대", "2022", 3.2),
                TidyRow::new("20대", "2023", 4.1),
            ],
            LoadSummary::default(),
        )
    }

    #[test]
    fn test_full_selection_returns_everything() {
        let ds = dataset();
        let sel = FilterSelection::all(&ds);
        assert_eq!(filtered_indices(&ds.rows, &sel), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_selection_returns_nothing() {
        let ds = dataset();
        let mut sel = FilterSelection::all(&ds);
        sel.select_no_years();
        assert!(query(&ds.rows, &sel).is_empty());

        let mut sel = FilterSelection::all(&ds);
        sel.select_no_age_groups();
        assert!(query(&ds.rows, &sel).is_empty());
    }

    #[test]
    fn test_toggle_narrows_and_restores() {
        let ds = dataset();
        let mut sel = FilterSelection::all(&ds);

        sel.toggle_year("2022");
        let rows = query(&ds.rows, &sel);
        assert_eq!(rows, vec![&TidyRow::new("20대", "2023", 4.1)]);

        sel.toggle_year("2022");
        sel.toggle_age_group("20대");
        assert_eq!(filtered_indices(&ds.rows, &sel), vec![0]);

        sel.select_all_age_groups(&ds);
        assert_eq!(sel, FilterSelection::all(&ds));
    }

    #[test]
    fn test_unknown_labels_select_nothing() {
        let ds = dataset();
        let sel = FilterSelection {
            years: ["1999".to_string()].into(),
            age_groups: ds.age_groups.clone(),
        };
        assert!(query(&ds.rows, &sel).is_empty());
    }
}
