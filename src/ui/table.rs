use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};
use reading_dashboard::data::TidyRow;

use crate::state::AppState;

/// Filtered tidy rows as a scrollable table, with load counters on top.
pub fn detail_table(ui: &mut Ui, state: &AppState) {
    let rows: Vec<&TidyRow> = state.visible_rows().collect();

    if let Some(ds) = &state.dataset {
        let s = ds.summary;
        ui.label(format!(
            "{} of {} rows shown  ·  {} age-group records of {} source rows  ·  {} \"-\" cells skipped",
            rows.len(),
            ds.len(),
            s.age_records,
            s.raw_rows,
            s.dropped_sentinels
        ));
        ui.separator();
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Age group");
            });
            header.col(|ui| {
                ui.strong("Year");
            });
            header.col(|ui| {
                ui.strong("Reading volume");
            });
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let r = rows[row.index()];
                row.col(|ui| {
                    ui.label(r.age_group.as_str());
                });
                row.col(|ui| {
                    ui.label(r.year.as_str());
                });
                row.col(|ui| {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("{:.2}", r.value));
                    });
                });
            });
        });
}
