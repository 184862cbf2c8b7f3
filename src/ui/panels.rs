use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use reading_dashboard::data::{TextEncoding, YearOrder};

use crate::state::{AppState, ChartTab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔎 Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the loops.
    let years: Vec<String> = state.axis_years().into_iter().map(str::to_string).collect();
    let age_groups: Vec<String> = state
        .dataset
        .as_ref()
        .map(|ds| ds.age_groups.iter().cloned().collect())
        .unwrap_or_default();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let header = format!("Years  ({}/{})", state.selection.years.len(), years.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("years")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_years();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_years();
                        }
                    });
                    for year in &years {
                        let mut checked = state.selection.years.contains(year);
                        if ui.checkbox(&mut checked, year.as_str()).changed() {
                            state.toggle_year(year);
                        }
                    }
                });

            let header = format!(
                "Age groups  ({}/{})",
                state.selection.age_groups.len(),
                age_groups.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("age_groups")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_age_groups();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_age_groups();
                        }
                    });
                    for group in &age_groups {
                        // Colour swatch matches the chart legend.
                        let mut text = RichText::new(group.as_str());
                        if let Some(cm) = &state.color_map {
                            text = text.color(cm.color_for(group));
                        }
                        let mut checked = state.selection.age_groups.contains(group);
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_age_group(group);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let open = ui
                .add_enabled(state.encoding.is_some(), egui::Button::new("Open…"))
                .on_disabled_hover_text("Choose the file's text encoding first");
            if open.clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let current = state.encoding.map_or("Select encoding…", |e| e.name());
        egui::ComboBox::from_id_salt("encoding")
            .selected_text(current)
            .show_ui(ui, |ui: &mut Ui| {
                for encoding in TextEncoding::choices() {
                    if ui
                        .selectable_label(state.encoding == Some(encoding), encoding.name())
                        .clicked()
                    {
                        state.set_encoding(encoding);
                    }
                }
            });

        egui::ComboBox::from_id_salt("year_order")
            .selected_text(format!("Years: {}", state.year_order))
            .show_ui(ui, |ui: &mut Ui| {
                for order in YearOrder::ALL {
                    ui.selectable_value(&mut state.year_order, order, order.to_string());
                }
            });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg.lines().next().unwrap_or_default()).color(Color32::RED));
        }
    });
}

/// Tab strip above the charts.
pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in ChartTab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open reading survey CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
