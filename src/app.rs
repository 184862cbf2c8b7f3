use eframe::egui::{self, Color32, RichText, Ui};
use reading_dashboard::config::DashboardConfig;

use crate::state::{AppState, ChartTab, View};
use crate::ui::{heatmap, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ReadingDashboardApp {
    pub state: AppState,
}

impl ReadingDashboardApp {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            state: AppState::from_config(config),
        }
    }
}

impl eframe::App for ReadingDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs + chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::tab_bar(ui, &mut self.state);
            ui.separator();

            let state = &self.state;
            match state.view() {
                View::NoFile => placeholder(
                    ui,
                    "Pick an encoding, then open a CSV file to build the charts  (File → Open…)",
                    None,
                ),
                View::Failed(msg) => placeholder(ui, msg, Some(Color32::RED)),
                View::NoAgeRecords => placeholder(
                    ui,
                    "Nothing to display: no row's first column contains \"연령\".",
                    None,
                ),
                View::EmptySelection => {
                    placeholder(ui, "Nothing to display for the current selection.", None)
                }
                View::Ready(_) => match state.tab {
                    ChartTab::Line => plot::trend_chart(ui, state),
                    ChartTab::Bar => plot::bar_chart(ui, state),
                    ChartTab::Heatmap => heatmap::heatmap(ui, state),
                    ChartTab::Table => table::detail_table(ui, state),
                },
            }
        });
    }
}

fn placeholder(ui: &mut Ui, text: &str, color: Option<Color32>) {
    let mut text = RichText::new(text).heading();
    if let Some(c) = color {
        text = text.color(c);
    }
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(text);
    });
}
