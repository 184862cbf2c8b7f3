mod app;
mod color;
mod state;
mod ui;

use app::ReadingDashboardApp;
use clap::Parser;
use eframe::egui;
use reading_dashboard::config::{Cli, DashboardConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::resolve(Cli::parse())?;
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Reading Dashboard – 연령대별 독서량",
        options,
        Box::new(move |cc| {
            ui::fonts::install_hangul_font(&cc.egui_ctx);
            Ok(Box::new(ReadingDashboardApp::new(&config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
