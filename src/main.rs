mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use app::DashboardApp;
use avocado_insights::config::{DashboardConfig, CONFIG_FILE};
use avocado_insights::data::loader;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;

    // No data, no dashboard: a load failure aborts startup.
    let table = loader::load(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(&config, table)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
