use avocado_insights::config::DashboardConfig;
use avocado_insights::data::Table;
use eframe::egui::{self, ScrollArea};

use crate::color::SIDEBAR_BG;
use crate::state::AppState;
use crate::ui::{panels, plot, summary, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub title: String,
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(config: &DashboardConfig, table: Table) -> Self {
        Self {
            title: config.title.clone(),
            state: AppState::new(config, table),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year filter (collapsible) ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(SIDEBAR_BG))
            .show_animated(ctx, self.state.sidebar_open, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: value boxes, charts, rows ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading(&self.title);
                    ui.add_space(8.0);

                    summary::value_boxes(ui, &self.state.result.summary);
                    ui.add_space(12.0);

                    plot::charts(ui, &self.state.result.series, &self.state.palette);

                    if self.state.show_data_table {
                        ui.add_space(12.0);
                        ui.collapsing("Filtered rows", |ui| {
                            table::data_table(ui, &self.state.result.rows);
                        });
                    }
                });
        });
    }
}
