use avocado_insights::data::loader;
use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – year selector
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ui.strong("Select Year");
    let current = state.selector.to_string();
    let mut picked = None;
    egui::ComboBox::from_id_salt("year_filter")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for choice in state.table.selector_choices() {
                let selected = choice == state.selector;
                if ui.selectable_label(selected, choice.to_string()).clicked() {
                    picked = Some(choice);
                }
            }
        });

    // Applied outside the combo closure so `state` is only borrowed once.
    if let Some(selector) = picked {
        state.set_selector(selector);
    }

    ui.separator();
    ui.checkbox(&mut state.show_data_table, "Show filtered rows");
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .selectable_label(state.sidebar_open, "☰ Filters")
            .clicked()
        {
            state.sidebar_open = !state.sidebar_open;
        }

        ui.separator();

        ui.label(format!(
            "{}: {} rows, {} shown ({})",
            state.source_path.display(),
            state.table.len(),
            state.result.rows.len(),
            state.selector
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open crop data")
        .add_filter("Supported files", &["csv", "tsv", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match loader::load(&path) {
            Ok(table) => state.set_table(table, &path),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
