use avocado_insights::data::model::{
    Row, COL_BEARING_ACRES, COL_CROP_VALUE, COL_DOLLARS_PER_ACRE, COL_PRICE_PER_POUND, COL_VOLUME,
    COL_YEAR,
};
use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use super::summary::format_thousands;

const HEADERS: [&str; 6] = [
    COL_YEAR,
    COL_BEARING_ACRES,
    COL_VOLUME,
    COL_CROP_VALUE,
    COL_PRICE_PER_POUND,
    COL_DOLLARS_PER_ACRE,
];

/// Plain table of the rows behind the current charts.
pub fn data_table(ui: &mut Ui, rows: &[Row]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(60.0))
        .columns(Column::auto().at_least(120.0), HEADERS.len() - 1)
        .header(22.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut table_row| {
                let row = &rows[table_row.index()];
                table_row.col(|ui| {
                    ui.label(&row.year);
                });
                for value in [
                    row.bearing_acres,
                    row.volume_million_lbs,
                    row.crop_value_usd,
                    row.price_per_pound_cents,
                    row.avg_dollars_per_bearing_acre,
                ] {
                    table_row.col(|ui| {
                        ui.label(format_thousands(value));
                    });
                }
            });
        });
}
