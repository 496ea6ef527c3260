use avocado_insights::data::aggregate::{ChartSeries, ScatterSeries, SeriesStyle, YearSeries};
use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{YearPalette, CROP_VALUE_LINE, TREND_LINE, VOLUME_AREA, VOLUME_LINE};

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Render the five charts: three on the first row, two on the second.
pub fn charts(ui: &mut Ui, series: &ChartSeries, palette: &YearPalette) {
    ui.columns(3, |cols| {
        card(&mut cols[0], "Volume and Crop Value Over Years", |ui| {
            year_chart(ui, "volume_plot", series, &series.volume, VOLUME_LINE, palette)
        });
        card(&mut cols[1], series.crop_value.title, |ui| {
            let crop_value = &series.crop_value;
            year_chart(ui, "crop_value_plot", series, crop_value, CROP_VALUE_LINE, palette)
        });
        card(&mut cols[2], series.price_vs_value.title, |ui| {
            scatter_chart(ui, &series.price_vs_value, palette)
        });
    });
    ui.add_space(8.0);
    ui.columns(2, |cols| {
        card(&mut cols[0], series.dollars_per_acre.title, |ui| {
            let per_acre = &series.dollars_per_acre;
            year_chart(ui, "dollars_per_acre_plot", series, per_acre, Color32::GRAY, palette)
        });
        card(&mut cols[1], series.volume_area.title, |ui| {
            year_chart(ui, "volume_area_plot", series, &series.volume_area, VOLUME_AREA, palette)
        });
    });
}

fn card(ui: &mut Ui, header: &str, body: impl FnOnce(&mut Ui)) {
    ui.group(|ui: &mut Ui| {
        ui.label(RichText::new(header).strong());
        ui.separator();
        body(ui);
    });
}

// ---------------------------------------------------------------------------
// Year-axis charts: line, bar, area
// ---------------------------------------------------------------------------

/// Position of `year` on the categorical axis shared by all year charts.
fn year_x(years: &[String], year: &str) -> f64 {
    years.binary_search_by(|y| y.as_str().cmp(year)).unwrap_or(0) as f64
}

fn year_chart(
    ui: &mut Ui,
    id: &str,
    axis: &ChartSeries,
    series: &YearSeries,
    color: Color32,
    palette: &YearPalette,
) {
    let years = axis.years.clone();
    let points: Vec<[f64; 2]> = series
        .points
        .iter()
        .map(|p| [year_x(&axis.years, &p.year), p.value])
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(series.y_label)
        .x_axis_formatter(move |mark: GridMark, _range| year_tick(&years, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| match series.style {
            SeriesStyle::Line => {
                plot_ui.line(
                    Line::new(PlotPoints::from(points))
                        .name(series.y_label)
                        .color(color)
                        .width(2.0),
                );
            }
            SeriesStyle::Area => {
                plot_ui.line(
                    Line::new(PlotPoints::from(points))
                        .name(series.y_label)
                        .color(color)
                        .fill(0.0)
                        .width(1.5),
                );
            }
            SeriesStyle::Bar => {
                let bases = stack_bases(&points);
                let bars: Vec<Bar> = series
                    .points
                    .iter()
                    .zip(points.iter().zip(bases))
                    .map(|(p, (xy, base))| {
                        Bar::new(xy[0], xy[1])
                            .base_offset(base)
                            .name(&p.year)
                            .fill(palette.color_for(&p.year))
                            .width(0.7)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(series.y_label));
            }
        });
}

/// Where each bar starts so rows sharing a year stack on one bar.
/// Points arrive grouped by year.
fn stack_bases(points: &[[f64; 2]]) -> Vec<f64> {
    let mut bases = Vec::with_capacity(points.len());
    let mut prev_x = None;
    let mut top = 0.0;
    for &[x, y] in points {
        if prev_x != Some(x) {
            top = 0.0;
        }
        bases.push(top);
        top += y;
        prev_x = Some(x);
    }
    bases
}

/// Label integer grid marks with their year; leave the rest blank.
fn year_tick(years: &[String], value: f64) -> String {
    if value.fract() != 0.0 || value < 0.0 {
        return String::new();
    }
    years.get(value as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Price vs value scatter with OLS trend
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, series: &ScatterSeries, palette: &YearPalette) {
    Plot::new("price_vs_value_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(series.x_label)
        .y_axis_label(series.y_label)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for p in &series.points {
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[p.x, p.y]]))
                        .name(&p.year)
                        .color(palette.color_for(&p.year))
                        .radius(4.0),
                );
            }

            if let Some(fit) = series.trend {
                let (min_x, max_x) = series
                    .points
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                        (lo.min(p.x), hi.max(p.x))
                    });
                let line = vec![[min_x, fit.predict(min_x)], [max_x, fit.predict(max_x)]];
                plot_ui.line(
                    Line::new(PlotPoints::from(line))
                        .name(format!("OLS trend (R² = {:.3})", fit.r_squared))
                        .color(TREND_LINE)
                        .width(1.5),
                );
            }
        });
}
