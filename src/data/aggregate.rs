use super::error::InvalidSelectorError;
use super::filter::{distinct_years, subset_indices};
use super::model::{Row, Selector, Table};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Everything the dashboard shows for one selector value.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub selector: Selector,
    /// Rows passing the selector, in table order.
    pub rows: Vec<Row>,
    pub summary: Summary,
    pub series: ChartSeries,
}

/// The six headline numbers. Means over an empty subset are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub year_count: usize,
    pub avg_bearing_acres: f64,
    pub total_volume: f64,
    pub total_crop_value_millions: f64,
    pub avg_price_per_pound: f64,
    pub avg_dollars_per_acre: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    Bar,
    Area,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearPoint {
    pub year: String,
    pub value: f64,
}

/// One column plotted against the year axis.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSeries {
    pub title: &'static str,
    pub y_label: &'static str,
    pub style: SeriesStyle,
    /// Ascending by year; rows sharing a year keep table order.
    pub points: Vec<YearPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub year: String,
    pub x: f64,
    pub y: f64,
}

/// Price per pound (x) against crop value (y), with an optional OLS trend.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ScatterPoint>,
    pub trend: Option<LinearFit>,
}

/// The five chart inputs plus the shared categorical year axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub years: Vec<String>,
    pub volume: YearSeries,
    pub crop_value: YearSeries,
    pub price_vs_value: ScatterSeries,
    pub dollars_per_acre: YearSeries,
    pub volume_area: YearSeries,
}

/// `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    /// Ordinary least squares over `(x, y)` pairs.
    ///
    /// Returns `None` with fewer than two points or when every x is equal.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

        let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), &(x, y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });
        let scale = points.iter().map(|p| p.0 * p.0).sum::<f64>();
        if sxx <= f64::EPSILON * scale {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        let (ss_res, ss_tot) = points.iter().fold((0.0, 0.0), |(res, tot), &(x, y)| {
            let r = y - (slope * x + intercept);
            let t = y - mean_y;
            (res + r * r, tot + t * t)
        });
        let r_squared = if ss_tot == 0.0 { 1.0 } else { 1.0 - ss_res / ss_tot };

        Some(LinearFit {
            slope,
            intercept,
            r_squared,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

// ---------------------------------------------------------------------------
// The pipeline
// ---------------------------------------------------------------------------

/// Filter `table` by `selector` and compute the summary and chart series.
///
/// Pure: equal inputs give equal outputs. The only failure is a selector
/// naming a year the table does not contain.
pub fn aggregate(
    table: &Table,
    selector: &Selector,
) -> Result<AggregateResult, InvalidSelectorError> {
    table.check_selector(selector)?;
    Ok(compute(table, selector))
}

/// [`aggregate`] for the `All` sentinel, which every table accepts.
pub fn aggregate_all(table: &Table) -> AggregateResult {
    compute(table, &Selector::All)
}

fn compute(table: &Table, selector: &Selector) -> AggregateResult {
    let rows: Vec<Row> = subset_indices(table, selector)
        .into_iter()
        .map(|i| table.rows()[i].clone())
        .collect();

    let summary = summarize(&rows);
    let series = build_series(&rows);

    log::debug!(
        "Aggregated selector {selector}: {} rows, {} years",
        rows.len(),
        summary.year_count
    );

    AggregateResult {
        selector: selector.clone(),
        rows,
        summary,
        series,
    }
}

/// Compute the six scalars over an arbitrary set of rows.
pub fn summarize(rows: &[Row]) -> Summary {
    Summary {
        year_count: distinct_years(rows).len(),
        avg_bearing_acres: mean(rows.iter().map(|r| r.bearing_acres)),
        total_volume: rows.iter().map(|r| r.volume_million_lbs).sum(),
        total_crop_value_millions: rows.iter().map(|r| r.crop_value_usd).sum::<f64>() / 1_000_000.0,
        avg_price_per_pound: mean(rows.iter().map(|r| r.price_per_pound_cents)),
        avg_dollars_per_acre: mean(rows.iter().map(|r| r.avg_dollars_per_bearing_acre)),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

fn build_series(rows: &[Row]) -> ChartSeries {
    let mut ordered: Vec<&Row> = rows.iter().collect();
    // Stable: rows sharing a year keep their table order.
    ordered.sort_by(|a, b| a.year.cmp(&b.year));

    let year_series = |title, y_label, style, value: fn(&Row) -> f64| YearSeries {
        title,
        y_label,
        style,
        points: ordered
            .iter()
            .map(|r| YearPoint {
                year: r.year.clone(),
                value: value(r),
            })
            .collect(),
    };

    let volume = year_series(
        "Volume Over Years",
        "Volume (millions of pounds)",
        SeriesStyle::Line,
        |r| r.volume_million_lbs,
    );
    let crop_value = year_series(
        "Crop Value Over Years",
        "Crop Value ($)",
        SeriesStyle::Line,
        |r| r.crop_value_usd,
    );
    let dollars_per_acre = year_series(
        "Average Dollars Per Bearing Acre",
        "Average Dollars Per Bearing Acre ($)",
        SeriesStyle::Bar,
        |r| r.avg_dollars_per_bearing_acre,
    );
    let volume_area = year_series(
        "Volume Trend over Years",
        "Volume (millions of pounds)",
        SeriesStyle::Area,
        |r| r.volume_million_lbs,
    );

    let scatter: Vec<ScatterPoint> = ordered
        .iter()
        .map(|r| ScatterPoint {
            year: r.year.clone(),
            x: r.price_per_pound_cents,
            y: r.crop_value_usd,
        })
        .collect();
    let pairs: Vec<(f64, f64)> = scatter.iter().map(|p| (p.x, p.y)).collect();

    ChartSeries {
        years: distinct_years(rows.iter()),
        volume,
        crop_value,
        price_vs_value: ScatterSeries {
            title: "Price Per Pound vs. Crop Value",
            x_label: "Price Per Pound (¢)",
            y_label: "Crop Value ($)",
            points: scatter,
            trend: LinearFit::fit(&pairs),
        },
        dollars_per_acre,
        volume_area,
    }
}
