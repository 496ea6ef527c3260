use avocado_insights::data::aggregate::Summary;
use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::VALUE_BOX_BG;

// ---------------------------------------------------------------------------
// Value boxes
// ---------------------------------------------------------------------------

/// Render the six headline numbers as a wrapping row of coloured boxes.
pub fn value_boxes(ui: &mut Ui, summary: &Summary) {
    let boxes = value_box_texts(summary);
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for ((title, value), bg) in boxes.iter().zip(VALUE_BOX_BG) {
            value_box(ui, title, value, bg);
        }
    });
}

fn value_box(ui: &mut Ui, title: &str, value: &str, bg: Color32) {
    egui::Frame::new()
        .fill(bg)
        .corner_radius(6.0)
        .inner_margin(12.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(200.0);
            ui.vertical(|ui: &mut Ui| {
                ui.label(RichText::new(title).color(Color32::BLACK));
                ui.label(RichText::new(value).size(22.0).strong().color(Color32::BLACK));
            });
        });
}

/// `(title, formatted value)` for each box, in display order.
pub fn value_box_texts(s: &Summary) -> [(&'static str, String); 6] {
    [
        ("Number of Years", s.year_count.to_string()),
        ("Average Bearing Acres", format_fixed(s.avg_bearing_acres)),
        (
            "Total Volume (millions of pounds)",
            format_thousands(s.total_volume),
        ),
        (
            "Total Crop Value ($)",
            format!("${} million", format_fixed(s.total_crop_value_millions)),
        ),
        (
            "Average Price Per Pound (¢)",
            format!("{} ¢", format_thousands(s.avg_price_per_pound)),
        ),
        (
            "Average Dollars Per Bearing Acre ($)",
            format!("${}", format_thousands(s.avg_dollars_per_acre)),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

const NOT_AVAILABLE: &str = "n/a";

/// Two decimals, no grouping.
pub fn format_fixed(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Two decimals with `,` between thousands: `1234567.891` → `1,234,567.89`.
pub fn format_thousands(v: f64) -> String {
    if !v.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let fixed = format!("{:.2}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = fixed.trim_matches(&['0', '.'][..]).is_empty();
    let sign = if v < 0.0 && !is_zero { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_thousands(0.0), "0.00");
        assert_eq!(format_thousands(999.994), "999.99");
        assert_eq!(format_thousands(1000.0), "1,000.00");
        assert_eq!(format_thousands(1234567.891), "1,234,567.89");
        assert_eq!(format_thousands(-12345.5), "-12,345.50");
    }

    #[test]
    fn nan_is_not_available() {
        assert_eq!(format_thousands(f64::NAN), "n/a");
        assert_eq!(format_fixed(f64::NAN), "n/a");
    }

    #[test]
    fn box_texts_follow_dashboard_layout() {
        let summary = Summary {
            year_count: 2,
            avg_bearing_acres: 150.0,
            total_volume: 2000.0,
            total_crop_value_millions: 4.0,
            avg_price_per_pound: 25.0,
            avg_dollars_per_acre: 12_500.0,
        };
        let texts = value_box_texts(&summary);
        assert_eq!(texts[0].1, "2");
        assert_eq!(texts[1].1, "150.00");
        assert_eq!(texts[2].1, "2,000.00");
        assert_eq!(texts[3].1, "$4.00 million");
        assert_eq!(texts[4].1, "25.00 ¢");
        assert_eq!(texts[5].1, "$12,500.00");
    }
}
