use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Fixed colours
// ---------------------------------------------------------------------------

pub const VOLUME_LINE: Color32 = Color32::from_rgb(0x1f, 0x4e, 0xd8);
pub const CROP_VALUE_LINE: Color32 = Color32::from_rgb(0x2e, 0x9e, 0x3f);
pub const VOLUME_AREA: Color32 = Color32::from_rgb(0x80, 0x3c, 0xb4);
pub const TREND_LINE: Color32 = Color32::from_rgb(0x40, 0x40, 0x40);
pub const SIDEBAR_BG: Color32 = Color32::from_rgb(0xC0, 0xC0, 0xC0);

/// Value-box backgrounds, in display order.
pub const VALUE_BOX_BG: [Color32; 6] = [
    Color32::from_rgb(0xFF, 0xCC, 0x00),
    Color32::from_rgb(0x66, 0xCC, 0xFF),
    Color32::from_rgb(0xFF, 0x99, 0xCC),
    Color32::from_rgb(0x99, 0xFF, 0x99),
    Color32::from_rgb(0xFF, 0xCC, 0xFF),
    Color32::from_rgb(0xFF, 0xFF, 0x99),
];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Year → Color32
// ---------------------------------------------------------------------------

/// Assigns each year of the table a stable colour, so a year keeps its
/// colour when the selector narrows the charts down to it.
#[derive(Debug, Clone)]
pub struct YearPalette {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl YearPalette {
    pub fn new(years: &[String]) -> Self {
        let mapping = years
            .iter()
            .cloned()
            .zip(generate_palette(years.len()))
            .collect();

        YearPalette {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, year: &str) -> Color32 {
        self.mapping
            .get(year)
            .copied()
            .unwrap_or(self.default_color)
    }
}
