use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues, starting
/// from the dashboard's cyan accent.
pub fn continent_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = 185.0 + (i as f32 / n as f32) * 360.0;
            hsl_to_color32(hue % 360.0, 0.70, 0.55)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Continent → Color32
// ---------------------------------------------------------------------------

/// Stable colour per continent, shared by the filter panel and every chart.
#[derive(Debug, Clone)]
pub struct ContinentColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ContinentColors {
    pub fn new(continents: &[String]) -> Self {
        let mapping = continents
            .iter()
            .cloned()
            .zip(continent_palette(continents.len()))
            .collect();
        ContinentColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, continent: &str) -> Color32 {
        self.mapping
            .get(continent)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Rate → Color32
// ---------------------------------------------------------------------------

/// Sequential colour scales used for rate-coloured marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateScale {
    /// Pale to deep red; for the highest-inflation ranking.
    Reds,
    /// Pale to deep blue; for the most stable economies.
    Blues,
    /// Blue through green to red; for the country table.
    Spectrum,
}

/// Colour for `rate` on `scale`, normalised against `[lo, hi]`.
pub fn rate_color(rate: f64, (lo, hi): (f64, f64), scale: RateScale) -> Color32 {
    let span = hi - lo;
    let t = if span.abs() < f64::EPSILON {
        1.0
    } else {
        ((rate - lo) / span).clamp(0.0, 1.0) as f32
    };
    match scale {
        RateScale::Reds => hsl_to_color32(0.0, 0.75, 0.85 - 0.45 * t),
        RateScale::Blues => hsl_to_color32(215.0, 0.75, 0.85 - 0.45 * t),
        RateScale::Spectrum => hsl_to_color32(240.0 * (1.0 - t), 0.70, 0.50),
    }
}
