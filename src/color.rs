use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Sequential scale for the heatmap
// ---------------------------------------------------------------------------

/// Colour for a value at relative position `t` (0 = lowest, 1 = highest).
pub fn heat_color(t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) as f32 } else { 0.0 };
    hsl_to_color32(Hsl::new(215.0, 0.70, 0.92 - 0.62 * t))
}

/// Text colour readable on top of [`heat_color`]`(t)`.
pub fn heat_text_color(t: f64) -> Color32 {
    if t > 0.55 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}

/// Relative position of `value` in `[lo, hi]`; a flat range maps to 0.5.
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    let range = hi - lo;
    if range.abs() < f64::EPSILON {
        0.5
    } else {
        (value - lo) / range
    }
}

// ---------------------------------------------------------------------------
// Color mapping: age group → Color32
// ---------------------------------------------------------------------------

/// Maps every observed age group to a distinct colour.  Built from the full
/// set so colours stay put while filters change.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(age_groups: &BTreeSet<String>) -> Self {
        let palette = generate_palette(age_groups.len());
        let mapping = age_groups.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for an age group.
    pub fn color_for(&self, age_group: &str) -> Color32 {
        self.mapping
            .get(age_group)
            .copied()
            .unwrap_or(self.default_color)
    }
}
