use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

fn to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

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
            // Start at blue so single series keep a neutral tone.
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

/// Yellow → red ramp for heatmap cells; `t` in `[0, 1]`.
pub fn heat_color(t: f32) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    to_color32(Hsl::new(55.0 - 55.0 * t, 0.9, 0.85 - 0.4 * t))
}

// ---------------------------------------------------------------------------
// Color mapping: series / bar label → Color32
// ---------------------------------------------------------------------------

/// Stable colours per label, so a series keeps its colour across charts.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mut mapping = BTreeMap::new();
        for (label, color) in labels.into_iter().zip(palette) {
            mapping.entry(label.to_string()).or_insert(color);
        }
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for i in 0..p.len() {
            for j in i + 1..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn heat_ramp_darkens() {
        let low = heat_color(0.0);
        let high = heat_color(1.0);
        assert_ne!(low, high);
        // Higher intensity is less green.
        assert!(high.g() < low.g());
        assert_eq!(heat_color(f32::NAN), low);
    }

    #[test]
    fn color_map_falls_back_to_gray() {
        let map = ColorMap::new(["Reactions", "Comments"]);
        assert_ne!(map.color_for("Reactions"), map.color_for("Comments"));
        assert_eq!(map.color_for("Unknown"), Color32::GRAY);
    }
}
