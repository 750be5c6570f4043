use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{FromColor, Hsl, Srgb};

use crate::data::aggregate::FrequencyTable;

const GOLDEN_ANGLE: f32 = 137.507_77;

/// Colours for `n` states. Hues step by the golden angle so neighbours in the
/// bar chart never share a hue family; lightness alternates between two bands
/// so the 27 federative units stay apart.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 * GOLDEN_ANGLE) % 360.0;
            let lightness = if i % 2 == 0 { 0.50 } else { 0.62 };
            let rgb: Srgb<u8> = Srgb::<f32>::from_color(Hsl::new(hue, 0.65, lightness)).into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// State → colour
// ---------------------------------------------------------------------------

/// One colour per state, shared by the bar chart, donut chart and map.
#[derive(Debug, Clone)]
pub struct StateColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl StateColors {
    /// Assign hues in table order, so the largest state gets the first hue.
    pub fn new(states: &FrequencyTable) -> Self {
        let palette = generate_palette(states.len());
        let mapping = states
            .keys()
            .zip(palette)
            .map(|(state, color)| (state.to_string(), color))
            .collect();
        StateColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, state: &str) -> Color32 {
        self.mapping
            .get(state)
            .copied()
            .unwrap_or(self.default_color)
    }
}
