use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::data::aggregate::{FrequencyTable, Histogram};
use crate::state::Loaded;

/// Inner radius of the donut as a fraction of the outer radius.
const DONUT_HOLE: f32 = 0.3;
/// Arc length (radians) of one polygon when tessellating a slice.
const ARC_STEP: f32 = 0.05;
const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Bar chart: UBS per state
// ---------------------------------------------------------------------------

/// Bars in table order; the x axis shows the state names.
pub fn state_bar_chart(ui: &mut Ui, loaded: &Loaded) {
    ui.heading("Frequência de UBS por Estado");

    let table = &loaded.states;
    let names: Vec<String> = table.keys().map(str::to_string).collect();
    let bars: Vec<Bar> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, (state, count))| {
            Bar::new(i as f64, *count as f64)
                .name(format!("{state}: {count}"))
                .fill(loaded.colors.color_for(state))
                .width(0.8)
        })
        .collect();

    Plot::new("state_bar_chart")
        .height(CHART_HEIGHT)
        .x_axis_label(table.key_label)
        .y_axis_label("Número de UBS")
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&names, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(table.count_label));
        });
}

/// Label integer grid marks with the category at that index.
fn category_label(names: &[String], value: f64) -> String {
    if value.fract() != 0.0 || value < 0.0 {
        return String::new();
    }
    names.get(value as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Donut chart: share of UBS per state
// ---------------------------------------------------------------------------

pub fn state_share_donut(ui: &mut Ui, loaded: &Loaded) {
    ui.heading("Distribuição Percentual de UBS por Estado");

    let shares = loaded.states.shares();
    if shares.is_empty() {
        ui.label("Sem dados.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let size = egui::vec2(CHART_HEIGHT, CHART_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let center = response.rect.center();
        let outer = response.rect.height() / 2.0 - 8.0;
        let inner = outer * DONUT_HOLE;
        let at = |angle: f32, radius: f32| {
            center + radius * egui::vec2(angle.cos(), angle.sin())
        };

        let mut start = -FRAC_PI_2;
        for (state, share) in &shares {
            let sweep = *share as f32 * TAU;
            let color = loaded.colors.color_for(state);
            let steps = ((sweep / ARC_STEP).ceil() as usize).max(1);
            for s in 0..steps {
                let a0 = start + sweep * s as f32 / steps as f32;
                let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                let quad: Vec<Pos2> = vec![at(a0, outer), at(a1, outer), at(a1, inner), at(a0, inner)];
                painter.add(Shape::convex_polygon(quad, color, Stroke::NONE));
            }
            if *share >= 0.03 {
                painter.text(
                    at(start + sweep / 2.0, (outer + inner) / 2.0),
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", share * 100.0),
                    FontId::proportional(11.0),
                    Color32::BLACK,
                );
            }
            start += sweep;
        }

        if let Some(pos) = response.hover_pos() {
            let offset = pos - center;
            let radius = offset.length();
            if radius >= inner && radius <= outer {
                let mut angle = offset.y.atan2(offset.x) + FRAC_PI_2;
                if angle < 0.0 {
                    angle += TAU;
                }
                if let Some((state, share)) = slice_at(&shares, angle / TAU) {
                    let count = loaded.states.count_of(state).unwrap_or(0);
                    response.on_hover_text(format!(
                        "{state}: {count} UBS ({:.1}%)",
                        share * 100.0
                    ));
                }
            }
        }

        ui.vertical(|ui: &mut Ui| {
            egui::ScrollArea::vertical()
                .id_salt("donut_legend")
                .max_height(CHART_HEIGHT)
                .show(ui, |ui: &mut Ui| {
                    for (state, share) in &shares {
                        ui.horizontal(|ui: &mut Ui| {
                            ui.label(RichText::new("■").color(loaded.colors.color_for(state)));
                            ui.label(format!("{state} ({:.1}%)", share * 100.0));
                        });
                    }
                });
        });
    });
}

/// The slice containing `fraction` (0..1) of the full turn.
fn slice_at<'a>(shares: &[(&'a str, f64)], fraction: f32) -> Option<(&'a str, f64)> {
    let mut acc = 0.0;
    for &(state, share) in shares {
        acc += share;
        if (fraction as f64) < acc {
            return Some((state, share));
        }
    }
    shares.last().copied()
}

// ---------------------------------------------------------------------------
// Histogram: distribution of UBS per municipality
// ---------------------------------------------------------------------------

pub fn municipality_histogram(ui: &mut Ui, filtered: &FrequencyTable, histogram: &Histogram) {
    ui.heading("Histograma da Quantidade de UBS por Município");
    ui.label(format!("{} municípios no filtro", histogram.total()));

    let bars: Vec<Bar> = histogram
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.rows as f64)
                .width(bin.width())
                .name(format!("{}–{} UBS: {} municípios", bin.start, bin.end - 1, bin.rows))
                .fill(Color32::from_rgb(99, 110, 250))
                .stroke(Stroke::new(1.0, Color32::WHITE))
        })
        .collect();

    Plot::new("municipality_histogram")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Número de UBS")
        .y_axis_label("Municípios")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(filtered.count_label));
        });
}
