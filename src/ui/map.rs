use std::collections::BTreeMap;

use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::data::filter::StateFilter;
use crate::data::model::{Facility, LATITUDE_COLUMN, LONGITUDE_COLUMN, MUNICIPALITY_COLUMN, STATE_COLUMN};
use crate::state::Loaded;

/// Marker opacity on the map.
const MAP_OPACITY: f32 = 0.7;
const MAP_HEIGHT: f32 = 480.0;
const TABLE_HEIGHT: f32 = 240.0;

/// Initial view: South America, lon/lat degrees.
const SCOPE_LON: (f64, f64) = (-82.0, -34.0);
const SCOPE_LAT: (f64, f64) = (-56.0, 13.0);

/// Prompt shown instead of the map when no state is selected.
pub const NO_SELECTION_PROMPT: &str = "Selecione pelo menos um estado para visualizar as UBS no mapa.";

// ---------------------------------------------------------------------------
// Map section: table + scatter-geo of the selected states
// ---------------------------------------------------------------------------

pub fn selected_states_section(ui: &mut Ui, loaded: &Loaded, view: &StateFilter<'_>) {
    ui.heading("UBS dos estados selecionados");

    let facilities = match view {
        StateFilter::NoSelection => {
            ui.label(NO_SELECTION_PROMPT);
            return;
        }
        StateFilter::Selected(facilities) => facilities,
    };

    ui.label(format!("{} UBS", facilities.len()));
    facility_table(ui, &loaded.dataset.extra_columns, facilities);
    ui.add_space(8.0);
    scatter_geo(ui, loaded, facilities);
}

/// Lon/lat scatter, one series per state in the state's colour.
fn scatter_geo(ui: &mut Ui, loaded: &Loaded, facilities: &[&Facility]) {
    let mut by_state: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for f in facilities {
        by_state
            .entry(f.state.as_str())
            .or_default()
            .push([f.longitude, f.latitude]);
    }

    Plot::new("scatter_geo")
        .height(MAP_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(SCOPE_LON.0)
        .include_x(SCOPE_LON.1)
        .include_y(SCOPE_LAT.0)
        .include_y(SCOPE_LAT.1)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (state, points) in by_state {
                let color = loaded.colors.color_for(state).gamma_multiply(MAP_OPACITY);
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(state)
                        .color(color)
                        .radius(2.5),
                );
            }
        });
}

/// Scrollable table of the selected facilities, all columns.
fn facility_table(ui: &mut Ui, extra_columns: &[String], facilities: &[&Facility]) {
    let mut headers: Vec<&str> = vec![STATE_COLUMN, MUNICIPALITY_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN];
    headers.extend(extra_columns.iter().map(String::as_str));

    ui.push_id("facility_table", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .max_scroll_height(TABLE_HEIGHT)
                .columns(Column::auto().at_least(60.0).resizable(true), headers.len())
                .header(20.0, |mut header| {
                    for name in &headers {
                        header.col(|ui: &mut Ui| {
                            ui.strong(*name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, facilities.len(), |mut row| {
                        let f = facilities[row.index()];
                        row.col(|ui: &mut Ui| {
                            ui.label(f.state.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(f.municipality.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(f.latitude.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(f.longitude.to_string());
                        });
                        for col in extra_columns {
                            let text = f.extra.get(col).map(|v| v.to_string()).unwrap_or_default();
                            row.col(|ui: &mut Ui| {
                                ui.label(text);
                            });
                        }
                    });
                });
        });
    });
}
