use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{charts, map, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct UbsDashboardApp {
    pub state: AppState,
}

impl UbsDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for UbsDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

/// Every section is rebuilt from the current selection on each frame.
fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(loaded) = &state.loaded else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Abra um arquivo de UBS  (Arquivo → Abrir…)");
        });
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(egui::RichText::new("Dashboard de Unidades Básicas de Saúde (UBS)").size(24.0));
            ui.separator();

            charts::state_bar_chart(ui, loaded);
            ui.separator();

            charts::state_share_donut(ui, loaded);
            ui.separator();

            if let Some(view) = state.state_view() {
                map::selected_states_section(ui, loaded, &view);
            }
            ui.separator();

            if let Some((filtered, histogram)) = state.municipality_section() {
                charts::municipality_histogram(ui, &filtered, &histogram);
            }
        });
}
