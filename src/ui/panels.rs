use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left panel: state multi-select and the threshold slider.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros");
    ui.separator();

    let Some(loaded) = &state.loaded else {
        ui.label("Nenhum arquivo carregado.");
        return;
    };

    // Clone what we need so we can mutate state inside the closures.
    let states: Vec<(String, usize)> = loaded.states.rows.clone();
    let colors = loaded.colors.clone();
    let range = loaded.municipalities.count_range();

    // ---- Threshold slider ----
    ui.strong("Número mínimo de UBS por município");
    match range {
        Some((min, max)) => {
            let mut threshold = state.selection.min_count;
            let slider = egui::Slider::new(&mut threshold, min..=max).step_by(1.0);
            if ui.add(slider).changed() {
                state.set_min_count(threshold);
            }
        }
        None => {
            ui.label("Sem municípios.");
        }
    }
    ui.separator();

    // ---- State multi-select ----
    let header_text = format!(
        "Selecione os estados  ({}/{})",
        state.selection.states.len(),
        states.len()
    );
    ui.strong(header_text);
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("Todos").clicked() {
            state.select_all_states();
        }
        if ui.small_button("Nenhum").clicked() {
            state.clear_states();
        }
    });

    ScrollArea::vertical()
        .id_salt("state_select")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (name, count) in &states {
                let mut checked = state.selection.states.contains(name);
                let text = RichText::new(format!("{name}  ({count})")).color(colors.color_for(name));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_state(name);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(loaded) = &state.loaded {
            ui.label(format!(
                "{}: {} UBS carregadas, {} descartadas sem coordenadas",
                loaded
                    .source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                loaded.dataset.len(),
                loaded.dataset.dropped
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir dados de UBS")
        .add_filter("Arquivos suportados", &["csv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
