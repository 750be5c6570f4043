use std::path::{Path, PathBuf};

use crate::color::StateColors;
use crate::data::aggregate::{self, FrequencyTable, Histogram, HISTOGRAM_BINS};
use crate::data::filter::{self, Selection, StateFilter};
use crate::data::loader::{self, LoadOptions};
use crate::data::model::FacilityDataset;

// ---------------------------------------------------------------------------
// Loaded data: the dataset and everything derived once from it
// ---------------------------------------------------------------------------

/// A cleaned dataset together with its two frequency tables.
pub struct Loaded {
    pub source: PathBuf,
    pub dataset: FacilityDataset,
    pub states: FrequencyTable,
    pub municipalities: FrequencyTable,
    pub colors: StateColors,
}

impl Loaded {
    pub fn new(source: PathBuf, dataset: FacilityDataset) -> Self {
        let states = aggregate::by_state(&dataset);
        let municipalities = aggregate::by_municipality(&dataset);
        let colors = StateColors::new(&states);
        Self {
            source,
            dataset,
            states,
            municipalities,
            colors,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded data (None until a file loads successfully).
    pub loaded: Option<Loaded>,

    /// States picked in the multi-select and the slider threshold.
    pub selection: Selection,

    /// How delimited text files are read.
    pub load_options: LoadOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(load_options: LoadOptions) -> Self {
        Self {
            load_options,
            ..Default::default()
        }
    }

    /// Load `path`; on failure keep the current data and report the error.
    pub fn open(&mut self, path: &Path) {
        match loader::load_dataset(path, &self.load_options) {
            Ok(dataset) => self.set_dataset(path.to_path_buf(), dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Erro ao carregar {}: {e}", path.display()));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the selection.
    pub fn set_dataset(&mut self, source: PathBuf, dataset: FacilityDataset) {
        let loaded = Loaded::new(source, dataset);
        self.selection = Selection::initial(&loaded.municipalities);
        self.loaded = Some(loaded);
        self.status_message = None;
    }

    /// Add or remove a state from the selection.
    pub fn toggle_state(&mut self, state: &str) {
        if !self.selection.states.remove(state) {
            self.selection.states.insert(state.to_string());
        }
    }

    pub fn select_all_states(&mut self) {
        if let Some(loaded) = &self.loaded {
            self.selection.states = loaded.states.keys().map(str::to_string).collect();
        }
    }

    pub fn clear_states(&mut self) {
        self.selection.states.clear();
    }

    /// Set the threshold, clamped to the observed municipality counts.
    pub fn set_min_count(&mut self, threshold: usize) {
        let range = self
            .loaded
            .as_ref()
            .and_then(|l| l.municipalities.count_range());
        self.selection.min_count = match range {
            Some((min, max)) => threshold.clamp(min, max),
            None => 0,
        };
    }

    /// Facilities of the selected states, recomputed on every call.
    pub fn state_view(&self) -> Option<StateFilter<'_>> {
        let loaded = self.loaded.as_ref()?;
        let view = filter::by_states(&loaded.dataset, &self.selection.states);
        log::debug!(
            "State filter: {} states selected, {} UBS",
            self.selection.states.len(),
            view.facilities().len()
        );
        Some(view)
    }

    /// Municipalities with at least `min_count` UBS.
    pub fn municipality_view(&self) -> Option<FrequencyTable> {
        let loaded = self.loaded.as_ref()?;
        let view = filter::by_minimum_count(&loaded.municipalities, &self.selection);
        log::debug!(
            "Municipality filter: >= {} UBS keeps {} of {}",
            self.selection.min_count,
            view.len(),
            loaded.municipalities.len()
        );
        Some(view)
    }

    /// The municipality view and its histogram, filtered once per frame.
    pub fn municipality_section(&self) -> Option<(FrequencyTable, Histogram)> {
        let view = self.municipality_view()?;
        let histogram = Histogram::of_counts(&view, HISTOGRAM_BINS);
        Some((view, histogram))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::{FacilityRecord, FacilityTable};

    fn state_with(rows: &[(&str, &str)]) -> AppState {
        let records = rows
            .iter()
            .map(|(state, municipality)| FacilityRecord {
                state: state.to_string(),
                municipality: municipality.to_string(),
                latitude: Some(-10.0),
                longitude: Some(-50.0),
                extra: BTreeMap::new(),
            })
            .collect();
        let dataset = FacilityDataset::clean(FacilityTable {
            extra_columns: Vec::new(),
            records,
        });
        let mut state = AppState::default();
        state.set_dataset(PathBuf::from("ubs.csv"), dataset);
        state
    }

    #[test]
    fn nothing_loaded_means_no_views() {
        let state = AppState::default();
        assert!(state.state_view().is_none());
        assert!(state.municipality_view().is_none());
    }

    #[test]
    fn toggling_states_drives_the_state_view() {
        let mut state = state_with(&[("SP", "Campinas"), ("RJ", "Niterói"), ("SP", "Santos")]);
        assert_eq!(state.state_view(), Some(StateFilter::NoSelection));

        state.toggle_state("RJ");
        let view = state.state_view().expect("loaded");
        assert_eq!(view.facilities().len(), 1);

        state.toggle_state("RJ");
        assert!(state.state_view().expect("loaded").is_no_selection());

        state.select_all_states();
        assert_eq!(state.state_view().expect("loaded").facilities().len(), 3);

        state.clear_states();
        assert!(state.selection.states.is_empty());
    }

    #[test]
    fn threshold_is_clamped_to_observed_counts() {
        let mut state = state_with(&[
            ("SP", "Campinas"),
            ("SP", "Campinas"),
            ("SP", "Campinas"),
            ("RJ", "Niterói"),
        ]);
        assert_eq!(state.selection.min_count, 1);

        state.set_min_count(0);
        assert_eq!(state.selection.min_count, 1);

        state.set_min_count(50);
        assert_eq!(state.selection.min_count, 3);
        let view = state.municipality_view().expect("loaded");
        assert_eq!(view.rows, vec![("Campinas".to_string(), 3)]);
    }

    #[test]
    fn histogram_bins_the_same_view_it_is_shown_with() {
        let mut state = state_with(&[
            ("SP", "Campinas"),
            ("SP", "Campinas"),
            ("SP", "Santos"),
            ("RJ", "Niterói"),
            ("RJ", "Niterói"),
            ("RJ", "Petrópolis"),
        ]);
        assert!(AppState::default().municipality_section().is_none());

        for threshold in [1, 2] {
            state.set_min_count(threshold);
            let (view, histogram) = state.municipality_section().expect("loaded");
            assert_eq!(view, state.municipality_view().expect("loaded"));
            assert_eq!(histogram.total(), view.len());
        }
        let (view, _) = state.municipality_section().expect("loaded");
        assert_eq!(view.keys().collect::<Vec<_>>(), ["Campinas", "Niterói"]);
    }

    #[test]
    fn failed_open_keeps_previous_data() {
        let mut state = state_with(&[("SP", "Campinas")]);
        state.open(Path::new("/nonexistent/ubs.csv"));
        assert!(state.status_message.is_some());
        assert_eq!(state.loaded.as_ref().map(|l| l.dataset.len()), Some(1));
    }
}
