use std::collections::BTreeSet;

use super::aggregate::FrequencyTable;
use super::model::{Facility, FacilityDataset};

// ---------------------------------------------------------------------------
// Selection: what the user picked in the side panel
// ---------------------------------------------------------------------------

/// Chosen states plus the minimum number of UBS per municipality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub states: BTreeSet<String>,
    pub min_count: usize,
}

impl Selection {
    /// Start with no state selected and the threshold at the smallest count,
    /// so every municipality is shown.
    pub fn initial(municipalities: &FrequencyTable) -> Self {
        Selection {
            states: BTreeSet::new(),
            min_count: municipalities.count_range().map(|(min, _)| min).unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter by state
// ---------------------------------------------------------------------------

/// Result of filtering by the selected states.
#[derive(Debug, Clone, PartialEq)]
pub enum StateFilter<'a> {
    /// Nothing selected: the map is replaced by a prompt.
    NoSelection,
    /// Facilities whose state is selected, in dataset order. May be empty.
    Selected(Vec<&'a Facility>),
}

impl<'a> StateFilter<'a> {
    pub fn facilities(&self) -> &[&'a Facility] {
        match self {
            StateFilter::NoSelection => &[],
            StateFilter::Selected(facilities) => facilities,
        }
    }

    pub fn is_no_selection(&self) -> bool {
        matches!(self, StateFilter::NoSelection)
    }
}

/// Keep the facilities whose state is in `selected`.
pub fn by_states<'a>(dataset: &'a FacilityDataset, selected: &BTreeSet<String>) -> StateFilter<'a> {
    if selected.is_empty() {
        return StateFilter::NoSelection;
    }
    StateFilter::Selected(
        dataset
            .facilities
            .iter()
            .filter(|f| selected.contains(&f.state))
            .collect(),
    )
}

/// Filter the municipality table by the selection's threshold.
pub fn by_minimum_count(municipalities: &FrequencyTable, selection: &Selection) -> FrequencyTable {
    municipalities.at_least(selection.min_count)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::aggregate::by_municipality;
    use crate::data::model::{FacilityRecord, FacilityTable};

    fn dataset() -> FacilityDataset {
        let rows = [
            ("SP", "Campinas"),
            ("RJ", "Niterói"),
            ("SP", "Santos"),
            ("MG", "Betim"),
            ("SP", "Campinas"),
        ];
        let records = rows
            .iter()
            .map(|(state, municipality)| FacilityRecord {
                state: state.to_string(),
                municipality: municipality.to_string(),
                latitude: Some(-20.0),
                longitude: Some(-45.0),
                extra: BTreeMap::new(),
            })
            .collect();
        FacilityDataset::clean(FacilityTable {
            extra_columns: Vec::new(),
            records,
        })
    }

    fn states(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_selection_signals_no_selection() {
        let ds = dataset();
        let view = by_states(&ds, &BTreeSet::new());
        assert!(view.is_no_selection());
        assert!(view.facilities().is_empty());
    }

    #[test]
    fn single_state_selection_returns_only_that_state() {
        let ds = dataset();
        let view = by_states(&ds, &states(&["SP"]));
        assert!(!view.is_no_selection());
        assert_eq!(view.facilities().len(), 3);
        assert!(view.facilities().iter().all(|f| f.state == "SP"));
    }

    #[test]
    fn multi_state_selection_is_a_subset_in_dataset_order() {
        let ds = dataset();
        let view = by_states(&ds, &states(&["MG", "RJ"]));
        let picked: Vec<&str> = view
            .facilities()
            .iter()
            .map(|f| f.municipality.as_str())
            .collect();
        assert_eq!(picked, ["Niterói", "Betim"]);
        assert!(view.facilities().len() <= ds.len());
    }

    #[test]
    fn unknown_state_gives_an_empty_result_not_no_selection() {
        let ds = dataset();
        let view = by_states(&ds, &states(&["AM"]));
        assert_eq!(view, StateFilter::Selected(Vec::new()));
    }

    #[test]
    fn initial_selection_shows_every_municipality() {
        let ds = dataset();
        let municipalities = by_municipality(&ds);
        let selection = Selection::initial(&municipalities);
        assert!(selection.states.is_empty());
        assert_eq!(selection.min_count, 1);
        assert_eq!(by_minimum_count(&municipalities, &selection), municipalities);
    }
}
