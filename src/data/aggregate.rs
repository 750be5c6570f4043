use std::collections::HashMap;

use super::model::FacilityDataset;

pub const STATE_LABEL: &str = "Estado";
pub const FREQUENCY_LABEL: &str = "Frequência";
pub const MUNICIPALITY_LABEL: &str = "Nome_Município";
pub const UBS_COUNT_LABEL: &str = "Quantidade de UBS";

/// Bin count used for the municipality histogram.
pub const HISTOGRAM_BINS: usize = 30;

// ---------------------------------------------------------------------------
// FrequencyTable
// ---------------------------------------------------------------------------

/// `(key, count)` rows ordered by descending count.
///
/// Ties keep the order in which keys first appeared, so building the same
/// table twice from the same dataset yields identical rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    pub key_label: &'static str,
    pub count_label: &'static str,
    pub rows: Vec<(String, usize)>,
}

impl FrequencyTable {
    /// Count occurrences of each key.
    pub fn value_counts<'a>(
        keys: impl IntoIterator<Item = &'a str>,
        key_label: &'static str,
        count_label: &'static str,
    ) -> Self {
        let mut position: HashMap<&'a str, usize> = HashMap::new();
        let mut rows: Vec<(String, usize)> = Vec::new();
        for key in keys {
            match position.get(key) {
                Some(&idx) => rows[idx].1 += 1,
                None => {
                    position.insert(key, rows.len());
                    rows.push((key.to_string(), 1));
                }
            }
        }
        // Stable: equal counts stay in first-appearance order.
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        FrequencyTable {
            key_label,
            count_label,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|(_, n)| n).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(k, _)| k.as_str())
    }

    pub fn count_of(&self, key: &str) -> Option<usize> {
        self.rows.iter().find(|(k, _)| k == key).map(|(_, n)| *n)
    }

    /// Smallest and largest count, the bounds of the threshold slider.
    pub fn count_range(&self) -> Option<(usize, usize)> {
        let min = self.rows.iter().map(|(_, n)| *n).min()?;
        let max = self.rows.iter().map(|(_, n)| *n).max()?;
        Some((min, max))
    }

    /// Rows whose count is at least `threshold`, order preserved.
    pub fn at_least(&self, threshold: usize) -> FrequencyTable {
        FrequencyTable {
            key_label: self.key_label,
            count_label: self.count_label,
            rows: self
                .rows
                .iter()
                .filter(|(_, n)| *n >= threshold)
                .cloned()
                .collect(),
        }
    }

    /// Fraction of the total held by each key.
    pub fn shares(&self) -> Vec<(&str, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.rows
            .iter()
            .map(|(k, n)| (k.as_str(), *n as f64 / total as f64))
            .collect()
    }
}

/// Facilities per state (`Estado` / `Frequência`).
pub fn by_state(dataset: &FacilityDataset) -> FrequencyTable {
    FrequencyTable::value_counts(
        dataset.facilities.iter().map(|f| f.state.as_str()),
        STATE_LABEL,
        FREQUENCY_LABEL,
    )
}

/// Facilities per municipality (`Nome_Município` / `Quantidade de UBS`).
pub fn by_municipality(dataset: &FacilityDataset) -> FrequencyTable {
    FrequencyTable::value_counts(
        dataset.facilities.iter().map(|f| f.municipality.as_str()),
        MUNICIPALITY_LABEL,
        UBS_COUNT_LABEL,
    )
}

// ---------------------------------------------------------------------------
// Histogram of counts
// ---------------------------------------------------------------------------

/// Half-open interval `[start, end)` of counts and how many rows fall in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBin {
    pub start: usize,
    pub end: usize,
    pub rows: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) as f64 / 2.0
    }

    pub fn width(&self) -> f64 {
        (self.end - self.start) as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bin the counts of `table` into at most `max_bins` bins of equal
    /// integer width spanning `[min, max]`.
    pub fn of_counts(table: &FrequencyTable, max_bins: usize) -> Self {
        let Some((min, max)) = table.count_range() else {
            return Self::default();
        };
        let max_bins = max_bins.max(1);
        let span = max - min + 1;
        let width = span.div_ceil(max_bins);
        let n_bins = span.div_ceil(width);

        let mut bins: Vec<HistogramBin> = (0..n_bins)
            .map(|i| HistogramBin {
                start: min + i * width,
                end: min + (i + 1) * width,
                rows: 0,
            })
            .collect();
        for (_, count) in &table.rows {
            bins[(count - min) / width].rows += 1;
        }
        Histogram { bins }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.rows).sum()
    }
}
