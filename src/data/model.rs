use std::collections::BTreeMap;
use std::fmt;

/// Column holding the state (UF) name.
pub const STATE_COLUMN: &str = "Nome_UF";
/// Column holding the municipality name.
pub const MUNICIPALITY_COLUMN: &str = "Nome_Município";
pub const LATITUDE_COLUMN: &str = "LATITUDE";
pub const LONGITUDE_COLUMN: &str = "LONGITUDE";

/// Cell contents read as "missing", mirroring the usual dataframe defaults.
pub const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

pub fn is_null_token(s: &str) -> bool {
    NULL_TOKENS.contains(&s.trim())
}

// ---------------------------------------------------------------------------
// CellValue – a single cell in a pass-through column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell of a column the dashboard does not interpret.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Guess the type of a text cell the way a CSV reader would.
    pub fn parse(s: &str) -> Self {
        if is_null_token(s) {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// FacilityRecord – one row as read from the file
// ---------------------------------------------------------------------------

/// One UBS exactly as read: coordinates may still be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityRecord {
    pub state: String,
    pub municipality: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Every other column: column_name → value.
    pub extra: BTreeMap<String, CellValue>,
}

impl FacilityRecord {
    /// Promote to a [`Facility`] when both coordinates are present.
    pub fn located(self) -> Option<Facility> {
        let (latitude, longitude) = (self.latitude?, self.longitude?);
        Some(Facility {
            state: self.state,
            municipality: self.municipality,
            latitude,
            longitude,
            extra: self.extra,
        })
    }
}

/// Records plus the order of their pass-through columns, as produced by a loader.
#[derive(Debug, Clone, Default)]
pub struct FacilityTable {
    pub extra_columns: Vec<String>,
    pub records: Vec<FacilityRecord>,
}

// ---------------------------------------------------------------------------
// Facility / FacilityDataset – the cleaned dataset
// ---------------------------------------------------------------------------

/// A UBS with a known location.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub state: String,
    pub municipality: String,
    pub latitude: f64,
    pub longitude: f64,
    pub extra: BTreeMap<String, CellValue>,
}

/// The cleaned dataset. Never mutated once built.
#[derive(Debug, Clone, Default)]
pub struct FacilityDataset {
    pub facilities: Vec<Facility>,
    /// Pass-through column names in file order.
    pub extra_columns: Vec<String>,
    /// Rows discarded because a coordinate was missing.
    pub dropped: usize,
}

impl FacilityDataset {
    /// Drop every record without both latitude and longitude.
    pub fn clean(table: FacilityTable) -> Self {
        let total = table.records.len();
        let facilities: Vec<Facility> = table
            .records
            .into_iter()
            .filter_map(FacilityRecord::located)
            .collect();
        let dropped = total - facilities.len();
        if dropped > 0 {
            log::warn!("Dropped {dropped} of {total} rows without latitude/longitude");
        }
        FacilityDataset {
            facilities,
            extra_columns: table.extra_columns,
            dropped,
        }
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}
