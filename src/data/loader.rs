use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{
    is_null_token, CellValue, FacilityDataset, FacilityRecord, FacilityTable, LATITUDE_COLUMN,
    LONGITUDE_COLUMN, MUNICIPALITY_COLUMN, STATE_COLUMN,
};

/// Knobs for reading delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a facility file into raw records.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – delimited text with a header row (`;` by default)
/// * `.json`         – `[{ "Nome_UF": "...", "LATITUDE": -9.9, ... }, ...]`
/// * `.parquet`      – flat columns with the same names
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<FacilityTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => load_csv(path, options),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

/// Load and clean in one go: what the dashboard actually renders from.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<FacilityDataset, LoadError> {
    let table = load_file(path, options)?;
    let dataset = FacilityDataset::clean(table);
    log::info!(
        "Loaded {} UBS from {} ({} without coordinates dropped)",
        dataset.len(),
        path.display(),
        dataset.dropped
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Coordinate parsing
// ---------------------------------------------------------------------------

/// Parse a coordinate cell: null tokens and NaN are absent, anything else
/// that is not a finite number is a load error.
fn parse_coordinate(raw: &str, row: usize, column: &'static str) -> Result<Option<f64>, LoadError> {
    let raw = raw.trim();
    if is_null_token(raw) {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => finite(v, row, column).map(Some),
        Err(_) => Err(LoadError::InvalidCoordinate {
            row,
            column,
            value: raw.to_string(),
        }),
    }
}

/// `inf` parses as an `f64` but is no place on a map.
fn finite(v: f64, row: usize, column: &'static str) -> Result<f64, LoadError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(LoadError::InvalidCoordinate {
            row,
            column,
            value: v.to_string(),
        })
    }
}

fn coordinate_from_cell(
    cell: &CellValue,
    row: usize,
    column: &'static str,
) -> Result<Option<f64>, LoadError> {
    match cell {
        CellValue::Null => Ok(None),
        CellValue::String(s) => parse_coordinate(s, row, column),
        CellValue::Float(v) if v.is_nan() => Ok(None),
        CellValue::Float(v) => finite(*v, row, column).map(Some),
        CellValue::Integer(_) => Ok(cell.as_f64()),
        CellValue::Bool(b) => Err(LoadError::InvalidCoordinate {
            row,
            column,
            value: b.to_string(),
        }),
    }
}

fn label_from_cell(cell: &CellValue) -> String {
    cell.to_string()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Positions of the four columns the dashboard interprets.
struct ColumnIndex {
    state: usize,
    municipality: usize,
    latitude: usize,
    longitude: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            state: find(STATE_COLUMN)?,
            municipality: find(MUNICIPALITY_COLUMN)?,
            latitude: find(LATITUDE_COLUMN)?,
            longitude: find(LONGITUDE_COLUMN)?,
        })
    }

    fn is_known(&self, idx: usize) -> bool {
        idx == self.state || idx == self.municipality || idx == self.latitude || idx == self.longitude
    }
}

/// CSV layout: header row, one UBS per line, `;` between fields unless
/// `options.delimiter` says otherwise. Rows with the wrong number of fields
/// are rejected by the reader.
fn load_csv(path: &Path, options: &LoadOptions) -> Result<FacilityTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .from_reader(open(path)?);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    let index = ColumnIndex::resolve(&headers)?;

    let extra_columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !index.is_known(*i))
        .map(|(_, h)| h.clone())
        .collect();

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let mut extra = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            if !index.is_known(idx) {
                extra.insert(headers[idx].clone(), CellValue::parse(value));
            }
        }

        records.push(FacilityRecord {
            state: field(index.state).trim().to_string(),
            municipality: field(index.municipality).trim().to_string(),
            latitude: parse_coordinate(field(index.latitude), row, LATITUDE_COLUMN)?,
            longitude: parse_coordinate(field(index.longitude), row, LONGITUDE_COLUMN)?,
            extra,
        });
    }

    Ok(FacilityTable {
        extra_columns,
        records,
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "Nome_UF": "Acre", "Nome_Município": "Rio Branco",
///     "LATITUDE": -9.97, "LONGITUDE": -67.81, "CNES": 2000733 },
///   ...
/// ]
/// ```
///
/// Coordinates may be numbers, numeric strings or `null`. A key left out of
/// one record is a null cell; a column is only missing when no record has it.
fn load_json(path: &Path) -> Result<FacilityTable, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    let rows = root.as_array().ok_or(LoadError::NotAnArray)?;

    let known = [STATE_COLUMN, MUNICIPALITY_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN];
    let mut seen = [false; 4];
    let mut extra_columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (row, value) in rows.iter().enumerate() {
        let obj = value.as_object().ok_or(LoadError::NotARecord(row))?;
        for (flag, name) in seen.iter_mut().zip(known) {
            *flag |= obj.contains_key(name);
        }
        let cell = |name: &str| obj.get(name).map(json_to_cell).unwrap_or(CellValue::Null);

        let mut extra = BTreeMap::new();
        for (key, val) in obj {
            if known.contains(&key.as_str()) {
                continue;
            }
            if !extra_columns.contains(key) {
                extra_columns.push(key.clone());
            }
            extra.insert(key.clone(), json_to_cell(val));
        }

        records.push(FacilityRecord {
            state: label_from_cell(&cell(STATE_COLUMN)),
            municipality: label_from_cell(&cell(MUNICIPALITY_COLUMN)),
            latitude: coordinate_from_cell(&cell(LATITUDE_COLUMN), row, LATITUDE_COLUMN)?,
            longitude: coordinate_from_cell(&cell(LONGITUDE_COLUMN), row, LONGITUDE_COLUMN)?,
            extra,
        });
    }

    if !records.is_empty() {
        if let Some((_, name)) = seen.iter().zip(known).find(|(seen, _)| !**seen) {
            return Err(LoadError::MissingColumn(name.to_string()));
        }
    }

    Ok(FacilityTable {
        extra_columns,
        records,
    })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of facilities.
///
/// The four interpreted columns may be strings or numbers (coordinates as
/// Float64/Float32/Int, or Utf8 holding numbers); other columns are carried
/// through as cells. Dictionary and view string columns (pandas categoricals,
/// polars strings) are decoded to plain Utf8 first.
fn load_parquet(path: &Path) -> Result<FacilityTable, LoadError> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?.build()?;

    let mut extra_columns: Vec<String> = Vec::new();
    let mut records = Vec::new();

    for batch in reader {
        let batch = batch?;
        let schema = batch.schema();
        let column = |name: &str| {
            schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn(name.to_string()))
                .and_then(|idx| decode_strings(batch.column(idx)))
        };
        let state_col = column(STATE_COLUMN)?;
        let municipality_col = column(MUNICIPALITY_COLUMN)?;
        let lat_col = column(LATITUDE_COLUMN)?;
        let lon_col = column(LONGITUDE_COLUMN)?;

        let known = [STATE_COLUMN, MUNICIPALITY_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN];
        let extra_cols: Vec<(String, ArrayRef)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, f)| !known.contains(&f.name().as_str()))
            .map(|(i, f)| Ok((f.name().clone(), decode_strings(batch.column(i))?)))
            .collect::<Result<_, LoadError>>()?;
        for (name, _) in &extra_cols {
            if !extra_columns.contains(name) {
                extra_columns.push(name.clone());
            }
        }

        let offset = records.len();
        for i in 0..batch.num_rows() {
            let row = offset + i;
            let extra = extra_cols
                .iter()
                .map(|(name, col)| Ok((name.clone(), arrow_cell(col, i)?)))
                .collect::<Result<_, LoadError>>()?;

            records.push(FacilityRecord {
                state: label_from_cell(&arrow_cell(&state_col, i)?),
                municipality: label_from_cell(&arrow_cell(&municipality_col, i)?),
                latitude: coordinate_from_cell(&arrow_cell(&lat_col, i)?, row, LATITUDE_COLUMN)?,
                longitude: coordinate_from_cell(&arrow_cell(&lon_col, i)?, row, LONGITUDE_COLUMN)?,
                extra,
            });
        }
    }

    Ok(FacilityTable {
        extra_columns,
        records,
    })
}

/// Cast dictionary-encoded and view string columns to plain Utf8.
fn decode_strings(col: &ArrayRef) -> Result<ArrayRef, LoadError> {
    match col.data_type() {
        DataType::Dictionary(_, _) | DataType::Utf8View => Ok(cast(col, &DataType::Utf8)?),
        _ => Ok(col.clone()),
    }
}

/// Extract a single cell from an Arrow column at a given row.
///
/// Numbers and booleans keep their type; anything else (dates, timestamps,
/// decimals) is formatted as text.
fn arrow_cell(col: &ArrayRef, row: usize) -> Result<CellValue, LoadError> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        _ => CellValue::String(array_value_to_string(col, row)?),
    };
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Date32Array, DictionaryArray, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::Int32Type;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_fixture(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write fixture");
        file.flush().expect("flush fixture");
        file
    }

    const UBS_CSV: &str = "\
CNES;Nome_UF;Nome_Município;NOME;LATITUDE;LONGITUDE
1;São Paulo;Campinas;UBS Centro;-22.90;-47.06
2;São Paulo;Campinas;UBS Norte;;-47.10
3;Rio de Janeiro;Niterói;UBS Icaraí;-22.90;-43.10
4;Bahia;Salvador;UBS Barra;NaN;-38.50
";

    #[test]
    fn csv_reads_semicolon_rows_and_keeps_other_columns() {
        let file = write_fixture(".csv", UBS_CSV);
        let table = load_file(file.path(), &LoadOptions::default()).expect("load csv");

        assert_eq!(table.records.len(), 4);
        assert_eq!(table.extra_columns, ["CNES", "NOME"]);

        let first = &table.records[0];
        assert_eq!(first.state, "São Paulo");
        assert_eq!(first.municipality, "Campinas");
        assert_eq!(first.latitude, Some(-22.90));
        assert_eq!(first.longitude, Some(-47.06));
        assert_eq!(first.extra["CNES"], CellValue::Integer(1));
        assert_eq!(first.extra["NOME"], CellValue::String("UBS Centro".into()));

        assert_eq!(table.records[1].latitude, None);
        assert_eq!(table.records[3].latitude, None);
    }

    #[test]
    fn load_dataset_cleans_unlocated_rows() {
        let file = write_fixture(".csv", UBS_CSV);
        let ds = load_dataset(file.path(), &LoadOptions::default()).expect("load dataset");

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dropped, 2);
        assert!(ds
            .facilities
            .iter()
            .all(|f| f.latitude.is_finite() && f.longitude.is_finite()));
    }

    #[test]
    fn custom_delimiter_is_honoured() {
        let file = write_fixture(
            ".csv",
            "Nome_UF,Nome_Município,LATITUDE,LONGITUDE\nAcre,Rio Branco,-9.97,-67.81\n",
        );
        let table = load_file(file.path(), &LoadOptions { delimiter: b',' }).expect("load csv");
        assert_eq!(table.records.len(), 1);
        assert!(table.extra_columns.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/nonexistent/ubs.csv"), &LoadOptions::default())
            .expect_err("missing file must fail");
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn missing_required_column_is_reported_by_name() {
        let file = write_fixture(".csv", "Nome_UF;LATITUDE;LONGITUDE\nAcre;1;2\n");
        let err = load_file(file.path(), &LoadOptions::default()).expect_err("must fail");
        match err {
            LoadError::MissingColumn(col) => assert_eq!(col, MUNICIPALITY_COLUMN),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_coordinate_is_rejected() {
        let file = write_fixture(
            ".csv",
            "Nome_UF;Nome_Município;LATITUDE;LONGITUDE\nAcre;Rio Branco;north;-67.81\n",
        );
        let err = load_file(file.path(), &LoadOptions::default()).expect_err("must fail");
        assert!(matches!(
            err,
            LoadError::InvalidCoordinate { row: 0, column: LATITUDE_COLUMN, .. }
        ));
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let file = write_fixture(
            ".csv",
            "Nome_UF;Nome_Município;LATITUDE;LONGITUDE\nAcre;Rio Branco;-9.97\n",
        );
        let err = load_file(file.path(), &LoadOptions::default()).expect_err("must fail");
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let file = write_fixture(".xlsx", "");
        let err = load_file(file.path(), &LoadOptions::default()).expect_err("must fail");
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn json_records_accept_numbers_strings_and_nulls() {
        let file = write_fixture(
            ".json",
            r#"[
                {"Nome_UF": "Acre", "Nome_Município": "Rio Branco", "LATITUDE": -9.97, "LONGITUDE": "-67.81", "CNES": 10},
                {"Nome_UF": "Acre", "Nome_Município": "Xapuri", "LATITUDE": null, "LONGITUDE": -68.5}
            ]"#,
        );
        let table = load_file(file.path(), &LoadOptions::default()).expect("load json");
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].longitude, Some(-67.81));
        assert_eq!(table.records[1].latitude, None);
        assert_eq!(table.extra_columns, ["CNES"]);
    }

    #[test]
    fn json_record_without_a_coordinate_key_is_dropped_by_clean() {
        let file = write_fixture(
            ".json",
            r#"[
                {"Nome_UF": "Acre", "Nome_Município": "Rio Branco", "LATITUDE": -9.97, "LONGITUDE": -67.81},
                {"Nome_UF": "Acre", "Nome_Município": "Xapuri", "LONGITUDE": -68.5}
            ]"#,
        );
        let ds = load_dataset(file.path(), &LoadOptions::default()).expect("load json");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.dropped, 1);
        assert_eq!(ds.facilities[0].municipality, "Rio Branco");
    }

    #[test]
    fn json_column_absent_from_every_record_is_missing() {
        let file = write_fixture(
            ".json",
            r#"[{"Nome_UF": "Acre", "Nome_Município": "Xapuri", "LONGITUDE": -68.5}]"#,
        );
        let err = load_file(file.path(), &LoadOptions::default()).expect_err("must fail");
        match err {
            LoadError::MissingColumn(col) => assert_eq!(col, LATITUDE_COLUMN),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn infinite_coordinates_are_rejected() {
        let file = write_fixture(
            ".csv",
            "Nome_UF;Nome_Município;LATITUDE;LONGITUDE\nAcre;Rio Branco;-9.97;inf\n",
        );
        let err = load_file(file.path(), &LoadOptions::default()).expect_err("must fail");
        assert!(matches!(
            err,
            LoadError::InvalidCoordinate { row: 0, column: LONGITUDE_COLUMN, .. }
        ));

        let json = write_fixture(
            ".json",
            r#"[{"Nome_UF": "Acre", "Nome_Município": "Xapuri", "LATITUDE": "-Infinity", "LONGITUDE": -68.5}]"#,
        );
        let err = load_file(json.path(), &LoadOptions::default()).expect_err("must fail");
        assert!(matches!(
            err,
            LoadError::InvalidCoordinate { column: LATITUDE_COLUMN, .. }
        ));
    }

    #[test]
    fn json_top_level_must_be_an_array() {
        let file = write_fixture(".json", r#"{"Nome_UF": "Acre"}"#);
        let err = load_file(file.path(), &LoadOptions::default()).expect_err("must fail");
        assert!(matches!(err, LoadError::NotAnArray));
    }

    #[test]
    fn parquet_columns_are_read_with_nullable_coordinates() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("CNES", arrow::datatypes::DataType::Int64, false),
            Field::new(STATE_COLUMN, arrow::datatypes::DataType::Utf8, false),
            Field::new(MUNICIPALITY_COLUMN, arrow::datatypes::DataType::Utf8, false),
            Field::new(LATITUDE_COLUMN, arrow::datatypes::DataType::Float64, true),
            Field::new(LONGITUDE_COLUMN, arrow::datatypes::DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec!["Pará", "Pará"])),
                Arc::new(StringArray::from(vec!["Belém", "Santarém"])),
                Arc::new(Float64Array::from(vec![Some(-1.45), None])),
                Arc::new(Float64Array::from(vec![Some(-48.5), Some(-54.7)])),
            ],
        )
        .expect("build batch");

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .expect("create temp file");
        let mut writer =
            ArrowWriter::try_new(file.reopen().expect("reopen"), schema, None).expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");

        let table = load_file(file.path(), &LoadOptions::default()).expect("load parquet");
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].state, "Pará");
        assert_eq!(table.records[0].latitude, Some(-1.45));
        assert_eq!(table.records[1].latitude, None);
        assert_eq!(table.records[1].extra["CNES"], CellValue::Integer(2));
    }

    fn write_parquet(schema: Arc<Schema>, columns: Vec<ArrayRef>) -> tempfile::NamedTempFile {
        let batch = RecordBatch::try_new(schema.clone(), columns).expect("build batch");
        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .expect("create temp file");
        let mut writer =
            ArrowWriter::try_new(file.reopen().expect("reopen"), schema, None).expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");
        file
    }

    #[test]
    fn parquet_dictionary_state_column_keeps_its_values() {
        let dict = DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8));
        let schema = Arc::new(Schema::new(vec![
            Field::new(STATE_COLUMN, dict.clone(), false),
            Field::new(MUNICIPALITY_COLUMN, dict, false),
            Field::new(LATITUDE_COLUMN, DataType::Float64, true),
            Field::new(LONGITUDE_COLUMN, DataType::Float64, true),
            Field::new("INAUGURACAO", DataType::Date32, true),
        ]));
        let states: DictionaryArray<Int32Type> = vec!["Pará", "Bahia", "Pará"].into_iter().collect();
        let municipalities: DictionaryArray<Int32Type> =
            vec!["Belém", "Salvador", "Santarém"].into_iter().collect();
        let file = write_parquet(
            schema,
            vec![
                Arc::new(states),
                Arc::new(municipalities),
                Arc::new(Float64Array::from(vec![-1.45, -12.97, -2.44])),
                Arc::new(Float64Array::from(vec![-48.5, -38.5, -54.7])),
                Arc::new(Date32Array::from(vec![Some(0), None, Some(1)])),
            ],
        );

        let ds = load_dataset(file.path(), &LoadOptions::default()).expect("load parquet");
        let names: Vec<&str> = ds.facilities.iter().map(|f| f.state.as_str()).collect();
        assert_eq!(names, ["Pará", "Bahia", "Pará"]);
        assert_eq!(ds.facilities[2].municipality, "Santarém");
        assert_eq!(
            ds.facilities[0].extra["INAUGURACAO"],
            CellValue::String("1970-01-01".into())
        );
        assert_eq!(ds.facilities[1].extra["INAUGURACAO"], CellValue::Null);

        let by_state = crate::data::aggregate::by_state(&ds);
        assert_eq!(
            by_state.rows,
            vec![("Pará".to_string(), 2), ("Bahia".to_string(), 1)]
        );
    }
}
