use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;
use ubs_dashboard::data::model::{
    LATITUDE_COLUMN, LONGITUDE_COLUMN, MUNICIPALITY_COLUMN, STATE_COLUMN,
};

/// Write a synthetic UBS dataset for trying out the dashboard.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Number of facilities to generate
    #[arg(long, default_value_t = 5000)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output path; `.parquet` writes Parquet, anything else `;`-separated CSV
    #[arg(long, default_value = "ubs_atualizado.csv")]
    out: PathBuf,

    /// Fraction of rows written without coordinates (0 to 1)
    #[arg(long, default_value_t = 0.04, value_parser = parse_fraction)]
    missing: f64,
}

fn parse_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("'{s}' is not a number: {e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("fraction must be between 0 and 1, got {value}"))
    }
}

/// State name, capital-ish centre (lat, lon), spread in degrees, relative weight.
const STATES: &[(&str, f64, f64, f64, f64)] = &[
    ("São Paulo", -22.5, -48.5, 1.8, 10.0),
    ("Minas Gerais", -18.5, -44.5, 2.5, 9.0),
    ("Bahia", -12.5, -41.5, 2.5, 7.0),
    ("Rio de Janeiro", -22.5, -43.0, 0.7, 4.0),
    ("Rio Grande do Sul", -29.5, -53.0, 1.8, 4.5),
    ("Paraná", -24.8, -51.5, 1.5, 4.5),
    ("Pernambuco", -8.4, -37.5, 1.2, 4.0),
    ("Ceará", -5.2, -39.5, 1.3, 4.0),
    ("Pará", -4.0, -52.0, 3.0, 3.0),
    ("Maranhão", -5.0, -45.0, 2.0, 3.0),
    ("Goiás", -16.0, -49.5, 1.8, 2.5),
    ("Amazonas", -4.0, -63.0, 3.5, 1.5),
    ("Acre", -9.5, -70.0, 1.0, 0.5),
    ("Roraima", 2.5, -61.0, 1.0, 0.4),
];

const MUNICIPALITIES_PER_STATE: usize = 25;

#[derive(Debug, Serialize)]
struct UbsRow {
    #[serde(rename = "CNES")]
    cnes: i64,
    #[serde(rename = "Nome_UF")]
    state: String,
    #[serde(rename = "Nome_Município")]
    municipality: String,
    #[serde(rename = "NOME")]
    name: String,
    #[serde(rename = "LATITUDE")]
    latitude: Option<f64>,
    #[serde(rename = "LONGITUDE")]
    longitude: Option<f64>,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Index drawn proportionally to `weights`.
    fn weighted(&mut self, weights: impl Iterator<Item = f64> + Clone) -> usize {
        let total: f64 = weights.clone().sum();
        let mut target = self.next_f64() * total;
        let mut last = 0;
        for (i, w) in weights.enumerate() {
            last = i;
            if target < w {
                return i;
            }
            target -= w;
        }
        last
    }
}

fn generate(args: &Args) -> Vec<UbsRow> {
    let mut rng = SimpleRng::new(args.seed);
    let mut rows = Vec::with_capacity(args.rows);

    for i in 0..args.rows {
        let s = rng.weighted(STATES.iter().map(|st| st.4));
        let (state, lat0, lon0, spread, _) = STATES[s];

        // Skewed municipality choice: a few big cities, many small towns.
        let m = rng.weighted((0..MUNICIPALITIES_PER_STATE).map(|k| 1.0 / (k as f64 + 1.0)));
        let municipality = format!("{state} {:02}", m + 1);

        let located = rng.next_f64() >= args.missing;
        let (latitude, longitude) = if located {
            (
                Some(rng.gauss(lat0, spread / 2.0)),
                Some(rng.gauss(lon0, spread / 2.0)),
            )
        } else {
            (None, None)
        };

        rows.push(UbsRow {
            cnes: 2_000_000 + i as i64,
            state: state.to_string(),
            municipality,
            name: format!("UBS {:05}", i + 1),
            latitude,
            longitude,
        });
    }
    rows
}

fn write_csv(path: &Path, rows: &[UbsRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[UbsRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("CNES", DataType::Int64, false),
        Field::new(STATE_COLUMN, DataType::Utf8, false),
        Field::new(MUNICIPALITY_COLUMN, DataType::Utf8, false),
        Field::new("NOME", DataType::Utf8, false),
        Field::new(LATITUDE_COLUMN, DataType::Float64, true),
        Field::new(LONGITUDE_COLUMN, DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.cnes))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.state.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.municipality.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.name.as_str()))),
            Arc::new(rows.iter().map(|r| r.latitude).collect::<Float64Array>()),
            Arc::new(rows.iter().map(|r| r.longitude).collect::<Float64Array>()),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let rows = generate(&args);

    let is_parquet = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&args.out, &rows)?;
    } else {
        write_csv(&args.out, &rows)?;
    }

    let unlocated = rows.iter().filter(|r| r.latitude.is_none()).count();
    println!(
        "Wrote {} UBS ({unlocated} without coordinates) to {}",
        rows.len(),
        args.out.display()
    );
    Ok(())
}
