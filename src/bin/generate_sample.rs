use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use avocado_insights::data::model::{
    COL_BEARING_ACRES, COL_CROP_VALUE, COL_DOLLARS_PER_ACRE, COL_PRICE_PER_POUND, COL_VOLUME,
    COL_YEAR,
};
use parquet::arrow::ArrowWriter;

const CSV_PATH: &str = "sample_data.csv";
const PARQUET_PATH: &str = "sample_data.parquet";
const FIRST_YEAR: i64 = 1972;
const LAST_YEAR: i64 = 2023;

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

    /// Uniform in `[1 - spread, 1 + spread)`.
    fn jitter(&mut self, spread: f64) -> f64 {
        let u = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        1.0 + spread * (2.0 * u - 1.0)
    }
}

struct CropYear {
    year: i64,
    bearing_acres: f64,
    volume: f64,
    crop_value: f64,
    price_cents: f64,
    dollars_per_acre: f64,
}

/// Acreage grows then plateaus; yield swings year to year (alternate
/// bearing); price moves against volume.
fn generate(rng: &mut SimpleRng) -> Vec<CropYear> {
    (FIRST_YEAR..=LAST_YEAR)
        .map(|year| {
            let t = (year - FIRST_YEAR) as f64;
            let planted = 18_000.0 + 52_000.0 / (1.0 + (-(t - 12.0) / 4.0).exp());
            let acres = planted * rng.jitter(0.04);
            let alternate = if year % 2 == 0 { 1.12 } else { 0.88 };
            let lbs_per_acre = 6_000.0 * alternate * rng.jitter(0.2);
            let volume = (acres * lbs_per_acre / 1_000_000.0).round();
            let price = 2_400.0 / volume.sqrt() * (1.0 + t / 40.0) * rng.jitter(0.1);
            let price_cents = (price * 100.0).round() / 100.0;
            let crop_value = (volume * 1_000_000.0 * price_cents / 100.0).round();
            CropYear {
                year,
                bearing_acres: acres.round(),
                volume,
                crop_value,
                price_cents,
                dollars_per_acre: (crop_value / acres).round(),
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[CropYear]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record([
        COL_YEAR,
        COL_BEARING_ACRES,
        COL_VOLUME,
        COL_CROP_VALUE,
        COL_PRICE_PER_POUND,
        COL_DOLLARS_PER_ACRE,
    ])?;
    for r in rows {
        writer.write_record([
            r.year.to_string(),
            r.bearing_acres.to_string(),
            r.volume.to_string(),
            r.crop_value.to_string(),
            r.price_cents.to_string(),
            r.dollars_per_acre.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[CropYear]) -> Result<()> {
    let float_col = |f: fn(&CropYear) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from_iter_values(rows.iter().map(f)))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_YEAR, DataType::Int64, false),
        Field::new(COL_BEARING_ACRES, DataType::Float64, false),
        Field::new(COL_VOLUME, DataType::Float64, false),
        Field::new(COL_CROP_VALUE, DataType::Float64, false),
        Field::new(COL_PRICE_PER_POUND, DataType::Float64, false),
        Field::new(COL_DOLLARS_PER_ACRE, DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))) as ArrayRef,
            float_col(|r| r.bearing_acres),
            float_col(|r| r.volume),
            float_col(|r| r.crop_value),
            float_col(|r| r.price_cents),
            float_col(|r| r.dollars_per_acre),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).context("creating parquet output")?;
    let mut writer =
        ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(Path::new(CSV_PATH), &rows)?;
    write_parquet(Path::new(PARQUET_PATH), &rows)?;

    println!(
        "Wrote {} years ({FIRST_YEAR}-{LAST_YEAR}) to {CSV_PATH} and {PARQUET_PATH}",
        rows.len()
    );
    Ok(())
}
