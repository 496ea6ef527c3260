use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::LoadError;
use super::model::{Row, Table, COL_YEAR, NUMERIC_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the crop table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-separated with a header row
/// * `.tsv`     – tab-separated with a header row
/// * `.parquet` – one column per field; year may be integer, float or string
pub fn load(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => read_csv(open(path)?, b','),
        "tsv" => read_csv(open(path)?, b'\t'),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }?;

    log::info!(
        "Loaded {} rows covering {} years from {}",
        table.len(),
        table.years().len(),
        path.display()
    );
    Ok(table)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a delimited table with a header row.
///
/// The year cell is kept verbatim (trimmed); the five numeric columns must
/// parse as finite floats. Columns beyond the six known ones are ignored.
pub fn read_csv<R: Read>(source: R, delimiter: u8) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let year_idx = column_index(&headers, COL_YEAR)?;
    let numeric_idx = NUMERIC_COLUMNS
        .iter()
        .map(|col| column_index(&headers, col))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let year = record.get(year_idx).unwrap_or("").to_string();
        if year.is_empty() {
            return Err(LoadError::EmptyYear { row: row_no });
        }

        let mut values = [0.0; 5];
        for (slot, (&idx, col)) in values
            .iter_mut()
            .zip(numeric_idx.iter().zip(NUMERIC_COLUMNS))
        {
            *slot = parse_number(record.get(idx).unwrap_or(""), row_no, col)?;
        }

        rows.push(Row::from_values(year, values));
    }

    Table::from_rows(rows)
}

fn column_index(headers: &[String], column: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| LoadError::MissingColumn {
            column: column.to_string(),
        })
}

fn parse_number(s: &str, row: usize, column: &str) -> Result<f64, LoadError> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidNumber {
            row,
            column: column.to_string(),
            value: s.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same column names as the CSV layout.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`), whichever type they inferred for `Year`.
fn load_parquet(path: &Path) -> Result<Table, LoadError> {
    let file = open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    read_batches(reader)
}

/// Build a table from Arrow batches. Error rows count from the first batch.
pub fn read_batches<I>(batches: I) -> Result<Table, LoadError>
where
    I: IntoIterator<Item = Result<RecordBatch, ArrowError>>,
{
    let mut rows = Vec::new();

    for batch_result in batches {
        let batch = batch_result?;
        let offset = rows.len();

        let years = year_labels(&batch, offset)?;
        let columns = NUMERIC_COLUMNS
            .iter()
            .map(|col| float_column(&batch, col))
            .collect::<Result<Vec<_>, _>>()?;

        for (i, year) in years.into_iter().enumerate() {
            let mut values = [0.0; 5];
            let cells = values.iter_mut().zip(columns.iter().zip(NUMERIC_COLUMNS));
            for (slot, (arr, col)) in cells {
                let arr = arr.as_primitive::<Float64Type>();
                let value = if arr.is_null(i) { None } else { Some(arr.value(i)) };
                *slot = value
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| LoadError::InvalidNumber {
                        row: offset + i,
                        column: col.to_string(),
                        value: value.map_or("null".to_string(), |v| v.to_string()),
                    })?;
            }
            rows.push(Row::from_values(year, values));
        }
    }

    Table::from_rows(rows)
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(
    batch: &'a RecordBatch,
    column: &str,
) -> Result<&'a Arc<dyn Array>, LoadError> {
    batch
        .column_by_name(column)
        .ok_or_else(|| LoadError::MissingColumn {
            column: column.to_string(),
        })
}

/// Cast any numeric column to Float64.
fn float_column(batch: &RecordBatch, column: &str) -> Result<Arc<dyn Array>, LoadError> {
    let col = batch_column(batch, column)?;
    if !col.data_type().is_numeric() {
        return Err(LoadError::UnsupportedType {
            column: column.to_string(),
            data_type: col.data_type().to_string(),
        });
    }
    Ok(cast(col, &DataType::Float64)?)
}

/// Coerce the year column to text labels, whatever its physical type.
fn year_labels(batch: &RecordBatch, offset: usize) -> Result<Vec<String>, LoadError> {
    let col = batch_column(batch, COL_YEAR)?;

    let labels: Vec<Option<String>> = match col.data_type() {
        DataType::Utf8 => col
            .as_string::<i32>()
            .iter()
            .map(|v| v.map(|s| s.trim().to_string()))
            .collect(),
        DataType::LargeUtf8 => col
            .as_string::<i64>()
            .iter()
            .map(|v| v.map(|s| s.trim().to_string()))
            .collect(),
        DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            cast(col, &DataType::Float64)?
                .as_primitive::<Float64Type>()
                .iter()
                .map(|v| v.map(float_year_label))
                .collect()
        }
        dt if dt.is_integer() => cast(col, &DataType::Int64)?
            .as_primitive::<Int64Type>()
            .iter()
            .map(|v| v.map(|y| y.to_string()))
            .collect(),
        other => {
            return Err(LoadError::UnsupportedType {
                column: COL_YEAR.to_string(),
                data_type: other.to_string(),
            })
        }
    };

    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| match label {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(LoadError::EmptyYear { row: offset + i }),
        })
        .collect()
}

/// `1980.0` → `"1980"`; a genuinely fractional value keeps its decimals.
fn float_year_label(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}
