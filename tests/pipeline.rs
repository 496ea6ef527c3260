use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray,
};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use avocado_insights::data::{aggregate, loader, LoadError, Selector, Table};
use parquet::arrow::ArrowWriter;
use tempfile::{Builder, NamedTempFile, TempDir};

const HEADER: &str = "Year,Bearing Acres,Volume (millions of pounds),Crop Value ($),\
                      Price Per Pound (¢),Average Dollars Per Bearing Acre ($)";

fn csv_file(body: &str) -> NamedTempFile {
    let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(tmp, "{HEADER}\n{body}").unwrap();
    tmp
}

fn load_csv(body: &str) -> Table {
    let tmp = csv_file(body);
    loader::load(tmp.path()).unwrap()
}

const TWO_YEARS: &str = "1980,100,50,1000000,20,10000\n1981,200,150,3000000,30,15000\n";

#[test]
fn all_years_scenario() {
    let table = load_csv(TWO_YEARS);
    let s = aggregate(&table, &Selector::All).unwrap().summary;

    assert_eq!(s.year_count, 2);
    assert!((s.avg_bearing_acres - 150.0).abs() < 1e-9);
    assert!((s.total_volume - 200.0).abs() < 1e-9);
    assert!((s.total_crop_value_millions - 4.0).abs() < 1e-9);
    assert!((s.avg_price_per_pound - 25.0).abs() < 1e-9);
    assert!((s.avg_dollars_per_acre - 12_500.0).abs() < 1e-9);
}

#[test]
fn single_year_scenario() {
    let table = load_csv(TWO_YEARS);
    let s = aggregate(&table, &Selector::year("1980")).unwrap().summary;

    assert_eq!(s.year_count, 1);
    assert_eq!(s.avg_bearing_acres, 100.0);
    assert_eq!(s.total_volume, 50.0);
    assert_eq!(s.total_crop_value_millions, 1.0);
    assert_eq!(s.avg_price_per_pound, 20.0);
    assert_eq!(s.avg_dollars_per_acre, 10_000.0);
}

#[test]
fn year_count_for_all_matches_distinct_years() {
    let table = load_csv(
        "1990,1,1,1,1,1\n1985,2,2,2,2,2\n1990,3,3,3,3,3\n2001,4,4,4,4,4\n",
    );
    let result = aggregate(&table, &Selector::All).unwrap();
    assert_eq!(result.summary.year_count, table.years().len());
    assert_eq!(result.summary.year_count, 3);
}

#[test]
fn each_year_subset_is_exact() {
    let table = load_csv(
        "1990,1,10,1,1,1\n1985,2,20,2,2,2\n1990,3,30,3,3,3\n2001,4,40,4,4,4\n",
    );
    for year in table.years() {
        let result = aggregate(&table, &Selector::Year(year.clone())).unwrap();
        let expected: Vec<_> = table
            .rows()
            .iter()
            .filter(|r| &r.year == year)
            .cloned()
            .collect();
        assert_eq!(result.rows, expected);

        let volume: f64 = expected.iter().map(|r| r.volume_million_lbs).sum();
        assert!((result.summary.total_volume - volume).abs() < 1e-9);
        let acres = expected.iter().map(|r| r.bearing_acres).sum::<f64>() / expected.len() as f64;
        assert!((result.summary.avg_bearing_acres - acres).abs() < 1e-9);
    }
}

#[test]
fn unknown_year_is_rejected() {
    let table = load_csv(TWO_YEARS);
    let err = aggregate(&table, &Selector::year("1979")).unwrap_err();
    assert_eq!(err.selector, "1979");
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = loader::load(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
}

#[test]
fn missing_column_fails_load() {
    let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(tmp, "Year,Bearing Acres\n1980,100\n").unwrap();
    let err = loader::load(tmp.path()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { .. }));
}

const NUMERIC: [&str; 5] = [
    "Bearing Acres",
    "Volume (millions of pounds)",
    "Crop Value ($)",
    "Price Per Pound (¢)",
    "Average Dollars Per Bearing Acre ($)",
];

/// Write one batch with every column nullable.
fn write_columns(path: &Path, columns: Vec<(&str, ArrayRef)>) {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, arr)| Field::new(*name, arr.data_type().clone(), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let arrays = columns.into_iter().map(|(_, arr)| arr).collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();

    let file = std::fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

/// Two rows; each measure column holds `v, 2v` for its base value.
fn write_parquet(path: &Path, year: ArrayRef) {
    let bases = [100.0, 50.0, 1e6, 20.0, 1e4];
    let mut columns = vec![("Year", year)];
    for (name, v) in NUMERIC.into_iter().zip(bases) {
        columns.push((name, Arc::new(Float64Array::from(vec![v, v * 2.0])) as ArrayRef));
    }
    write_columns(path, columns);
}

/// Two rows with the volume column replaced.
fn write_with_volume(path: &Path, year: ArrayRef, volume: ArrayRef) {
    let ones = || -> ArrayRef { Arc::new(Float64Array::from(vec![1.0, 1.0])) };
    let columns = vec![
        ("Year", year),
        (NUMERIC[0], ones()),
        (NUMERIC[1], volume),
        (NUMERIC[2], ones()),
        (NUMERIC[3], ones()),
        (NUMERIC[4], ones()),
    ];
    write_columns(path, columns);
}

#[test]
fn parquet_integer_and_float_years_become_labels() {
    let dir = TempDir::new().unwrap();

    let int_path = dir.path().join("int_years.parquet");
    write_parquet(&int_path, Arc::new(Int64Array::from(vec![1980, 1981])));
    let table = loader::load(&int_path).unwrap();
    assert_eq!(table.years(), ["1980", "1981"]);

    let float_path = dir.path().join("float_years.parquet");
    write_parquet(&float_path, Arc::new(Float64Array::from(vec![1980.0, 1981.0])));
    let table = loader::load(&float_path).unwrap();
    assert_eq!(table.years(), ["1980", "1981"]);

    let s = aggregate(&table, &Selector::All).unwrap().summary;
    assert!((s.total_volume - 150.0).abs() < 1e-9);
    assert!((s.avg_bearing_acres - 150.0).abs() < 1e-9);
}

#[test]
fn parquet_string_years_are_kept() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("text_years.pq");
    write_parquet(&path, Arc::new(StringArray::from(vec!["1999", "2000"])));
    let table = loader::load(&path).unwrap();
    assert_eq!(table.years(), ["1999", "2000"]);
}

#[test]
fn parquet_null_measure_is_invalid_number() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("null_volume.parquet");
    let years = Arc::new(Int64Array::from(vec![1980, 1981]));
    let volume = Arc::new(Float64Array::from(vec![Some(5.0), None]));
    write_with_volume(&path, years, volume);

    match loader::load(&path).unwrap_err() {
        LoadError::InvalidNumber { row, column, value } => {
            assert_eq!(row, 1);
            assert_eq!(column, "Volume (millions of pounds)");
            assert_eq!(value, "null");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parquet_nan_measure_is_invalid_number() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nan_volume.parquet");
    let years = Arc::new(Int64Array::from(vec![1980, 1981]));
    let volume = Arc::new(Float64Array::from(vec![f64::NAN, 1.0]));
    write_with_volume(&path, years, volume);

    let err = loader::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::InvalidNumber { row: 0, value, .. } if value == "NaN"));
}

#[test]
fn parquet_boolean_measure_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bool_volume.parquet");
    let years = Arc::new(Int64Array::from(vec![1980, 1981]));
    write_with_volume(&path, years, Arc::new(BooleanArray::from(vec![true, false])));

    let err = loader::load(&path).unwrap_err();
    assert!(matches!(
        err,
        LoadError::UnsupportedType { column, .. } if column == "Volume (millions of pounds)"
    ));
}

#[test]
fn parquet_date_year_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("date_years.parquet");
    write_parquet(&path, Arc::new(Date32Array::from(vec![3653, 4018])));

    let err = loader::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedType { column, .. } if column == "Year"));
}

#[test]
fn parquet_null_year_is_empty_year() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("null_year.parquet");
    write_parquet(&path, Arc::new(Int64Array::from(vec![Some(1980), None])));

    let err = loader::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::EmptyYear { row: 1 }));
}
