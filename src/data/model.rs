use std::collections::BTreeSet;
use std::fmt;

use super::error::{InvalidSelectorError, LoadError};

// ---------------------------------------------------------------------------
// Column names as they appear in the source header
// ---------------------------------------------------------------------------

pub const COL_YEAR: &str = "Year";
pub const COL_BEARING_ACRES: &str = "Bearing Acres";
pub const COL_VOLUME: &str = "Volume (millions of pounds)";
pub const COL_CROP_VALUE: &str = "Crop Value ($)";
pub const COL_PRICE_PER_POUND: &str = "Price Per Pound (¢)";
pub const COL_DOLLARS_PER_ACRE: &str = "Average Dollars Per Bearing Acre ($)";

/// The five numeric columns, in [`Row`] field order.
pub const NUMERIC_COLUMNS: [&str; 5] = [
    COL_BEARING_ACRES,
    COL_VOLUME,
    COL_CROP_VALUE,
    COL_PRICE_PER_POUND,
    COL_DOLLARS_PER_ACRE,
];

// ---------------------------------------------------------------------------
// Row – one year of crop statistics
// ---------------------------------------------------------------------------

/// One observation (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Year kept as text so it sorts and compares as a label.
    pub year: String,
    pub bearing_acres: f64,
    pub volume_million_lbs: f64,
    pub crop_value_usd: f64,
    pub price_per_pound_cents: f64,
    pub avg_dollars_per_bearing_acre: f64,
}

impl Row {
    /// Build a row from the year label and the values of [`NUMERIC_COLUMNS`].
    pub fn from_values(year: String, values: [f64; 5]) -> Self {
        let [acres, volume, value, price, per_acre] = values;
        Row {
            year,
            bearing_acres: acres,
            volume_million_lbs: volume,
            crop_value_usd: value,
            price_per_pound_cents: price,
            avg_dollars_per_bearing_acre: per_acre,
        }
    }
}

// ---------------------------------------------------------------------------
// Selector – "All" or one year
// ---------------------------------------------------------------------------

/// The year filter chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selector {
    #[default]
    All,
    Year(String),
}

impl Selector {
    pub const ALL_LABEL: &'static str = "All";

    /// A concrete year. Never the `All` sentinel, even for the label "All".
    pub fn year(label: impl Into<String>) -> Self {
        Selector::Year(label.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str(Self::ALL_LABEL),
            Selector::Year(y) => f.write_str(y),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All rows in file order plus the pre-computed sorted set of years.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
    years: Vec<String>,
}

impl Table {
    /// Build the year index. Fails if any row has an empty year label.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self, LoadError> {
        if let Some(row) = rows.iter().position(|r| r.year.is_empty()) {
            return Err(LoadError::EmptyYear { row });
        }
        let years: BTreeSet<String> = rows.iter().map(|r| r.year.clone()).collect();
        Ok(Table {
            rows,
            years: years.into_iter().collect(),
        })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Distinct year labels in ascending (text) order.
    pub fn years(&self) -> &[String] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every valid selector value: `All` first, then each year.
    pub fn selector_choices(&self) -> Vec<Selector> {
        std::iter::once(Selector::All)
            .chain(self.years.iter().cloned().map(Selector::Year))
            .collect()
    }

    /// Reject selectors naming a year this table does not contain.
    pub fn check_selector(&self, selector: &Selector) -> Result<(), InvalidSelectorError> {
        match selector {
            Selector::All => Ok(()),
            Selector::Year(y) if self.years.binary_search(y).is_ok() => Ok(()),
            Selector::Year(y) => Err(InvalidSelectorError {
                selector: y.clone(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn row(year: &str, values: [f64; 5]) -> Row {
        Row::from_values(year.to_string(), values)
    }

    #[test]
    fn years_are_sorted_and_distinct() {
        let table = Table::from_rows(vec![
            row("1982", [1.0; 5]),
            row("1980", [1.0; 5]),
            row("1982", [2.0; 5]),
        ])
        .unwrap();
        assert_eq!(table.years(), ["1980", "1982"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn empty_year_is_rejected() {
        let err = Table::from_rows(vec![row("1980", [1.0; 5]), row("", [1.0; 5])]).unwrap_err();
        assert!(matches!(err, LoadError::EmptyYear { row: 1 }));
    }

    #[test]
    fn selector_choices_start_with_all() {
        let table = Table::from_rows(vec![row("1981", [0.0; 5]), row("1980", [0.0; 5])]).unwrap();
        let labels: Vec<String> = table
            .selector_choices()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(labels, ["All", "1980", "1981"]);
    }

    #[test]
    fn check_selector_uses_text_equality() {
        let table = Table::from_rows(vec![row("1980", [0.0; 5])]).unwrap();
        assert!(table.check_selector(&Selector::All).is_ok());
        assert!(table.check_selector(&Selector::year("1980")).is_ok());
        let err = table.check_selector(&Selector::year("1980.0")).unwrap_err();
        assert_eq!(err.selector, "1980.0");
    }

    #[test]
    fn year_label_displays_verbatim() {
        assert_eq!(Selector::year("1999").to_string(), "1999");
        assert!(Selector::default().is_all());
    }

    #[test]
    fn year_labelled_all_stays_distinct_from_sentinel() {
        let table = Table::from_rows(vec![row("All", [1.0; 5]), row("1980", [2.0; 5])]).unwrap();
        let choices = table.selector_choices();
        assert_eq!(choices.len(), 3);
        assert!(choices.contains(&Selector::All));
        assert!(choices.contains(&Selector::year("All")));
        assert_ne!(Selector::year("All"), Selector::All);
        assert!(table.check_selector(&Selector::year("All")).is_ok());
    }
}
