use std::collections::BTreeSet;

use super::model::{Row, Selector, Table};

// ---------------------------------------------------------------------------
// Year filter: which rows a selector keeps
// ---------------------------------------------------------------------------

/// Whether a single row passes the selector (text equality on the year).
pub fn matches(row: &Row, selector: &Selector) -> bool {
    match selector {
        Selector::All => true,
        Selector::Year(y) => row.year == *y,
    }
}

/// Return indices of rows that pass the selector, in table order.
///
/// * `All` → every row
/// * `Year(y)` → exactly the rows whose label equals `y`
///
/// An unknown year simply yields no rows; callers that need the
/// contract enforced go through [`Table::check_selector`] first.
pub fn subset_indices(table: &Table, selector: &Selector) -> Vec<usize> {
    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| matches(row, selector))
        .map(|(i, _)| i)
        .collect()
}

/// Distinct year labels among `rows`, ascending.
pub fn distinct_years<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<String> {
    rows.into_iter()
        .map(|r| r.year.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
