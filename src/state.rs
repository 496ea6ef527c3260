use std::path::{Path, PathBuf};
use std::sync::Arc;

use avocado_insights::config::DashboardConfig;
use avocado_insights::data::{aggregate, aggregate_all, AggregateResult, Selector, Table};

use crate::color::YearPalette;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table, read-only once set.
    pub table: Arc<Table>,

    /// Where `table` came from.
    pub source_path: PathBuf,

    /// Current year filter.
    pub selector: Selector,

    /// Output of the last `aggregate` call for `selector`.
    pub result: AggregateResult,

    /// Per-year colours, built from the whole table.
    pub palette: YearPalette,

    pub sidebar_open: bool,
    pub show_data_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &DashboardConfig, table: Table) -> Self {
        let table = Arc::new(table);
        let result = aggregate_all(&table);
        Self {
            palette: YearPalette::new(table.years()),
            source_path: config.data_path.clone(),
            table,
            selector: Selector::All,
            result,
            sidebar_open: config.sidebar_open,
            show_data_table: config.show_data_table,
            status_message: None,
        }
    }

    /// Swap in a newly loaded table and reset the filter to `All`.
    pub fn set_table(&mut self, table: Table, path: &Path) {
        self.table = Arc::new(table);
        self.palette = YearPalette::new(self.table.years());
        self.source_path = path.to_path_buf();
        self.selector = Selector::All;
        self.result = aggregate_all(&self.table);
        self.status_message = None;
    }

    /// Apply a new selector. An invalid one is reported and replaced by `All`
    /// rather than taking the session down.
    pub fn set_selector(&mut self, selector: Selector) {
        if selector == self.selector {
            return;
        }
        match aggregate(&self.table, &selector) {
            Ok(result) => {
                self.selector = selector;
                self.result = result;
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("{e}");
                self.status_message = Some(format!("Error: {e}"));
                self.selector = Selector::All;
                self.result = aggregate_all(&self.table);
            }
        }
    }
}
