/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (year coerced to text)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Row>, sorted distinct years
///   └──────────┘
///        │  + Selector (All | Year)
///        ▼
///   ┌──────────┐
///   │  filter   │  selector → row subset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  subset → Summary + ChartSeries
///   └──────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use aggregate::{aggregate, aggregate_all, AggregateResult};
pub use error::{InvalidSelectorError, LoadError};
pub use model::{Row, Selector, Table};
