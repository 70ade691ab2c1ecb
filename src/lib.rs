//! Column-oriented reshaping of a dual-representation analytics feed into
//! the flat per-series tables a charting front end consumes.
//!
//! Pipeline:
//! ```text
//!   feed JSON
//!       │
//!       ▼
//!  ┌──────────┐
//!  │   feed    │  parse wire form → FeedTable (raw + formatted pairs)
//!  └──────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  select   │  pick raw / formatted / date version → ColumnStore
//!  └──────────┘
//!       │
//!       ▼
//!  ┌─────────────────────────┐
//!  │ filter │ quarter │ recode │  row subsetting and relabeling
//!  └─────────────────────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  group    │  split into ordered per-series ColumnStores
//!  └──────────┘
//! ```
//!
//! Every operation is a pure, synchronous function of its arguments: inputs
//! are borrowed immutably and outputs are freshly built stores. The crate
//! performs no I/O beyond parsing a JSON string handed to it.

pub mod dates;
pub mod error;
pub mod feed;
pub mod filter;
pub mod group;
pub mod quarter;
pub mod recode;
pub mod select;
pub mod store;
pub mod value;

pub use error::{ReshapeError, Result};
pub use feed::{parse_feed, FeedTable, FeedValue};
pub use filter::{filter_rows, indices_by_membership, indices_by_predicate, match_rows, project};
pub use group::{separate_into_groups, GroupSpec};
pub use quarter::{quarterly_rows, DEFAULT_MONTHS_PER_QUARTER};
pub use recode::recode_column;
pub use select::{
    select_by_version_spec, select_dates, select_formatted, select_raw, select_version,
    DataVersion, VersionSpec,
};
pub use store::ColumnStore;
pub use value::Value;
