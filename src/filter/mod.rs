//! Stock filtering: range tokens, per-dimension predicates, the filter
//! engine, option derivation and the "load more" cursor.

pub mod buckets;
pub mod engine;
pub mod options;
pub mod pagination;
pub mod predicates;
pub mod range;
pub mod selection;
pub mod view;

/// Sentinel meaning "this dimension is not constrained".
pub const ALL: &str = "all";

pub use engine::{FilteredResult, ResultStatus, filter};
pub use options::{FilterOptions, OptionEntry, OptionSet, derive_options};
pub use pagination::PaginationCursor;
pub use range::RangeFilter;
pub use selection::{Choice, Dimension, FilterSelection};
pub use view::{StockPage, StockStatus, StockView};
