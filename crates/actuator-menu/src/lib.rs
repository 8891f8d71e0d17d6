//! Menu aggregation.
//!
//! Contributors hand in flat item lists with category paths; the aggregator
//! merges them into a fresh tree on every query.

pub mod aggregator;
pub mod contributor;
pub mod tree;

pub use aggregator::MenuAggregator;
pub use contributor::{ActionMenuContributor, MenuCallback, MenuContributor, MenuItem};
pub use tree::{build_tree, MenuNode};
