//! Transport-friendly result types shared between the compute core and the
//! surfaces that present its output. These structs mirror what the compute
//! layer produces so callers can serialize results without duplicating
//! shapes.

mod totals;
mod tree;

pub use totals::MonthlyTotals;
pub use tree::{CategoryTotals, CategoryTree};
