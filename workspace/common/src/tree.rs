use serde::{Deserialize, Serialize};

use crate::totals::MonthlyTotals;

/// A category (or the synthesized project root) together with the monthly
/// totals rolled up over its whole subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// None identifies the project root, which is never persisted.
    pub id: Option<i32>,
    pub name: String,
    #[serde(flatten)]
    pub totals: MonthlyTotals,
}

/// One level of the category tree: the queried node plus each of its direct
/// children, every entry already rolled up over its own subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    #[serde(flatten)]
    pub node: CategoryTotals,
    pub sub_categories: Vec<CategoryTotals>,
}
