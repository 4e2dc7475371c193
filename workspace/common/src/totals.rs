use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly rollup of a set of amounts, split by income versus expense and
/// one-off versus planned.
///
/// `left` is the net balance for the month and is always derived from the
/// four buckets, never set independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Sum of one-off incomes.
    #[serde(with = "rust_decimal::serde::str")]
    pub gain: Decimal,
    /// Sum of one-off expenses.
    #[serde(with = "rust_decimal::serde::str")]
    pub used: Decimal,
    /// Sum of planned (monthly recurring) incomes.
    #[serde(with = "rust_decimal::serde::str")]
    pub planned_gain: Decimal,
    /// Sum of planned (monthly recurring) expenses.
    #[serde(with = "rust_decimal::serde::str")]
    pub planned_used: Decimal,
    /// `(gain + planned_gain) - (used + planned_used)`.
    #[serde(with = "rust_decimal::serde::str")]
    pub left: Decimal,
}

impl MonthlyTotals {
    /// Builds the rollup from the four buckets, deriving `left`.
    pub fn from_buckets(
        gain: Decimal,
        used: Decimal,
        planned_gain: Decimal,
        planned_used: Decimal,
    ) -> Self {
        Self {
            gain,
            used,
            planned_gain,
            planned_used,
            left: (gain + planned_gain) - (used + planned_used),
        }
    }
}
