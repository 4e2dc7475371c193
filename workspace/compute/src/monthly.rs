use common::MonthlyTotals;
use model::entities::amount;
use rust_decimal::Decimal;
use tracing::trace;

use crate::recurrence::matches_window;
use crate::window::MonthWindow;

/// Rolls a set of amounts up into the monthly buckets for one window.
///
/// Amounts outside the window are skipped; the rest are partitioned by
/// `(is_gain, is_planned)` and summed. The computation is a pure fold over
/// its inputs; an empty set yields the all-zero rollup.
pub fn totals_for(amounts: &[amount::Model], window: &MonthWindow) -> MonthlyTotals {
    let mut gain = Decimal::ZERO;
    let mut used = Decimal::ZERO;
    let mut planned_gain = Decimal::ZERO;
    let mut planned_used = Decimal::ZERO;

    for amount in amounts.iter().filter(|a| matches_window(a, window)) {
        trace!(
            "counting amount id={} value={} gain={} planned={}",
            amount.id, amount.value, amount.is_gain, amount.is_planned
        );
        match (amount.is_gain, amount.is_planned) {
            (true, false) => gain += amount.value,
            (false, false) => used += amount.value,
            (true, true) => planned_gain += amount.value,
            (false, true) => planned_used += amount.value,
        }
    }

    MonthlyTotals::from_buckets(gain, used, planned_gain, planned_used)
}
