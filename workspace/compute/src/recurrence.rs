use model::entities::amount;

use crate::window::MonthWindow;

/// Decides whether an amount counts toward the given month window.
///
/// One-off amounts count for the month whose window contains `occurs_at`.
/// Planned amounts count for every month from the one containing `occurs_at`
/// through the one containing `ends_at` (inclusive), or indefinitely when
/// open-ended. The start test runs against the window's *end* boundary so a
/// recurrence beginning mid-month already counts for that month; the end test
/// runs against the window's *start* so the final month still counts.
pub fn matches_window(amount: &amount::Model, window: &MonthWindow) -> bool {
    if !amount.is_planned {
        return window.contains(amount.occurs_at);
    }

    if amount.occurs_at > window.end {
        return false;
    }
    match amount.ends_at {
        None => true,
        Some(ends_at) => ends_at >= window.start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn amount(planned: bool, occurs_at: DateTime<Utc>, ends_at: Option<DateTime<Utc>>) -> amount::Model {
        amount::Model {
            id: 1,
            value: Decimal::new(10, 0),
            is_gain: false,
            is_planned: planned,
            occurs_at,
            ends_at,
            description: String::new(),
            project_id: 1,
            category_id: None,
        }
    }

    fn window(offset: i32) -> MonthWindow {
        MonthWindow::resolve(at(2024, 1, 15), offset)
    }

    #[test]
    fn test_one_off_half_open() {
        let january = window(0);

        assert!(matches_window(&amount(false, at(2024, 1, 1), None), &january));
        assert!(matches_window(&amount(false, at(2024, 1, 31), None), &january));
        // The end boundary belongs to the next month.
        assert!(!matches_window(&amount(false, at(2024, 2, 1), None), &january));
        assert!(!matches_window(&amount(false, at(2023, 12, 31), None), &january));
    }

    #[test]
    fn test_open_ended_recurrence() {
        let recurring = amount(true, at(2024, 1, 10), None);

        // Not yet started in December 2023.
        assert!(!matches_window(&recurring, &window(-1)));
        // Counts from its start month onward.
        assert!(matches_window(&recurring, &window(0)));
        assert!(matches_window(&recurring, &window(1)));
        assert!(matches_window(&recurring, &window(24)));
    }

    #[test]
    fn test_recurrence_starting_mid_month_counts_for_that_month() {
        // Starts after the window opens but before it closes.
        let recurring = amount(true, at(2024, 1, 20), None);
        assert!(matches_window(&recurring, &window(0)));
    }

    #[test]
    fn test_bounded_recurrence_includes_final_month() {
        let recurring = amount(true, at(2024, 1, 1), Some(at(2024, 3, 1)));

        assert!(matches_window(&recurring, &window(0))); // January
        assert!(matches_window(&recurring, &window(1))); // February
        assert!(matches_window(&recurring, &window(2))); // March, the final month
        assert!(!matches_window(&recurring, &window(3))); // April
    }

    #[test]
    fn test_bounded_recurrence_ending_mid_month() {
        let recurring = amount(true, at(2024, 1, 1), Some(at(2024, 2, 14)));

        assert!(matches_window(&recurring, &window(0)));
        assert!(matches_window(&recurring, &window(1))); // ends inside February
        assert!(!matches_window(&recurring, &window(2)));
    }
}
