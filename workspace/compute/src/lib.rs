pub mod error;
pub mod monthly;
pub mod recurrence;
pub mod totals;
pub mod tree;
pub mod window;

#[cfg(test)]
pub mod testing;

use chrono::{DateTime, Utc};

use window::MonthWindow;

/// Resolves the month window `offset` calendar months away from "today".
///
/// This function uses the provided instant as "today" or the current time if
/// none is provided; tests pass a fixed instant.
pub fn current_month_window(today: Option<DateTime<Utc>>, offset: i32) -> MonthWindow {
    let today = today.unwrap_or_else(Utc::now);
    MonthWindow::resolve(today, offset)
}
