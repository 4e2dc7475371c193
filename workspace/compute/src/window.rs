use chrono::{DateTime, Datelike, TimeZone, Utc};

/// A half-open UTC range `[start, end)` covering exactly one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    /// First instant (00:00:00 UTC) of day 1 of the month.
    pub start: DateTime<Utc>,
    /// First instant of the following calendar month.
    pub end: DateTime<Utc>,
}

impl MonthWindow {
    /// Resolves the window for the month `offset` calendar months away from
    /// the reference instant's month. The offset may be negative; zero
    /// selects the reference's own month.
    pub fn resolve(reference: DateTime<Utc>, offset: i32) -> Self {
        let index = reference.year() as i64 * 12 + reference.month0() as i64 + offset as i64;
        Self {
            start: month_start(index),
            end: month_start(index + 1),
        }
    }

    /// Whether an instant falls inside the window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// First instant of the month identified by its absolute month index
/// (`year * 12 + month0`).
fn month_start(index: i64) -> DateTime<Utc> {
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap()
}
