//! Month grid generation.

use chrono::{Datelike, Days, NaiveDate};
use mcal_core::{CalendarDay, CoreError, Result};

/// Number of cells in the rendered grid: six full weeks.
pub const GRID_CELLS: usize = 42;

/// Build the 42-cell grid for a month (1-based), Sunday-first.
///
/// Cells before the first of the month belong to the previous month and
/// cells after its last day to the next month; both carry
/// `is_current_month = false` and are never decorated or flagged.
pub fn month_grid(year: i32, month: u32, today: NaiveDate) -> Result<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CoreError::InvalidDate(format!("{year}-{month:02}")))?;

    // Walk back to the Sunday on or before the 1st, then fill 6 weeks.
    let lead = first.weekday().num_days_from_sunday() as u64;
    let start = first
        .checked_sub_days(Days::new(lead))
        .ok_or_else(|| CoreError::InvalidDate(format!("{year}-{month:02}")))?;

    let mut days = Vec::with_capacity(GRID_CELLS);
    for offset in 0..GRID_CELLS as u64 {
        let date = start
            .checked_add_days(Days::new(offset))
            .ok_or_else(|| CoreError::InvalidDate(format!("{year}-{month:02}")))?;
        let is_current_month = date.year() == year && date.month() == month;
        days.push(CalendarDay::empty(
            date,
            date.day(),
            is_current_month,
            date == today,
        ));
    }

    Ok(days)
}
