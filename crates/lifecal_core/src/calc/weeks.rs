//! Week counting over the proleptic Gregorian calendar.
//!
//! # Invariants
//! - Day differences come from real calendar subtraction, so leap days count.
//! - Division truncates; the day count is never negative here.

use crate::model::{MAX_AGE_YEARS, TOTAL_WEEKS, WEEKS_PER_YEAR};
use chrono::NaiveDate;

const DAYS_PER_WEEK: i64 = 7;

/// Returns the number of whole weeks from `birthdate` to `reference`.
///
/// Returns `0` when `reference` precedes `birthdate`.
pub fn weeks_lived(birthdate: NaiveDate, reference: NaiveDate) -> u32 {
    let days = reference.signed_duration_since(birthdate).num_days();
    if days <= 0 {
        return 0;
    }
    u32::try_from(days / DAYS_PER_WEEK).unwrap_or(u32::MAX)
}

/// Saturates a week count at the grid capacity.
pub fn clamp_weeks(weeks: u32) -> u32 {
    weeks.min(TOTAL_WEEKS)
}

/// Share of a 90-year life elapsed, in percent.
///
/// Not clamped: someone older than 90 reports more than 100%.
pub fn percentage_lived(weeks: u32) -> f64 {
    f64::from(weeks) / f64::from(TOTAL_WEEKS) * 100.0
}

pub fn weeks_remaining(weeks: u32) -> u32 {
    TOTAL_WEEKS - clamp_weeks(weeks)
}

/// Returns `(column, row)` of the week currently being lived.
///
/// `None` once the grid is saturated.
pub fn current_week_position(weeks: u32) -> Option<(u32, u32)> {
    if weeks >= TOTAL_WEEKS {
        return None;
    }
    let row = weeks / WEEKS_PER_YEAR;
    debug_assert!(row < MAX_AGE_YEARS);
    Some((weeks % WEEKS_PER_YEAR, row))
}
