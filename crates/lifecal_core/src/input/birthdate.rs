//! Birthdate parsing and validation.
//!
//! # Invariants
//! - Only `YYYY-MM-DD` with zero-padded fields is accepted.
//! - Format, calendar and future-date failures are reported distinctly.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Human-readable description of the accepted input.
pub const EXPECTED_FORMAT: &str = "YYYY-MM-DD (e.g., 1990-05-15)";

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid birthdate regex")
});

/// Rejected birthdate input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInputError {
    /// Input does not match `YYYY-MM-DD`.
    InvalidFormat { input: String },
    /// Input matches the pattern but names no calendar date.
    InvalidDate { input: String },
    /// Date is later than the reference date.
    FutureDate { date: NaiveDate, today: NaiveDate },
}

impl DateInputError {
    /// Stable metadata-only code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "invalid_format",
            Self::InvalidDate { .. } => "invalid_date",
            Self::FutureDate { .. } => "future_date",
        }
    }
}

impl Display for DateInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat { input } => write!(
                f,
                "invalid date format `{input}`; please use {EXPECTED_FORMAT}"
            ),
            Self::InvalidDate { input } => write!(
                f,
                "`{input}` is not a real calendar date; please use {EXPECTED_FORMAT}"
            ),
            Self::FutureDate { date, today } => write!(
                f,
                "birthdate {date} cannot be in the future (today is {today})"
            ),
        }
    }
}

impl Error for DateInputError {}

/// Parses `input` as a birthdate and checks it is not after `today`.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
/// - `InvalidFormat` when the text is not `YYYY-MM-DD`.
/// - `InvalidDate` for impossible dates such as `1990-02-30` or month 13.
/// - `FutureDate` when the date is after `today`.
pub fn parse_birthdate(input: &str, today: NaiveDate) -> Result<NaiveDate, DateInputError> {
    let trimmed = input.trim();
    let captures = DATE_RE
        .captures(trimmed)
        .ok_or_else(|| DateInputError::InvalidFormat {
            input: trimmed.to_string(),
        })?;

    let invalid_date = || DateInputError::InvalidDate {
        input: trimmed.to_string(),
    };
    // ASCII digit captures of bounded width always parse.
    let year = captures[1].parse::<i32>().map_err(|_| invalid_date())?;
    let month = captures[2].parse::<u32>().map_err(|_| invalid_date())?;
    let day = captures[3].parse::<u32>().map_err(|_| invalid_date())?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid_date)?;
    if date > today {
        return Err(DateInputError::FutureDate { date, today });
    }
    Ok(date)
}

/// ISO form used in file names and summaries.
pub fn format_birthdate(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
