//! Input resolution for the calendar run.
//!
//! # Responsibility
//! - Validate birthdate strings against format, calendar and clock rules.
//! - Drive the bounded interactive prompt when no date was supplied.
//! - Resolve the title shown on the page.
//!
//! # Invariants
//! - A resolved birthdate is a real date not later than the reference date.
//! - Validation never panics on arbitrary user text.

pub mod birthdate;
pub mod prompt;

/// Title printed at the top of the page when none is supplied.
pub const DEFAULT_TITLE: &str = "A 90-Year Human Life in Weeks";

/// Returns the supplied title, or the default when absent or blank.
pub fn resolve_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}
