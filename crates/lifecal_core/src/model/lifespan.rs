//! Lifespan value type.
//!
//! # Responsibility
//! - Pair a birthdate with the reference date it is measured against.
//! - Expose the derived week counts used by the summary and the grid.
//!
//! # Invariants
//! - `as_of >= birthdate` for every constructed value.

use crate::calc::weeks::{clamp_weeks, percentage_lived, weeks_lived, weeks_remaining};
use chrono::NaiveDate;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected lifespan construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeSpanError {
    /// Reference date precedes the birthdate.
    ReferenceBeforeBirth {
        birthdate: NaiveDate,
        as_of: NaiveDate,
    },
}

impl Display for LifeSpanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReferenceBeforeBirth { birthdate, as_of } => write!(
                f,
                "reference date {as_of} is earlier than birthdate {birthdate}"
            ),
        }
    }
}

impl Error for LifeSpanError {}

/// A birthdate measured against a fixed reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LifeSpan {
    birthdate: NaiveDate,
    as_of: NaiveDate,
}

impl LifeSpan {
    /// Creates a lifespan, rejecting reference dates before the birthdate.
    pub fn new(birthdate: NaiveDate, as_of: NaiveDate) -> Result<Self, LifeSpanError> {
        if as_of < birthdate {
            return Err(LifeSpanError::ReferenceBeforeBirth { birthdate, as_of });
        }
        Ok(Self { birthdate, as_of })
    }

    pub fn birthdate(&self) -> NaiveDate {
        self.birthdate
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Whole weeks between birthdate and reference date, unclamped.
    pub fn weeks_lived(&self) -> u32 {
        weeks_lived(self.birthdate, self.as_of)
    }

    /// Weeks lived, saturated at the grid capacity.
    pub fn grid_weeks(&self) -> u32 {
        clamp_weeks(self.weeks_lived())
    }

    pub fn percentage_lived(&self) -> f64 {
        percentage_lived(self.weeks_lived())
    }

    pub fn weeks_remaining(&self) -> u32 {
        weeks_remaining(self.weeks_lived())
    }
}
