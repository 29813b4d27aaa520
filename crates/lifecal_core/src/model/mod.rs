//! Domain model for the life calendar.
//!
//! # Responsibility
//! - Define the value types handed between resolver, calculator and renderer.
//! - Own the fixed grid dimensions shared by every stage.
//!
//! # Invariants
//! - The grid is always `WEEKS_PER_YEAR` columns by `MAX_AGE_YEARS` rows.
//! - Model values are immutable once built.

pub mod grid;
pub mod lifespan;

/// Columns in the grid, one per week of a year of life.
pub const WEEKS_PER_YEAR: u32 = 52;

/// Rows in the grid, one per year of life.
pub const MAX_AGE_YEARS: u32 = 90;

/// Number of cells in the grid.
pub const TOTAL_WEEKS: u32 = WEEKS_PER_YEAR * MAX_AGE_YEARS;
