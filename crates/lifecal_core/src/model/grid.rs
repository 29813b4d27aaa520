//! Week grid model.
//!
//! # Responsibility
//! - Expand a week count into the full 52×90 cell sequence.
//!
//! # Invariants
//! - `cells` always holds exactly `TOTAL_WEEKS` entries in row-major order.
//! - The first `min(weeks, TOTAL_WEEKS)` cells are filled, the rest are not.

use crate::calc::weeks::clamp_weeks;
use crate::model::{MAX_AGE_YEARS, TOTAL_WEEKS, WEEKS_PER_YEAR};

/// One (week-of-year, age-in-years) unit of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Week of the year, `0..WEEKS_PER_YEAR`.
    pub column: u32,
    /// Age in years, `0..MAX_AGE_YEARS`.
    pub row: u32,
    /// Whether this week has been lived.
    pub filled: bool,
}

/// Immutable grid computed once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeGrid {
    cells: Vec<GridCell>,
    filled: u32,
}

impl LifeGrid {
    /// Builds the grid for `weeks_lived`; counts beyond the grid saturate it.
    pub fn from_weeks(weeks_lived: u32) -> Self {
        let filled = clamp_weeks(weeks_lived);
        let cells = (0..MAX_AGE_YEARS)
            .flat_map(|row| {
                (0..WEEKS_PER_YEAR).map(move |column| GridCell {
                    column,
                    row,
                    filled: row * WEEKS_PER_YEAR + column < filled,
                })
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(cells.len(), TOTAL_WEEKS as usize);
        Self { cells, filled }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn filled_count(&self) -> u32 {
        self.filled
    }

    pub fn is_full(&self) -> bool {
        self.filled == TOTAL_WEEKS
    }

    /// Looks up a cell; `None` outside the grid.
    pub fn cell(&self, column: u32, row: u32) -> Option<&GridCell> {
        if column >= WEEKS_PER_YEAR || row >= MAX_AGE_YEARS {
            return None;
        }
        self.cells.get((row * WEEKS_PER_YEAR + column) as usize)
    }

    /// Cells belonging to one age row.
    pub fn row(&self, row: u32) -> &[GridCell] {
        if row >= MAX_AGE_YEARS {
            return &[];
        }
        let start = (row * WEEKS_PER_YEAR) as usize;
        &self.cells[start..start + WEEKS_PER_YEAR as usize]
    }
}
