//! Pure week arithmetic.
//!
//! # Responsibility
//! - Turn a pair of calendar dates into elapsed-week counts.
//! - Map week counts onto grid coordinates.
//!
//! # Invariants
//! - Every function here is pure and never returns a negative count.

pub mod weeks;
