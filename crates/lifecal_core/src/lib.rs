//! Core logic for the life calendar.
//! This crate owns date validation, week arithmetic and PDF rendering; the
//! CLI only wires terminal I/O around it.

pub mod calc;
pub mod input;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;

pub use calc::weeks::{current_week_position, percentage_lived, weeks_lived};
pub use input::birthdate::{parse_birthdate, DateInputError, EXPECTED_FORMAT};
pub use input::prompt::{prompt_birthdate, PromptError, MAX_PROMPT_ATTEMPTS};
pub use input::{resolve_title, DEFAULT_TITLE};
pub use logging::{init_logging, level_for_verbosity, logging_status, LogTarget};
pub use model::grid::{GridCell, LifeGrid};
pub use model::lifespan::{LifeSpan, LifeSpanError};
pub use model::{MAX_AGE_YEARS, TOTAL_WEEKS, WEEKS_PER_YEAR};
pub use render::layout::{GridLayout, Orientation};
pub use render::{render_calendar, save_document, RenderError, RenderOptions};
pub use service::calendar_service::{
    generate_calendar, output_file_name, CalendarError, CalendarReport, CalendarRequest,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
