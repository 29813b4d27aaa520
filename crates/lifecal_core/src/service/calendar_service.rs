//! Calendar generation use-case.
//!
//! # Responsibility
//! - Run resolver output through week calculation, grid build and rendering.
//! - Name and write the output file, then report the run summary.
//!
//! # Invariants
//! - The output file name depends only on the birthdate.
//! - Nothing is written unless the whole document rendered successfully.

use crate::calc::weeks::current_week_position;
use crate::input::birthdate::{format_birthdate, DateInputError};
use crate::model::grid::LifeGrid;
use crate::model::lifespan::{LifeSpan, LifeSpanError};
use crate::model::{MAX_AGE_YEARS, TOTAL_WEEKS};
use crate::render::layout::Orientation;
use crate::render::{render_calendar, save_document, RenderError, RenderOptions};
use chrono::NaiveDate;
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

/// Failure of a calendar run.
#[derive(Debug)]
pub enum CalendarError {
    /// Birthdate failed validation.
    Input(DateInputError),
    /// Rendering or writing the PDF failed.
    Render(RenderError),
}

impl CalendarError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Input(err) => err.code(),
            Self::Render(err) => err.code(),
        }
    }
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CalendarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Render(err) => Some(err),
        }
    }
}

impl From<DateInputError> for CalendarError {
    fn from(value: DateInputError) -> Self {
        Self::Input(value)
    }
}

impl From<RenderError> for CalendarError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<LifeSpanError> for CalendarError {
    fn from(value: LifeSpanError) -> Self {
        match value {
            LifeSpanError::ReferenceBeforeBirth { birthdate, as_of } => {
                Self::Input(DateInputError::FutureDate {
                    date: birthdate,
                    today: as_of,
                })
            }
        }
    }
}

/// Inputs for one calendar run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarRequest {
    pub birthdate: NaiveDate,
    /// Reference date weeks are counted up to.
    pub today: NaiveDate,
    pub title: String,
    pub orientation: Orientation,
    /// Directory the PDF is written into.
    pub output_dir: PathBuf,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarReport {
    pub lifespan: LifeSpan,
    pub output_path: PathBuf,
    /// Unclamped whole weeks since birth.
    pub weeks_lived: u32,
    pub total_weeks: u32,
    pub weeks_remaining: u32,
    pub percentage_lived: f64,
    /// `(column, row)` of the week in progress; `None` once the grid is full.
    pub current_week: Option<(u32, u32)>,
}

impl CalendarReport {
    /// Human-readable summary, one line per entry.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!(
                "You have lived {} weeks out of {} possible weeks.",
                group_thousands(self.weeks_lived),
                group_thousands(self.total_weeks)
            ),
            format!(
                "That's {:.1}% of a {MAX_AGE_YEARS}-year life.",
                self.percentage_lived
            ),
        ]
    }
}

/// File name for the calendar of `birthdate`.
pub fn output_file_name(birthdate: NaiveDate) -> String {
    format!("life_calendar_{}.pdf", format_birthdate(birthdate))
}

/// Formats `value` with `,` between thousands groups.
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn subtitle_for(lifespan: &LifeSpan) -> String {
    format!(
        "Born {} \u{b7} {} weeks lived as of {}",
        format_birthdate(lifespan.birthdate()),
        group_thousands(lifespan.weeks_lived()),
        format_birthdate(lifespan.as_of())
    )
}

/// Generates the calendar PDF for `request` and returns the run summary.
///
/// # Errors
/// - `CalendarError::Input` with `FutureDate` when the birthdate is after
///   `request.today`.
/// - `CalendarError::Render` when encoding or writing the PDF fails.
pub fn generate_calendar(request: &CalendarRequest) -> Result<CalendarReport, CalendarError> {
    let started_at = Instant::now();
    info!("event=calendar_generate module=service status=start");

    let result = generate_inner(request);
    match &result {
        Ok(report) => info!(
            "event=calendar_generate module=service status=ok weeks_lived={} duration_ms={}",
            report.weeks_lived,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=calendar_generate module=service status=error duration_ms={} error_code={}",
            started_at.elapsed().as_millis(),
            err.code()
        ),
    }
    result
}

fn generate_inner(request: &CalendarRequest) -> Result<CalendarReport, CalendarError> {
    let lifespan = LifeSpan::new(request.birthdate, request.today)?;
    let grid = LifeGrid::from_weeks(lifespan.grid_weeks());

    let options = RenderOptions {
        title: request.title.clone(),
        subtitle: Some(subtitle_for(&lifespan)),
        orientation: request.orientation,
    };
    let mut doc = render_calendar(&grid, &options)?;

    let output_path = request
        .output_dir
        .join(output_file_name(lifespan.birthdate()));
    save_document(&mut doc, &output_path)?;

    Ok(CalendarReport {
        lifespan,
        output_path,
        weeks_lived: lifespan.weeks_lived(),
        total_weeks: TOTAL_WEEKS,
        weeks_remaining: lifespan.weeks_remaining(),
        percentage_lived: lifespan.percentage_lived(),
        current_week: current_week_position(lifespan.weeks_lived()),
    })
}

#[cfg(test)]
mod tests {
    use super::{group_thousands, output_file_name, CalendarError};
    use crate::input::birthdate::DateInputError;
    use crate::model::lifespan::LifeSpanError;
    use chrono::NaiveDate;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1774), "1,774");
        assert_eq!(group_thousands(4680), "4,680");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn file_name_embeds_iso_date() {
        let date = NaiveDate::from_ymd_opt(1990, 5, 15).expect("valid date");
        assert_eq!(output_file_name(date), "life_calendar_1990-05-15.pdf");
    }

    #[test]
    fn reversed_lifespan_maps_to_future_date() {
        let birthdate = NaiveDate::from_ymd_opt(2999, 1, 1).expect("valid date");
        let today = NaiveDate::from_ymd_opt(2024, 5, 15).expect("valid date");
        let err = CalendarError::from(LifeSpanError::ReferenceBeforeBirth {
            birthdate,
            as_of: today,
        });
        assert!(matches!(
            err,
            CalendarError::Input(DateInputError::FutureDate { .. })
        ));
        assert_eq!(err.code(), "future_date");
    }
}
