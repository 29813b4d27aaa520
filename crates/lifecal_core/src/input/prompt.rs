//! Interactive birthdate prompt.
//!
//! # Responsibility
//! - Ask for a birthdate until a valid one arrives or attempts run out.
//!
//! # Invariants
//! - At most `MAX_PROMPT_ATTEMPTS` lines are read.
//! - End of input is reported as `Cancelled`, never as a validation error.
//! - Logs carry rejection codes only, never the typed text.

use super::birthdate::{parse_birthdate, DateInputError};
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

/// Upper bound on re-prompts before the last rejection is returned.
pub const MAX_PROMPT_ATTEMPTS: u32 = 5;

const PROMPT_TEXT: &str = "Enter your birthdate (YYYY-MM-DD): ";

/// Interactive resolution failure.
#[derive(Debug)]
pub enum PromptError {
    /// Every attempt was rejected; carries the last rejection.
    Rejected(DateInputError),
    /// Input ended before a valid date was entered.
    Cancelled,
    /// Reading or echoing on the terminal failed.
    Io(io::Error),
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "{err}"),
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::Io(err) => write!(f, "failed to read birthdate: {err}"),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Cancelled => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Prompts on `output` and reads lines from `input` until a valid birthdate.
///
/// # Errors
/// - `Rejected` after `MAX_PROMPT_ATTEMPTS` invalid lines.
/// - `Cancelled` when `input` reaches end of file.
/// - `Io` when reading or writing fails.
pub fn prompt_birthdate<R, W>(
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> Result<NaiveDate, PromptError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let mut last_error = None;
    for attempt in 1..=MAX_PROMPT_ATTEMPTS {
        write!(output, "{PROMPT_TEXT}")?;
        output.flush()?;

        // Raw bytes so a non-UTF-8 line is rejected as a format error, not I/O.
        let mut raw = Vec::new();
        if input.read_until(b'\n', &mut raw)? == 0 {
            writeln!(output)?;
            info!("event=birthdate_prompt module=input status=cancelled attempt={attempt}");
            return Err(PromptError::Cancelled);
        }

        let line = String::from_utf8_lossy(&raw);
        match parse_birthdate(&line, today) {
            Ok(date) => {
                info!("event=birthdate_prompt module=input status=ok attempt={attempt}");
                return Ok(date);
            }
            Err(err) => {
                warn!(
                    "event=birthdate_prompt module=input status=error attempt={} error_code={}",
                    attempt,
                    err.code()
                );
                writeln!(output, "Error: {err}.")?;
                if attempt < MAX_PROMPT_ATTEMPTS {
                    writeln!(output, "Please try again.")?;
                }
                last_error = Some(err);
            }
        }
    }

    match last_error {
        Some(err) => Err(PromptError::Rejected(err)),
        None => Err(PromptError::Cancelled),
    }
}
