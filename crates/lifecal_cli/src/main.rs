//! `lifecal` command-line entry point.
//!
//! # Responsibility
//! - Parse flags and resolve the birthdate from a flag or an interactive prompt.
//! - Run calendar generation in the current working directory.
//! - Map core errors to process exit codes.
//!
//! # Exit codes
//! - `0`: PDF written, or the prompt was cancelled.
//! - `1`: birthdate rejected or terminal I/O failed.
//! - `2`: the PDF could not be rendered or written.

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use lifecal_core::{
    generate_calendar, init_logging, level_for_verbosity, parse_birthdate, prompt_birthdate,
    resolve_title, CalendarError, CalendarRequest, Orientation, PromptError, DEFAULT_TITLE,
};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

const EXIT_SUCCESS: u8 = 0;
const EXIT_VALIDATION: u8 = 1;
const EXIT_WRITE: u8 = 2;
const BANNER_WIDTH: usize = 50;

/// Generate a life calendar PDF showing your life in weeks.
#[derive(Parser, Debug)]
#[command(name = "lifecal", version)]
#[command(after_help = "Example: lifecal --birthdate 1990-05-15 --title \"My Life Journey\"")]
struct Cli {
    /// Your birthdate in YYYY-MM-DD format (e.g., 1990-05-15). Prompted for when omitted.
    #[arg(long, value_name = "YYYY-MM-DD")]
    birthdate: Option<String>,

    /// Custom title for the calendar
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Page orientation of the A4 sheet
    #[arg(long, value_enum, default_value_t = PageOrientation::Landscape)]
    orientation: PageOrientation,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Absolute directory for rolling log files (logs go to stderr otherwise)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PageOrientation {
    Landscape,
    Portrait,
}

impl From<PageOrientation> for Orientation {
    fn from(value: PageOrientation) -> Self {
        match value {
            PageOrientation::Landscape => Orientation::Landscape,
            PageOrientation::Portrait => Orientation::Portrait,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(level_for_verbosity(cli.verbose), cli.log_dir.as_deref()) {
        eprintln!("Warning: logging disabled: {err}");
    }

    let today = Local::now().date_naive();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut terminal = Terminal {
        input: &mut input,
        out: &mut stdout,
        err: &mut stderr,
        json: cli.json,
    };

    // Relative output path: the PDF lands in the current working directory.
    match run(&cli, today, &mut terminal, Path::new("")) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(EXIT_VALIDATION)
        }
    }
}

/// Process streams used by one run.
///
/// Human-readable text goes to `out`, or to `err` in JSON mode so that `out`
/// carries only the JSON summary.
struct Terminal<'a> {
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    json: bool,
}

impl<'a> Terminal<'a> {
    fn console(&mut self) -> &mut (dyn Write + 'a) {
        if self.json {
            &mut *self.err
        } else {
            &mut *self.out
        }
    }

    fn prompt(&mut self, today: NaiveDate) -> Result<NaiveDate, PromptError> {
        let console: &mut dyn Write = if self.json {
            &mut *self.err
        } else {
            &mut *self.out
        };
        prompt_birthdate(&mut *self.input, console, today)
    }
}

/// Runs one calendar generation and returns the process exit code.
fn run(
    cli: &Cli,
    today: NaiveDate,
    terminal: &mut Terminal<'_>,
    output_dir: &Path,
) -> io::Result<u8> {
    print_banner(terminal.console())?;

    let birthdate = match cli.birthdate.as_deref() {
        Some(value) => match parse_birthdate(value, today) {
            Ok(date) => date,
            Err(err) => {
                warn!(
                    "event=birthdate_flag module=cli status=error error_code={}",
                    err.code()
                );
                writeln!(terminal.err, "Error: {err}.")?;
                return Ok(EXIT_VALIDATION);
            }
        },
        None => match terminal.prompt(today) {
            Ok(date) => date,
            Err(PromptError::Cancelled) => {
                writeln!(terminal.console(), "Operation cancelled.")?;
                return Ok(EXIT_SUCCESS);
            }
            Err(PromptError::Rejected(err)) => {
                writeln!(terminal.err, "Error: {err}.")?;
                return Ok(EXIT_VALIDATION);
            }
            Err(PromptError::Io(err)) => return Err(err),
        },
    };

    let request = CalendarRequest {
        birthdate,
        today,
        title: resolve_title(Some(&cli.title)),
        orientation: cli.orientation.into(),
        output_dir: output_dir.to_path_buf(),
    };

    let console = terminal.console();
    writeln!(console)?;
    writeln!(console, "Generating your life calendar...")?;
    let report = match generate_calendar(&request) {
        Ok(report) => report,
        Err(err) => {
            writeln!(terminal.err, "Error: {err}")?;
            return Ok(exit_code_for(&err));
        }
    };
    info!(
        "event=cli_run module=cli status=ok orientation={:?}",
        request.orientation
    );

    let console = terminal.console();
    writeln!(
        console,
        "\u{2713} PDF saved as: {}",
        report.output_path.display()
    )?;
    for line in report.summary_lines() {
        writeln!(console, "  {line}")?;
    }
    writeln!(console)?;

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => writeln!(terminal.out, "{json}")?,
            Err(err) => {
                writeln!(terminal.err, "Error: failed to encode summary: {err}")?;
                return Ok(EXIT_WRITE);
            }
        }
    }

    Ok(EXIT_SUCCESS)
}

fn print_banner(console: &mut dyn Write) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(console, "{rule}")?;
    writeln!(console, "Life Calendar Generator")?;
    writeln!(console, "{rule}")?;
    writeln!(console)
}

fn exit_code_for(err: &CalendarError) -> u8 {
    match err {
        CalendarError::Input(_) => EXIT_VALIDATION,
        CalendarError::Render(_) => EXIT_WRITE,
    }
}
