//! Grid rendering to a single-page PDF.
//!
//! # Responsibility
//! - Turn a `LifeGrid` and page text into an in-memory PDF document.
//! - Write the finished document to disk in one step.
//!
//! # Invariants
//! - Every one of the 4,680 cells is drawn exactly once.
//! - Rendering is pure; only `save_document` touches the filesystem.

pub mod layout;
pub mod pdf;
pub mod text;

use crate::input::DEFAULT_TITLE;
use layout::Orientation;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub use pdf::{render_calendar, save_document};

/// Text and page choices for one rendered calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub title: String,
    /// Optional line printed under the title.
    pub subtitle: Option<String>,
    pub orientation: Orientation,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subtitle: None,
            orientation: Orientation::default(),
        }
    }
}

/// Rendering or output failure.
#[derive(Debug)]
pub enum RenderError {
    /// PDF objects could not be serialized.
    Encode(String),
    /// The output file could not be created or written.
    Write { path: PathBuf, source: io::Error },
}

impl RenderError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Encode(_) => "pdf_encode_failed",
            Self::Write { .. } => "write_failed",
        }
    }
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(message) => write!(f, "failed to encode PDF: {message}"),
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(_) => None,
            Self::Write { source, .. } => Some(source),
        }
    }
}
