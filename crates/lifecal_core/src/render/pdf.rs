//! PDF page assembly.
//!
//! # Responsibility
//! - Emit drawing operators for the grid, labels and title block.
//! - Wrap the page in a minimal document with built-in fonts.
//! - Serialize and write the document.
//!
//! # Invariants
//! - Cells are emitted in row-major order: filled cells as `re` + `B`,
//!   open cells as `re` + `S`.
//! - The document has exactly one page.

use super::layout::{GridLayout, MM};
use super::text::{encode_win_ansi, Font};
use super::{RenderError, RenderOptions};
use crate::model::grid::LifeGrid;
use crate::model::{MAX_AGE_YEARS, WEEKS_PER_YEAR};
use log::{error, info};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::path::Path;
use std::time::Instant;

const PDF_VERSION: &str = "1.5";
const LINE_WIDTH: f32 = 0.5;
const GRID_STROKE_GREY: f32 = 0.827;

const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 9.0;
const LABEL_SIZE: f32 = 7.0;
const CAPTION_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;

const AGE_LABEL_STEP: u32 = 5;
const WEEK_LABEL_STEP: u32 = 5;

const AGE_CAPTION: &str = "Age";
const WEEK_CAPTION: &str = "Week of Year";
const FOOTER_TEXT: &str =
    "Each box represents one week of your life. Black boxes are weeks you've lived.";

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

/// Accumulates content-stream operators for the single page.
struct PageOps {
    ops: Vec<Operation>,
}

impl PageOps {
    fn new() -> Self {
        Self { ops: Vec::new() }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.ops.push(Operation::new(operator, operands));
    }

    fn square(&mut self, (x, y): (f32, f32), size: f32, filled: bool) {
        self.push("re", vec![x.into(), y.into(), size.into(), size.into()]);
        self.push(if filled { "B" } else { "S" }, vec![]);
    }

    fn text(&mut self, font: Font, size: f32, (x, y): (f32, f32), align: Align, value: &str) {
        let width = font.text_width(value, size);
        let x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.push("BT", vec![]);
        self.push("Tf", vec![font.resource_name().into(), size.into()]);
        self.push("Td", vec![x.into(), y.into()]);
        self.push("Tj", vec![Object::string_literal(encode_win_ansi(value))]);
        self.push("ET", vec![]);
    }

    fn into_operations(self) -> Vec<Operation> {
        self.ops
    }
}

/// Baseline that visually centers a line of text of `size` on `center`.
fn baseline(center: f32, size: f32) -> f32 {
    center - size * 0.35
}

fn draw_grid(page: &mut PageOps, layout: &GridLayout, grid: &LifeGrid) {
    page.push("w", vec![LINE_WIDTH.into()]);
    page.push(
        "RG",
        vec![
            GRID_STROKE_GREY.into(),
            GRID_STROKE_GREY.into(),
            GRID_STROKE_GREY.into(),
        ],
    );
    page.push("rg", vec![0.0_f32.into(), 0.0_f32.into(), 0.0_f32.into()]);

    for cell in grid.cells() {
        page.square(
            layout.cell_origin(cell.column, cell.row),
            layout.cell_size,
            cell.filled,
        );
    }
}

fn week_label_numbers() -> impl Iterator<Item = u32> {
    std::iter::once(1).chain((WEEK_LABEL_STEP..=WEEKS_PER_YEAR).step_by(WEEK_LABEL_STEP as usize))
}

fn draw_axis_labels(page: &mut PageOps, layout: &GridLayout) {
    for age in (0..MAX_AGE_YEARS).step_by(AGE_LABEL_STEP as usize) {
        page.text(
            Font::Regular,
            LABEL_SIZE,
            (
                layout.left - 5.0 * MM,
                baseline(layout.row_center(age), LABEL_SIZE),
            ),
            Align::Right,
            &age.to_string(),
        );
    }
    // The closing age sits on the right, one row pitch below the last row.
    page.text(
        Font::Regular,
        LABEL_SIZE,
        (
            layout.right() + 5.0 * MM,
            baseline(layout.row_center(MAX_AGE_YEARS), LABEL_SIZE),
        ),
        Align::Left,
        &MAX_AGE_YEARS.to_string(),
    );

    for week in week_label_numbers() {
        page.text(
            Font::Regular,
            LABEL_SIZE,
            (layout.column_center(week - 1), layout.top + 2.0 * MM),
            Align::Center,
            &week.to_string(),
        );
    }

    page.text(
        Font::Bold,
        CAPTION_SIZE,
        (
            layout.margins.page + layout.margins.label_left / 4.0,
            layout.top - layout.grid_height() / 2.0,
        ),
        Align::Left,
        AGE_CAPTION,
    );
    page.text(
        Font::Bold,
        CAPTION_SIZE,
        (
            layout.left + layout.grid_width() / 2.0,
            layout.top + 10.0 * MM,
        ),
        Align::Center,
        WEEK_CAPTION,
    );
}

fn draw_title_block(page: &mut PageOps, layout: &GridLayout, options: &RenderOptions) {
    let center_x = layout.page.width / 2.0;
    let top = layout.page.height - layout.margins.page;
    page.text(
        Font::Bold,
        TITLE_SIZE,
        (center_x, top + 4.0 * MM),
        Align::Center,
        &options.title,
    );
    if let Some(subtitle) = options.subtitle.as_deref() {
        page.text(
            Font::Regular,
            SUBTITLE_SIZE,
            (center_x, top - 1.0 * MM),
            Align::Center,
            subtitle,
        );
    }
    page.text(
        Font::Regular,
        FOOTER_SIZE,
        (center_x, layout.margins.page - 5.0 * MM),
        Align::Center,
        FOOTER_TEXT,
    );
}

/// Renders the calendar page for `grid` into an in-memory document.
///
/// # Errors
/// - `RenderError::Encode` when the content stream cannot be serialized.
pub fn render_calendar(grid: &LifeGrid, options: &RenderOptions) -> Result<Document, RenderError> {
    let layout = GridLayout::for_orientation(options.orientation);

    let mut page = PageOps::new();
    draw_grid(&mut page, &layout, grid);
    draw_axis_labels(&mut page, &layout);
    draw_title_block(&mut page, &layout, options);

    let content = Content {
        operations: page.into_operations(),
    };
    let content_bytes = content
        .encode()
        .map_err(|err| RenderError::Encode(err.to_string()))?;

    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });
    let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));
    let media_box: Vec<Object> = vec![
        0.0_f32.into(),
        0.0_f32.into(),
        layout.page.width.into(),
        layout.page.height.into(),
    ];
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    });
    let kids: Vec<Object> = vec![page_id.into()];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 1_i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(&options.title)),
        "Producer" => Object::string_literal(format!("lifecal {}", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    Ok(doc)
}

/// Compresses `doc` and writes it to `path` in one call.
///
/// # Side effects
/// - Creates or truncates `path`.
/// - Emits `pdf_write` logging events with duration and status.
///
/// # Errors
/// - `RenderError::Encode` when serialization fails.
/// - `RenderError::Write` when the file cannot be created or written.
pub fn save_document(doc: &mut Document, path: &Path) -> Result<(), RenderError> {
    let started_at = Instant::now();
    info!("event=pdf_write module=render status=start");

    doc.compress();
    let mut bytes = Vec::new();
    if let Err(err) = doc.save_to(&mut bytes) {
        error!(
            "event=pdf_write module=render status=error duration_ms={} error_code=pdf_encode_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(RenderError::Encode(err.to_string()));
    }

    match std::fs::write(path, &bytes) {
        Ok(()) => {
            info!(
                "event=pdf_write module=render status=ok bytes={} duration_ms={}",
                bytes.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(source) => {
            error!(
                "event=pdf_write module=render status=error duration_ms={} error_code=write_failed error={}",
                started_at.elapsed().as_millis(),
                source
            );
            Err(RenderError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{render_calendar, week_label_numbers};
    use crate::model::grid::LifeGrid;
    use crate::render::layout::{GridLayout, Orientation};
    use crate::render::RenderOptions;
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object};

    fn page_operations(doc: &Document) -> Vec<Operation> {
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page_id = *pages.values().next().expect("one page");
        let bytes = doc.get_page_content(page_id).expect("page content");
        Content::decode(&bytes).expect("decodable content").operations
    }

    fn count(ops: &[Operation], operator: &str) -> usize {
        ops.iter().filter(|op| op.operator == operator).count()
    }

    fn shown_text(ops: &[Operation]) -> Vec<Vec<u8>> {
        ops.iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn every_cell_is_drawn_once() {
        let doc = render_calendar(&LifeGrid::from_weeks(1774), &RenderOptions::default())
            .expect("render should succeed");
        let ops = page_operations(&doc);
        assert_eq!(count(&ops, "re"), 4680);
        assert_eq!(count(&ops, "B"), 1774);
        assert_eq!(count(&ops, "S"), 4680 - 1774);
    }

    #[test]
    fn first_cell_sits_at_layout_origin() {
        let options = RenderOptions {
            orientation: Orientation::Portrait,
            ..RenderOptions::default()
        };
        let doc = render_calendar(&LifeGrid::from_weeks(1), &options).expect("render");
        let ops = page_operations(&doc);
        let first = ops.iter().find(|op| op.operator == "re").expect("a cell");
        let layout = GridLayout::for_orientation(Orientation::Portrait);
        let (x, y) = layout.cell_origin(0, 0);

        let x_drawn = first.operands[0].as_float().expect("numeric x");
        let y_drawn = first.operands[1].as_float().expect("numeric y");
        assert!((x_drawn - x).abs() < 0.01);
        assert!((y_drawn - y).abs() < 0.01);
    }

    #[test]
    fn title_subtitle_labels_and_footer_are_present() {
        let options = RenderOptions {
            title: "My Weeks".to_string(),
            subtitle: Some("Born 1990-05-15".to_string()),
            orientation: Orientation::Landscape,
        };
        let doc = render_calendar(&LifeGrid::from_weeks(0), &options).expect("render");
        let text = shown_text(&page_operations(&doc));

        for expected in ["My Weeks", "Born 1990-05-15", "Age", "Week of Year", "0", "85", "90", "1", "50"] {
            assert!(
                text.iter().any(|line| line == expected.as_bytes()),
                "missing text {expected:?}"
            );
        }
        assert!(text.iter().any(|line| line.starts_with(b"Each box represents")));
    }

    #[test]
    fn closing_age_label_sits_below_last_row_on_the_right() {
        let doc = render_calendar(&LifeGrid::from_weeks(0), &RenderOptions::default())
            .expect("render");
        let ops = page_operations(&doc);
        let label_index = ops
            .iter()
            .position(|op| {
                op.operator == "Tj"
                    && matches!(op.operands.first(), Some(Object::String(bytes, _)) if bytes == b"90")
            })
            .expect("closing age label");
        let placement = &ops[label_index - 1];
        assert_eq!(placement.operator, "Td");

        let layout = GridLayout::for_orientation(Orientation::Landscape);
        let x = placement.operands[0].as_float().expect("numeric x");
        let y = placement.operands[1].as_float().expect("numeric y");
        let last_row_center = layout.row_center(89);
        assert!(x > layout.right());
        assert!(y < layout.bottom());
        assert!(y > last_row_center - 2.0 * layout.pitch());
    }

    #[test]
    fn week_labels_start_at_one_then_every_five() {
        let labels = week_label_numbers().collect::<Vec<_>>();
        assert_eq!(labels, vec![1, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50]);
    }
}
