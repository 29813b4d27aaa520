//! Page and grid geometry.
//!
//! # Responsibility
//! - Fix the page size and the margins reserved for text.
//! - Size and center the 52×90 grid inside the remaining area.
//!
//! # Invariants
//! - The gap between cells is half a cell on both axes.
//! - The grid never exceeds the usable area and is centered inside it.
//! - PDF user space: origin bottom-left, units in points.

use crate::model::{MAX_AGE_YEARS, WEEKS_PER_YEAR};

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

const A4_SHORT_EDGE: f32 = 595.2756;
const A4_LONG_EDGE: f32 = 841.8898;

const GAP_RATIO: f32 = 0.5;

/// Page orientation of the A4 sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn a4(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Landscape => Self {
                width: A4_LONG_EDGE,
                height: A4_SHORT_EDGE,
            },
            Orientation::Portrait => Self {
                width: A4_SHORT_EDGE,
                height: A4_LONG_EDGE,
            },
        }
    }
}

/// Space reserved around the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Outer margin on every edge.
    pub page: f32,
    /// Extra room left of the grid for age labels.
    pub label_left: f32,
    /// Extra room above the grid for week labels.
    pub label_top: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            page: 15.0 * MM,
            label_left: 20.0 * MM,
            label_top: 15.0 * MM,
        }
    }
}

/// Resolved grid placement on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub page: PageSize,
    pub margins: Margins,
    /// Side length of one square cell.
    pub cell_size: f32,
    /// Space between neighbouring cells.
    pub gap: f32,
    /// X of the left edge of column 0.
    pub left: f32,
    /// Y of the top edge of row 0.
    pub top: f32,
}

impl GridLayout {
    pub fn new(page: PageSize, margins: Margins) -> Self {
        let usable_width = page.width - 2.0 * margins.page - margins.label_left;
        let usable_height = page.height - 2.0 * margins.page - margins.label_top;

        let columns = WEEKS_PER_YEAR as f32;
        let rows = MAX_AGE_YEARS as f32;
        let cell_size = (usable_width / (columns + (columns - 1.0) * GAP_RATIO))
            .min(usable_height / (rows + (rows - 1.0) * GAP_RATIO))
            .max(0.0);
        let gap = cell_size * GAP_RATIO;

        let grid_width = columns * cell_size + (columns - 1.0) * gap;
        let grid_height = rows * cell_size + (rows - 1.0) * gap;

        Self {
            page,
            margins,
            cell_size,
            gap,
            left: margins.page + margins.label_left + (usable_width - grid_width) / 2.0,
            top: page.height - margins.page - margins.label_top - (usable_height - grid_height) / 2.0,
        }
    }

    pub fn for_orientation(orientation: Orientation) -> Self {
        Self::new(PageSize::a4(orientation), Margins::default())
    }

    /// Distance from one cell's origin to the next.
    pub fn pitch(&self) -> f32 {
        self.cell_size + self.gap
    }

    pub fn grid_width(&self) -> f32 {
        WEEKS_PER_YEAR as f32 * self.pitch() - self.gap
    }

    pub fn grid_height(&self) -> f32 {
        MAX_AGE_YEARS as f32 * self.pitch() - self.gap
    }

    pub fn right(&self) -> f32 {
        self.left + self.grid_width()
    }

    pub fn bottom(&self) -> f32 {
        self.top - self.grid_height()
    }

    /// Bottom-left corner of the cell at `(column, row)`.
    pub fn cell_origin(&self, column: u32, row: u32) -> (f32, f32) {
        let x = self.left + column as f32 * self.pitch();
        let y = self.top - row as f32 * self.pitch() - self.cell_size;
        (x, y)
    }

    /// Vertical center of an age row.
    pub fn row_center(&self, row: u32) -> f32 {
        self.top - row as f32 * self.pitch() - self.cell_size / 2.0
    }

    /// Horizontal center of a week column.
    pub fn column_center(&self, column: u32) -> f32 {
        self.left + column as f32 * self.pitch() + self.cell_size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::{GridLayout, Margins, Orientation, PageSize};

    const EPSILON: f32 = 0.01;

    fn usable(page: PageSize, margins: Margins) -> (f32, f32) {
        (
            page.width - 2.0 * margins.page - margins.label_left,
            page.height - 2.0 * margins.page - margins.label_top,
        )
    }

    #[test]
    fn cell_size_is_the_largest_that_fits() {
        for orientation in [Orientation::Landscape, Orientation::Portrait] {
            let layout = GridLayout::for_orientation(orientation);
            let (width, height) = usable(layout.page, layout.margins);
            let expected = (width / 77.5).min(height / 134.5);
            assert!((layout.cell_size - expected).abs() < EPSILON);
            assert!((layout.gap - layout.cell_size / 2.0).abs() < EPSILON);
            assert!(layout.grid_width() <= width + EPSILON);
            assert!(layout.grid_height() <= height + EPSILON);
        }
    }

    #[test]
    fn grid_is_centered_in_usable_area() {
        let layout = GridLayout::for_orientation(Orientation::Landscape);
        let margins = layout.margins;
        let area_left = margins.page + margins.label_left;
        let area_right = layout.page.width - margins.page;
        let area_top = layout.page.height - margins.page - margins.label_top;
        let area_bottom = margins.page;

        assert!(((layout.left - area_left) - (area_right - layout.right())).abs() < EPSILON);
        assert!(((area_top - layout.top) - (layout.bottom() - area_bottom)).abs() < EPSILON);
    }

    #[test]
    fn neighbouring_cells_do_not_overlap() {
        let layout = GridLayout::for_orientation(Orientation::Portrait);
        let (x0, y0) = layout.cell_origin(0, 0);
        let (x1, _) = layout.cell_origin(1, 0);
        let (_, y1) = layout.cell_origin(0, 1);
        assert!(x1 - x0 > layout.cell_size);
        assert!(y0 - y1 > layout.cell_size);

        let (last_x, last_y) = layout.cell_origin(51, 89);
        assert!((last_x + layout.cell_size - layout.right()).abs() < EPSILON);
        assert!((last_y - layout.bottom()).abs() < EPSILON);
    }

    #[test]
    fn landscape_swaps_a4_edges() {
        let landscape = PageSize::a4(Orientation::Landscape);
        let portrait = PageSize::a4(Orientation::Portrait);
        assert_eq!(landscape.width, portrait.height);
        assert!(landscape.width > landscape.height);
    }
}
