//! Page layout.
//!
//! Positions every block on a page before anything is painted. Coordinates are
//! in points with the origin at the bottom-left corner of the page, which is
//! how PDF addresses a page.

use crate::document::{Block, Cell, ImageBlock, TableBlock, INCH};
use crate::style::{Stroke, TableStyle};

/// Average glyph advance as a fraction of the font size.
///
/// Used to estimate text width without shaping the font.
pub const AVERAGE_ADVANCE_EM: f32 = 0.55;

/// Page size and margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width in points.
    pub width_pt: f32,
    /// Page height in points.
    pub height_pt: f32,
    /// Margin on every side, in points.
    pub margin_pt: f32,
}

impl PageGeometry {
    /// US Letter with one-inch margins.
    pub const LETTER: Self = Self {
        width_pt: 8.5 * INCH,
        height_pt: 11.0 * INCH,
        margin_pt: INCH,
    };

    /// Highest y content may start at.
    #[must_use]
    pub fn top_pt(&self) -> f32 {
        self.height_pt - self.margin_pt
    }

    /// Lowest y content may reach.
    #[must_use]
    pub fn bottom_pt(&self) -> f32 {
        self.margin_pt
    }

    /// Left x that centers something `width_pt` wide.
    #[must_use]
    pub fn centered_x(&self, width_pt: f32) -> f32 {
        (self.width_pt - width_pt) / 2.0
    }
}

/// Something positioned on a page.
#[derive(Debug, Clone)]
pub enum Placement<'a> {
    /// An image with its bottom-left corner at (`x_pt`, `y_pt`).
    Image {
        /// The image block.
        block: &'a ImageBlock,
        /// Left edge.
        x_pt: f32,
        /// Bottom edge.
        y_pt: f32,
    },

    /// One table row.
    Row {
        /// The table the row belongs to.
        table: &'a TableBlock,
        /// Row index within the table; 0 is the header.
        row: usize,
        /// Left edge of the table.
        x_pt: f32,
        /// Top edge of the row.
        top_pt: f32,
        /// Row height.
        height_pt: f32,
        /// Wrapped text lines, one list per cell.
        lines: Vec<Vec<String>>,
    },

    /// A border around the part of a table that landed on this page.
    Outline {
        /// Left edge.
        x_pt: f32,
        /// Top edge.
        top_pt: f32,
        /// Width.
        width_pt: f32,
        /// Height.
        height_pt: f32,
        /// Border style.
        stroke: Stroke,
    },
}

/// Blocks distributed over pages.
#[derive(Debug, Clone)]
pub struct Layout<'a> {
    /// Placements per page, in paint order.
    pub pages: Vec<Vec<Placement<'a>>>,
}

struct Flow<'a> {
    page: PageGeometry,
    pages: Vec<Vec<Placement<'a>>>,
    y: f32,
}

impl<'a> Flow<'a> {
    fn new(page: PageGeometry) -> Self {
        Self {
            page,
            pages: vec![Vec::new()],
            y: page.top_pt(),
        }
    }

    fn page_is_empty(&self) -> bool {
        self.pages.last().map_or(true, Vec::is_empty)
    }

    fn fits(&self, height_pt: f32) -> bool {
        self.y - height_pt >= self.page.bottom_pt()
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = self.page.top_pt();
    }

    fn push(&mut self, placement: Placement<'a>) {
        if let Some(page) = self.pages.last_mut() {
            page.push(placement);
        }
    }

    fn image(&mut self, block: &'a ImageBlock) {
        if !self.fits(block.height_pt) && !self.page_is_empty() {
            self.new_page();
        }
        self.y -= block.height_pt;
        self.push(Placement::Image {
            block,
            x_pt: self.page.centered_x(block.width_pt),
            y_pt: self.y,
        });
    }

    fn spacer(&mut self, height_pt: f32) {
        if self.fits(height_pt) {
            self.y -= height_pt;
        } else {
            self.new_page();
        }
    }

    fn table(&mut self, table: &'a TableBlock) {
        let x_pt = self.page.centered_x(table.width_pt());
        let mut segment_top = self.y;
        let mut segment_rows = 0;

        for (row, cells) in table.rows.iter().enumerate() {
            let lines = wrap_row(cells, &table.column_widths_pt, &table.style);
            let height_pt = row_height(cells, &lines, &table.style);

            if !self.fits(height_pt) && segment_rows > 0 {
                self.outline(table, x_pt, segment_top);
                self.new_page();
                segment_top = self.y;
                segment_rows = 0;
            }

            self.push(Placement::Row {
                table,
                row,
                x_pt,
                top_pt: self.y,
                height_pt,
                lines,
            });
            self.y -= height_pt;
            segment_rows += 1;
        }

        if segment_rows > 0 {
            self.outline(table, x_pt, segment_top);
        }
    }

    fn outline(&mut self, table: &TableBlock, x_pt: f32, top_pt: f32) {
        self.push(Placement::Outline {
            x_pt,
            top_pt,
            width_pt: table.width_pt(),
            height_pt: top_pt - self.y,
            stroke: table.style.outline,
        });
    }
}

/// Lay `blocks` out top to bottom, starting new pages as needed.
///
/// A table row that does not fit moves to the next page; rows are never split.
#[must_use]
pub fn layout(blocks: &[Block], page: PageGeometry) -> Layout<'_> {
    let mut flow = Flow::new(page);
    for block in blocks {
        match block {
            Block::Image(image) => flow.image(image),
            Block::Spacer(spacer) => flow.spacer(spacer.height_pt),
            Block::Table(table) => flow.table(table),
        }
    }
    Layout { pages: flow.pages }
}

/// Estimated width of `text` at `size_pt`.
#[must_use]
pub fn text_width_pt(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVERAGE_ADVANCE_EM
}

/// Greedy word wrap to `max_width_pt`; words longer than a line are split.
///
/// Always returns at least one line.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn wrap_text(text: &str, max_width_pt: f32, size_pt: f32) -> Vec<String> {
    let max_chars = ((max_width_pt / (size_pt * AVERAGE_ADVANCE_EM)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(max_chars);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }

        if current_len > 0 && current_len + 1 + chars.len() > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += chars.len();
        current.extend(chars);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn wrap_row(cells: &[Cell], widths: &[f32], style: &TableStyle) -> Vec<Vec<String>> {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            wrap_text(
                &cell.text,
                width - 2.0 * style.padding_side_pt,
                cell.role.size_pt(),
            )
        })
        .collect()
}

fn row_height(cells: &[Cell], lines: &[Vec<String>], style: &TableStyle) -> f32 {
    let text_height = cells
        .iter()
        .zip(lines)
        .map(|(cell, lines)| lines.len() as f32 * cell.role.leading_pt())
        .fold(0.0, f32::max);
    style.padding_top_pt + text_height + style.padding_bottom_pt
}
