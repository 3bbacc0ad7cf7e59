//! Block elements handed to a document engine.

use std::sync::Arc;

use crate::assets::ImageAsset;
use crate::style::{FontRole, TableStyle};

/// Points per inch.
pub const INCH: f32 = 72.0;

/// One element of a document, laid out top to bottom.
#[derive(Debug, Clone)]
pub enum Block {
    /// A raster image at a fixed display size.
    Image(ImageBlock),
    /// Empty vertical space.
    Spacer(Spacer),
    /// A styled table.
    Table(TableBlock),
}

/// An image scaled to a fixed size.
#[derive(Debug, Clone)]
pub struct ImageBlock {
    /// The decoded image, shared across documents.
    pub image: Arc<ImageAsset>,
    /// Display width in points.
    pub width_pt: f32,
    /// Display height in points.
    pub height_pt: f32,
}

/// Empty space between blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacer {
    /// Height in points.
    pub height_pt: f32,
}

/// A table with fixed column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    /// Rows of cells; row 0 is the header.
    pub rows: Vec<Vec<Cell>>,
    /// Column widths in points.
    pub column_widths_pt: Vec<f32>,
    /// Colors, borders and padding.
    pub style: TableStyle,
}

impl TableBlock {
    /// Total width in points.
    #[must_use]
    pub fn width_pt(&self) -> f32 {
        self.column_widths_pt.iter().sum()
    }
}

/// A table cell holding display-order text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Text in the order it is drawn.
    pub text: String,
    /// Font size and face selector.
    pub role: FontRole,
}

impl Cell {
    /// Create a cell.
    pub fn new(text: impl Into<String>, role: FontRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }

    /// An empty cell.
    #[must_use]
    pub fn empty(role: FontRole) -> Self {
        Self::new(String::new(), role)
    }
}
