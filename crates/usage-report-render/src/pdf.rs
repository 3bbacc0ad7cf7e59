//! PDF document engine.
//!
//! This module provides the `PdfEngine` implementation of `DocumentEngine`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color as PdfColor, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfLayerReference, Rect, Rgb,
};
use tracing::debug;

use crate::assets::ReportAssets;
use crate::document::{Block, ImageBlock, TableBlock, INCH};
use crate::engine::DocumentEngine;
use crate::error::EngineError;
use crate::layout::{layout, text_width_pt, PageGeometry, Placement};
use crate::style::{Color, Stroke};

/// Resolution images are embedded at before scaling.
const IMAGE_DPI: f32 = 300.0;

const LAYER_NAME: &str = "Layer 1";

/// Millimetres per point.
const MM_PER_PT: f32 = 25.4 / INCH;

/// Writes reports as PDF files.
pub struct PdfEngine {
    assets: Arc<ReportAssets>,
}

impl PdfEngine {
    /// Create an engine drawing body text with the batch font on Letter pages.
    #[must_use]
    pub fn new(assets: Arc<ReportAssets>) -> Self {
        Self { assets }
    }
}

struct Fonts {
    body: IndirectFontRef,
    header: IndirectFontRef,
}

impl DocumentEngine for PdfEngine {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, title: &str, blocks: &[Block], path: &Path) -> Result<(), EngineError> {
        let page = PageGeometry::LETTER;
        let laid_out = layout(blocks, page);
        let (width, height) = (mm(page.width_pt), mm(page.height_pt));

        let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
        let fonts = Fonts {
            body: doc
                .add_external_font(self.assets.font.bytes.as_slice())
                .map_err(document_error)?,
            header: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(document_error)?,
        };

        let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
        for _ in 1..laid_out.pages.len() {
            let (page, layer) = doc.add_page(width, height, LAYER_NAME);
            layers.push(doc.get_page(page).get_layer(layer));
        }

        for (layer, placements) in layers.iter().zip(&laid_out.pages) {
            for placement in placements {
                paint(layer, &fonts, placement);
            }
        }

        let file = File::create(path)?;
        doc.save(&mut BufWriter::new(file)).map_err(document_error)?;
        debug!(path = %path.display(), pages = laid_out.pages.len(), "PDF written");
        Ok(())
    }
}

fn paint(layer: &PdfLayerReference, fonts: &Fonts, placement: &Placement<'_>) {
    match placement {
        Placement::Image { block, x_pt, y_pt } => paint_image(layer, block, *x_pt, *y_pt),
        Placement::Row {
            table,
            row,
            x_pt,
            top_pt,
            height_pt,
            lines,
        } => paint_row(layer, fonts, table, *row, *x_pt, *top_pt, *height_pt, lines),
        Placement::Outline {
            x_pt,
            top_pt,
            width_pt,
            height_pt,
            stroke,
        } => stroke_rect(layer, *x_pt, *top_pt - *height_pt, *width_pt, *height_pt, *stroke),
    }
}

fn paint_image(layer: &PdfLayerReference, block: &ImageBlock, x_pt: f32, y_pt: f32) {
    let (width_px, height_px) = block.image.dimensions();
    let image = Image::from_dynamic_image(&block.image.image);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(x_pt)),
            translate_y: Some(mm(y_pt)),
            scale_x: Some(block.width_pt / native_size_pt(width_px)),
            scale_y: Some(block.height_pt / native_size_pt(height_px)),
            dpi: Some(IMAGE_DPI),
            ..ImageTransform::default()
        },
    );
}

#[allow(clippy::too_many_arguments)]
fn paint_row(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    table: &TableBlock,
    row: usize,
    x_pt: f32,
    top_pt: f32,
    height_pt: f32,
    lines: &[Vec<String>],
) {
    let style = &table.style;
    let bottom_pt = top_pt - height_pt;
    fill_rect(layer, x_pt, bottom_pt, table.width_pt(), height_pt, style.row_background(row));

    let mut cell_x = x_pt;
    let cells = table.rows[row].iter().zip(&table.column_widths_pt).zip(lines);
    for ((cell, &width_pt), cell_lines) in cells {
        stroke_rect(layer, cell_x, bottom_pt, width_pt, height_pt, style.grid);

        let font = if cell.role.is_bold() {
            &fonts.header
        } else {
            &fonts.body
        };
        let size = cell.role.size_pt();
        let leading = cell.role.leading_pt();

        // Center the text block vertically inside the padded area.
        let inner = height_pt - style.padding_top_pt - style.padding_bottom_pt;
        let block_top =
            top_pt - style.padding_top_pt - (inner - cell_lines.len() as f32 * leading) / 2.0;

        layer.set_fill_color(pdf_color(style.row_text(row)));
        for (i, line) in cell_lines.iter().enumerate().filter(|(_, l)| !l.is_empty()) {
            let text_x = cell_x + (width_pt - text_width_pt(line, size)) / 2.0;
            let baseline = block_top - size - leading * i as f32;
            layer.use_text(line.as_str(), size, mm(text_x), mm(baseline), font);
        }

        cell_x += width_pt;
    }
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, color: Color) {
    layer.set_fill_color(pdf_color(color));
    layer.add_rect(rect(x, y, w, h).with_mode(PaintMode::Fill));
}

fn stroke_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, stroke: Stroke) {
    layer.set_outline_color(pdf_color(stroke.color));
    layer.set_outline_thickness(stroke.width_pt);
    layer.add_rect(rect(x, y, w, h).with_mode(PaintMode::Stroke));
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::new(mm(x), mm(y), mm(x + w), mm(y + h))
}

fn pdf_color(color: Color) -> PdfColor {
    let (r, g, b) = color.as_unit();
    PdfColor::Rgb(Rgb::new(r, g, b, None))
}

fn mm(pt: f32) -> Mm {
    Mm(pt * MM_PER_PT)
}

/// Size in points of `px` pixels embedded at `IMAGE_DPI`.
fn native_size_pt(px: u32) -> f32 {
    px.max(1) as f32 / IMAGE_DPI * INCH
}

fn document_error(err: printpdf::Error) -> EngineError {
    EngineError::Document(err.to_string())
}
