//! Report assembly.
//!
//! Turns an administrator's partition into the block sequence of one report
//! and hands it to a document engine.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};
use usage_report_core::{Partition, UserRecord};

use crate::assets::ReportAssets;
use crate::document::{Block, Cell, ImageBlock, Spacer, TableBlock, INCH};
use crate::engine::DocumentEngine;
use crate::error::{EngineError, RenderError, Result};
use crate::naming::free_report_path;
use crate::shaping::{BidiShaper, TextShaper};
use crate::style::{FontRole, TableStyle};

/// Column headers, left to right.
pub const COLUMN_HEADERS: [&str; 5] = [
    "UUID",
    "Start Date",
    "Usage Limit (GB)",
    "Package Days",
    "Name",
];

/// Caption of the trailing total row.
pub const TOTAL_LABEL: &str = "total usage";

/// Column widths in inches, matching `COLUMN_HEADERS`.
pub const COLUMN_WIDTHS_IN: [f32; 5] = [2.5, 1.25, 1.25, 1.25, 2.0];

/// Logo display size in inches (width, height).
pub const LOGO_SIZE_IN: (f32, f32) = (4.0, 2.0);

/// Space between the logo and the table, in points.
pub const SPACER_HEIGHT_PT: f32 = 12.0;

/// One table row in display order, already shaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// User uuid.
    pub uuid: String,
    /// Activation date.
    pub start_date: String,
    /// Usage limit in GB.
    pub usage_limit: String,
    /// Package length in days.
    pub package_days: String,
    /// Display name.
    pub name: String,
}

impl ReportRow {
    /// The row for one included user.
    pub fn for_user(user: &UserRecord, shaper: &dyn TextShaper) -> Self {
        Self {
            uuid: shaper.shape(&user.uuid),
            start_date: shaper.shape(user.start_date.as_deref().unwrap_or_default()),
            usage_limit: shaper.shape(&user.usage_limit_or_zero().to_string()),
            package_days: shaper.shape(&user.package_days_or_zero().to_string()),
            name: shaper.shape(&user.name),
        }
    }

    /// The trailing total row.
    pub fn total(total_usage_gb: f64, shaper: &dyn TextShaper) -> Self {
        Self {
            uuid: String::new(),
            start_date: String::new(),
            usage_limit: shaper.shape(&total_usage_gb.to_string()),
            package_days: String::new(),
            name: TOTAL_LABEL.to_string(),
        }
    }

    fn user_cells(self) -> Vec<Cell> {
        vec![
            Cell::new(self.uuid, FontRole::Uuid),
            Cell::new(self.start_date, FontRole::Data),
            Cell::new(self.usage_limit, FontRole::Data),
            Cell::new(self.package_days, FontRole::Data),
            Cell::new(self.name, FontRole::Name),
        ]
    }

    fn total_cells(self) -> Vec<Cell> {
        vec![
            Cell::empty(FontRole::Data),
            Cell::empty(FontRole::Data),
            Cell::new(self.usage_limit, FontRole::Data),
            Cell::empty(FontRole::Data),
            Cell::new(self.name, FontRole::Label),
        ]
    }
}

fn header_cells() -> Vec<Cell> {
    COLUMN_HEADERS
        .iter()
        .map(|title| Cell::new(*title, FontRole::Header))
        .collect()
}

/// Builds and writes one report per administrator.
///
/// Assets, style and shaper are fixed at construction and shared by every
/// report the builder writes.
pub struct ReportBuilder<E> {
    assets: Arc<ReportAssets>,
    engine: E,
    output_dir: PathBuf,
    style: TableStyle,
    shaper: Box<dyn TextShaper>,
}

impl<E: DocumentEngine> ReportBuilder<E> {
    /// Create a builder writing into `output_dir` with the default style and
    /// bidirectional shaping.
    pub fn new(assets: Arc<ReportAssets>, engine: E, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets,
            engine,
            output_dir: output_dir.into(),
            style: TableStyle::default(),
            shaper: Box::new(BidiShaper),
        }
    }

    /// Use a different table style.
    #[must_use]
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Use a different text shaper.
    #[must_use]
    pub fn with_shaper(mut self, shaper: impl TextShaper + 'static) -> Self {
        self.shaper = Box::new(shaper);
        self
    }

    /// The engine documents are handed to.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Build the report table for `users`, in the given order.
    ///
    /// Returns the table and the summed usage limit.
    #[must_use]
    pub fn table(&self, users: &[&UserRecord]) -> (TableBlock, f64) {
        let mut total_usage_gb = 0.0;
        let mut rows = vec![header_cells()];

        for user in users {
            rows.push(ReportRow::for_user(user, self.shaper.as_ref()).user_cells());
            total_usage_gb += user.usage_limit_or_zero();
        }
        rows.push(ReportRow::total(total_usage_gb, self.shaper.as_ref()).total_cells());

        let table = TableBlock {
            rows,
            column_widths_pt: COLUMN_WIDTHS_IN.iter().map(|w| w * INCH).collect(),
            style: self.style.clone(),
        };
        (table, total_usage_gb)
    }

    /// The full block sequence of a report: logo, spacer, table.
    #[must_use]
    pub fn blocks(&self, users: &[&UserRecord]) -> Vec<Block> {
        let (table, _) = self.table(users);
        vec![
            Block::Image(ImageBlock {
                image: Arc::clone(&self.assets.logo),
                width_pt: LOGO_SIZE_IN.0 * INCH,
                height_pt: LOGO_SIZE_IN.1 * INCH,
            }),
            Block::Spacer(Spacer {
                height_pt: SPACER_HEIGHT_PT,
            }),
            Block::Table(table),
        ]
    }

    /// Write the report for one partition. Empty partitions still get a
    /// report with a zero total.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Write` naming the administrator if the document
    /// cannot be written.
    pub fn write_partition(&self, partition: &Partition<'_>) -> Result<PathBuf> {
        self.write_report(&partition.admin.name, &partition.included)
    }

    /// Write the report for `users` under `admin_name`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Write` naming the administrator if the document
    /// cannot be written.
    #[instrument(skip(self, users), fields(users = users.len()))]
    pub fn write_report(&self, admin_name: &str, users: &[&UserRecord]) -> Result<PathBuf> {
        let write_error = |path: PathBuf, source: EngineError| RenderError::Write {
            admin: admin_name.to_string(),
            path,
            source,
        };

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| write_error(self.output_dir.clone(), e.into()))?;

        let extension = self.engine.extension();
        let path = free_report_path(&self.output_dir, admin_name, extension, &mut rand::thread_rng())
            .ok_or_else(|| {
                let taken = io::Error::new(io::ErrorKind::AlreadyExists, "no free report file name");
                write_error(self.output_dir.clone(), taken.into())
            })?;

        let blocks = self.blocks(users);
        self.engine
            .render(admin_name, &blocks, &path)
            .map_err(|e| write_error(path.clone(), e))?;

        info!(path = %path.display(), "Report written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{FontAsset, ImageAsset};
    use crate::shaping::PassthroughShaper;
    use crate::style::Color;
    use printpdf::image_crate::DynamicImage;
    use std::cell::RefCell;
    use std::path::Path;

    const FIXTURE_FONT: &[u8] = include_bytes!("../tests/fixtures/RobotoMedium.ttf");

    #[derive(Default)]
    struct RecordingEngine {
        rendered: RefCell<Vec<(String, PathBuf, Vec<Block>)>>,
    }

    impl DocumentEngine for RecordingEngine {
        fn extension(&self) -> &'static str {
            "pdf"
        }

        fn render(&self, title: &str, blocks: &[Block], path: &Path) -> std::result::Result<(), EngineError> {
            fs::write(path, title)?;
            self.rendered
                .borrow_mut()
                .push((title.to_string(), path.to_path_buf(), blocks.to_vec()));
            Ok(())
        }
    }

    struct UpperShaper;

    impl TextShaper for UpperShaper {
        fn shape(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    fn assets() -> Arc<ReportAssets> {
        let font = FontAsset::from_bytes("vazir.ttf", FIXTURE_FONT.to_vec()).unwrap();
        let logo = ImageAsset::from_image("logo.png", DynamicImage::new_rgb8(8, 4));
        Arc::new(ReportAssets::new(font, logo))
    }

    fn users() -> Vec<UserRecord> {
        vec![
            UserRecord::new("u-1", "alice", "A1")
                .with_start_date("2024-06-01")
                .with_usage_limit_gb(30.0)
                .with_package_days(30),
            UserRecord::new("u-2", "bob", "A1")
                .with_start_date("2024-06-02")
                .with_usage_limit_gb(12.5),
        ]
    }

    fn texts(row: &[Cell]) -> Vec<&str> {
        row.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn table_has_header_users_and_total() {
        let builder = ReportBuilder::new(assets(), RecordingEngine::default(), "/unused")
            .with_shaper(PassthroughShaper);
        let users = users();
        let refs: Vec<&UserRecord> = users.iter().collect();

        let (table, total) = builder.table(&refs);

        assert_eq!(total, 42.5);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(texts(&table.rows[0]), COLUMN_HEADERS);
        assert_eq!(texts(&table.rows[1]), ["u-1", "2024-06-01", "30", "30", "alice"]);
        assert_eq!(texts(&table.rows[2]), ["u-2", "2024-06-02", "12.5", "0", "bob"]);
        assert_eq!(texts(&table.rows[3]), ["", "", "42.5", "", TOTAL_LABEL]);
        assert!(table.rows[0].iter().all(|c| c.role == FontRole::Header));
        assert_eq!(table.rows[1][0].role, FontRole::Uuid);
        assert_eq!(table.rows[1][4].role, FontRole::Name);
        assert_eq!(table.rows[3][4].role, FontRole::Label);
    }

    #[test]
    fn cells_are_shaped_except_total_label() {
        let builder = ReportBuilder::new(assets(), RecordingEngine::default(), "/unused")
            .with_shaper(UpperShaper);
        let users = users();
        let (table, _) = builder.table(&[&users[0]]);

        assert_eq!(texts(&table.rows[1]), ["U-1", "2024-06-01", "30", "30", "ALICE"]);
        assert_eq!(table.rows[2][4].text, TOTAL_LABEL);
    }

    #[test]
    fn empty_partition_has_zero_total() {
        let builder = ReportBuilder::new(assets(), RecordingEngine::default(), "/unused");
        let (table, total) = builder.table(&[]);

        assert_eq!(total, 0.0);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(texts(&table.rows[1]), ["", "", "0", "", TOTAL_LABEL]);
    }

    #[test]
    fn blocks_are_logo_spacer_table() {
        let assets = assets();
        let builder = ReportBuilder::new(Arc::clone(&assets), RecordingEngine::default(), "/unused");
        let blocks = builder.blocks(&[]);

        assert_eq!(blocks.len(), 3);
        match &blocks[0] {
            Block::Image(image) => {
                assert!(Arc::ptr_eq(&image.image, &assets.logo));
                assert_eq!((image.width_pt, image.height_pt), (288.0, 144.0));
            }
            other => panic!("expected logo, got {other:?}"),
        }
        assert!(matches!(blocks[1], Block::Spacer(Spacer { height_pt }) if height_pt == 12.0));
        match &blocks[2] {
            Block::Table(table) => {
                assert_eq!(table.column_widths_pt, vec![180.0, 90.0, 90.0, 90.0, 144.0]);
                assert_eq!(table.style.row_background(0), Color::DARK_SLATE_GRAY);
                assert_eq!(table.style.row_background(1), Color::NAVAJO_WHITE);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn custom_style_reaches_the_table() {
        let style = TableStyle {
            header_background: Color::BLACK,
            padding_side_pt: 2.0,
            ..TableStyle::default()
        };
        let builder = ReportBuilder::new(assets(), RecordingEngine::default(), "/unused")
            .with_style(style.clone());

        let (table, _) = builder.table(&[]);

        assert_eq!(table.style, style);
        assert_eq!(table.style.row_background(0), Color::BLACK);
    }

    #[test]
    fn write_report_names_file_after_admin() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("reports");
        let builder = ReportBuilder::new(assets(), RecordingEngine::default(), &out);
        let users = users();
        let refs: Vec<&UserRecord> = users.iter().collect();

        let path = builder.write_report("owner", &refs).unwrap();

        assert_eq!(path.parent().unwrap(), out);
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("owner_") && name.ends_with(".pdf"), "{name}");
        assert_eq!(name.len(), "owner_12345.pdf".len());

        let rendered = builder.engine().rendered.borrow();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].0, "owner");
        assert_eq!(rendered[0].1, path);
    }

    #[test]
    fn write_failure_names_admin() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();

        let builder = ReportBuilder::new(assets(), RecordingEngine::default(), &blocker);
        let err = builder.write_report("owner", &[]).unwrap_err();

        assert_eq!(err.admin(), Some("owner"));
        assert!(matches!(err, RenderError::Write { .. }));
    }
}
