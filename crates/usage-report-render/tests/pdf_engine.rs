//! Rendering real PDF files with the bundled fixture font.

use std::fs;
use std::sync::Arc;

use printpdf::image_crate::{DynamicImage, Rgba, RgbaImage};
use printpdf::lopdf;
use tempfile::TempDir;
use usage_report_core::UserRecord;
use usage_report_render::layout::{layout, PageGeometry};
use usage_report_render::{FontAsset, ImageAsset, PdfEngine, ReportAssets, ReportBuilder};

const FIXTURE_FONT: &[u8] = include_bytes!("fixtures/RobotoMedium.ttf");

fn assets() -> Arc<ReportAssets> {
    let font = FontAsset::from_bytes("RobotoMedium.ttf", FIXTURE_FONT.to_vec()).unwrap();
    let logo = RgbaImage::from_pixel(40, 20, Rgba([30, 60, 90, 128]));
    let logo = ImageAsset::from_image("logo.png", DynamicImage::ImageRgba8(logo));
    Arc::new(ReportAssets::new(font, logo))
}

fn users(count: usize) -> Vec<UserRecord> {
    (0..count)
        .map(|i| {
            let name = if i % 10 == 0 {
                format!("کاربر {i}")
            } else {
                format!("user {i}")
            };
            UserRecord::new(format!("8f1c1f0e-0000-4000-8000-{i:012}"), name, "A1")
                .with_start_date("2024-06-01")
                .with_usage_limit_gb(10.0)
                .with_package_days(30)
        })
        .collect()
}

fn builder(assets: Arc<ReportAssets>, out: &std::path::Path) -> ReportBuilder<PdfEngine> {
    let engine = PdfEngine::new(Arc::clone(&assets));
    ReportBuilder::new(assets, engine, out)
}

#[test]
fn long_report_spans_several_pages() {
    let out = TempDir::new().unwrap();
    let builder = builder(assets(), out.path());
    let users = users(60);
    let refs: Vec<&UserRecord> = users.iter().collect();
    let expected_pages = layout(&builder.blocks(&refs), PageGeometry::LETTER).pages.len();

    let path = builder.write_report("owner", &refs).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"), "not a PDF header");
    let document = lopdf::Document::load(&path).unwrap();
    assert!(expected_pages > 1, "60 users should not fit one page");
    assert_eq!(document.get_pages().len(), expected_pages);
}

#[test]
fn empty_report_is_a_single_page() {
    let out = TempDir::new().unwrap();
    let builder = builder(assets(), out.path());

    let path = builder.write_report("empty", &[]).unwrap();

    let document = lopdf::Document::load(&path).unwrap();
    assert_eq!(document.get_pages().len(), 1);
    assert!(path.extension().is_some_and(|ext| ext == "pdf"));
}
