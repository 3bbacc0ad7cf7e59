//! Report assembly and rendering for usage reports.
//!
//! This crate turns an administrator's partition into a document:
//!
//! - **Shaping**: `TextShaper`, `BidiShaper` for right-to-left names
//! - **Blocks**: `Block`, `TableBlock`, `Cell`, the engine's input
//! - **Styling**: `TableStyle`, `Color`, `FontRole`
//! - **Building**: `ReportBuilder`, `ReportRow`
//! - **Engines**: the `DocumentEngine` trait and the `PdfEngine` implementation
//!
//! Assets (font and logo) are loaded once with [`ReportAssets::load`] and
//! shared by every document in a batch.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Layout math mixes pixel counts and point sizes.
#![allow(clippy::cast_precision_loss)]

pub mod assets;
pub mod builder;
pub mod document;
pub mod engine;
pub mod error;
pub mod layout;
pub mod naming;
pub mod pdf;
pub mod shaping;
pub mod style;

pub use assets::{FontAsset, ImageAsset, ReportAssets};
pub use builder::{ReportBuilder, ReportRow, COLUMN_HEADERS, TOTAL_LABEL};
pub use document::{Block, Cell, ImageBlock, Spacer, TableBlock, INCH};
pub use engine::DocumentEngine;
pub use error::{EngineError, RenderError, Result};
pub use pdf::PdfEngine;
pub use shaping::{BidiShaper, PassthroughShaper, TextShaper};
pub use style::{Color, FontRole, Stroke, TableStyle};
