//! Font and logo assets.
//!
//! Assets are read and validated once per batch, then shared by reference
//! across every document build.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use printpdf::image_crate::{self, DynamicImage, Rgb, RgbImage, Rgba};
use printpdf::PdfDocument;
use tracing::{debug, instrument};

use crate::error::{RenderError, Result};

/// Magic numbers of TrueType, OpenType and font-collection files.
const FONT_MAGICS: [&[u8; 4]; 4] = [b"\x00\x01\x00\x00", b"true", b"OTTO", b"ttcf"];

/// A font file kept in memory.
#[derive(Debug, Clone)]
pub struct FontAsset {
    /// Where the font was read from.
    pub path: PathBuf,
    /// Raw font bytes.
    pub bytes: Vec<u8>,
}

impl FontAsset {
    /// Read and sanity-check a TrueType or OpenType font.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::AssetLoad` if the file is missing or is not a font.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| asset_error(path, e))?;
        Self::from_bytes(path, bytes)
    }

    /// Wrap already-read font bytes.
    ///
    /// The font is parsed once here so a truncated or corrupt file fails the
    /// batch before any document is started.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::AssetLoad` if `bytes` are not a usable font.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self> {
        let path = path.into();
        let is_font = bytes
            .get(..4)
            .is_some_and(|head| FONT_MAGICS.iter().any(|magic| head == &magic[..]));
        if !is_font {
            return Err(asset_error(&path, "not a TrueType or OpenType font"));
        }

        PdfDocument::empty("font check")
            .add_external_font(bytes.as_slice())
            .map_err(|e| asset_error(&path, format!("unusable font: {e}")))?;

        Ok(Self { path, bytes })
    }
}

/// A decoded raster image.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    /// Where the image was read from.
    pub path: PathBuf,
    /// Decoded pixels, flattened onto white.
    pub image: DynamicImage,
}

impl ImageAsset {
    /// Read and decode an image file.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::AssetLoad` if the file is missing or cannot be decoded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| asset_error(path, e))?;
        let image = image_crate::load_from_memory(&bytes).map_err(|e| asset_error(path, e))?;
        Ok(Self::from_image(path, image))
    }

    /// Wrap an already-decoded image.
    ///
    /// Transparent pixels are composited onto a white page background, since
    /// the PDF engine embeds images without an alpha channel.
    pub fn from_image(path: impl Into<PathBuf>, image: DynamicImage) -> Self {
        let image = if image.color().has_alpha() {
            flatten_onto_white(&image)
        } else {
            image.to_rgb8()
        };
        Self {
            path: path.into(),
            image: DynamicImage::ImageRgb8(image),
        }
    }

    /// Pixel dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

/// The font and logo shared by every report in a batch.
#[derive(Debug, Clone)]
pub struct ReportAssets {
    /// Body font, able to render the user names.
    pub font: FontAsset,
    /// Logo drawn at the top of each report.
    pub logo: Arc<ImageAsset>,
}

impl ReportAssets {
    /// Load both assets.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::AssetLoad` naming the first asset that failed.
    #[instrument(skip_all, fields(font = %font_path.as_ref().display(), logo = %logo_path.as_ref().display()))]
    pub fn load(font_path: impl AsRef<Path>, logo_path: impl AsRef<Path>) -> Result<Self> {
        let font = FontAsset::load(font_path)?;
        let logo = ImageAsset::load(logo_path)?;
        let (width, height) = logo.dimensions();
        debug!(font_bytes = font.bytes.len(), width, height, "Report assets loaded");
        Ok(Self::new(font, logo))
    }

    /// Combine already-loaded assets.
    #[must_use]
    pub fn new(font: FontAsset, logo: ImageAsset) -> Self {
        Self {
            font,
            logo: Arc::new(logo),
        }
    }
}

fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        Rgb([over_white(r, a), over_white(g, a), over_white(b, a)])
    })
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (u16::from(channel), u16::from(alpha));
    let blended = (c * a + 255 * (255 - a) + 127) / 255;
    u8::try_from(blended).unwrap_or(u8::MAX)
}

fn asset_error(path: &Path, reason: impl ToString) -> RenderError {
    RenderError::AssetLoad {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
