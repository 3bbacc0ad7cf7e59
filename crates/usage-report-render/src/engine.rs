//! The document engine seam.

use std::path::Path;

use crate::document::Block;
use crate::error::EngineError;

/// Renders a sequence of blocks into a paginated file.
///
/// The engine owns pagination and painting; callers only decide which blocks
/// go into the document and where the file goes.
pub trait DocumentEngine {
    /// File extension of the documents this engine writes, without the dot.
    fn extension(&self) -> &'static str;

    /// Write `blocks` as a document titled `title` at `path`.
    ///
    /// # Errors
    ///
    /// Returns an `EngineError` if the document cannot be produced or written.
    fn render(&self, title: &str, blocks: &[Block], path: &Path) -> Result<(), EngineError>;
}
