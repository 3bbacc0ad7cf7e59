//! Text shaping for right-to-left display.
//!
//! Document engines draw glyphs left to right in the order they are given,
//! one glyph per character. Names written in Persian or Arabic have to be
//! converted to their joined presentation forms and then reordered into
//! visual order, otherwise they render as detached letters running backwards.

use unicode_bidi::BidiInfo;

/// Converts logical-order text into the order it should be drawn in.
pub trait TextShaper {
    /// Return `text` in display order.
    fn shape(&self, text: &str) -> String;
}

/// Joins Arabic-script letters, then reorders right-to-left runs with the
/// Unicode Bidirectional Algorithm.
///
/// Paragraph direction is detected from the first strong character. Text
/// without right-to-left characters is returned as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct BidiShaper;

impl TextShaper for BidiShaper {
    fn shape(&self, text: &str) -> String {
        if !BidiInfo::new(text, None).has_rtl() {
            return text.to_string();
        }

        let joined = ar_reshaper::reshape_line(text);
        let info = BidiInfo::new(&joined, None);
        info.paragraphs
            .iter()
            .map(|para| info.reorder_line(para, para.range.clone()))
            .collect()
    }
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughShaper;

impl TextShaper for PassthroughShaper {
    fn shape(&self, text: &str) -> String {
        text.to_string()
    }
}
