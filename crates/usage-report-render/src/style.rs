//! Table styling.

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// CSS `whitesmoke`.
    pub const WHITE_SMOKE: Self = Self::rgb(245, 245, 245);
    /// CSS `darkslategray`.
    pub const DARK_SLATE_GRAY: Self = Self::rgb(47, 79, 79);
    /// CSS `navajowhite`.
    pub const NAVAJO_WHITE: Self = Self::rgb(255, 222, 173);

    /// Build a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `0.0..=1.0`.
    #[must_use]
    pub fn as_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// A line style for borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line width in points.
    pub width_pt: f32,
    /// Line color.
    pub color: Color,
}

/// The typographic role of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    /// Column headers (bold).
    Header,
    /// User display names.
    Name,
    /// User uuids.
    Uuid,
    /// Dates and numbers.
    Data,
    /// Fixed labels such as the total row caption.
    Label,
}

impl FontRole {
    /// Font size in points.
    #[must_use]
    pub const fn size_pt(self) -> f32 {
        match self {
            Self::Name => 14.0,
            Self::Header | Self::Data => 12.0,
            Self::Uuid | Self::Label => 10.0,
        }
    }

    /// Line height in points.
    #[must_use]
    pub const fn leading_pt(self) -> f32 {
        match self {
            Self::Name => 18.0,
            Self::Header | Self::Data => 14.0,
            Self::Uuid | Self::Label => 12.0,
        }
    }

    /// Whether the role is drawn in the bold header face.
    #[must_use]
    pub const fn is_bold(self) -> bool {
        matches!(self, Self::Header)
    }
}

/// Colors, borders and padding for the report table.
///
/// Row 0 is the header; the remaining rows are body rows, including the total.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    /// Header row background.
    pub header_background: Color,
    /// Header row text.
    pub header_text: Color,
    /// Background of odd-indexed body rows.
    pub body_background: Color,
    /// Background of even-indexed body rows.
    pub accent_background: Color,
    /// Body row text.
    pub body_text: Color,
    /// Border around every cell.
    pub grid: Stroke,
    /// Border around the whole table.
    pub outline: Stroke,
    /// Space above cell text, in points.
    pub padding_top_pt: f32,
    /// Space below cell text, in points.
    pub padding_bottom_pt: f32,
    /// Space left and right of cell text, in points.
    pub padding_side_pt: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_background: Color::DARK_SLATE_GRAY,
            header_text: Color::WHITE_SMOKE,
            body_background: Color::WHITE,
            accent_background: Color::NAVAJO_WHITE,
            body_text: Color::BLACK,
            grid: Stroke {
                width_pt: 1.0,
                color: Color::BLACK,
            },
            outline: Stroke {
                width_pt: 2.0,
                color: Color::BLACK,
            },
            padding_top_pt: 12.0,
            padding_bottom_pt: 12.0,
            padding_side_pt: 6.0,
        }
    }
}

impl TableStyle {
    /// Background color of table row `row`.
    #[must_use]
    pub fn row_background(&self, row: usize) -> Color {
        match row {
            0 => self.header_background,
            n if (n - 1) % 2 == 0 => self.accent_background,
            _ => self.body_background,
        }
    }

    /// Text color of table row `row`.
    #[must_use]
    pub fn row_text(&self, row: usize) -> Color {
        if row == 0 {
            self.header_text
        } else {
            self.body_text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternating_body_rows() {
        let style = TableStyle::default();
        assert_eq!(style.row_background(0), Color::DARK_SLATE_GRAY);
        assert_eq!(style.row_background(1), Color::NAVAJO_WHITE);
        assert_eq!(style.row_background(2), Color::WHITE);
        assert_eq!(style.row_background(3), Color::NAVAJO_WHITE);
        assert_eq!(style.row_background(4), Color::WHITE);
    }

    #[test]
    fn header_text_differs_from_body() {
        let style = TableStyle::default();
        assert_eq!(style.row_text(0), Color::WHITE_SMOKE);
        assert_eq!(style.row_text(1), Color::BLACK);
    }

    #[test]
    fn only_header_is_bold() {
        assert!(FontRole::Header.is_bold());
        assert!(!FontRole::Name.is_bold());
        assert!(!FontRole::Data.is_bold());
    }

    #[test]
    fn unit_channels() {
        assert_eq!(Color::WHITE.as_unit(), (1.0, 1.0, 1.0));
        assert_eq!(Color::BLACK.as_unit(), (0.0, 0.0, 0.0));
    }
}
