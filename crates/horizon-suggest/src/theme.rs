//! Visual theme for the suggestion panel.
//!
//! The engine does not draw anything. A [`Theme`] is carried to the
//! [`PanelView`](crate::view::PanelView) inside every update, together with
//! the [`HighlightStyle`]s derived from it.

use crate::geometry::Color;

/// Ratio of the subtitle highlight font size to the title's.
pub const SUBTITLE_HIGHLIGHT_RATE: f32 = 0.7;

/// A font request, resolved by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font family name. `None` means the platform's system font.
    pub family: Option<String>,
    /// Point size.
    pub size: f32,
}

impl FontSpec {
    /// The system font at the given size.
    pub fn system(size: f32) -> Self {
        Self { family: None, size }
    }

    /// A named family at the given size.
    pub fn named(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: Some(family.into()),
            size,
        }
    }

    /// Same family, different size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            family: self.family.clone(),
            size,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::system(10.0)
    }
}

/// Colors, font and row metrics for the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Height of one row.
    pub row_height: f32,
    /// Panel background.
    pub background_color: Color,
    /// Panel border.
    pub border_color: Color,
    /// Panel border width.
    pub border_width: f32,
    /// Row separator.
    pub separator_color: Color,
    /// Row font.
    pub font: FontSpec,
    /// Title text color.
    pub font_color: Color,
    /// Subtitle text color.
    pub subtitle_font_color: Color,
    /// Color of the field's placeholder and of the inline ghost text.
    pub placeholder_color: Option<Color>,
}

impl Theme {
    /// Translucent white panel with black text.
    pub fn light() -> Self {
        Self {
            row_height: 30.0,
            background_color: Color::from_rgba(1.0, 1.0, 1.0, 0.6),
            border_color: Color::from_rgb(0.9, 0.9, 0.9),
            border_width: 0.0,
            separator_color: Color::TRANSPARENT,
            font: FontSpec::system(10.0),
            font_color: Color::BLACK,
            subtitle_font_color: Color::BLACK,
            placeholder_color: None,
        }
    }

    /// Translucent gray panel with white text.
    pub fn dark() -> Self {
        Self {
            row_height: 30.0,
            background_color: Color::from_rgba(0.8, 0.8, 0.8, 0.6),
            border_color: Color::from_rgb(0.7, 0.7, 0.7),
            border_width: 0.0,
            separator_color: Color::TRANSPARENT,
            font: FontSpec::system(10.0),
            font_color: Color::WHITE,
            subtitle_font_color: Color::WHITE,
            placeholder_color: None,
        }
    }

    /// The effective ghost text color.
    pub fn ghost_text_color(&self) -> Color {
        self.placeholder_color.unwrap_or(self.subtitle_font_color)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// How matched text is emphasized.
///
/// The title style is set by the caller. The subtitle style is always
/// derived from it with [`for_subtitle`](Self::for_subtitle).
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightStyle {
    pub bold: bool,
    pub font: FontSpec,
    /// Text color of the match. `None` keeps the row's color.
    pub color: Option<Color>,
}

impl HighlightStyle {
    /// Bold title highlight in the theme's font.
    pub fn title(theme: &Theme) -> Self {
        Self {
            bold: true,
            font: theme.font.clone(),
            color: None,
        }
    }

    /// The same style at the theme's font size. Family, weight and color
    /// are kept.
    pub fn resized_for(&self, theme: &Theme) -> Self {
        Self {
            font: self.font.with_size(theme.font.size),
            ..self.clone()
        }
    }

    /// Subtitle highlight, scaled down from this one.
    pub fn for_subtitle(&self) -> Self {
        Self {
            font: self.font.with_size(self.font.size * SUBTITLE_HIGHLIGHT_RATE),
            ..self.clone()
        }
    }
}
