//! The render seam between the controller and the host's widgets.
//!
//! [`SearchFieldController`](crate::SearchFieldController) never touches a
//! widget. It describes what the panel should look like in a [`PanelUpdate`]
//! and hands it to a [`PanelView`], which the host implements on top of its
//! own list and label primitives.

use crate::animation::FrameTransition;
use crate::candidate::{HighlightSpan, ImageHandle};
use crate::geometry::Rect;
use crate::placement::Direction;
use crate::theme::{HighlightStyle, Theme};

/// Keyboard notifications delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardEvent {
    /// The on-screen keyboard appeared with the given frame.
    Shown(Rect),
    /// The on-screen keyboard went away.
    Hidden,
    /// The keyboard frame changed while visible.
    FrameChanged(Rect),
}

/// Which row layout the panel uses.
///
/// Chosen by how candidates were supplied: structured candidates get the
/// standard layout, plain strings the single-line one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowKind {
    /// Title, optional subtitle and image.
    #[default]
    Standard,
    /// Title only.
    SingleLine,
}

/// One row of the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub kind: RowKind,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: Option<ImageHandle>,
    /// Part of the title to draw with the title highlight style.
    pub title_span: Option<HighlightSpan>,
    /// Part of the subtitle to draw with the subtitle highlight style.
    pub subtitle_span: Option<HighlightSpan>,
}

/// Visual settings for a panel update.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStyle {
    pub theme: Theme,
    pub corner_radius: f32,
    pub right_to_left: bool,
    pub title_highlight: HighlightStyle,
    pub subtitle_highlight: HighlightStyle,
}

impl PanelStyle {
    /// Bundle a theme with the title highlight; the subtitle highlight is
    /// derived from it.
    pub fn new(
        theme: &Theme,
        highlight: &HighlightStyle,
        corner_radius: f32,
        right_to_left: bool,
    ) -> Self {
        Self {
            theme: theme.clone(),
            corner_radius,
            right_to_left,
            title_highlight: highlight.clone(),
            subtitle_highlight: highlight.for_subtitle(),
        }
    }
}

/// A complete description of the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelUpdate {
    /// Target frame of the panel.
    pub frame: Rect,
    /// Separator line between the field and the panel.
    pub shadow: Rect,
    pub direction: Direction,
    /// How to move from the current frame to `frame`.
    pub transition: FrameTransition,
    /// Rows, top to bottom. In an upward panel the first row is still on top.
    pub rows: Vec<PanelRow>,
    /// Height reserved above the first row for the host's results header.
    /// Counted in `frame`.
    pub header_height: Option<f32>,
    pub style: PanelStyle,
}

/// Text layout information used to place inline ghost text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextGeometry {
    /// The field's placeholder area.
    pub placeholder: Rect,
    /// Rect covering the text typed so far.
    pub caret: Rect,
    /// The field's text area.
    pub text: Rect,
}

/// The host side of a search field.
pub trait PanelView {
    /// Show or update the suggestion panel.
    fn show_panel(&mut self, update: &PanelUpdate);

    /// Collapse the panel to zero height.
    fn hide_panel(&mut self, transition: FrameTransition);

    /// Show, move or clear (`None`) the inline ghost text.
    fn set_ghost_text(&mut self, text: Option<&str>, frame: Option<Rect>);

    /// Replace the text in the input field.
    fn set_input_text(&mut self, text: &str);

    /// Start or stop the loading indicator.
    fn set_loading(&mut self, loading: bool);

    /// Current text layout of the field, if the host can provide it.
    fn text_geometry(&self) -> Option<TextGeometry> {
        None
    }
}

impl<V: PanelView + ?Sized> PanelView for Box<V> {
    fn show_panel(&mut self, update: &PanelUpdate) {
        (**self).show_panel(update)
    }

    fn hide_panel(&mut self, transition: FrameTransition) {
        (**self).hide_panel(transition)
    }

    fn set_ghost_text(&mut self, text: Option<&str>, frame: Option<Rect>) {
        (**self).set_ghost_text(text, frame)
    }

    fn set_input_text(&mut self, text: &str) {
        (**self).set_input_text(text)
    }

    fn set_loading(&mut self, loading: bool) {
        (**self).set_loading(loading)
    }

    fn text_geometry(&self) -> Option<TextGeometry> {
        (**self).text_geometry()
    }
}
