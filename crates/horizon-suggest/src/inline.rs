//! Ghost-text completion for inline mode.

use crate::candidate::AnnotatedResult;
use crate::geometry::Rect;

/// Turns the best inline match into the text drawn after the caret.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineCompletionResolver;

impl InlineCompletionResolver {
    pub fn new() -> Self {
        Self
    }

    /// The ghost text for the current input, if any.
    ///
    /// Only `results[0]` is considered; nothing is suggested for empty input.
    pub fn resolve(&self, input: &str, results: &[AnnotatedResult]) -> Option<String> {
        if input.is_empty() {
            return None;
        }
        results.first()?.inline_suffix.clone()
    }

    /// Where the ghost label goes: right after the typed text.
    ///
    /// `placeholder_rect` is the field's placeholder area, `caret_rect` the
    /// rect covering the typed text and `text_rect` the field's text area.
    pub fn ghost_frame(&self, placeholder_rect: Rect, caret_rect: Rect, text_rect: Rect) -> Rect {
        let x = caret_rect.right() + text_rect.left();
        Rect::new(
            x,
            placeholder_rect.top(),
            (placeholder_rect.width() - x).max(0.0),
            placeholder_rect.height(),
        )
    }
}
