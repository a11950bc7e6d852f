//! Suggestion candidates and the annotated results produced by filtering.

use std::ops::Range;

/// Opaque reference to an image owned by the host (an icon id, an atlas
/// slot, ...). The engine only carries it through to the rows it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// One suggestion entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    title: String,
    subtitle: Option<String>,
    image: Option<ImageHandle>,
}

impl Candidate {
    /// Create a title-only candidate.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            image: None,
        }
    }

    /// Add a subtitle using builder pattern.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Add an image using builder pattern.
    pub fn with_image(mut self, image: ImageHandle) -> Self {
        self.image = Some(image);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn image(&self) -> Option<ImageHandle> {
        self.image
    }
}

impl From<&str> for Candidate {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for Candidate {
    fn from(title: String) -> Self {
        Self::new(title)
    }
}

/// A matched region of a title or subtitle.
///
/// `start` and `len` are byte offsets into the original, unfolded string and
/// always fall on `char` boundaries, so the span can be sliced directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightSpan {
    pub start: usize,
    pub len: usize,
}

impl HighlightSpan {
    #[inline]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Exclusive end offset.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The highlighted text, or `None` if the span does not fit `text`.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.range())
    }
}

impl From<Range<usize>> for HighlightSpan {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end.saturating_sub(range.start))
    }
}

/// A candidate that survived a filter pass, with its highlight data.
///
/// Rebuilt from scratch on every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedResult {
    pub candidate: Candidate,
    pub title_span: Option<HighlightSpan>,
    pub subtitle_span: Option<HighlightSpan>,
    /// Untyped remainder of the title, for inline completion.
    pub inline_suffix: Option<String>,
}

impl AnnotatedResult {
    /// A result with no highlight information.
    pub fn plain(candidate: Candidate) -> Self {
        Self {
            candidate,
            title_span: None,
            subtitle_span: None,
            inline_suffix: None,
        }
    }

    pub fn title(&self) -> &str {
        self.candidate.title()
    }
}

static_assertions::assert_impl_all!(Candidate: Send, Sync);
static_assertions::assert_impl_all!(AnnotatedResult: Send, Sync);
