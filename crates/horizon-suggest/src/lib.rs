//! Horizon Suggest - a headless autocomplete engine for single-line inputs.
//!
//! As the user types, [`SearchFieldController`] filters a candidate list,
//! annotates matches with highlight spans, decides where the suggestion panel
//! goes relative to the field and the on-screen keyboard, and tells a
//! host-implemented [`PanelView`] what to draw. An inline mode completes the
//! typed text with ghost text instead of showing a list.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use horizon_suggest::prelude::*;
//!
//! struct NullView;
//!
//! impl PanelView for NullView {
//!     fn show_panel(&mut self, _update: &PanelUpdate) {}
//!     fn hide_panel(&mut self, _transition: FrameTransition) {}
//!     fn set_ghost_text(&mut self, _text: Option<&str>, _frame: Option<Rect>) {}
//!     fn set_input_text(&mut self, _text: &str) {}
//!     fn set_loading(&mut self, _loading: bool) {}
//! }
//!
//! let timers = Rc::new(RefCell::new(TimerManager::new()));
//! let mut field = SearchFieldController::new(SearchFieldConfig::default(), timers, NullView);
//!
//! field.set_strings(["Paris", "Berlin", "Madrid"]);
//! field.on_focus_gained();
//! field.on_text_changed("r");
//!
//! let titles: Vec<_> = field.results().iter().map(|r| r.title()).collect();
//! assert_eq!(titles, ["Paris", "Berlin", "Madrid"]);
//! assert!(field.is_panel_visible());
//! ```

pub use horizon_suggest_core::*;

pub mod animation;
pub mod candidate;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod geometry;
pub mod inline;
pub mod matcher;
pub mod placement;
pub mod prelude;
pub mod theme;
pub mod view;

pub use animation::{Easing, FrameTransition};
pub use candidate::{AnnotatedResult, Candidate, HighlightSpan, ImageHandle};
pub use config::{ComparisonMode, ConfigError, SearchFieldConfig};
pub use controller::{FieldState, SearchFieldController, SelectionHandler};
pub use debounce::DebounceTimer;
pub use geometry::{Color, Point, Rect, Size};
pub use inline::InlineCompletionResolver;
pub use matcher::{Comparison, FilterMode, MatchEngine, MatchOptions, SubstringMatcher};
pub use placement::{Direction, PanelPlacement, Placement, PlacementMetrics};
pub use theme::{FontSpec, HighlightStyle, Theme};
pub use view::{KeyboardEvent, PanelRow, PanelStyle, PanelUpdate, PanelView, RowKind, TextGeometry};
