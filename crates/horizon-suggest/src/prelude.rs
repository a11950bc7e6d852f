//! Prelude module for Horizon Suggest.
//!
//! ```ignore
//! use horizon_suggest::prelude::*;
//! ```
//!
//! Brings in the controller, its configuration, the view seam, the candidate
//! model and the timer plumbing a host loop needs.

// ============================================================================
// Controller and Configuration
// ============================================================================

pub use crate::config::{ComparisonMode, SearchFieldConfig};
pub use crate::controller::{FieldState, SearchFieldController};
pub use crate::theme::{FontSpec, Theme};

// ============================================================================
// View Seam
// ============================================================================

pub use crate::animation::FrameTransition;
pub use crate::placement::Direction;
pub use crate::view::{KeyboardEvent, PanelRow, PanelUpdate, PanelView, RowKind, TextGeometry};

// ============================================================================
// Candidates and Geometry
// ============================================================================

pub use crate::candidate::{AnnotatedResult, Candidate, HighlightSpan, ImageHandle};
pub use crate::geometry::{Color, Point, Rect, Size};

// ============================================================================
// Event Loop Plumbing
// ============================================================================

pub use horizon_suggest_core::{ConnectionGuard, ManualClock, Scheduler, Signal, TimerId, TimerManager};
