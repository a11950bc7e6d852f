//! Suggestion panel placement.
//!
//! [`PanelPlacement`] decides whether the panel opens below or above the
//! field and computes its frame from the field, viewport and on-screen
//! keyboard geometry. It is pure geometry: no state, no side effects.
//!
//! # Example
//!
//! ```
//! use horizon_suggest::placement::{Direction, PanelPlacement, PlacementMetrics};
//! use horizon_suggest::Rect;
//!
//! let placement = PanelPlacement::new(PlacementMetrics::default());
//! let viewport = Rect::new(0.0, 0.0, 320.0, 640.0);
//! let keyboard = Rect::new(0.0, 320.0, 320.0, 320.0);
//! let anchor = Rect::new(10.0, 580.0, 300.0, 40.0);
//!
//! let placed = placement.place(anchor, viewport, Some(keyboard), 90.0, 0.0);
//! assert_eq!(placed.direction, Direction::Up);
//! assert_eq!(placed.frame.bottom(), anchor.top());
//! ```

use crate::geometry::Rect;

/// Which side of the field the panel opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Above the field, bottom edge flush with the field's top.
    Up,
    /// Below the field.
    #[default]
    Down,
}

/// Fixed distances used when laying out the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementMetrics {
    /// Height of one suggestion row.
    pub row_height: f32,
    /// Extra horizontal shift of a downward panel.
    pub x_offset: f32,
    /// Extra vertical shift of a downward panel.
    pub y_offset: f32,
    /// Breathing room taken off a downward panel that can't show everything.
    pub bottom_margin: f32,
    /// Inset of the panel from the field's sides, and gap below the field.
    pub edge_inset: f32,
    /// Inset of the separator line from the field's sides.
    pub shadow_inset: f32,
}

impl Default for PlacementMetrics {
    fn default() -> Self {
        Self {
            row_height: 30.0,
            x_offset: 0.0,
            y_offset: 0.0,
            bottom_margin: 10.0,
            edge_inset: 2.0,
            shadow_inset: 3.0,
        }
    }
}

/// Result of a placement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Panel frame in window coordinates.
    pub frame: Rect,
    /// One-point separator drawn along the panel's attached edge.
    pub shadow: Rect,
    pub direction: Direction,
}

/// Computes where the suggestion panel goes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelPlacement {
    metrics: PlacementMetrics,
}

impl PanelPlacement {
    pub fn new(metrics: PlacementMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &PlacementMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut PlacementMetrics {
        &mut self.metrics
    }

    /// Decide the opening direction.
    ///
    /// With a keyboard on screen the panel opens upward when one more row
    /// below the field would run into the keyboard. Without one, it opens
    /// upward when the field's center plus a row passes the viewport's
    /// height.
    pub fn decide_direction(&self, anchor: Rect, viewport: Rect, keyboard: Option<Rect>) -> Direction {
        let row_height = self.metrics.row_height;
        let up = match keyboard {
            Some(keyboard) => anchor.extend_down(row_height).intersects(&keyboard),
            None => anchor.center().y + row_height > viewport.height(),
        };

        if up { Direction::Up } else { Direction::Down }
    }

    /// Lay the panel out in a given direction.
    ///
    /// `keyboard` should only be passed while the keyboard is showing.
    /// `max_height` caps downward panels when positive. Heights never go
    /// negative, so degenerate geometry yields a zero-height panel.
    pub fn layout(
        &self,
        direction: Direction,
        anchor: Rect,
        viewport: Rect,
        keyboard: Option<Rect>,
        content_height: f32,
        max_height: f32,
    ) -> Placement {
        let m = &self.metrics;
        let width = (anchor.width() - 2.0 * m.edge_inset).max(0.0);
        let shadow_width = (anchor.width() - 2.0 * m.shadow_inset).max(0.0);

        let placement = match direction {
            Direction::Down => {
                let keyboard_height = keyboard.map_or(0.0, |k| k.height());
                let available = viewport.bottom() - anchor.bottom() - keyboard_height;

                let mut height = content_height.min(available);
                if max_height > 0.0 {
                    height = height.min(max_height);
                }
                if height < content_height {
                    height -= m.bottom_margin;
                }

                let frame = Rect::new(
                    anchor.left() + m.edge_inset + m.x_offset,
                    anchor.bottom() + m.edge_inset + m.y_offset,
                    width,
                    height.max(0.0),
                );
                let shadow = Rect::new(
                    anchor.left() + m.shadow_inset,
                    frame.top(),
                    shadow_width,
                    1.0,
                );
                Placement {
                    frame,
                    shadow,
                    direction,
                }
            }
            Direction::Up => {
                let available = viewport.bottom() - anchor.top() - m.row_height;
                let height = content_height.min(available).max(0.0);

                let frame = Rect::new(
                    anchor.left() + m.edge_inset,
                    anchor.top() - height,
                    width,
                    height,
                );
                let shadow = Rect::new(
                    anchor.left() + m.shadow_inset,
                    anchor.top() + m.shadow_inset,
                    shadow_width,
                    1.0,
                );
                Placement {
                    frame,
                    shadow,
                    direction,
                }
            }
        };

        tracing::trace!(
            target: "horizon_suggest::placement",
            ?direction,
            content_height,
            height = placement.frame.height(),
            "panel laid out"
        );
        placement
    }

    /// Decide the direction, then lay out.
    pub fn place(
        &self,
        anchor: Rect,
        viewport: Rect,
        keyboard: Option<Rect>,
        content_height: f32,
        max_height: f32,
    ) -> Placement {
        let direction = self.decide_direction(anchor, viewport, keyboard);
        self.layout(direction, anchor, viewport, keyboard, content_height, max_height)
    }
}

static_assertions::assert_impl_all!(Placement: Send, Sync, Copy);
