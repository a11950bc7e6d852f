//! Animated frame changes for the suggestion panel.
//!
//! The engine never runs animations itself. It tags each panel update with a
//! [`FrameTransition`] and the host interpolates, optionally with
//! [`FrameTransition::frame_at`].

use std::time::Duration;

use crate::geometry::Rect;

/// Duration of every panel move/resize.
pub const PANEL_TRANSITION_DURATION: Duration = Duration::from_millis(200);

/// Available easing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in-out (smooth start and end).
    #[default]
    EaseInOut,
}

/// Apply an easing function to a progress value in `0.0..=1.0`.
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
    }
}

/// How the host should move the panel to its new frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTransition {
    pub duration: Duration,
    pub easing: Easing,
}

impl FrameTransition {
    /// The short ease used for all panel changes.
    pub const PANEL: Self = Self {
        duration: PANEL_TRANSITION_DURATION,
        easing: Easing::EaseInOut,
    };

    /// Jump straight to the target.
    pub const IMMEDIATE: Self = Self {
        duration: Duration::ZERO,
        easing: Easing::Linear,
    };

    /// Frame `elapsed` into the transition from `from` to `to`.
    pub fn frame_at(&self, from: Rect, to: Rect, elapsed: Duration) -> Rect {
        if self.duration.is_zero() {
            return to;
        }
        let t = ease(
            self.easing,
            elapsed.as_secs_f32() / self.duration.as_secs_f32(),
        );
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        Rect::new(
            lerp(from.left(), to.left()),
            lerp(from.top(), to.top()),
            lerp(from.width(), to.width()),
            lerp(from.height(), to.height()),
        )
    }
}

impl Default for FrameTransition {
    fn default() -> Self {
        Self::PANEL
    }
}
