//! Error types for Horizon Suggest core.

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is invalid, already fired, or has been stopped.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}
