//! Logging facilities for Horizon Suggest.
//!
//! Horizon Suggest uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_suggest=debug")
//!     .init();
//! ```
//!
//! Per-keystroke details (filter passes, placement math, timer churn) are
//! emitted at `trace`; state transitions of the search field at `debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core plumbing target.
    pub const CORE: &str = "horizon_suggest_core";
    /// Timer system target.
    pub const TIMER: &str = "horizon_suggest_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_suggest_core::signal";
    /// Candidate matching target.
    pub const MATCHER: &str = "horizon_suggest::matcher";
    /// Panel placement target.
    pub const PLACEMENT: &str = "horizon_suggest::placement";
    /// Search field state machine target.
    pub const CONTROLLER: &str = "horizon_suggest::controller";
}

/// Build an env-filter directive that enables `level` for every Horizon
/// Suggest target.
///
/// ```
/// use horizon_suggest_core::logging::filter_directive;
///
/// assert_eq!(
///     filter_directive("debug"),
///     "horizon_suggest_core=debug,horizon_suggest=debug"
/// );
/// ```
pub fn filter_directive(level: &str) -> String {
    format!("{}={level},horizon_suggest={level}", targets::CORE)
}
