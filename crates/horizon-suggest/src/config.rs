//! Search field configuration.
//!
//! [`SearchFieldConfig`] holds every tunable of the suggestion engine. It is
//! plain data: build it in code or load it from TOML, where every key is
//! optional.
//!
//! ```
//! use horizon_suggest::config::{ComparisonMode, SearchFieldConfig};
//!
//! let config = SearchFieldConfig::from_toml_str(r#"
//!     max_results = 5
//!     typing_stopped_delay = 0.3
//!     comparison = "case_sensitive"
//! "#).unwrap();
//!
//! assert_eq!(config.max_results, 5);
//! assert_eq!(config.comparison, ComparisonMode::CaseSensitive);
//! assert_eq!(config.corner_radius, 2.0);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::debounce::DEFAULT_TYPING_STOPPED_DELAY;
use crate::matcher::{Comparison, MatchOptions};
use crate::placement::PlacementMetrics;

/// Errors from loading or validating a [`SearchFieldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML source could not be parsed.
    #[error("invalid search field config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be written out.
    #[error("failed to serialize search field config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field holds a value outside its domain.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

/// How standard-mode matching compares text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    CaseSensitive,
    #[default]
    CaseInsensitive,
}

impl From<ComparisonMode> for Comparison {
    fn from(mode: ComparisonMode) -> Self {
        match mode {
            ComparisonMode::CaseSensitive => Comparison::CaseSensitive,
            ComparisonMode::CaseInsensitive => Comparison::CaseInsensitive,
        }
    }
}

/// Tunables for a search field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFieldConfig {
    /// Maximum number of rows shown. `0` shows all.
    pub max_results: usize,
    /// Maximum panel height for downward panels. `0` means unbounded.
    pub max_panel_height: f32,
    /// Seconds without a keystroke before typing counts as stopped.
    pub typing_stopped_delay: f64,
    /// Queries shorter than this (in grapheme clusters) produce no results.
    pub min_characters_to_start_filtering: usize,
    /// Show every candidate regardless of the query.
    pub force_no_filtering: bool,
    /// Show all candidates when the empty field gains focus.
    pub start_visible: bool,
    /// Show all candidates before any interaction.
    pub start_visible_without_interaction: bool,
    /// Complete inline with ghost text instead of showing a list.
    pub inline_mode: bool,
    /// Inline mode: only match the text after the last occurrence of this.
    pub start_filtering_after: Option<String>,
    /// Inline mode: suggest as soon as the trigger is typed.
    pub start_suggesting_immediately: bool,
    /// Standard-mode comparison.
    pub comparison: ComparisonMode,
    /// Lay rows out right to left.
    pub force_right_to_left: bool,
    /// Horizontal shift of downward panels.
    pub x_offset: f32,
    /// Vertical shift of downward panels.
    pub y_offset: f32,
    /// Panel corner radius.
    pub corner_radius: f32,
    /// Room left below a downward panel that can't show every row.
    pub bottom_margin: f32,
}

impl Default for SearchFieldConfig {
    fn default() -> Self {
        Self {
            max_results: 0,
            max_panel_height: 0.0,
            typing_stopped_delay: DEFAULT_TYPING_STOPPED_DELAY.as_secs_f64(),
            min_characters_to_start_filtering: 0,
            force_no_filtering: false,
            start_visible: false,
            start_visible_without_interaction: false,
            inline_mode: false,
            start_filtering_after: None,
            start_suggesting_immediately: false,
            comparison: ComparisonMode::default(),
            force_right_to_left: false,
            x_offset: 0.0,
            y_offset: 0.0,
            corner_radius: 2.0,
            bottom_margin: 10.0,
        }
    }
}

impl SearchFieldConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Check that every field is within its domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.typing_stopped_delay.is_finite() || self.typing_stopped_delay < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "typing_stopped_delay",
                reason: "must be a non-negative number of seconds",
            });
        }
        let lengths = [
            ("max_panel_height", self.max_panel_height),
            ("corner_radius", self.corner_radius),
            ("bottom_margin", self.bottom_margin),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be a non-negative length",
                });
            }
        }
        Ok(())
    }

    /// The typing-stopped delay as a [`Duration`].
    ///
    /// Invalid delays fall back to the default.
    pub fn typing_stopped_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.typing_stopped_delay)
            .unwrap_or(DEFAULT_TYPING_STOPPED_DELAY)
    }

    /// Matcher options derived from this config.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            comparison: self.comparison.into(),
            min_chars: self.min_characters_to_start_filtering,
            start_filtering_after: self.start_filtering_after.clone(),
            suggest_immediately: self.start_suggesting_immediately,
        }
    }

    /// Placement metrics derived from this config and a row height.
    pub fn placement_metrics(&self, row_height: f32) -> PlacementMetrics {
        PlacementMetrics {
            row_height,
            x_offset: self.x_offset,
            y_offset: self.y_offset,
            bottom_margin: self.bottom_margin,
            ..PlacementMetrics::default()
        }
    }
}
