#![forbid(unsafe_code)]

//! Tunable parameters for the reorder engine.
//!
//! Every field defaults to the behavior hosts get without configuration:
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | `hysteresis_band` | 64 |
//! | `autoscroll.edge_band` | 52 |
//! | `autoscroll.speed` | 3 per tick |
//! | `autoscroll.interval_ms` | 10 |
//! | `settle.stiffness` / `settle.damping` | 170 / 26 |
//!
//! With the `config-file` feature the whole struct loads from TOML or JSON:
//!
//! ```toml
//! axis = "horizontal"
//! hysteresis_band = 48.0
//!
//! [autoscroll]
//! edge_band = 40.0
//! speed = 6.0
//! ```

use std::fmt;
#[cfg(feature = "config-file")]
use std::path::Path;

use dragsort_core::Axis;
use dragsort_core::animation::spring::{DEFAULT_DAMPING, DEFAULT_STIFFNESS};
#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Default hysteresis band at a just-swapped neighbor's far edge.
pub const DEFAULT_HYSTERESIS_BAND: f64 = 64.0;

/// Default autoscroll edge band.
pub const DEFAULT_EDGE_BAND: f64 = 52.0;

/// Default autoscroll distance per tick.
pub const DEFAULT_SCROLL_SPEED: f64 = 3.0;

/// Default autoscroll tick interval in milliseconds.
pub const DEFAULT_SCROLL_INTERVAL_MS: u64 = 10;

/// Default coordinate space name for a container.
pub const DEFAULT_COORDINATE_SPACE: &str = "reorderable";

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct ReorderConfig {
    /// Stacking axis.
    pub axis: Axis,
    /// Name of the coordinate space item frames are measured in.
    pub coordinate_space: String,
    /// Size of the swap-back suppression band.
    pub hysteresis_band: f64,
    /// Ignore all drag gestures.
    pub drag_disabled: bool,
    pub autoscroll: AutoScrollConfig,
    pub settle: SettleConfig,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            coordinate_space: DEFAULT_COORDINATE_SPACE.to_owned(),
            hysteresis_band: DEFAULT_HYSTERESIS_BAND,
            drag_disabled: false,
            autoscroll: AutoScrollConfig::default(),
            settle: SettleConfig::default(),
        }
    }
}

/// Edge autoscroll parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct AutoScrollConfig {
    /// Scroll when the pointer nears a viewport edge.
    pub enabled: bool,
    /// Size of the band at each viewport edge.
    pub edge_band: f64,
    /// Distance scrolled per tick.
    pub speed: f64,
    /// Tick interval in milliseconds.
    pub interval_ms: u64,
}

impl AutoScrollConfig {
    /// Tick interval as a duration.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            edge_band: DEFAULT_EDGE_BAND,
            speed: DEFAULT_SCROLL_SPEED,
            interval_ms: DEFAULT_SCROLL_INTERVAL_MS,
        }
    }
}

/// Release animation parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct SettleConfig {
    /// Animate the residual offset back to zero. When false the settle
    /// completes on release.
    pub animate: bool,
    pub stiffness: f64,
    pub damping: f64,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            animate: true,
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
        }
    }
}

impl ReorderConfig {
    /// Set the stacking axis (builder).
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Set the coordinate space name (builder).
    #[must_use]
    pub fn with_coordinate_space(mut self, name: impl Into<String>) -> Self {
        self.coordinate_space = name.into();
        self
    }

    /// Set the hysteresis band (builder).
    #[must_use]
    pub fn with_hysteresis_band(mut self, band: f64) -> Self {
        self.hysteresis_band = band;
        self
    }

    /// Set autoscroll parameters (builder).
    #[must_use]
    pub fn with_autoscroll(mut self, autoscroll: AutoScrollConfig) -> Self {
        self.autoscroll = autoscroll;
        self
    }

    /// Set settle parameters (builder).
    #[must_use]
    pub fn with_settle(mut self, settle: SettleConfig) -> Self {
        self.settle = settle;
        self
    }

    /// Disable or enable dragging (builder).
    #[must_use]
    pub fn with_drag_disabled(mut self, disabled: bool) -> Self {
        self.drag_disabled = disabled;
        self
    }

    /// Check every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hysteresis_band >= 0.0 && self.hysteresis_band.is_finite()) {
            return Err(ConfigError::InvalidHysteresisBand(self.hysteresis_band));
        }
        if self.coordinate_space.is_empty() {
            return Err(ConfigError::EmptyCoordinateSpace);
        }
        let scroll = &self.autoscroll;
        if !(scroll.edge_band > 0.0 && scroll.edge_band.is_finite()) {
            return Err(ConfigError::InvalidEdgeBand(scroll.edge_band));
        }
        if !(scroll.speed > 0.0 && scroll.speed.is_finite()) {
            return Err(ConfigError::InvalidScrollSpeed(scroll.speed));
        }
        if scroll.interval_ms == 0 {
            return Err(ConfigError::ZeroScrollInterval);
        }
        let settle = &self.settle;
        if !(settle.stiffness > 0.0 && settle.stiffness.is_finite()) {
            return Err(ConfigError::InvalidStiffness(settle.stiffness));
        }
        if !(settle.damping >= 0.0 && settle.damping.is_finite()) {
            return Err(ConfigError::InvalidDamping(settle.damping));
        }
        Ok(())
    }

    /// Parse from a TOML string and validate.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(s).map_err(ConfigLoadError::Toml)?;
        config.validate().map_err(ConfigLoadError::Invalid)?;
        Ok(config)
    }

    /// Load from a TOML file and validate.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigLoadError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse from a JSON string and validate.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigLoadError::Json)?;
        config.validate().map_err(ConfigLoadError::Invalid)?;
        Ok(config)
    }

    /// Load from a JSON file and validate.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigLoadError::Io)?;
        Self::from_json_str(&content)
    }
}

/// A parameter outside its usable range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    InvalidHysteresisBand(f64),
    EmptyCoordinateSpace,
    InvalidEdgeBand(f64),
    InvalidScrollSpeed(f64),
    ZeroScrollInterval,
    InvalidStiffness(f64),
    InvalidDamping(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHysteresisBand(v) => {
                write!(f, "hysteresis_band must be finite and >= 0, got {v}")
            }
            Self::EmptyCoordinateSpace => write!(f, "coordinate_space must not be empty"),
            Self::InvalidEdgeBand(v) => {
                write!(f, "autoscroll.edge_band must be finite and > 0, got {v}")
            }
            Self::InvalidScrollSpeed(v) => {
                write!(f, "autoscroll.speed must be finite and > 0, got {v}")
            }
            Self::ZeroScrollInterval => write!(f, "autoscroll.interval_ms must be > 0"),
            Self::InvalidStiffness(v) => {
                write!(f, "settle.stiffness must be finite and > 0, got {v}")
            }
            Self::InvalidDamping(v) => {
                write!(f, "settle.damping must be finite and >= 0, got {v}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure loading a configuration file.
#[cfg(feature = "config-file")]
#[derive(Debug)]
pub enum ConfigLoadError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
    Invalid(ConfigError),
}

#[cfg(feature = "config-file")]
impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(e) => write!(f, "invalid config: {e}"),
        }
    }
}

#[cfg(feature = "config-file")]
impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ReorderConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.hysteresis_band, 64.0);
        assert_eq!(config.autoscroll.edge_band, 52.0);
        assert_eq!(config.autoscroll.speed, 3.0);
        assert_eq!(config.autoscroll.interval(), Duration::from_millis(10));
        assert!(config.settle.animate);
    }

    #[test]
    fn builders_apply() {
        let config = ReorderConfig::default()
            .with_axis(Axis::Horizontal)
            .with_coordinate_space("row")
            .with_hysteresis_band(10.0)
            .with_drag_disabled(true);
        assert_eq!(config.axis, Axis::Horizontal);
        assert_eq!(config.coordinate_space, "row");
        assert_eq!(config.hysteresis_band, 10.0);
        assert!(config.drag_disabled);
    }

    #[test]
    fn zero_hysteresis_is_allowed() {
        let config = ReorderConfig::default().with_hysteresis_band(0.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn negative_hysteresis_rejected() {
        let config = ReorderConfig::default().with_hysteresis_band(-1.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidHysteresisBand(-1.0)));
    }

    #[test]
    fn nan_band_rejected() {
        let mut config = ReorderConfig::default();
        config.autoscroll.edge_band = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidEdgeBand(_))));
    }

    #[test]
    fn zero_speed_rejected() {
        let mut config = ReorderConfig::default();
        config.autoscroll.speed = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidScrollSpeed(0.0)));
    }

    #[test]
    fn zero_interval_rejected() {
        let mut config = ReorderConfig::default();
        config.autoscroll.interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroScrollInterval));
    }

    #[test]
    fn bad_spring_rejected() {
        let mut config = ReorderConfig::default();
        config.settle.stiffness = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidStiffness(0.0)));
        config.settle.stiffness = 100.0;
        config.settle.damping = -2.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidDamping(-2.0)));
    }

    #[test]
    fn empty_space_rejected() {
        let config = ReorderConfig::default().with_coordinate_space("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyCoordinateSpace));
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::InvalidScrollSpeed(-3.0);
        assert!(err.to_string().contains("autoscroll.speed"));
    }
}
