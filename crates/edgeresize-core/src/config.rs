//! Resize configuration.
//!
//! Callers hand in [`ResizeOptions`] (every field optional, typically
//! deserialized from a JS object or JSON) and the controller resolves them
//! once into an immutable [`ResizeConfig`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default sensitivity band around each edge, in pixels.
pub const DEFAULT_MARGIN: f64 = 5.0;
/// Default minimum width the element can be resized to, in pixels.
pub const DEFAULT_MIN_WIDTH: f64 = 30.0;
/// Default minimum height the element can be resized to, in pixels.
pub const DEFAULT_MIN_HEIGHT: f64 = 30.0;

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

/// Caller-supplied options. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResizeOptions {
    /// Pixel sensitivity band. `margins` is accepted as an alias.
    #[serde(alias = "margins", skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
}

impl ResizeOptions {
    /// Create empty options (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the edge sensitivity margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Set the minimum width.
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = Some(min_width);
        self
    }

    /// Set the minimum height.
    pub fn with_min_height(mut self, min_height: f64) -> Self {
        self.min_height = Some(min_height);
        self
    }
}

/// Resolved, immutable resize configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeConfig {
    /// Pixel radius around an edge within which the pointer counts as "on" it.
    pub margin: f64,
    /// Width writes below this are skipped.
    pub min_width: f64,
    /// Height writes below this are skipped.
    pub min_height: f64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
        }
    }
}

impl From<ResizeOptions> for ResizeConfig {
    fn from(options: ResizeOptions) -> Self {
        Self {
            margin: resolve("margin", options.margin, DEFAULT_MARGIN),
            min_width: resolve("min_width", options.min_width, DEFAULT_MIN_WIDTH),
            min_height: resolve("min_height", options.min_height, DEFAULT_MIN_HEIGHT),
        }
    }
}

impl ResizeConfig {
    /// Half the margin: the pointer offset applied before computing a delta,
    /// splitting the sensitivity band evenly across the edge.
    pub fn half_margin(&self) -> f64 {
        self.margin / 2.0
    }

    /// Strict check for hosts that want to reject odd values up front.
    ///
    /// The controller never calls this; non-positive values flow into the
    /// geometry math unchanged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("margin", self.margin),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}

/// Unset, zero and NaN all mean "use the default". Negative values are kept.
fn resolve(field: &str, value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => {
            if v < 0.0 {
                log::warn!("Resize option {} is negative ({}); keeping it as given", field, v);
            }
            v
        }
        _ => default,
    }
}
