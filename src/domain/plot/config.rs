//! Plot configuration with serde defaults.

use super::drag::CommitPolicy;
use super::value_objects::{Color, Margin};
use crate::domain::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// Minimum marker radius in pixels.
pub const BUBBLE_MIN_RADIUS: f64 = 4.0;
/// Maximum marker radius in pixels.
pub const BUBBLE_MAX_RADIUS: f64 = 40.0;
/// Data units kept between a target threshold and the frozen domain edge.
pub const DEFAULT_TARGET_PADDING: f64 = 10.0;
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Scale-related knobs, split out so scales can be rebuilt without the rest of the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub radius_range: (f64, f64),
    pub tick_count: usize,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            radius_range: (BUBBLE_MIN_RADIUS, BUBBLE_MAX_RADIUS),
            tick_count: DEFAULT_TICK_COUNT,
        }
    }
}

/// Colors used by the render list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub marker_fill: Color,
    pub marker_stroke: Color,
    pub marker_fill_opacity: f64,
    pub range_max: Color,
    pub range_min: Color,
    pub axis: Color,
    pub axis_label: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            marker_fill: Color::MARKER_FILL,
            marker_stroke: Color::MARKER_STROKE,
            marker_fill_opacity: 0.6,
            range_max: Color::RANGE_MAX,
            range_min: Color::RANGE_MIN,
            axis: Color::AXIS,
            axis_label: Color::AXIS_LABEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub margin: Margin,
    pub scale: ScaleConfig,
    pub target_padding: f64,
    pub commit_policy: CommitPolicy,
    pub palette: Palette,
    pub x_label: String,
    pub y_label: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            scale: ScaleConfig::default(),
            target_padding: DEFAULT_TARGET_PADDING,
            commit_policy: CommitPolicy::default(),
            palette: Palette::default(),
            x_label: "Input Value (X)".to_string(),
            y_label: "Output Value (Y)".to_string(),
        }
    }
}

impl PlotConfig {
    /// Parse a partial JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let config: PlotConfig = serde_json::from_str(json)
            .map_err(|e| ValidationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let (r0, r1) = self.scale.radius_range;
        if !(r0.is_finite() && r1.is_finite() && r0 >= 0.0 && r0 <= r1) {
            return Err(ValidationError::InvalidConfig(format!(
                "radius range ({}, {}) must be finite, non-negative and ordered",
                r0, r1
            )));
        }
        if self.scale.tick_count == 0 {
            return Err(ValidationError::InvalidConfig("tick count must be positive".into()));
        }
        if !(self.target_padding.is_finite() && self.target_padding >= 0.0) {
            return Err(ValidationError::InvalidConfig(format!(
                "target padding {} must be a non-negative number",
                self.target_padding
            )));
        }
        let m = &self.margin;
        if [m.top, m.right, m.bottom, m.left].iter().any(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(ValidationError::InvalidConfig("margins must be non-negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            PlotConfig::from_json(r#"{ "target_padding": 25.0, "commit_policy": "continuous" }"#)
                .unwrap();
        assert_eq!(config.target_padding, 25.0);
        assert_eq!(config.commit_policy, CommitPolicy::Continuous);
        assert_eq!(config.margin, Margin::default());
        assert_eq!(config.scale.radius_range, (4.0, 40.0));
    }

    #[test]
    fn rejects_inverted_radius_band() {
        let err = PlotConfig::from_json(r#"{ "scale": { "radius_range": [40.0, 4.0] } }"#);
        assert!(matches!(err, Err(ValidationError::InvalidConfig(_))));
    }
}
