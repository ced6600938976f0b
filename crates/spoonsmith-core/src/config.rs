//! Composer tuning knobs.

use crate::spec::SpecError;
use serde::{Deserialize, Serialize};

/// Spacing and shape constants used by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Template top margin; the centerline starts here.
    pub margin: f64,
    /// Compact composition: left, right and top margin.
    pub compact_margin: f64,
    /// Compact composition: space below the handle.
    pub compact_bottom_margin: f64,
    /// Curved handle bow, as a fraction of the handle width.
    pub curve_bow: f64,
    /// Gap between a feature and its dimension label.
    pub label_gap: f64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            margin: 10.0,
            compact_margin: 20.0,
            compact_bottom_margin: 40.0,
            curve_bow: 0.2,
            label_gap: 8.0,
        }
    }
}

impl ComposerConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SpecError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, SpecError> {
        serde_json::to_string_pretty(self).map_err(|e| SpecError::Config(e.to_string()))
    }

    /// All values must be finite and non-negative.
    pub fn validate(&self) -> Result<(), SpecError> {
        let fields = [
            ("margin", self.margin),
            ("compact_margin", self.compact_margin),
            ("compact_bottom_margin", self.compact_bottom_margin),
            ("curve_bow", self.curve_bow),
            ("label_gap", self.label_gap),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SpecError::Config(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
