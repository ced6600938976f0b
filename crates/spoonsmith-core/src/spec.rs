//! Spoon parameters: shape variants and dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building or checking a [`SpoonSpec`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("Invalid {part} shape: {value:?}")]
    InvalidShapeVariant { part: &'static str, value: String },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Invalid presentation mode: {0:?}")]
    InvalidMode(String),
    #[error("{format} output does not support {mode} mode")]
    UnsupportedMode {
        format: &'static str,
        mode: &'static str,
    },
    #[error("Config error: {0}")]
    Config(String),
}

/// Shape of the spoon bowl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BowlShape {
    #[default]
    Round,
    Pointed,
    Square,
}

impl BowlShape {
    /// All bowl shapes, in form order.
    pub const ALL: [BowlShape; 3] = [BowlShape::Round, BowlShape::Pointed, BowlShape::Square];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            BowlShape::Round => "Round",
            BowlShape::Pointed => "Pointed",
            BowlShape::Square => "Square",
        }
    }
}

impl fmt::Display for BowlShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BowlShape {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SpecError::InvalidShapeVariant {
                part: "bowl",
                value: s.to_string(),
            })
    }
}

/// Shape of the spoon handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HandleShape {
    #[default]
    Straight,
    Curved,
    Tapered,
}

impl HandleShape {
    /// All handle shapes, in form order.
    pub const ALL: [HandleShape; 3] = [
        HandleShape::Straight,
        HandleShape::Curved,
        HandleShape::Tapered,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            HandleShape::Straight => "Straight",
            HandleShape::Curved => "Curved",
            HandleShape::Tapered => "Tapered",
        }
    }
}

impl fmt::Display for HandleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HandleShape {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SpecError::InvalidShapeVariant {
                part: "handle",
                value: s.to_string(),
            })
    }
}

/// Everything needed to lay out one spoon outline.
///
/// Dimensions are abstract units; the template labels them as millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpoonSpec {
    /// Canvas width (ignored by the compact composition, which sizes itself).
    pub canvas_width: f64,
    /// Canvas height (ignored by the compact composition).
    pub canvas_height: f64,
    pub bowl_shape: BowlShape,
    /// Horizontal extent of the bowl.
    pub bowl_width: f64,
    /// Vertical extent of the bowl.
    pub bowl_length: f64,
    pub handle_shape: HandleShape,
    /// Distance between the two handle rails at the top.
    pub handle_width: f64,
    /// Vertical extent of the handle.
    pub handle_length: f64,
}

impl SpoonSpec {
    /// Named numeric fields, in declaration order.
    pub fn dimensions(&self) -> [(&'static str, f64); 6] {
        [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("bowl_width", self.bowl_width),
            ("bowl_length", self.bowl_length),
            ("handle_width", self.handle_width),
            ("handle_length", self.handle_length),
        ]
    }

    /// Check that every dimension is finite and strictly positive.
    pub fn validate(&self) -> Result<(), SpecError> {
        for (field, value) in self.dimensions() {
            if !value.is_finite() {
                return Err(SpecError::NonFinite { field });
            }
            if value <= 0.0 {
                return Err(SpecError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    /// Combined vertical extent of bowl and handle.
    pub fn total_length(&self) -> f64 {
        self.bowl_length + self.handle_length
    }

    /// Whether the outline fits the canvas with `margin` on every side.
    ///
    /// The composer never clamps; callers that care check this first.
    pub fn fits_canvas(&self, margin: f64) -> bool {
        self.total_length() + 2.0 * margin <= self.canvas_height
            && self.bowl_width.max(self.handle_width) + 2.0 * margin <= self.canvas_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> SpoonSpec {
        SpoonSpec {
            canvas_width: 200.0,
            canvas_height: 300.0,
            bowl_shape: BowlShape::Round,
            bowl_width: 60.0,
            bowl_length: 80.0,
            handle_shape: HandleShape::Straight,
            handle_width: 20.0,
            handle_length: 180.0,
        }
    }

    #[test]
    fn test_parse_shapes_case_insensitive() {
        assert_eq!("round".parse::<BowlShape>().unwrap(), BowlShape::Round);
        assert_eq!(" Pointed ".parse::<BowlShape>().unwrap(), BowlShape::Pointed);
        assert_eq!("TAPERED".parse::<HandleShape>().unwrap(), HandleShape::Tapered);
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let err = "Triangular".parse::<BowlShape>().unwrap_err();
        assert_eq!(
            err,
            SpecError::InvalidShapeVariant {
                part: "bowl",
                value: "Triangular".to_string(),
            }
        );

        let err = "Wavy".parse::<HandleShape>().unwrap_err();
        assert!(matches!(err, SpecError::InvalidShapeVariant { part: "handle", .. }));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for shape in BowlShape::ALL {
            assert_eq!(shape.to_string().parse::<BowlShape>().unwrap(), shape);
        }
        for shape in HandleShape::ALL {
            assert_eq!(shape.to_string().parse::<HandleShape>().unwrap(), shape);
        }
    }

    #[test]
    fn test_validate() {
        assert!(spec().validate().is_ok());

        let bad = SpoonSpec { bowl_width: 0.0, ..spec() };
        assert_eq!(
            bad.validate(),
            Err(SpecError::NonPositive { field: "bowl_width", value: 0.0 })
        );

        let bad = SpoonSpec { handle_length: f64::NAN, ..spec() };
        assert_eq!(bad.validate(), Err(SpecError::NonFinite { field: "handle_length" }));
    }

    #[test]
    fn test_fits_canvas() {
        let s = spec();
        assert!((s.total_length() - 260.0).abs() < f64::EPSILON);
        assert!(s.fits_canvas(20.0));
        assert!(!s.fits_canvas(25.0));
    }

    #[test]
    fn test_serde_shape_names() {
        let json = serde_json::to_string(&spec()).unwrap();
        assert!(json.contains("\"bowl_shape\":\"Round\""));
        assert!(json.contains("\"handle_shape\":\"Straight\""));
        let back: SpoonSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec());
    }
}
