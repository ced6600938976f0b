//! Slider bounds for the design form.

use crate::spec::{BowlShape, HandleShape, SpecError, SpoonSpec};
use serde::{Deserialize, Serialize};

/// Inclusive numeric range with a default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl SliderRange {
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Reject `value` if it falls outside the range.
    pub fn check(&self, field: &'static str, value: f64) -> Result<(), SpecError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(SpecError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// A form slider: field name, human label, and range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub name: &'static str,
    pub label: &'static str,
    pub range: SliderRange,
}

/// Slider ranges for every numeric [`SpoonSpec`] field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormLimits {
    pub canvas_width: SliderRange,
    pub canvas_height: SliderRange,
    pub bowl_width: SliderRange,
    pub bowl_length: SliderRange,
    pub handle_width: SliderRange,
    pub handle_length: SliderRange,
    /// Raster pixels per unit.
    pub scale: SliderRange,
}

impl Default for FormLimits {
    fn default() -> Self {
        Self {
            canvas_width: SliderRange::new(100.0, 600.0, 300.0),
            canvas_height: SliderRange::new(200.0, 800.0, 400.0),
            bowl_width: SliderRange::new(50.0, 200.0, 100.0),
            bowl_length: SliderRange::new(50.0, 200.0, 100.0),
            handle_width: SliderRange::new(20.0, 100.0, 40.0),
            handle_length: SliderRange::new(100.0, 300.0, 200.0),
            scale: SliderRange::new(0.25, 4.0, 1.0),
        }
    }
}

impl FormLimits {
    /// Sliders in form order, matching [`SpoonSpec::dimensions`].
    pub fn sliders(&self) -> [Slider; 6] {
        [
            Slider { name: "canvas_width", label: "Canvas Width (mm)", range: self.canvas_width },
            Slider { name: "canvas_height", label: "Canvas Height (mm)", range: self.canvas_height },
            Slider { name: "bowl_width", label: "Bowl Width (mm)", range: self.bowl_width },
            Slider { name: "bowl_length", label: "Bowl Length (mm)", range: self.bowl_length },
            Slider { name: "handle_width", label: "Handle Width (mm)", range: self.handle_width },
            Slider { name: "handle_length", label: "Handle Length (mm)", range: self.handle_length },
        ]
    }

    /// A spec built from every slider's default, with the first shape of each kind.
    pub fn default_spec(&self) -> SpoonSpec {
        SpoonSpec {
            canvas_width: self.canvas_width.default,
            canvas_height: self.canvas_height.default,
            bowl_shape: BowlShape::default(),
            bowl_width: self.bowl_width.default,
            bowl_length: self.bowl_length.default,
            handle_shape: HandleShape::default(),
            handle_width: self.handle_width.default,
            handle_length: self.handle_length.default,
        }
    }

    /// Reject raster scales outside the allowed range.
    pub fn check_scale(&self, scale: f64) -> Result<(), SpecError> {
        if !scale.is_finite() {
            return Err(SpecError::NonFinite { field: "scale" });
        }
        self.scale.check("scale", scale)
    }

    /// Check every dimension of `spec` against its slider.
    pub fn check(&self, spec: &SpoonSpec) -> Result<(), SpecError> {
        spec.validate()?;
        for (slider, (field, value)) in self.sliders().iter().zip(spec.dimensions()) {
            debug_assert_eq!(slider.name, field);
            slider.range.check(field, value)?;
        }
        Ok(())
    }
}
