//! Parametric spoon outline composer.
//!
//! Turns a [`SpoonSpec`] into an ordered list of [`Primitive`]s centered on a
//! vertical axis. Two presentation modes share the same bowl and handle
//! geometry:
//!
//! - [`PresentationMode::Template`] uses the caller's canvas, centers the
//!   outline vertically and adds connectors, a dashed centerline and
//!   dimension labels.
//! - [`PresentationMode::Compact`] sizes the canvas to the outline plus a
//!   fixed margin and stacks the bowl's bounding box directly on top of the
//!   handle.

use crate::config::ComposerConfig;
use crate::shapes::{Primitive, geometry_bounds};
use crate::spec::{BowlShape, HandleShape, SpecError, SpoonSpec};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which composition to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// Auto-sized canvas, bowl stacked on handle, no annotations.
    Compact,
    /// Fixed canvas with connectors, centerline and labels.
    #[default]
    Template,
}

impl PresentationMode {
    pub fn name(self) -> &'static str {
        match self {
            PresentationMode::Compact => "compact",
            PresentationMode::Template => "template",
        }
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresentationMode {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(PresentationMode::Compact),
            "template" => Ok(PresentationMode::Template),
            other => Err(SpecError::InvalidMode(other.to_string())),
        }
    }
}

/// Vertical layout shared by bowl and handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    /// The spoon's axis of symmetry.
    pub center_x: f64,
    /// Top of the outline's vertical budget.
    pub start_y: f64,
    /// Where the bowl meets the handle.
    pub bowl_top: f64,
    pub handle_top: f64,
    pub handle_bottom: f64,
    pub total_length: f64,
}

impl Layout {
    /// Center the outline vertically on the spec's canvas.
    pub fn centered(spec: &SpoonSpec) -> Self {
        let total_length = spec.total_length();
        let start_y = (spec.canvas_height - total_length) / 2.0;
        Self::from_start(spec.canvas_width / 2.0, start_y, spec)
    }

    /// Lay out from an explicit axis and top.
    pub fn from_start(center_x: f64, start_y: f64, spec: &SpoonSpec) -> Self {
        let bowl_top = start_y + spec.bowl_length;
        let handle_top = bowl_top;
        Self {
            center_x,
            start_y,
            bowl_top,
            handle_top,
            handle_bottom: handle_top + spec.handle_length,
            total_length: spec.total_length(),
        }
    }
}

/// The output of one compose call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    /// Canvas the primitives are positioned in.
    pub canvas: Size,
    pub mode: PresentationMode,
    pub layout: Layout,
    /// Primitives in draw order.
    pub primitives: Vec<Primitive>,
}

impl Composition {
    /// Union of all non-label primitive bounds.
    pub fn geometry_bounds(&self) -> Option<Rect> {
        geometry_bounds(&self.primitives)
    }

    /// Whether every non-label primitive lies inside the canvas.
    pub fn fits_canvas(&self) -> bool {
        let canvas = self.canvas.to_rect();
        self.geometry_bounds()
            .is_none_or(|b| canvas.union(b) == canvas)
    }

    /// Label texts in draw order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Builds spoon compositions with a fixed [`ComposerConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeComposer {
    config: ComposerConfig,
}

impl ShapeComposer {
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Compose the outline for `spec` in the given mode.
    ///
    /// Fails if any dimension is non-finite or non-positive. An outline that
    /// overflows the canvas is still produced (with a warning); nothing is
    /// clamped.
    pub fn compose(
        &self,
        spec: &SpoonSpec,
        mode: PresentationMode,
    ) -> Result<Composition, SpecError> {
        spec.validate()?;

        let composition = match mode {
            PresentationMode::Template => self.compose_template(spec),
            PresentationMode::Compact => self.compose_compact(spec),
        };

        if !composition.fits_canvas() {
            log::warn!(
                "Spoon outline exceeds the {}x{} canvas (total length {})",
                composition.canvas.width,
                composition.canvas.height,
                composition.layout.total_length
            );
        }
        log::debug!(
            "Composed {} primitives ({} mode, {} bowl, {} handle)",
            composition.primitives.len(),
            mode,
            spec.bowl_shape,
            spec.handle_shape
        );
        Ok(composition)
    }

    fn compose_template(&self, spec: &SpoonSpec) -> Composition {
        let layout = Layout::centered(spec);
        let mut primitives = Vec::with_capacity(9);

        primitives.push(bowl(spec, &layout, layout.bowl_top));
        primitives.extend(handle_rails(spec, &layout, self.config.curve_bow));
        primitives.extend(connectors(spec, &layout));
        primitives.push(Primitive::DashedLine {
            start: Point::new(layout.center_x, self.config.margin),
            end: Point::new(layout.center_x, layout.handle_bottom),
        });
        primitives.extend(dimension_labels(spec, &layout, self.config.label_gap));

        Composition {
            canvas: Size::new(spec.canvas_width, spec.canvas_height),
            mode: PresentationMode::Template,
            layout,
            primitives,
        }
    }

    fn compose_compact(&self, spec: &SpoonSpec) -> Composition {
        let margin = self.config.compact_margin;
        let canvas = Size::new(
            spec.bowl_width.max(spec.handle_width) + 2.0 * margin,
            spec.total_length() + margin + self.config.compact_bottom_margin,
        );
        let layout = Layout::from_start(canvas.width / 2.0, margin, spec);

        // Round bowls sit inside their bounding box so it touches the handle.
        let ellipse_y = layout.bowl_top - spec.bowl_length / 2.0;
        let mut primitives = Vec::with_capacity(3);
        primitives.push(bowl(spec, &layout, ellipse_y));
        primitives.extend(handle_rails(spec, &layout, self.config.curve_bow));

        Composition {
            canvas,
            mode: PresentationMode::Compact,
            layout,
            primitives,
        }
    }
}

/// Compose with the default configuration.
pub fn compose(spec: &SpoonSpec, mode: PresentationMode) -> Result<Composition, SpecError> {
    ShapeComposer::default().compose(spec, mode)
}

/// The bowl primitive. `ellipse_y` is the center height used by round bowls.
fn bowl(spec: &SpoonSpec, layout: &Layout, ellipse_y: f64) -> Primitive {
    let half = spec.bowl_width / 2.0;
    let cx = layout.center_x;
    match spec.bowl_shape {
        BowlShape::Round => Primitive::Ellipse {
            center: Point::new(cx, ellipse_y),
            radius_x: half,
            radius_y: spec.bowl_length / 2.0,
        },
        BowlShape::Pointed => Primitive::Polygon {
            points: vec![
                Point::new(cx - half, layout.bowl_top),
                Point::new(cx, layout.bowl_top - spec.bowl_length),
                Point::new(cx + half, layout.bowl_top),
            ],
        },
        BowlShape::Square => Primitive::Rectangle {
            origin: Point::new(cx - half, layout.bowl_top - spec.bowl_length),
            size: Size::new(spec.bowl_width, spec.bowl_length),
        },
    }
}

/// Left and right handle rails.
fn handle_rails(spec: &SpoonSpec, layout: &Layout, curve_bow: f64) -> [Primitive; 2] {
    let half = spec.handle_width / 2.0;
    let left = layout.center_x - half;
    let right = layout.center_x + half;
    let (top, bottom) = (layout.handle_top, layout.handle_bottom);

    match spec.handle_shape {
        HandleShape::Straight => [
            Primitive::Line {
                start: Point::new(left, top),
                end: Point::new(left, bottom),
            },
            Primitive::Line {
                start: Point::new(right, top),
                end: Point::new(right, bottom),
            },
        ],
        HandleShape::Curved => {
            let bow = spec.handle_width * curve_bow;
            let mid = (top + bottom) / 2.0;
            [
                Primitive::QuadraticPath {
                    start: Point::new(left, top),
                    control: Point::new(left - bow, mid),
                    end: Point::new(left, bottom),
                },
                Primitive::QuadraticPath {
                    start: Point::new(right, top),
                    control: Point::new(right + bow, mid),
                    end: Point::new(right, bottom),
                },
            ]
        }
        HandleShape::Tapered => {
            let inset = half / 2.0;
            [
                Primitive::Line {
                    start: Point::new(left, top),
                    end: Point::new(layout.center_x - inset, bottom),
                },
                Primitive::Line {
                    start: Point::new(right, top),
                    end: Point::new(layout.center_x + inset, bottom),
                },
            ]
        }
    }
}

/// Segments joining each rail top to the bowl edge at `bowl_top`.
fn connectors(spec: &SpoonSpec, layout: &Layout) -> [Primitive; 2] {
    let handle_half = spec.handle_width / 2.0;
    let bowl_half = spec.bowl_width / 2.0;
    let cx = layout.center_x;
    [
        Primitive::Line {
            start: Point::new(cx - handle_half, layout.handle_top),
            end: Point::new(cx - bowl_half, layout.bowl_top),
        },
        Primitive::Line {
            start: Point::new(cx + handle_half, layout.handle_top),
            end: Point::new(cx + bowl_half, layout.bowl_top),
        },
    ]
}

/// Total length, bowl width and handle width labels, right of their features.
fn dimension_labels(spec: &SpoonSpec, layout: &Layout, gap: f64) -> [Primitive; 3] {
    let cx = layout.center_x;
    let widest = spec.bowl_width.max(spec.handle_width) / 2.0;
    [
        Primitive::Label {
            position: Point::new(
                cx + widest + gap,
                (layout.start_y + layout.handle_bottom) / 2.0,
            ),
            text: format!("Total length: {} mm", format_mm(layout.total_length)),
        },
        Primitive::Label {
            position: Point::new(
                cx + spec.bowl_width / 2.0 + gap,
                layout.bowl_top - spec.bowl_length / 2.0,
            ),
            text: format!("Bowl width: {} mm", format_mm(spec.bowl_width)),
        },
        Primitive::Label {
            position: Point::new(
                cx + spec.handle_width / 2.0 + gap,
                layout.handle_top + spec.handle_length * 0.75,
            ),
            text: format!("Handle width: {} mm", format_mm(spec.handle_width)),
        },
    ]
}

/// Whole numbers without a fraction, everything else to one decimal.
fn format_mm(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::FormLimits;

    fn scenario() -> SpoonSpec {
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

    fn lines(prims: &[Primitive]) -> Vec<(Point, Point)> {
        prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Line { start, end } => Some((*start, *end)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_reference_scenario() {
        let comp = compose(&scenario(), PresentationMode::Template).unwrap();
        let layout = comp.layout;
        assert_eq!(layout.total_length, 260.0);
        assert_eq!(layout.start_y, 20.0);
        assert_eq!(layout.bowl_top, 100.0);
        assert_eq!(layout.handle_bottom, 280.0);

        assert_eq!(
            comp.primitives[0],
            Primitive::Ellipse {
                center: Point::new(100.0, 100.0),
                radius_x: 30.0,
                radius_y: 40.0,
            }
        );
        assert_eq!(
            comp.primitives[1],
            Primitive::Line { start: Point::new(90.0, 100.0), end: Point::new(90.0, 280.0) }
        );
        assert_eq!(
            comp.primitives[2],
            Primitive::Line { start: Point::new(110.0, 100.0), end: Point::new(110.0, 280.0) }
        );
    }

    #[test]
    fn test_round_bowl_exact_center_and_radius() {
        let spec = SpoonSpec { bowl_width: 73.0, bowl_length: 91.0, ..scenario() };
        let comp = compose(&spec, PresentationMode::Template).unwrap();
        let start_y = (spec.canvas_height - (spec.bowl_length + spec.handle_length)) / 2.0;
        match &comp.primitives[0] {
            Primitive::Ellipse { center, radius_x, .. } => {
                assert_eq!(center.y, start_y + spec.bowl_length);
                assert_eq!(*radius_x, spec.bowl_width / 2.0);
            }
            other => panic!("expected ellipse, got {other:?}"),
        }
    }

    #[test]
    fn test_pointed_bowl_apex() {
        let spec = SpoonSpec { bowl_shape: BowlShape::Pointed, ..scenario() };
        let comp = compose(&spec, PresentationMode::Template).unwrap();
        let Primitive::Polygon { points } = &comp.primitives[0] else {
            panic!("expected polygon");
        };
        assert_eq!(points.len(), 3);
        let apex = points[1];
        assert_eq!(apex.x, comp.layout.center_x);
        assert_eq!(apex.y, comp.layout.bowl_top - spec.bowl_length);
        assert_eq!(points[0], Point::new(70.0, 100.0));
        assert_eq!(points[2], Point::new(130.0, 100.0));
    }

    #[test]
    fn test_square_bowl_bottom_edge_at_bowl_top() {
        let spec = SpoonSpec { bowl_shape: BowlShape::Square, ..scenario() };
        let comp = compose(&spec, PresentationMode::Template).unwrap();
        let bounds = comp.primitives[0].bounds();
        assert_eq!(bounds, Rect::new(70.0, 20.0, 130.0, 100.0));
    }

    #[test]
    fn test_tapered_handle_halves_spacing() {
        let spec = SpoonSpec { handle_shape: HandleShape::Tapered, ..scenario() };
        let comp = compose(&spec, PresentationMode::Template).unwrap();
        let rails = &lines(&comp.primitives)[..2];
        let top_spacing = rails[1].0.x - rails[0].0.x;
        let bottom_spacing = rails[1].1.x - rails[0].1.x;
        assert_eq!(top_spacing, 20.0);
        assert_eq!(bottom_spacing, top_spacing / 2.0);
        assert_eq!(rails[0].1.y, comp.layout.handle_bottom);
    }

    #[test]
    fn test_curved_handle_bows_outward() {
        let spec = SpoonSpec { handle_shape: HandleShape::Curved, ..scenario() };
        let comp = compose(&spec, PresentationMode::Template).unwrap();
        let curves: Vec<_> = comp
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::QuadraticPath { start, control, end } => Some((*start, *control, *end)),
                _ => None,
            })
            .collect();
        assert_eq!(curves.len(), 2);

        let (l_start, l_ctrl, l_end) = curves[0];
        let (r_start, r_ctrl, _) = curves[1];
        assert_eq!(l_start, Point::new(90.0, 100.0));
        assert_eq!(l_end, Point::new(90.0, 280.0));
        assert!((l_ctrl.x - 86.0).abs() < 1e-9);
        assert_eq!(l_ctrl.y, 190.0);
        assert!((r_ctrl.x - r_start.x - 4.0).abs() < 1e-9);
        assert_eq!(r_ctrl.y, 190.0);
    }

    #[test]
    fn test_template_annotations() {
        let comp = compose(&scenario(), PresentationMode::Template).unwrap();
        let kinds: Vec<_> = comp.primitives.iter().map(Primitive::kind).collect();
        assert_eq!(
            kinds,
            vec!["ellipse", "line", "line", "line", "line", "dashed_line", "label", "label", "label"]
        );

        // Connectors end at the bowl edges.
        let all_lines = lines(&comp.primitives);
        assert_eq!(all_lines[2], (Point::new(90.0, 100.0), Point::new(70.0, 100.0)));
        assert_eq!(all_lines[3], (Point::new(110.0, 100.0), Point::new(130.0, 100.0)));

        assert_eq!(
            comp.primitives[5],
            Primitive::DashedLine { start: Point::new(100.0, 10.0), end: Point::new(100.0, 280.0) }
        );

        let labels: Vec<_> = comp.labels().collect();
        assert_eq!(
            labels,
            vec!["Total length: 260 mm", "Bowl width: 60 mm", "Handle width: 20 mm"]
        );
    }

    #[test]
    fn test_compact_stacks_bowl_on_handle() {
        let spec = SpoonSpec { canvas_width: 1.0, canvas_height: 1.0, ..scenario() };
        let comp = compose(&spec, PresentationMode::Compact).unwrap();

        assert_eq!(comp.canvas, Size::new(100.0, 320.0));
        assert_eq!(comp.primitives.len(), 3);
        assert!(comp.labels().next().is_none());

        let bowl = comp.primitives[0].bounds();
        assert_eq!(bowl.y0, 20.0);
        assert_eq!(bowl.y1, comp.layout.handle_top);
        assert_eq!(
            comp.primitives[1],
            Primitive::Line { start: Point::new(40.0, 100.0), end: Point::new(40.0, 280.0) }
        );
        assert!(comp.fits_canvas());
    }

    #[test]
    fn test_compact_bowl_boxes_touch_handle_for_every_shape() {
        for bowl_shape in BowlShape::ALL {
            let spec = SpoonSpec { bowl_shape, ..scenario() };
            let comp = compose(&spec, PresentationMode::Compact).unwrap();
            assert_eq!(comp.primitives[0].bounds().y1, comp.layout.handle_top, "{bowl_shape}");
        }
    }

    #[test]
    fn test_fits_canvas_for_all_variants_within_limits() {
        let limits = FormLimits::default();
        let base = limits.default_spec();
        for bowl_shape in BowlShape::ALL {
            for handle_shape in HandleShape::ALL {
                for mode in [PresentationMode::Template, PresentationMode::Compact] {
                    let spec = SpoonSpec { bowl_shape, handle_shape, ..base };
                    assert!(spec.fits_canvas(10.0));
                    let comp = compose(&spec, mode).unwrap();
                    assert!(!comp.primitives.is_empty());
                    assert!(comp.fits_canvas(), "{bowl_shape}/{handle_shape}/{mode}");
                }
            }
        }
    }

    #[test]
    fn test_fits_canvas_at_slider_extremes() {
        let limits = FormLimits::default();
        let config = ComposerConfig::default();
        let composer = ShapeComposer::new(config);

        let mut checked = 0;
        // Each bit picks the min or max of one slider.
        for bits in 0..64u32 {
            let pick = |i: u32, r: crate::limits::SliderRange| if bits >> i & 1 == 0 { r.min } else { r.max };
            for bowl_shape in BowlShape::ALL {
                for handle_shape in HandleShape::ALL {
                    let spec = SpoonSpec {
                        canvas_width: pick(0, limits.canvas_width),
                        canvas_height: pick(1, limits.canvas_height),
                        bowl_shape,
                        bowl_width: pick(2, limits.bowl_width),
                        bowl_length: pick(3, limits.bowl_length),
                        handle_shape,
                        handle_width: pick(4, limits.handle_width),
                        handle_length: pick(5, limits.handle_length),
                    };
                    if !spec.fits_canvas(config.margin) {
                        continue;
                    }
                    for mode in [PresentationMode::Template, PresentationMode::Compact] {
                        let comp = composer.compose(&spec, mode).unwrap();
                        assert!(comp.fits_canvas(), "{spec:?} {mode}");
                        checked += 1;
                    }
                }
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_overflow_is_not_clamped() {
        let spec = SpoonSpec { canvas_height: 200.0, ..scenario() };
        let comp = compose(&spec, PresentationMode::Template).unwrap();
        assert!(!comp.fits_canvas());
        assert_eq!(comp.layout.start_y, -30.0);
    }

    #[test]
    fn test_deterministic() {
        let spec = SpoonSpec { handle_shape: HandleShape::Curved, ..scenario() };
        for mode in [PresentationMode::Template, PresentationMode::Compact] {
            let a = compose(&spec, mode).unwrap();
            let b = compose(&spec, mode).unwrap();
            assert_eq!(a, b);
            let bits = |c: &Composition| serde_json::to_string(&c.primitives).unwrap();
            assert_eq!(bits(&a), bits(&b));
        }
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let spec = SpoonSpec { handle_width: -5.0, ..scenario() };
        assert!(matches!(
            compose(&spec, PresentationMode::Compact),
            Err(SpecError::NonPositive { field: "handle_width", .. })
        ));
    }

    #[test]
    fn test_custom_curve_bow() {
        let composer = ShapeComposer::new(ComposerConfig { curve_bow: 0.5, ..Default::default() });
        let spec = SpoonSpec { handle_shape: HandleShape::Curved, ..scenario() };
        let comp = composer.compose(&spec, PresentationMode::Compact).unwrap();
        let Primitive::QuadraticPath { start, control, .. } = &comp.primitives[1] else {
            panic!("expected curve");
        };
        assert_eq!(start.x - control.x, 10.0);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Compact".parse::<PresentationMode>().unwrap(), PresentationMode::Compact);
        assert_eq!("template".parse::<PresentationMode>().unwrap(), PresentationMode::Template);
        assert!("poster".parse::<PresentationMode>().is_err());
    }

    #[test]
    fn test_format_mm() {
        assert_eq!(format_mm(260.0), "260");
        assert_eq!(format_mm(12.5), "12.5");
    }
}
