//! Drawing primitives produced by the composer.

use kurbo::{BezPath, Ellipse, ParamCurveExtrema, Point, QuadBez, Rect, Shape as KurboShape, Size};
use serde::{Deserialize, Serialize};

/// Flattening tolerance used when converting curved primitives to paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// A single outline element.
///
/// Renderers draw primitives in order; later ones end up on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Axis-aligned ellipse.
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
    },
    /// Closed polygon.
    Polygon { points: Vec<Point> },
    /// Axis-aligned rectangle from its top-left corner.
    Rectangle { origin: Point, size: Size },
    /// Solid line segment.
    Line { start: Point, end: Point },
    /// Quadratic Bezier curve.
    QuadraticPath {
        start: Point,
        control: Point,
        end: Point,
    },
    /// Dashed line segment (guides only).
    DashedLine { start: Point, end: Point },
    /// Text anchored at its baseline start.
    Label { position: Point, text: String },
}

impl Primitive {
    /// Short element name, used in logs and by the SVG writer's tests.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Ellipse { .. } => "ellipse",
            Primitive::Polygon { .. } => "polygon",
            Primitive::Rectangle { .. } => "rectangle",
            Primitive::Line { .. } => "line",
            Primitive::QuadraticPath { .. } => "quadratic_path",
            Primitive::DashedLine { .. } => "dashed_line",
            Primitive::Label { .. } => "label",
        }
    }

    /// Whether this primitive is text rather than geometry.
    pub fn is_label(&self) -> bool {
        matches!(self, Primitive::Label { .. })
    }

    /// Bounding box in canvas coordinates.
    ///
    /// Labels have no measured extent here; they report a zero-size box at
    /// their anchor.
    pub fn bounds(&self) -> Rect {
        match self {
            Primitive::Ellipse {
                center,
                radius_x,
                radius_y,
            } => Rect::new(
                center.x - radius_x,
                center.y - radius_y,
                center.x + radius_x,
                center.y + radius_y,
            ),
            Primitive::Polygon { points } => points_bounds(points),
            Primitive::Rectangle { origin, size } => Rect::from_origin_size(*origin, *size),
            Primitive::Line { start, end } | Primitive::DashedLine { start, end } => {
                Rect::from_points(*start, *end)
            }
            Primitive::QuadraticPath {
                start,
                control,
                end,
            } => ParamCurveExtrema::bounding_box(&QuadBez::new(*start, *control, *end)),
            Primitive::Label { position, .. } => Rect::from_points(*position, *position),
        }
    }

    /// Path representation for stroking. Labels produce an empty path.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        match self {
            Primitive::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                return Ellipse::new(*center, (*radius_x, *radius_y), 0.0).to_path(PATH_TOLERANCE);
            }
            Primitive::Polygon { points } => {
                if let Some((first, rest)) = points.split_first() {
                    path.move_to(*first);
                    for p in rest {
                        path.line_to(*p);
                    }
                    path.close_path();
                }
            }
            Primitive::Rectangle { origin, size } => {
                return Rect::from_origin_size(*origin, *size).to_path(PATH_TOLERANCE);
            }
            Primitive::Line { start, end } | Primitive::DashedLine { start, end } => {
                path.move_to(*start);
                path.line_to(*end);
            }
            Primitive::QuadraticPath {
                start,
                control,
                end,
            } => {
                path.move_to(*start);
                path.quad_to(*control, *end);
            }
            Primitive::Label { .. } => {}
        }
        path
    }
}

/// Smallest rectangle containing all points (zero rect for an empty slice).
fn points_bounds(points: &[Point]) -> Rect {
    let Some((first, rest)) = points.split_first() else {
        return Rect::ZERO;
    };
    rest.iter()
        .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p))
}

/// Union of the bounds of all non-label primitives.
pub fn geometry_bounds<'a>(primitives: impl IntoIterator<Item = &'a Primitive>) -> Option<Rect> {
    primitives
        .into_iter()
        .filter(|p| !p.is_label())
        .map(Primitive::bounds)
        .reduce(|a, b| a.union(b))
}
