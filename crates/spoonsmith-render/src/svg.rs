//! SVG document writer.

use crate::renderer::{RenderContext, RenderResult, Renderer};
use kurbo::Point;
use peniko::Color;
use spoonsmith_core::Primitive;
use std::fmt::Write;

pub const SVG_FILE_NAME: &str = "spoon_template.svg";
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// Writes a standalone SVG document, one element per primitive.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgRenderer;

impl SvgRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render to an SVG string.
    pub fn render_string(&self, ctx: &RenderContext) -> String {
        let canvas = ctx.composition.canvas;
        let stroke = svg_color(ctx.stroke_color);
        let (w, h) = (canvas.width, canvas.height);

        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
        );
        let _ = writeln!(
            svg,
            "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            svg_color(ctx.background_color)
        );
        let _ = writeln!(
            svg,
            "  <g fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{}\" stroke-linecap=\"round\">",
            ctx.stroke_width
        );

        for primitive in &ctx.composition.primitives {
            svg.push_str("    ");
            write_primitive(&mut svg, primitive, ctx, &stroke);
            svg.push('\n');
        }

        svg.push_str("  </g>\n</svg>\n");
        svg
    }
}

impl Renderer for SvgRenderer {
    fn media_type(&self) -> &'static str {
        SVG_MEDIA_TYPE
    }

    fn file_name(&self) -> &'static str {
        SVG_FILE_NAME
    }

    fn render(&mut self, ctx: &RenderContext) -> RenderResult<Vec<u8>> {
        Ok(self.render_string(ctx).into_bytes())
    }
}

fn write_primitive(svg: &mut String, primitive: &Primitive, ctx: &RenderContext, stroke: &str) {
    let _ = match primitive {
        Primitive::Ellipse {
            center,
            radius_x,
            radius_y,
        } => write!(
            svg,
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{radius_x}\" ry=\"{radius_y}\"/>",
            center.x, center.y
        ),
        Primitive::Polygon { points } => {
            let pts: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
            write!(svg, "<polygon points=\"{}\"/>", pts.join(" "))
        }
        Primitive::Rectangle { origin, size } => write!(
            svg,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>",
            origin.x, origin.y, size.width, size.height
        ),
        Primitive::Line { start, end } => {
            write!(svg, "<line {}/>", line_attrs(*start, *end))
        }
        Primitive::QuadraticPath {
            start,
            control,
            end,
        } => write!(
            svg,
            "<path d=\"M {} {} Q {} {} {} {}\"/>",
            start.x, start.y, control.x, control.y, end.x, end.y
        ),
        Primitive::DashedLine { start, end } => write!(
            svg,
            "<line {} stroke-dasharray=\"{} {}\" stroke-width=\"{}\"/>",
            line_attrs(*start, *end),
            ctx.dash_pattern[0],
            ctx.dash_pattern[1],
            ctx.guide_width
        ),
        Primitive::Label { position, text } => write!(
            svg,
            "<text x=\"{}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{}\" fill=\"{stroke}\" stroke=\"none\">{}</text>",
            position.x,
            position.y,
            ctx.font_size,
            escape_xml(text)
        ),
    };
}

fn line_attrs(start: Point, end: Point) -> String {
    format!(
        "x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
        start.x, start.y, end.x, end.y
    )
}

/// Hex for opaque colors, `rgba()` otherwise.
fn svg_color(color: Color) -> String {
    let c = color.to_rgba8();
    if c.a == 255 {
        format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
    } else {
        format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, c.a as f64 / 255.0)
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
