//! CPU raster renderer (tiny-skia) with PNG output.

use crate::export::OutputFormat;
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use kurbo::{BezPath, PathEl};
use peniko::Color;
use spoonsmith_core::Primitive;
use tiny_skia::{LineCap, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

pub const PNG_FILE_NAME: &str = "custom_spoon_design.png";
pub const PNG_MEDIA_TYPE: &str = "image/png";

/// Largest pixmap the renderer will allocate.
pub const MAX_PIXELS: f64 = 64.0 * 1024.0 * 1024.0;

/// Result of raster rendering - straight (non-premultiplied) RGBA pixels.
#[derive(Debug)]
pub struct RasterImage {
    /// RGBA pixel data (4 bytes per pixel).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Rasterizes compositions into PNG images.
///
/// Only compact compositions are accepted. There is no font stack on this
/// path, so annotated templates are SVG only.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterRenderer;

impl RasterRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Rasterize into an RGBA buffer.
    pub fn rasterize(&self, ctx: &RenderContext) -> RenderResult<RasterImage> {
        OutputFormat::Png.check_mode(ctx.composition.mode)?;

        let canvas = ctx.composition.canvas;
        let width = (canvas.width * ctx.scale).ceil();
        let height = (canvas.height * ctx.scale).ceil();
        let invalid = || RendererError::InvalidCanvas {
            width: canvas.width * ctx.scale,
            height: canvas.height * ctx.scale,
        };
        if !(width >= 1.0 && height >= 1.0 && width * height <= MAX_PIXELS) {
            return Err(invalid());
        }
        let mut pixmap = Pixmap::new(width as u32, height as u32).ok_or_else(invalid)?;
        pixmap.fill(skia_color(ctx.background_color));

        let mut paint = Paint::default();
        paint.set_color(skia_color(ctx.stroke_color));
        paint.anti_alias = true;

        let solid = Stroke {
            width: ctx.stroke_width as f32,
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        let dashed = Stroke {
            width: ctx.guide_width as f32,
            dash: StrokeDash::new(
                vec![ctx.dash_pattern[0] as f32, ctx.dash_pattern[1] as f32],
                0.0,
            ),
            ..Stroke::default()
        };
        let transform = Transform::from_scale(ctx.scale as f32, ctx.scale as f32);

        for primitive in &ctx.composition.primitives {
            let stroke = match primitive {
                Primitive::Label { text, .. } => {
                    log::warn!("Raster output cannot draw label {text:?}");
                    continue;
                }
                Primitive::DashedLine { .. } => &dashed,
                _ => &solid,
            };
            let Some(path) = to_skia_path(&primitive.to_path()) else {
                log::warn!("Skipping degenerate {} primitive", primitive.kind());
                continue;
            };
            pixmap.stroke_path(&path, &paint, stroke, transform, None);
        }

        let rgba_data = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        Ok(RasterImage {
            rgba_data,
            width: pixmap.width(),
            height: pixmap.height(),
        })
    }
}

impl Renderer for RasterRenderer {
    fn media_type(&self) -> &'static str {
        PNG_MEDIA_TYPE
    }

    fn file_name(&self) -> &'static str {
        PNG_FILE_NAME
    }

    fn render(&mut self, ctx: &RenderContext) -> RenderResult<Vec<u8>> {
        let image = self.rasterize(ctx)?;
        encode_png(&image.rgba_data, image.width, image.height)
    }
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(format!("Failed to write PNG header: {e}")))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| RendererError::Encode(format!("Failed to write PNG data: {e}")))?;
    }
    Ok(png_data)
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let c = color.to_rgba8();
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Convert a kurbo path to a tiny-skia path. `None` for empty paths.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}
