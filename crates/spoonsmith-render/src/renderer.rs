//! Renderer trait abstraction.

use peniko::Color;
use spoonsmith_core::{Composition, SpecError};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error(transparent)]
    Spec(#[from] SpecError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Everything a renderer needs for one document.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// The composed outline.
    pub composition: &'a Composition,
    /// Pixels per canvas unit (raster output only).
    pub scale: f64,
    /// Background color.
    pub background_color: Color,
    /// Outline and label color.
    pub stroke_color: Color,
    /// Outline stroke width in canvas units.
    pub stroke_width: f64,
    /// Dash and gap length for dashed guides.
    pub dash_pattern: [f64; 2],
    /// Stroke width of dashed guides.
    pub guide_width: f64,
    /// Label font size in canvas units.
    pub font_size: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context with black-on-white defaults.
    pub fn new(composition: &'a Composition) -> Self {
        Self {
            composition,
            scale: 1.0,
            background_color: Color::WHITE,
            stroke_color: Color::BLACK,
            stroke_width: 2.0,
            dash_pattern: [6.0, 4.0],
            guide_width: 1.0,
            font_size: 12.0,
        }
    }

    /// Set the raster scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the stroke color.
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke_color = color;
        self.stroke_width = width;
        self
    }

    /// Set the dash pattern used for guides.
    pub fn with_dashes(mut self, dash: f64, gap: f64) -> Self {
        self.dash_pattern = [dash, gap];
        self
    }

    /// Set the guide stroke width.
    pub fn with_guide_width(mut self, width: f64) -> Self {
        self.guide_width = width;
        self
    }
}

/// A backend that turns a composition into a finished document.
pub trait Renderer {
    /// MIME type of the produced document.
    fn media_type(&self) -> &'static str;

    /// Suggested download file name.
    fn file_name(&self) -> &'static str;

    /// Render the whole document to bytes.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<Vec<u8>>;
}
