//! Spoonsmith Render Library
//!
//! Turns composed spoon outlines into SVG documents and PNG images, and
//! writes them wherever the caller asks.

pub mod export;
mod raster;
mod renderer;
mod svg;

pub use export::{Exported, OutputFormat, OutputTarget, export, export_to, export_to_path, read_back};
pub use raster::{PNG_FILE_NAME, PNG_MEDIA_TYPE, RasterImage, RasterRenderer, encode_png};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use svg::{SVG_FILE_NAME, SVG_MEDIA_TYPE, SvgRenderer};
