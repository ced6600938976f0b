//! Command-line arguments and the render run.

use clap::Parser;
use spoonsmith_core::{
    BowlShape, ComposerConfig, FormLimits, HandleShape, PresentationMode, ShapeComposer, SpecError,
    SpoonSpec,
};
use spoonsmith_render::{OutputFormat, RenderContext, RendererError, export_to_path, read_back};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render a parametric spoon outline to PNG or SVG
#[derive(Parser, Debug)]
#[command(name = "spoonsmith")]
#[command(about = "Render a parametric spoon outline to PNG or SVG")]
#[command(version)]
pub struct Args {
    /// Bowl shape: Round, Pointed or Square
    #[arg(long)]
    pub bowl: Option<String>,

    /// Handle shape: Straight, Curved or Tapered
    #[arg(long)]
    pub handle: Option<String>,

    #[arg(long)]
    pub bowl_width: Option<f64>,

    #[arg(long)]
    pub bowl_length: Option<f64>,

    #[arg(long)]
    pub handle_width: Option<f64>,

    #[arg(long)]
    pub handle_length: Option<f64>,

    /// Canvas width (template mode only)
    #[arg(long)]
    pub canvas_width: Option<f64>,

    /// Canvas height (template mode only)
    #[arg(long)]
    pub canvas_height: Option<f64>,

    /// compact or template; defaults to compact for PNG, template for SVG
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "png")]
    pub format: OutputFormat,

    /// Pixels per unit for PNG output (0.25 to 4)
    #[arg(long, default_value = "1.0")]
    pub scale: f64,

    /// Composer config JSON
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file; defaults to the format's download name
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl Args {
    /// Build the spec, filling gaps with slider defaults.
    pub fn spec(&self, limits: &FormLimits) -> Result<SpoonSpec, SpecError> {
        let spec = SpoonSpec {
            canvas_width: self.canvas_width.unwrap_or(limits.canvas_width.default),
            canvas_height: self.canvas_height.unwrap_or(limits.canvas_height.default),
            bowl_shape: self.bowl.as_deref().map_or(Ok(BowlShape::default()), |s| s.parse())?,
            bowl_width: self.bowl_width.unwrap_or(limits.bowl_width.default),
            bowl_length: self.bowl_length.unwrap_or(limits.bowl_length.default),
            handle_shape: self.handle.as_deref().map_or(Ok(HandleShape::default()), |s| s.parse())?,
            handle_width: self.handle_width.unwrap_or(limits.handle_width.default),
            handle_length: self.handle_length.unwrap_or(limits.handle_length.default),
        };
        limits.check(&spec)?;
        Ok(spec)
    }

    pub fn mode(&self) -> Result<PresentationMode, SpecError> {
        self.mode
            .as_deref()
            .map_or(Ok(self.format.default_mode()), |s| s.parse())
    }

    fn composer_config(&self) -> Result<ComposerConfig, AppError> {
        let Some(path) = &self.config else {
            return Ok(ComposerConfig::default());
        };
        let json = std::fs::read_to_string(path)
            .map_err(|source| AppError::ReadConfig { path: path.clone(), source })?;
        log::debug!("Loaded composer config from {}", path.display());
        Ok(ComposerConfig::from_json(&json)?)
    }
}

/// A finished render.
#[derive(Debug)]
pub struct Rendered {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Compose, render and write the document, then read it back.
pub fn run(args: &Args) -> Result<Rendered, AppError> {
    let limits = FormLimits::default();
    let spec = args.spec(&limits)?;
    let mode = args.mode()?;
    args.format.check_mode(mode)?;
    limits.check_scale(args.scale)?;
    let composer = ShapeComposer::new(args.composer_config()?);

    let composition = composer.compose(&spec, mode)?;
    let ctx = RenderContext::new(&composition).with_scale(args.scale);
    let mut renderer = args.format.renderer();
    let path = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(renderer.file_name()));

    export_to_path(renderer.as_mut(), &ctx, &path)?;
    let bytes = read_back(&path)?;
    log::info!(
        "{} {} spoon ({} bowl, {} handle): {} bytes in {}",
        mode,
        args.format,
        spec.bowl_shape,
        spec.handle_shape,
        bytes.len(),
        path.display()
    );
    Ok(Rendered { path, bytes })
}
