//! Writing rendered documents to an explicit destination.

use crate::raster::RasterRenderer;
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use crate::svg::SvgRenderer;
use spoonsmith_core::{PresentationMode, SpecError};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    /// A fresh renderer for this format.
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Png => Box::new(RasterRenderer::new()),
            OutputFormat::Svg => Box::new(SvgRenderer::new()),
        }
    }

    /// The composition this format is usually paired with.
    pub fn default_mode(self) -> PresentationMode {
        match self {
            OutputFormat::Png => PresentationMode::Compact,
            OutputFormat::Svg => PresentationMode::Template,
        }
    }

    /// Raster output has no text, so it cannot carry an annotated template.
    pub fn check_mode(self, mode: PresentationMode) -> Result<(), SpecError> {
        match (self, mode) {
            (OutputFormat::Png, PresentationMode::Template) => Err(SpecError::UnsupportedMode {
                format: self.extension(),
                mode: mode.name(),
            }),
            _ => Ok(()),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(format!("Unknown output format: {other}")),
        }
    }
}

/// Where a rendered document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to this file, replacing it.
    Path(PathBuf),
    /// Keep the bytes in memory.
    Memory,
}

/// Outcome of [`export_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exported {
    File { path: PathBuf, bytes_written: usize },
    Memory(Vec<u8>),
}

/// Render and write the document to `sink`. Returns the number of bytes written.
pub fn export<W: Write + ?Sized>(
    renderer: &mut dyn Renderer,
    ctx: &RenderContext,
    sink: &mut W,
) -> RenderResult<usize> {
    let bytes = renderer.render(ctx)?;
    sink.write_all(&bytes)
        .and_then(|()| sink.flush())
        .map_err(|e| RendererError::Io(format!("Failed to write document: {e}")))?;
    Ok(bytes.len())
}

/// Render straight into a file at `path`.
///
/// The file handle is closed before returning, on success and on error.
pub fn export_to_path(
    renderer: &mut dyn Renderer,
    ctx: &RenderContext,
    path: &Path,
) -> RenderResult<usize> {
    let bytes = renderer.render(ctx)?;
    let file = File::create(path)
        .map_err(|e| RendererError::Io(format!("Failed to create {}: {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| RendererError::Io(format!("Failed to write {}: {e}", path.display())))?;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes.len())
}

/// Render to the given target.
pub fn export_to(
    renderer: &mut dyn Renderer,
    ctx: &RenderContext,
    target: OutputTarget,
) -> RenderResult<Exported> {
    match target {
        OutputTarget::Path(path) => {
            let bytes_written = export_to_path(renderer, ctx, &path)?;
            Ok(Exported::File { path, bytes_written })
        }
        OutputTarget::Memory => renderer.render(ctx).map(Exported::Memory),
    }
}

/// Re-read a written document for display or download.
pub fn read_back(path: &Path) -> RenderResult<Vec<u8>> {
    fs::read(path).map_err(|e| RendererError::Io(format!("Failed to read {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoonsmith_core::{FormLimits, compose};
    use tempfile::tempdir;

    #[test]
    fn test_export_to_path_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spoon_template.svg");
        let spec = FormLimits::default().default_spec();
        let comp = compose(&spec, PresentationMode::Template).unwrap();
        let ctx = RenderContext::new(&comp);

        let mut renderer = OutputFormat::Svg.renderer();
        let written = export_to_path(renderer.as_mut(), &ctx, &path).unwrap();
        let bytes = read_back(&path).unwrap();
        assert_eq!(bytes.len(), written);
        assert!(String::from_utf8(bytes).unwrap().contains("<svg"));
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.svg");
        fs::write(&path, "stale contents that are longer than nothing at all".repeat(200)).unwrap();

        let comp = compose(&FormLimits::default().default_spec(), PresentationMode::Compact).unwrap();
        let written =
            export_to_path(&mut SvgRenderer::new(), &RenderContext::new(&comp), &path).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len() as usize, written);
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("spoon.png");
        let comp = compose(&FormLimits::default().default_spec(), PresentationMode::Compact).unwrap();

        let err = export_to_path(&mut RasterRenderer::new(), &RenderContext::new(&comp), &path)
            .unwrap_err();
        assert!(matches!(err, RendererError::Io(msg) if msg.contains("spoon.png")));
        assert!(matches!(read_back(&path), Err(RendererError::Io(_))));
    }

    #[test]
    fn test_export_to_memory_and_sink() {
        let comp = compose(&FormLimits::default().default_spec(), PresentationMode::Compact).unwrap();
        let ctx = RenderContext::new(&comp);

        let Exported::Memory(bytes) =
            export_to(&mut RasterRenderer::new(), &ctx, OutputTarget::Memory).unwrap()
        else {
            panic!("expected in-memory output");
        };
        let mut sink = Vec::new();
        let n = export(&mut RasterRenderer::new(), &ctx, &mut sink).unwrap();
        assert_eq!(n, sink.len());
        assert_eq!(bytes, sink);
    }

    #[test]
    fn test_export_to_file_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom_spoon_design.png");
        let comp = compose(&FormLimits::default().default_spec(), PresentationMode::Compact).unwrap();

        let result =
            export_to(&mut RasterRenderer::new(), &RenderContext::new(&comp), OutputTarget::Path(path.clone()))
                .unwrap();
        let Exported::File { path: written_path, bytes_written } = result else {
            panic!("expected file output");
        };
        assert_eq!(written_path, path);
        assert_eq!(read_back(&path).unwrap().len(), bytes_written);
    }

    #[test]
    fn test_format_parse_and_defaults() {
        assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert!("pdf".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Png.default_mode(), PresentationMode::Compact);
        assert_eq!(OutputFormat::Svg.renderer().file_name(), "spoon_template.svg");
        assert_eq!(OutputFormat::Png.renderer().media_type(), "image/png");
    }

    #[test]
    fn test_png_rejects_template_mode() {
        assert_eq!(
            OutputFormat::Png.check_mode(PresentationMode::Template),
            Err(SpecError::UnsupportedMode { format: "png", mode: "template" })
        );
        assert!(OutputFormat::Png.check_mode(PresentationMode::Compact).is_ok());
        assert!(OutputFormat::Svg.check_mode(PresentationMode::Template).is_ok());
        assert!(OutputFormat::Svg.check_mode(PresentationMode::Compact).is_ok());
    }
}
