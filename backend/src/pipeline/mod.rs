//! Normalization pipeline for uploaded logo images.
//!
//! Accepts vector (SVG), raster (PNG) and paged-document (PDF) sources
//! and guarantees that whatever renditions can be produced end up in
//! the per-format rendition directories. Raster production for vector
//! sources walks an ordered backend chain and tolerates total failure;
//! the paged-document path has no embedded fallback and is the only
//! fatal conversion.

pub mod optimize;
pub mod renderers;

use crate::config::AppConfig;
use crate::error::IngestError;
use common::model::logo::LogoFormat;
use log::{info, warn};
use renderers::{EmbeddedRenderer, ImageMagickRenderer, InkscapeRenderer, SvgRenderer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output width used when the caller does not supply a usable one.
pub const DEFAULT_RASTER_WIDTH: u32 = 512;

/// Source kind, decided from the uploaded file's extension before any
/// bytes are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Svg,
    Png,
    Pdf,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "svg" => Some(SourceFormat::Svg),
            "png" => Some(SourceFormat::Png),
            "pdf" => Some(SourceFormat::Pdf),
            _ => None,
        }
    }
}

/// Which renditions exist for an asset after an ingest, with sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenditionSet {
    pub has_svg: bool,
    pub has_png: bool,
    pub svg_size: i64,
    pub png_size: i64,
}

impl RenditionSet {
    /// Raster when present, else vector, else no servable rendition.
    pub fn primary_format(&self) -> Option<LogoFormat> {
        if self.has_png {
            Some(LogoFormat::Png)
        } else if self.has_svg {
            Some(LogoFormat::Svg)
        } else {
            None
        }
    }
}

/// Record of one successful raster attempt; logged, never persisted.
struct ConversionOutcome {
    backend: &'static str,
    produced_bytes: u64,
}

pub struct RenditionPipeline {
    svg_dir: PathBuf,
    png_dir: PathBuf,
    temp_dir: PathBuf,
    renderers: Vec<Box<dyn SvgRenderer>>,
}

impl RenditionPipeline {
    /// Production chain: ImageMagick, then Inkscape, then the embedded
    /// rasterizer as the always-available terminal backend.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_renderers(
            config,
            vec![
                Box::new(ImageMagickRenderer),
                Box::new(InkscapeRenderer),
                Box::new(EmbeddedRenderer),
            ],
        )
    }

    pub fn with_renderers(config: &AppConfig, renderers: Vec<Box<dyn SvgRenderer>>) -> Self {
        RenditionPipeline {
            svg_dir: config.svg_dir(),
            png_dir: config.png_dir(),
            temp_dir: config.temp_dir(),
            renderers,
        }
    }

    pub fn svg_path(&self, id: &str) -> PathBuf {
        self.svg_dir.join(format!("{}.svg", id))
    }

    pub fn png_path(&self, id: &str) -> PathBuf {
        self.png_dir.join(format!("{}.png", id))
    }

    /// Remove both renditions for an asset. Best-effort.
    pub fn remove_renditions(&self, id: &str) {
        let _ = fs::remove_file(self.svg_path(id));
        let _ = fs::remove_file(self.png_path(id));
    }

    /// Ingest one uploaded source for `id`. Prior renditions of either
    /// kind are replaced wholesale, but never before the new source is
    /// safely on disk. Blocking; run off the async core.
    pub fn ingest(
        &self,
        id: &str,
        data: &[u8],
        format: SourceFormat,
        width: u32,
    ) -> Result<RenditionSet, IngestError> {
        let width = if width == 0 { DEFAULT_RASTER_WIDTH } else { width };

        match format {
            SourceFormat::Png => self.ingest_png(id, data),
            SourceFormat::Svg => self.ingest_svg(id, data, width),
            SourceFormat::Pdf => self.ingest_pdf(id, data, width),
        }
    }

    fn ingest_png(&self, id: &str, data: &[u8]) -> Result<RenditionSet, IngestError> {
        // Full-replace semantics: the new raster is written right after.
        self.remove_renditions(id);

        let png_path = self.png_path(id);
        fs::write(&png_path, data)?;

        if let Err(e) = optimize::reencode_png(&png_path) {
            warn!("png re-encode for {} failed, keeping original bytes: {}", id, e);
        }

        Ok(RenditionSet {
            has_png: true,
            png_size: file_size(&png_path),
            ..Default::default()
        })
    }

    fn ingest_svg(&self, id: &str, data: &[u8], width: u32) -> Result<RenditionSet, IngestError> {
        // Full-replace semantics: the new vector is written right after.
        self.remove_renditions(id);

        let svg_path = self.svg_path(id);
        fs::write(&svg_path, data)?;

        let mut set = RenditionSet {
            has_svg: true,
            svg_size: file_size(&svg_path),
            ..Default::default()
        };

        let png_path = self.png_path(id);
        match self.rasterize(&svg_path, &png_path, width) {
            Some(outcome) => {
                info!(
                    "rasterized {} via {} ({} bytes)",
                    id, outcome.backend, outcome.produced_bytes
                );
                if let Err(e) = optimize::reencode_png(&png_path) {
                    warn!("png re-encode for {} failed, keeping original bytes: {}", id, e);
                }
                set.has_png = true;
                set.png_size = file_size(&png_path);
            }
            None => {
                // Vector alone is still a valid result.
                warn!("no raster backend produced output for {}", id);
            }
        }

        Ok(set)
    }

    fn ingest_pdf(&self, id: &str, data: &[u8], width: u32) -> Result<RenditionSet, IngestError> {
        // Spooled source is cleaned up on every exit path by the
        // tempfile guard.
        let mut spool = tempfile::Builder::new()
            .prefix(id)
            .suffix(".pdf")
            .tempfile_in(&self.temp_dir)?;
        spool.write_all(data)?;
        spool.flush()?;

        // Convert into a staging file first. This is the only fatal
        // path, and a failure must leave any prior renditions for the
        // id servable, so the replace happens after conversion.
        let staged = tempfile::Builder::new()
            .prefix(id)
            .suffix(".png")
            .tempfile_in(&self.temp_dir)?;
        if let Err(e) = renderers::convert_pdf_first_page(spool.path(), staged.path(), width) {
            return Err(IngestError::ConversionFailed(e.to_string()));
        }

        self.remove_renditions(id);
        let png_path = self.png_path(id);
        staged.persist(&png_path).map_err(|e| e.error)?;

        if let Err(e) = optimize::reencode_png(&png_path) {
            warn!("png re-encode for {} failed, keeping original bytes: {}", id, e);
        }

        Ok(RenditionSet {
            has_png: true,
            png_size: file_size(&png_path),
            ..Default::default()
        })
    }

    fn rasterize(&self, svg: &Path, png: &Path, width: u32) -> Option<ConversionOutcome> {
        for renderer in &self.renderers {
            match renderer.render(svg, png, width) {
                Ok(()) => {
                    return Some(ConversionOutcome {
                        backend: renderer.backend_id(),
                        produced_bytes: fs::metadata(png).map(|m| m.len()).unwrap_or(0),
                    });
                }
                Err(e) => {
                    warn!("raster backend {} failed: {}", renderer.backend_id(), e);
                    let _ = fs::remove_file(png);
                }
            }
        }
        None
    }
}

fn file_size(path: &Path) -> i64 {
    fs::metadata(path).map(|m| m.len() as i64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    struct AlwaysFails;

    impl SvgRenderer for AlwaysFails {
        fn backend_id(&self) -> &'static str {
            "always-fails"
        }

        fn render(&self, _svg: &Path, _png: &Path, _width: u32) -> Result<(), RenderError> {
            Err(RenderError::Unavailable)
        }
    }

    struct FixedPixel;

    impl SvgRenderer for FixedPixel {
        fn backend_id(&self) -> &'static str {
            "fixed-pixel"
        }

        fn render(&self, _svg: &Path, png: &Path, _width: u32) -> Result<(), RenderError> {
            RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]))
                .save(png)
                .map_err(|e| RenderError::Failed(e.to_string()))
        }
    }

    fn pipeline_in(
        dir: &Path,
        renderers: Vec<Box<dyn SvgRenderer>>,
    ) -> RenditionPipeline {
        let config = AppConfig::rooted_at(dir);
        config.ensure_dirs().unwrap();
        RenditionPipeline::with_renderers(&config, renderers)
    }

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(6, 6, Rgba([255, 255, 255, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
        <circle cx="5" cy="5" r="4" fill="#00ff00"/>
    </svg>"##;

    #[test]
    fn extension_decides_source_format() {
        assert_eq!(SourceFormat::from_extension(".SVG"), Some(SourceFormat::Svg));
        assert_eq!(SourceFormat::from_extension("png"), Some(SourceFormat::Png));
        assert_eq!(SourceFormat::from_extension(".pdf"), Some(SourceFormat::Pdf));
        assert_eq!(SourceFormat::from_extension(".gif"), None);
        assert_eq!(SourceFormat::from_extension(""), None);
    }

    #[test]
    fn raster_upload_yields_raster_rendition() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path(), vec![]);

        let set = pipeline
            .ingest("raster-id", &png_bytes(), SourceFormat::Png, 0)
            .unwrap();

        assert!(set.has_png);
        assert!(!set.has_svg);
        assert!(set.png_size > 0);
        assert_eq!(set.primary_format(), Some(LogoFormat::Png));
        assert!(pipeline.png_path("raster-id").exists());
    }

    #[test]
    fn vector_upload_survives_total_raster_failure() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path(), vec![Box::new(AlwaysFails)]);

        let set = pipeline
            .ingest("vec-id", SVG.as_bytes(), SourceFormat::Svg, 512)
            .unwrap();

        assert!(set.has_svg);
        assert!(!set.has_png);
        assert!(set.svg_size > 0);
        assert_eq!(set.primary_format(), Some(LogoFormat::Svg));
        assert!(!pipeline.png_path("vec-id").exists());
    }

    #[test]
    fn vector_upload_uses_first_working_backend() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(
            dir.path(),
            vec![Box::new(AlwaysFails), Box::new(FixedPixel)],
        );

        let set = pipeline
            .ingest("vec-id", SVG.as_bytes(), SourceFormat::Svg, 512)
            .unwrap();

        assert!(set.has_svg);
        assert!(set.has_png);
        assert!(set.png_size > 0);
        assert_eq!(set.primary_format(), Some(LogoFormat::Png));
    }

    #[test]
    fn embedded_backend_terminates_the_chain() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(
            dir.path(),
            vec![Box::new(AlwaysFails), Box::new(EmbeddedRenderer)],
        );

        let set = pipeline
            .ingest("vec-id", SVG.as_bytes(), SourceFormat::Svg, 64)
            .unwrap();

        assert!(set.has_png);
        let img = image::open(pipeline.png_path("vec-id")).unwrap();
        assert_eq!(img.width(), 64);
    }

    #[test]
    fn paged_document_without_converter_is_fatal_and_leaves_no_spool() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path(), vec![]);

        let result = pipeline.ingest("doc-id", b"%PDF-1.4 garbage", SourceFormat::Pdf, 512);
        assert!(matches!(result, Err(IngestError::ConversionFailed(_))));

        let config = AppConfig::rooted_at(dir.path());
        let leftovers: Vec<_> = fs::read_dir(config.temp_dir()).unwrap().collect();
        assert!(leftovers.is_empty());
        assert!(!pipeline.png_path("doc-id").exists());
    }

    #[test]
    fn failed_paged_reingest_keeps_prior_renditions() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path(), vec![Box::new(FixedPixel)]);

        let first = pipeline
            .ingest("club-id", SVG.as_bytes(), SourceFormat::Svg, 512)
            .unwrap();
        assert!(first.has_svg && first.has_png);

        let result = pipeline.ingest("club-id", b"%PDF-1.4 garbage", SourceFormat::Pdf, 512);
        assert!(matches!(result, Err(IngestError::ConversionFailed(_))));

        // The failing conversion must not have touched the stored files.
        assert!(pipeline.svg_path("club-id").exists());
        assert!(pipeline.png_path("club-id").exists());
    }

    #[test]
    fn reingest_fully_replaces_prior_renditions() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path(), vec![Box::new(FixedPixel)]);

        let first = pipeline
            .ingest("club-id", SVG.as_bytes(), SourceFormat::Svg, 512)
            .unwrap();
        assert!(first.has_svg && first.has_png);

        let second = pipeline
            .ingest("club-id", &png_bytes(), SourceFormat::Png, 512)
            .unwrap();
        assert!(second.has_png);
        assert!(!second.has_svg);
        assert!(!pipeline.svg_path("club-id").exists());
        assert!(pipeline.png_path("club-id").exists());
    }
}
