//! Raster backends for vector sources, tried in priority order.
//!
//! The two subprocess backends are optional capabilities of the host;
//! a missing executable or a non-zero exit is a normal miss, reported
//! as a `RenderError` and absorbed by the pipeline. The embedded
//! backend has no external dependency and terminates the chain.

use crate::error::RenderError;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

pub trait SvgRenderer: Send + Sync {
    /// Short identifier used in diagnostics.
    fn backend_id(&self) -> &'static str;

    /// Rasterize `svg` into `png` at `width` pixels wide.
    fn render(&self, svg: &Path, png: &Path, width: u32) -> Result<(), RenderError>;
}

fn run(mut cmd: Command) -> Result<(), RenderError> {
    let output = match cmd.output() {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(RenderError::Unavailable),
        Err(e) => return Err(RenderError::Io(e)),
    };
    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(RenderError::Failed(format!(
            "exit {:?}: {}",
            output.status.code(),
            stderr.trim()
        )))
    }
}

/// ImageMagick `convert`, rendering with a transparent background.
pub struct ImageMagickRenderer;

impl SvgRenderer for ImageMagickRenderer {
    fn backend_id(&self) -> &'static str {
        "imagemagick"
    }

    fn render(&self, svg: &Path, png: &Path, width: u32) -> Result<(), RenderError> {
        let mut cmd = Command::new("convert");
        cmd.arg("-background")
            .arg("none")
            .arg("-density")
            .arg("300")
            .arg("-resize")
            .arg(format!("{}x{}", width, width))
            .arg(svg)
            .arg(png);
        run(cmd)
    }
}

/// Inkscape's command-line export.
pub struct InkscapeRenderer;

impl SvgRenderer for InkscapeRenderer {
    fn backend_id(&self) -> &'static str {
        "inkscape"
    }

    fn render(&self, svg: &Path, png: &Path, width: u32) -> Result<(), RenderError> {
        let mut cmd = Command::new("inkscape");
        cmd.arg("--export-type=png")
            .arg(format!("--export-filename={}", png.display()))
            .arg(format!("--export-width={}", width))
            .arg(svg);
        run(cmd)
    }
}

/// In-process rasterizer. Parses the document, derives the output height
/// from the view-box aspect ratio, and renders without any external
/// process. Terminal fallback of the chain.
pub struct EmbeddedRenderer;

impl SvgRenderer for EmbeddedRenderer {
    fn backend_id(&self) -> &'static str {
        "embedded"
    }

    fn render(&self, svg: &Path, png: &Path, width: u32) -> Result<(), RenderError> {
        let data = std::fs::read(svg)?;
        let tree = resvg::usvg::Tree::from_data(&data, &resvg::usvg::Options::default())
            .map_err(|e| RenderError::Parse(e.to_string()))?;

        let size = tree.size();
        let width = if width == 0 { 512 } else { width };
        let height = ((width as f32) * (size.height() / size.width()))
            .round()
            .max(1.0) as u32;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| RenderError::Parse("degenerate output size".to_string()))?;
        let transform = resvg::tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        write_rgba_png(png, pixmap.data(), width, height)?;
        Ok(())
    }
}

/// Rasterize the first page of a paged document via ImageMagick, which
/// handles both page selection and decoding in one step. There is no
/// embedded fallback for this kind: a missing converter is fatal to the
/// caller.
pub fn convert_pdf_first_page(pdf: &Path, png: &Path, width: u32) -> Result<(), RenderError> {
    let mut cmd = Command::new("convert");
    cmd.arg("-background")
        .arg("none")
        .arg("-density")
        .arg("300")
        .arg("-resize")
        .arg(format!("{}x{}", width, width))
        .arg(format!("{}[0]", pdf.display()))
        .arg(png);
    run(cmd)
}

/// Encode raw RGBA pixels as a PNG file.
fn write_rgba_png(path: &Path, rgba: &[u8], width: u32, height: u32) -> Result<(), RenderError> {
    let file = std::fs::File::create(path)?;
    let mut encoder = png::Encoder::new(file, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| RenderError::Failed(e.to_string()))?;
    writer
        .write_image_data(rgba)
        .map_err(|e| RenderError::Failed(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50">
        <rect x="0" y="0" width="100" height="50" fill="#ff0000"/>
    </svg>"##;

    #[test]
    fn embedded_renderer_preserves_aspect_ratio() {
        let dir = tempfile::tempdir().unwrap();
        let svg_path = dir.path().join("logo.svg");
        let png_path = dir.path().join("logo.png");
        std::fs::write(&svg_path, SVG).unwrap();

        EmbeddedRenderer.render(&svg_path, &png_path, 64).unwrap();

        let img = image::open(&png_path).unwrap();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 32);
    }

    #[test]
    fn embedded_renderer_clamps_zero_width() {
        let dir = tempfile::tempdir().unwrap();
        let svg_path = dir.path().join("logo.svg");
        let png_path = dir.path().join("logo.png");
        std::fs::write(&svg_path, SVG).unwrap();

        EmbeddedRenderer.render(&svg_path, &png_path, 0).unwrap();

        let img = image::open(&png_path).unwrap();
        assert_eq!(img.width(), 512);
    }

    #[test]
    fn embedded_renderer_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let svg_path = dir.path().join("logo.svg");
        std::fs::write(&svg_path, "this is not markup").unwrap();

        let result =
            EmbeddedRenderer.render(&svg_path, &dir.path().join("out.png"), 64);
        assert!(matches!(result, Err(RenderError::Parse(_))));
    }
}
