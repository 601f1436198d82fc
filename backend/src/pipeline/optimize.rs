//! Lossless re-encode pass over a stored raster rendition.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use std::error::Error;
use std::io::BufWriter;
use std::path::Path;
use tempfile::NamedTempFile;

/// Re-encode the PNG at `path` with maximum compression, replacing the
/// file in place via a temporary sibling. Pixel content is unchanged.
///
/// Callers treat failure as non-fatal: the original bytes remain the
/// rendition.
pub fn reencode_png(path: &Path) -> Result<(), Box<dyn Error>> {
    let img = image::open(path)?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        let encoder =
            PngEncoder::new_with_quality(&mut writer, CompressionType::Best, FilterType::Adaptive);
        img.write_with_encoder(encoder)?;
    }
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn reencode_keeps_pixel_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");

        let img = RgbaImage::from_pixel(8, 8, Rgba([10, 200, 30, 255]));
        img.save(&path).unwrap();

        reencode_png(&path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (8, 8));
        assert_eq!(reloaded.get_pixel(3, 3), &Rgba([10, 200, 30, 255]));
    }

    #[test]
    fn reencode_of_non_png_fails_without_touching_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(reencode_png(&path).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"not an image");
    }
}
