//! Dashboard capture from a PNG rendered outside the binary.

use std::path::{Path, PathBuf};

use salesdash_report::{CaptureOptions, ExportError, Raster, RasterCapture};

/// Reads a PNG and flattens it onto the capture background.
#[derive(Debug, Clone)]
pub struct PngCapture {
    path: PathBuf,
}

impl PngCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RasterCapture for PngCapture {
    fn capture(&self, options: &CaptureOptions) -> Result<Raster, ExportError> {
        let image = image::open(&self.path)
            .map_err(|e| ExportError::Capture(format!("{}: {e}", self.path.display())))?
            .to_rgba8();
        let (width, height) = image.dimensions();

        let bg = options.background;
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in image.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.push(blend(r, bg.0, a));
            rgb.push(blend(g, bg.1, a));
            rgb.push(blend(b, bg.2, a));
        }

        tracing::debug!(width, height, path = %self.path.display(), "Dashboard capture loaded");
        Raster::new(width, height, rgb)
    }
}

/// Alpha-composite one channel over an opaque background.
fn blend(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    ((u32::from(fg) * a + u32::from(bg) * (255 - a) + 127) / 255) as u8
}
