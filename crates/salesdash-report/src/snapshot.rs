//! Dashboard snapshot capture and paging.

use crate::document::{DocumentBuilder, Rgb, PAGE_WIDTH_MM};
use crate::error::ExportError;

/// Height of the image window on each snapshot page.
pub const SNAPSHOT_PAGE_HEIGHT_MM: f32 = 295.0;

/// A decoded RGB8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, ExportError> {
        let expected = width as usize * height as usize * 3;
        if width == 0 || height == 0 {
            return Err(ExportError::Capture("captured image is empty".into()));
        }
        if rgb.len() != expected {
            return Err(ExportError::Capture(format!(
                "expected {expected} bytes for {width}x{height} RGB, got {}",
                rgb.len()
            )));
        }
        Ok(Self { width, height, rgb })
    }

    /// Copy of rows `top..top + rows`, clamped to the image.
    pub fn crop_rows(&self, top: u32, rows: u32) -> Raster {
        let top = top.min(self.height);
        let bottom = top.saturating_add(rows).min(self.height);
        let stride = self.width as usize * 3;
        Raster {
            width: self.width,
            height: bottom - top,
            rgb: self.rgb[top as usize * stride..bottom as usize * stride].to_vec(),
        }
    }
}

/// How the dashboard should be rasterized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    pub scale: f32,
    pub background: Rgb,
    /// Hide buttons, selects and inputs in the capture.
    pub hide_interactive: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: Rgb::WHITE,
            hide_interactive: true,
        }
    }
}

/// Port producing a raster of the current dashboard.
pub trait RasterCapture {
    fn capture(&self, options: &CaptureOptions) -> Result<Raster, ExportError>;
}

/// Capture source backed by an already-rendered image.
#[derive(Debug, Clone)]
pub struct StaticCapture(pub Raster);

impl RasterCapture for StaticCapture {
    fn capture(&self, _options: &CaptureOptions) -> Result<Raster, ExportError> {
        Ok(self.0.clone())
    }
}

/// One page worth of a tall snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Vertical offset of this page's window into the scaled image, in mm.
    pub offset_mm: f32,
    /// Height of the image drawn on this page, in mm.
    pub height_mm: f32,
}

/// Page windows for an image `image_height_mm` tall.
///
/// The first page is always emitted; further pages follow while image
/// height remains below the previous window.
pub fn segments(image_height_mm: f32) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut offset = 0.0_f32;
    loop {
        let remaining = image_height_mm - offset;
        out.push(Segment {
            offset_mm: offset,
            height_mm: remaining.clamp(0.0, SNAPSHOT_PAGE_HEIGHT_MM),
        });
        offset += SNAPSHOT_PAGE_HEIGHT_MM;
        if image_height_mm - offset <= 0.0 {
            break;
        }
    }
    out
}

/// Lay `raster` out full-width across as many pages as it needs.
pub fn render_snapshot<D: DocumentBuilder>(doc: &mut D, raster: &Raster) {
    let px_per_mm = raster.width as f32 / PAGE_WIDTH_MM;
    let image_height_mm = raster.height as f32 / px_per_mm;

    for (i, segment) in segments(image_height_mm).iter().enumerate() {
        if i > 0 {
            doc.add_page();
        }
        let top = (segment.offset_mm * px_per_mm).round() as u32;
        let bottom = ((segment.offset_mm + segment.height_mm) * px_per_mm).round() as u32;
        let slice = raster.crop_rows(top, bottom.saturating_sub(top));
        if slice.height == 0 {
            continue;
        }
        let height_mm = slice.height as f32 / px_per_mm;
        doc.image(&slice, 0.0, 0.0, PAGE_WIDTH_MM, height_mm);
    }
}
