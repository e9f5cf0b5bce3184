//! Document builder port.
//!
//! Report layouts draw through [`DocumentBuilder`] in millimetres on an A4
//! page with the origin at the top-left corner, so they can be exercised
//! against [`RecordingBackend`](crate::recording::RecordingBackend) without
//! producing a real PDF.

use crate::error::ExportError;
use crate::metrics::FontStyle;
use crate::snapshot::Raster;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// Drawing surface for one document. Starts with a single blank page.
pub trait DocumentBuilder {
    fn add_page(&mut self);

    /// Colour used by subsequent [`fill_rect`](Self::fill_rect) calls.
    fn set_fill_color(&mut self, color: Rgb);

    /// Colour used by subsequent [`text`](Self::text) calls.
    fn set_text_color(&mut self, color: Rgb);

    fn set_font(&mut self, style: FontStyle, size_pt: f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Draw a single line of text with its baseline at `y`.
    fn text(&mut self, text: &str, x: f32, y: f32);

    /// Place a raster with its top-left corner at (`x`, `y`).
    fn image(&mut self, raster: &Raster, x: f32, y: f32, width: f32, height: f32);

    fn page_count(&self) -> usize;

    /// Serialize the document.
    fn finish(self) -> Result<Vec<u8>, ExportError>;
}

/// Factory for fresh documents.
pub trait DocumentBackend {
    type Document: DocumentBuilder;

    fn create(&self, title: &str) -> Result<Self::Document, ExportError>;
}
