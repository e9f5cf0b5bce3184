//! `printpdf` backend.
//!
//! printpdf places content from the bottom-left corner, so every y
//! coordinate is flipped against the page height on the way in.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Px, Rect,
};

use crate::document::{DocumentBackend, DocumentBuilder, Rgb, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::error::ExportError;
use crate::metrics::FontStyle;
use crate::snapshot::Raster;

/// Backend producing A4 PDFs with the built-in Helvetica faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfBackend;

impl DocumentBackend for PdfBackend {
    type Document = PdfBuilder;

    fn create(&self, title: &str) -> Result<PdfBuilder, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let font = |face: BuiltinFont| {
            doc.add_builtin_font(face)
                .map_err(|e| ExportError::Render(format!("failed to load font: {e}")))
        };
        let fonts = Fonts {
            normal: font(BuiltinFont::Helvetica)?,
            bold: font(BuiltinFont::HelveticaBold)?,
            italic: font(BuiltinFont::HelveticaOblique)?,
        };
        let layer = doc.get_page(page).get_layer(layer);

        Ok(PdfBuilder {
            doc,
            layer,
            fonts,
            pages: 1,
            fill: Rgb(0, 0, 0),
            text_color: Rgb(0, 0, 0),
            style: FontStyle::Normal,
            size: 12.0,
        })
    }
}

struct Fonts {
    normal: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

pub struct PdfBuilder {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    pages: usize,
    fill: Rgb,
    text_color: Rgb,
    style: FontStyle,
    size: f32,
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        f32::from(rgb.0) / 255.0,
        f32::from(rgb.1) / 255.0,
        f32::from(rgb.2) / 255.0,
        None,
    ))
}

fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - y)
}

impl DocumentBuilder for PdfBuilder {
    fn add_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), format!("Layer {}", self.pages + 1));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.pages += 1;
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.style = style;
        self.size = size_pt;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.layer.set_fill_color(color(self.fill));
        let rect = Rect::new(Mm(x), flip(y + height), Mm(x + width), flip(y))
            .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        let font = match self.style {
            FontStyle::Normal => &self.fonts.normal,
            FontStyle::Bold => &self.fonts.bold,
            FontStyle::Italic => &self.fonts.italic,
        };
        // Text is painted with the fill colour.
        self.layer.set_fill_color(color(self.text_color));
        self.layer.use_text(text, self.size, Mm(x), flip(y), font);
    }

    fn image(&mut self, raster: &Raster, x: f32, y: f32, width: f32, height: f32) {
        let xobject = ImageXObject {
            width: Px(raster.width as usize),
            height: Px(raster.height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: raster.rgb.clone(),
            image_filter: None,
            smask: None,
            clipping_bbox: None,
        };
        // Pixels per inch that make the image exactly `width` mm wide.
        let dpi = raster.width as f32 * 25.4 / width;
        Image::from(xobject).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(flip(y + height)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| ExportError::Render(format!("failed to serialize PDF: {e}")))
    }
}
