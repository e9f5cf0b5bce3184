//! In-memory document backend that records draw calls.

use crate::document::{DocumentBackend, DocumentBuilder, Rgb};
use crate::error::ExportError;
use crate::metrics::FontStyle;
use crate::snapshot::Raster;

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        color: Rgb,
        style: FontStyle,
        size: f32,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        pixel_height: u32,
    },
}

/// Backend whose documents keep their operations per page.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    /// Fail `finish` with a render error.
    pub fail_on_finish: bool,
}

impl DocumentBackend for RecordingBackend {
    type Document = RecordingDocument;

    fn create(&self, title: &str) -> Result<RecordingDocument, ExportError> {
        Ok(RecordingDocument {
            title: title.to_string(),
            pages: vec![Vec::new()],
            fill: Rgb(0, 0, 0),
            text_color: Rgb(0, 0, 0),
            style: FontStyle::Normal,
            size: 12.0,
            fail_on_finish: self.fail_on_finish,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RecordingDocument {
    pub title: String,
    pub pages: Vec<Vec<DrawOp>>,
    fill: Rgb,
    text_color: Rgb,
    style: FontStyle,
    size: f32,
    fail_on_finish: bool,
}

impl RecordingDocument {
    fn current(&mut self) -> &mut Vec<DrawOp> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Every text drawn, in order, across all pages.
    pub fn texts(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flatten()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Page index and op for every text equal to `needle`.
    pub fn find_text(&self, needle: &str) -> Vec<(usize, &DrawOp)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, ops)| ops.iter().map(move |op| (i, op)))
            .filter(|(_, op)| matches!(op, DrawOp::Text { text, .. } if text == needle))
            .collect()
    }
}

impl DocumentBuilder for RecordingDocument {
    fn add_page(&mut self) {
        self.pages.push(Vec::new());
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
        let color = self.fill;
        self.current().push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        let op = DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            color: self.text_color,
            style: self.style,
            size: self.size,
        };
        self.current().push(op);
    }

    fn image(&mut self, raster: &Raster, x: f32, y: f32, width: f32, height: f32) {
        self.current().push(DrawOp::Image {
            x,
            y,
            width,
            height,
            pixel_height: raster.height,
        });
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        if self.fail_on_finish {
            return Err(ExportError::Render("recording backend set to fail".into()));
        }
        let mut out = format!("%RECORDING {}\n", self.title);
        for (i, ops) in self.pages.iter().enumerate() {
            out.push_str(&format!("page {} ops {}\n", i + 1, ops.len()));
        }
        Ok(out.into_bytes())
    }
}
