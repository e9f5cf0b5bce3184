//! PDF report export for the sales dashboard.
//!
//! Three report kinds are supported:
//! - the current follow-up suggestion list
//! - the (optionally search-filtered) chat transcript
//! - a rasterized snapshot of the dashboard, paged over A4
//!
//! Layouts draw through the [`DocumentBuilder`] port; [`PdfBackend`] renders
//! them with `printpdf`.

pub mod clean;
pub mod document;
pub mod error;
pub mod exporter;
pub mod filename;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod recording;
pub mod snapshot;
pub mod suggestions_report;
pub mod transcript_report;
pub mod wrap;

pub use clean::clean_text;
pub use document::{DocumentBackend, DocumentBuilder, Rgb};
pub use error::{ExportError, ExportKind};
pub use exporter::ReportExporter;
pub use metrics::FontStyle;
pub use pdf::PdfBackend;
pub use recording::{DrawOp, RecordingBackend, RecordingDocument};
pub use snapshot::{CaptureOptions, Raster, RasterCapture, StaticCapture};
pub use wrap::wrap_text;
