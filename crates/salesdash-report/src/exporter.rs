//! Report exporter: refuses empty exports, guards against re-entrant
//! exports of the same kind, and only leaves a file behind on success.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local, Utc};
use tempfile::NamedTempFile;

use salesdash_core::config::ExportConfig;
use salesdash_core::types::{DashboardData, Message};

use crate::document::{DocumentBackend, DocumentBuilder};
use crate::error::{ExportError, ExportKind};
use crate::filename::{dashboard_filename, suggestions_filename, transcript_filename};
use crate::snapshot::{render_snapshot, CaptureOptions, RasterCapture};
use crate::suggestions_report::{self, render_suggestions};
use crate::transcript_report::{self, render_transcript};

/// Marks one export kind busy until dropped.
struct InProgress<'a>(&'a AtomicBool);

impl<'a> InProgress<'a> {
    fn acquire(flag: &'a AtomicBool, kind: ExportKind) -> Result<Self, ExportError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::InProgress(kind))?;
        Ok(Self(flag))
    }
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Default)]
struct Guards {
    suggestions: AtomicBool,
    transcript: AtomicBool,
    dashboard: AtomicBool,
}

impl Guards {
    fn flag(&self, kind: ExportKind) -> &AtomicBool {
        match kind {
            ExportKind::Suggestions => &self.suggestions,
            ExportKind::Transcript => &self.transcript,
            ExportKind::Dashboard => &self.dashboard,
        }
    }
}

/// Writes suggestion, transcript and dashboard reports to an output directory.
pub struct ReportExporter<B: DocumentBackend> {
    backend: B,
    output_dir: PathBuf,
    context_max_len: usize,
    capture_options: CaptureOptions,
    guards: Guards,
}

impl<B: DocumentBackend> ReportExporter<B> {
    pub fn new(backend: B, output_dir: impl Into<PathBuf>, context_max_len: usize) -> Self {
        Self {
            backend,
            output_dir: output_dir.into(),
            context_max_len,
            capture_options: CaptureOptions::default(),
            guards: Guards::default(),
        }
    }

    pub fn from_config(backend: B, config: &ExportConfig) -> Self {
        Self::new(backend, &config.output_dir, config.context_max_len)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether an export of `kind` is currently running.
    pub fn is_busy(&self, kind: ExportKind) -> bool {
        self.guards.flag(kind).load(Ordering::Acquire)
    }

    /// Export the suggestion list. `context` is the query that produced it.
    pub fn export_suggestions(
        &self,
        suggestions: &[String],
        context: Option<&str>,
        now: &DateTime<Local>,
    ) -> Result<PathBuf, ExportError> {
        let kind = ExportKind::Suggestions;
        let _busy = InProgress::acquire(self.guards.flag(kind), kind)?;
        if suggestions.is_empty() {
            return Err(ExportError::NothingToExport(kind));
        }

        let mut doc = self.backend.create(suggestions_report::TITLE)?;
        render_suggestions(&mut doc, suggestions, context, now);
        let name = suggestions_filename(
            context.unwrap_or_default(),
            self.context_max_len,
            &now.with_timezone(&Utc),
        );
        self.write(kind, doc, &name)
    }

    /// Export the given (possibly search-filtered) messages.
    pub fn export_transcript(
        &self,
        messages: &[Message],
        search: Option<&str>,
        now: &DateTime<Local>,
    ) -> Result<PathBuf, ExportError> {
        let kind = ExportKind::Transcript;
        let _busy = InProgress::acquire(self.guards.flag(kind), kind)?;
        if messages.is_empty() {
            return Err(ExportError::NothingToExport(kind));
        }

        let mut doc = self.backend.create(transcript_report::TITLE)?;
        render_transcript(&mut doc, messages, now);
        let name = transcript_filename(search, self.context_max_len, &now.with_timezone(&Utc));
        self.write(kind, doc, &name)
    }

    /// Capture the dashboard and export it as a paged snapshot.
    pub fn export_dashboard(
        &self,
        capture: &dyn RasterCapture,
        data: Option<&DashboardData>,
        now: &DateTime<Local>,
    ) -> Result<PathBuf, ExportError> {
        let kind = ExportKind::Dashboard;
        let _busy = InProgress::acquire(self.guards.flag(kind), kind)?;
        let Some(summary) = data.and_then(|d| d.summary.as_ref()) else {
            return Err(ExportError::NothingToExport(kind));
        };

        let raster = capture.capture(&self.capture_options)?;
        let mut doc = self.backend.create("Sales Dashboard Report")?;
        render_snapshot(&mut doc, &raster);
        let name = dashboard_filename(summary.location(), &now.with_timezone(&Utc));
        self.write(kind, doc, &name)
    }

    /// Serialize `doc` and move it into place. Nothing is left behind on error.
    fn write(&self, kind: ExportKind, doc: B::Document, name: &str) -> Result<PathBuf, ExportError> {
        let pages = doc.page_count();
        let bytes = doc.finish().map_err(|e| {
            tracing::warn!(%kind, error = %e, "Report rendering failed");
            e
        })?;

        std::fs::create_dir_all(&self.output_dir)?;
        let mut tmp = NamedTempFile::new_in(&self.output_dir)?;
        tmp.write_all(&bytes)?;
        tmp.flush()?;

        let path = self.output_dir.join(name);
        tmp.persist(&path).map_err(|e| ExportError::Io(e.error))?;

        tracing::info!(%kind, path = %path.display(), pages, "Report exported");
        Ok(path)
    }
}
