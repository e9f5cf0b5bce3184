use std::fmt;

use salesdash_core::error::SalesdashError;

/// The three exportable document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Suggestions,
    Transcript,
    Dashboard,
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Suggestions => write!(f, "suggestions"),
            ExportKind::Transcript => write!(f, "transcript"),
            ExportKind::Dashboard => write!(f, "dashboard"),
        }
    }
}

/// Errors that can occur while exporting a report.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no {0} to export")]
    NothingToExport(ExportKind),
    #[error("a {0} export is already in progress")]
    InProgress(ExportKind),
    #[error("render error: {0}")]
    Render(String),
    #[error("capture error: {0}")]
    Capture(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExportError> for SalesdashError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Io(e) => SalesdashError::Io(e),
            other => SalesdashError::Export(other.to_string()),
        }
    }
}
