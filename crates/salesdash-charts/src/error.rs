//! Error types for chart rendering.

use salesdash_core::error::SalesdashError;

use crate::spec::ChartKind;

/// Errors raised by a chart renderer.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("chart runtime is not loaded")]
    RuntimeUnavailable,
    #[error("failed to draw {kind} chart: {reason}")]
    Draw { kind: ChartKind, reason: String },
}

impl From<ChartError> for SalesdashError {
    fn from(err: ChartError) -> Self {
        SalesdashError::Chart(err.to_string())
    }
}
