//! Chart renderer port and the presenter that drives it.
//!
//! The rendering runtime may come up after the first snapshot arrives. The
//! presenter keeps only the latest snapshot while the runtime is not ready
//! and draws it once the runtime reports in.

use crate::error::ChartError;
use crate::spec::{ChartKind, ChartSpec};
use crate::view::DashboardView;

/// A backend able to draw chart specs.
pub trait ChartRenderer {
    /// Whether the rendering runtime is loaded and can accept draw calls.
    fn is_ready(&self) -> bool;

    fn draw(&mut self, spec: &ChartSpec) -> Result<(), ChartError>;
}

/// Result of presenting one dashboard view.
#[derive(Debug, Default, PartialEq)]
pub enum PresentOutcome {
    /// The view had nothing to draw.
    #[default]
    Placeholder,
    /// The runtime is not ready; the view is held until it is.
    Deferred,
    Drawn {
        drawn: Vec<ChartKind>,
        failed: Vec<(ChartKind, String)>,
    },
}

/// Feeds dashboard views to a [`ChartRenderer`].
pub struct ChartPresenter<R: ChartRenderer> {
    renderer: R,
    pending: Option<DashboardView>,
}

impl<R: ChartRenderer> ChartPresenter<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            pending: None,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Draw `view`, or hold it if the runtime is not ready yet.
    ///
    /// A newer view replaces any held one.
    pub fn present(&mut self, view: DashboardView) -> PresentOutcome {
        if view.is_placeholder() {
            self.pending = None;
            return PresentOutcome::Placeholder;
        }

        if !self.renderer.is_ready() {
            tracing::debug!("Chart runtime not ready, deferring draw");
            self.pending = Some(view);
            return PresentOutcome::Deferred;
        }

        self.pending = None;
        self.draw_all(&view)
    }

    /// Signal that the runtime has loaded; draws any held view.
    pub fn runtime_ready(&mut self) -> Option<PresentOutcome> {
        if !self.renderer.is_ready() {
            return None;
        }
        let view = self.pending.take()?;
        Some(self.draw_all(&view))
    }

    fn draw_all(&mut self, view: &DashboardView) -> PresentOutcome {
        let mut drawn = Vec::new();
        let mut failed = Vec::new();

        for spec in view.charts() {
            match self.renderer.draw(spec) {
                Ok(()) => drawn.push(spec.kind),
                Err(e) => {
                    tracing::warn!(kind = %spec.kind, error = %e, "Chart draw failed");
                    failed.push((spec.kind, e.to_string()));
                }
            }
        }

        PresentOutcome::Drawn { drawn, failed }
    }
}

/// Renderer that records draw calls, for tests and headless use.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub ready: bool,
    pub drawn: Vec<ChartSpec>,
    /// Kinds whose draw call fails.
    pub failing: Vec<ChartKind>,
}

impl RecordingRenderer {
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Default::default()
        }
    }
}

impl ChartRenderer for RecordingRenderer {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn draw(&mut self, spec: &ChartSpec) -> Result<(), ChartError> {
        if !self.ready {
            return Err(ChartError::RuntimeUnavailable);
        }
        if self.failing.contains(&spec.kind) {
            return Err(ChartError::Draw {
                kind: spec.kind,
                reason: "rejected".into(),
            });
        }
        self.drawn.push(spec.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_core::types::{
        CategoryEntry, ChartData, CityEntry, DashboardData, MapEntry, SalesSummary,
    };

    fn snapshot(state: &str) -> DashboardView {
        DashboardView::build(&DashboardData {
            summary: Some(SalesSummary::default()),
            chart_data: Some(ChartData {
                category_breakdown: vec![CategoryEntry {
                    category: Some("Tech".into()),
                    sales: Some(1.0),
                }],
                city_breakdown: vec![CityEntry {
                    city: Some("Austin".into()),
                    sales: Some(2.0),
                }],
                ..Default::default()
            }),
            map_data: vec![MapEntry {
                state: Some(state.into()),
                sales: Some(3.0),
            }],
            ..Default::default()
        })
    }

    #[test]
    fn test_draws_when_ready() {
        let mut presenter = ChartPresenter::new(RecordingRenderer::ready());
        let outcome = presenter.present(snapshot("Texas"));
        assert_eq!(
            outcome,
            PresentOutcome::Drawn {
                drawn: vec![ChartKind::Category, ChartKind::City, ChartKind::Geo],
                failed: vec![],
            }
        );
        assert_eq!(presenter.renderer().drawn.len(), 3);
    }

    #[test]
    fn test_defers_until_runtime_ready_keeping_latest() {
        let mut presenter = ChartPresenter::new(RecordingRenderer::default());
        assert_eq!(presenter.present(snapshot("Texas")), PresentOutcome::Deferred);
        assert_eq!(presenter.present(snapshot("Ohio")), PresentOutcome::Deferred);
        assert!(presenter.renderer().drawn.is_empty());

        // Not ready yet: nothing flushed.
        assert!(presenter.runtime_ready().is_none());
        assert!(presenter.has_pending());

        presenter.renderer_mut().ready = true;
        let outcome = presenter.runtime_ready();
        assert!(matches!(outcome, Some(PresentOutcome::Drawn { .. })));
        assert!(!presenter.has_pending());

        let geo = presenter
            .renderer()
            .drawn
            .iter()
            .find(|s| s.kind == ChartKind::Geo)
            .unwrap();
        let json = serde_json::to_value(geo).unwrap();
        assert_eq!(json["rows"][0]["label"], "Ohio");

        // Flushing twice draws nothing new.
        assert!(presenter.runtime_ready().is_none());
    }

    #[test]
    fn test_one_failure_does_not_stop_others() {
        let mut renderer = RecordingRenderer::ready();
        renderer.failing = vec![ChartKind::City];
        let mut presenter = ChartPresenter::new(renderer);
        match presenter.present(snapshot("Texas")) {
            PresentOutcome::Drawn { drawn, failed } => {
                assert_eq!(drawn, vec![ChartKind::Category, ChartKind::Geo]);
                assert_eq!(failed.len(), 1);
                assert_eq!(failed[0].0, ChartKind::City);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_placeholder_clears_pending() {
        let mut presenter = ChartPresenter::new(RecordingRenderer::default());
        presenter.present(snapshot("Texas"));
        assert_eq!(
            presenter.present(DashboardView::Placeholder),
            PresentOutcome::Placeholder
        );
        assert!(!presenter.has_pending());
    }
}
