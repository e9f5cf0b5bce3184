//! Render-ready model of the dashboard panel.

use serde::Serialize;

use salesdash_core::types::DashboardData;

use crate::adapter::build_specs;
use crate::kpi::{kpi_cards, KpiCard};
use crate::spec::ChartSpec;

/// Location shown when the snapshot is not scoped to one.
pub const ALL_REGIONS: &str = "All Regions";

/// What the dashboard panel should show for a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    /// No summary yet; prompt the user to ask a question.
    Placeholder,
    Ready {
        location: String,
        kpis: Vec<KpiCard>,
        insights: Vec<String>,
        charts: Vec<ChartSpec>,
    },
}

impl DashboardView {
    pub fn build(data: &DashboardData) -> Self {
        let Some(summary) = data.summary.as_ref() else {
            return DashboardView::Placeholder;
        };

        DashboardView::Ready {
            location: summary.location().unwrap_or(ALL_REGIONS).to_string(),
            kpis: kpi_cards(summary),
            insights: data.insights.clone(),
            charts: build_specs(data),
        }
    }

    /// Build from an optional snapshot; `None` is the placeholder.
    pub fn from_snapshot(data: Option<&DashboardData>) -> Self {
        data.map(Self::build).unwrap_or(DashboardView::Placeholder)
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, DashboardView::Placeholder)
    }

    pub fn charts(&self) -> &[ChartSpec] {
        match self {
            DashboardView::Placeholder => &[],
            DashboardView::Ready { charts, .. } => charts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_core::types::{MapEntry, SalesSummary};

    #[test]
    fn test_missing_summary_is_placeholder() {
        let data = DashboardData {
            map_data: vec![MapEntry {
                state: Some("Texas".into()),
                sales: Some(1.0),
            }],
            ..Default::default()
        };
        assert!(DashboardView::build(&data).is_placeholder());
        assert!(DashboardView::from_snapshot(None).is_placeholder());
    }

    #[test]
    fn test_ready_view() {
        let data = DashboardData {
            summary: Some(SalesSummary {
                total_sales: Some(10.0),
                location: Some("  ".into()),
                ..Default::default()
            }),
            map_data: vec![MapEntry {
                state: Some("Texas".into()),
                sales: Some(1.0),
            }],
            insights: vec!["Texas leads".into()],
            ..Default::default()
        };
        let view = DashboardView::build(&data);
        match &view {
            DashboardView::Ready {
                location,
                kpis,
                insights,
                charts,
            } => {
                assert_eq!(location, "All Regions");
                assert_eq!(kpis.len(), 3);
                assert_eq!(insights, &vec!["Texas leads".to_string()]);
                assert_eq!(charts.len(), 1);
            }
            DashboardView::Placeholder => panic!("expected ready view"),
        }
        assert_eq!(view.charts().len(), 1);
    }

    #[test]
    fn test_location_is_used() {
        let data = DashboardData {
            summary: Some(SalesSummary {
                location: Some("California".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        match DashboardView::build(&data) {
            DashboardView::Ready { location, charts, .. } => {
                assert_eq!(location, "California");
                assert!(charts.is_empty());
            }
            DashboardView::Placeholder => panic!("expected ready view"),
        }
    }
}
