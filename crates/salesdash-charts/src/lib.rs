//! Chart data adapter for the sales dashboard.
//!
//! Reshapes [`DashboardData`](salesdash_core::types::DashboardData) into
//! chart specs for four chart kinds, builds the KPI cards, and drives an
//! injected [`ChartRenderer`] that may become ready after data arrives.

pub mod adapter;
pub mod error;
pub mod kpi;
pub mod renderer;
pub mod spec;
pub mod view;

pub use adapter::{build_specs, category_rows, city_rows, geo_rows, parse_date, time_series_rows};
pub use error::ChartError;
pub use kpi::{format_currency, format_number, kpi_cards, KpiCard};
pub use renderer::{ChartPresenter, ChartRenderer, PresentOutcome, RecordingRenderer};
pub use spec::{ChartKind, ChartOptions, ChartRows, ChartSpec};
pub use view::DashboardView;
