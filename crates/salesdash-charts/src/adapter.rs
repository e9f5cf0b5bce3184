//! Pure transforms from dashboard payload sections into chart rows.
//!
//! Every transform borrows its input and allocates fresh rows, so calling
//! one twice on the same data yields identical output.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use salesdash_core::types::{CategoryEntry, CityEntry, DashboardData, MapEntry, TimeSeriesEntry};

use crate::spec::{BarRow, ChartRows, ChartSpec, DatedValue, LabeledValue, CITY_COLORS};

/// Label used when a category or city name is missing.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Bars shown in the ranked city chart.
pub const MAX_CITY_BARS: usize = 10;

// ============================================================================
// Per-kind transforms
// ============================================================================

/// One pie slice per category entry.
pub fn category_rows(entries: &[CategoryEntry]) -> Vec<LabeledValue> {
    entries
        .iter()
        .map(|e| LabeledValue {
            label: label_or_unknown(e.category.as_deref()),
            value: e.sales.unwrap_or(0.0),
        })
        .collect()
}

/// The first ten city entries, in the order given, each with its palette colour.
pub fn city_rows(entries: &[CityEntry]) -> Vec<BarRow> {
    entries
        .iter()
        .take(MAX_CITY_BARS)
        .enumerate()
        .map(|(i, e)| BarRow {
            label: label_or_unknown(e.city.as_deref()),
            value: e.sales.unwrap_or(0.0),
            color: CITY_COLORS[i % CITY_COLORS.len()],
        })
        .collect()
}

/// Dated points in input order. Entries without a parseable date are dropped.
pub fn time_series_rows(entries: &[TimeSeriesEntry]) -> Vec<DatedValue> {
    entries
        .iter()
        .filter_map(|e| {
            let raw = e.date.as_deref()?;
            match parse_date(raw) {
                Some(date) => Some(DatedValue {
                    date,
                    value: e.sales.unwrap_or(0.0),
                }),
                None => {
                    tracing::debug!(date = raw, "Skipping time series entry with invalid date");
                    None
                }
            }
        })
        .collect()
}

/// Per-state sales totals in first-appearance order.
///
/// Entries with a missing, blank or placeholder state are ignored, and
/// states whose total is not positive are left out.
pub fn geo_rows(entries: &[MapEntry]) -> Vec<LabeledValue> {
    let mut totals: Vec<LabeledValue> = Vec::new();

    for entry in entries {
        let Some(state) = entry.state.as_deref().map(str::trim) else {
            continue;
        };
        if state.is_empty() || state == UNKNOWN_LABEL {
            continue;
        }
        let sales = entry.sales.unwrap_or(0.0);
        match totals.iter_mut().find(|row| row.label == state) {
            Some(row) => row.value += sales,
            None => totals.push(LabeledValue {
                label: state.to_string(),
                value: sales,
            }),
        }
    }

    totals.retain(|row| row.value > 0.0);
    totals
}

/// Chart specs for every kind that has at least one row, in display order.
pub fn build_specs(data: &DashboardData) -> Vec<ChartSpec> {
    let charts = data.chart_data.as_ref();
    let candidates = [
        ChartRows::Category(category_rows(
            charts.map(|c| c.category_breakdown.as_slice()).unwrap_or_default(),
        )),
        ChartRows::City(city_rows(
            charts.map(|c| c.city_breakdown.as_slice()).unwrap_or_default(),
        )),
        ChartRows::TimeSeries(time_series_rows(
            charts.map(|c| c.time_series.as_slice()).unwrap_or_default(),
        )),
        ChartRows::Geo(geo_rows(&data.map_data)),
    ];

    candidates
        .into_iter()
        .filter(|rows| !rows.is_empty())
        .map(ChartSpec::new)
        .collect()
}

// ============================================================================
// Helpers
// ============================================================================

fn label_or_unknown(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_LABEL.to_string(),
    }
}

/// Parse the date formats the analytics service is known to emit.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    // Month buckets ("2024-03") map to the first of the month.
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok()
}
