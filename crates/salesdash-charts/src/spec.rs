//! Chart descriptions handed to a renderer: kind, fixed presentation
//! options, and the adapted rows.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Pie palette.
pub const CATEGORY_COLORS: [&str; 8] = [
    "#667eea", "#764ba2", "#f093fb", "#f5576c", "#4facfe", "#00f2fe", "#43e97b", "#38f9d7",
];

/// Cyclic per-bar palette.
pub const CITY_COLORS: [&str; 10] = [
    "#667eea", "#764ba2", "#f093fb", "#f5576c", "#4facfe", "#00f2fe", "#43e97b", "#38f9d7",
    "#fa709a", "#fee140",
];

pub const TIME_SERIES_COLOR: &str = "#667eea";

/// Low-to-high colour axis of the choropleth.
pub const GEO_COLOR_AXIS: [&str; 3] = ["#e3f2fd", "#667eea", "#764ba2"];

/// The four dashboard chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Categorical pie (donut).
    Category,
    /// Ranked horizontal bars.
    City,
    /// Area chart over dates.
    TimeSeries,
    /// Choropleth over US states.
    Geo,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Category => write!(f, "category"),
            ChartKind::City => write!(f, "city"),
            ChartKind::TimeSeries => write!(f, "time series"),
            ChartKind::Geo => write!(f, "geo"),
        }
    }
}

impl ChartKind {
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Category => "Sales Distribution by Category",
            ChartKind::City => "Top 10 Cities Performance",
            ChartKind::TimeSeries => "Sales Trends Over Time",
            ChartKind::Geo => "Geographic Sales Distribution",
        }
    }
}

/// A label with its sales figure (pie slices, choropleth regions).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

/// A bar with its palette colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarRow {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

/// A dated sales point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// Rows in the shape each chart kind consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartRows {
    Category(Vec<LabeledValue>),
    City(Vec<BarRow>),
    TimeSeries(Vec<DatedValue>),
    Geo(Vec<LabeledValue>),
}

impl ChartRows {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartRows::Category(_) => ChartKind::Category,
            ChartRows::City(_) => ChartKind::City,
            ChartRows::TimeSeries(_) => ChartKind::TimeSeries,
            ChartRows::Geo(_) => ChartKind::Geo,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChartRows::Category(r) | ChartRows::Geo(r) => r.len(),
            ChartRows::City(r) => r.len(),
            ChartRows::TimeSeries(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Presentation options per chart kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub title: &'static str,
    pub colors: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_axis_title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_axis_title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pie_hole: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<&'static str>,
}

impl ChartOptions {
    pub fn for_kind(kind: ChartKind) -> Self {
        let base = Self {
            title: kind.title(),
            colors: Vec::new(),
            h_axis_title: None,
            v_axis_title: None,
            pie_hole: None,
            region: None,
        };
        match kind {
            ChartKind::Category => Self {
                colors: CATEGORY_COLORS.to_vec(),
                pie_hole: Some(0.45),
                ..base
            },
            ChartKind::City => Self {
                colors: CITY_COLORS.to_vec(),
                h_axis_title: Some("Sales Revenue ($)"),
                v_axis_title: Some("Cities"),
                ..base
            },
            ChartKind::TimeSeries => Self {
                colors: vec![TIME_SERIES_COLOR],
                h_axis_title: Some("Time Period"),
                v_axis_title: Some("Sales Revenue ($)"),
                ..base
            },
            ChartKind::Geo => Self {
                colors: GEO_COLOR_AXIS.to_vec(),
                region: Some("US"),
                ..base
            },
        }
    }
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub options: ChartOptions,
    pub rows: ChartRows,
}

impl ChartSpec {
    pub fn new(rows: ChartRows) -> Self {
        let kind = rows.kind();
        Self {
            kind,
            options: ChartOptions::for_kind(kind),
            rows,
        }
    }
}
