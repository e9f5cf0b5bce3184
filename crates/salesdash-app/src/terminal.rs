//! Plain-text rendering of chat replies and the dashboard.

use std::fmt::Write as _;

use salesdash_charts::{ChartError, ChartRenderer, ChartRows, ChartSpec, DashboardView};
use salesdash_core::types::Message;

const BAR_WIDTH: usize = 30;

/// Draws charts as text bars into an in-memory buffer.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    out: String,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything drawn since the last call.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

fn bar(value: f64, max: f64) -> String {
    let len = if max > 0.0 && value > 0.0 {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    "#".repeat(len.clamp(usize::from(value > 0.0), BAR_WIDTH))
}

fn rows_of(spec: &ChartSpec) -> Vec<(String, f64)> {
    match &spec.rows {
        ChartRows::Category(rows) | ChartRows::Geo(rows) => {
            rows.iter().map(|r| (r.label.clone(), r.value)).collect()
        }
        ChartRows::City(rows) => rows.iter().map(|r| (r.label.clone(), r.value)).collect(),
        ChartRows::TimeSeries(rows) => rows
            .iter()
            .map(|r| (r.date.format("%Y-%m-%d").to_string(), r.value))
            .collect(),
    }
}

impl ChartRenderer for TerminalRenderer {
    fn is_ready(&self) -> bool {
        true
    }

    fn draw(&mut self, spec: &ChartSpec) -> Result<(), ChartError> {
        let rows = rows_of(spec);
        let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

        let _ = writeln!(self.out, "\n  {}", spec.options.title);
        for (label, value) in rows {
            let _ = writeln!(
                self.out,
                "  {label:<label_width$}  {:<width$}  {}",
                bar(value, max),
                salesdash_charts::format_number(value),
                width = BAR_WIDTH
            );
        }
        Ok(())
    }
}

/// Headline section of a dashboard view: location, KPIs and insights.
pub fn format_dashboard_header(view: &DashboardView) -> String {
    match view {
        DashboardView::Placeholder => {
            "No dashboard data yet. Ask a question to populate the dashboard.".to_string()
        }
        DashboardView::Ready {
            location,
            kpis,
            insights,
            ..
        } => {
            let mut out = format!("Sales Dashboard: {location}\n");
            for card in kpis {
                let _ = writeln!(out, "  {:<20} {}", card.label, card.value);
            }
            if !insights.is_empty() {
                out.push_str("Insights:\n");
                for insight in insights {
                    let _ = writeln!(out, "  - {insight}");
                }
            }
            out
        }
    }
}

/// A transcript entry with its annotation, if any.
pub fn format_message(message: &Message) -> String {
    let speaker = if message.is_user() { "You" } else { "AI" };
    let mut out = format!("{speaker}: {}", message.text);
    if message.is_off_topic {
        out.push_str("\n  [off-topic]");
    } else if let Some(function) = message.function_called.as_deref() {
        let _ = write!(out, "\n  [analysis: {function}]");
    }
    out
}

/// Numbered suggestion list.
pub fn format_suggestions(suggestions: &[String]) -> String {
    let mut out = String::new();
    for (i, s) in suggestions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {s}", i + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_charts::spec::LabeledValue;

    #[test]
    fn test_draws_title_and_rows() {
        let mut renderer = TerminalRenderer::new();
        let spec = ChartSpec::new(ChartRows::Geo(vec![
            LabeledValue {
                label: "Texas".into(),
                value: 2000.0,
            },
            LabeledValue {
                label: "Ohio".into(),
                value: 1000.0,
            },
        ]));
        renderer.draw(&spec).unwrap();
        let out = renderer.take_output();
        assert!(out.contains("Geographic Sales Distribution"));
        assert!(out.contains("Texas"));
        assert!(out.contains("2,000"));
        assert!(out.contains(&"#".repeat(30)));
        assert!(out.contains(&format!("{} ", "#".repeat(15))));
        assert!(renderer.take_output().is_empty());
    }

    #[test]
    fn test_bar_lengths() {
        assert_eq!(bar(0.0, 10.0), "");
        assert_eq!(bar(10.0, 10.0).len(), 30);
        assert_eq!(bar(0.01, 10.0).len(), 1);
    }

    #[test]
    fn test_placeholder_header() {
        assert!(format_dashboard_header(&DashboardView::Placeholder).contains("No dashboard data"));
    }

    #[test]
    fn test_message_annotations() {
        let mut m = Message::model("Hi");
        m.function_called = Some("get_sales".into());
        assert_eq!(format_message(&m), "AI: Hi\n  [analysis: get_sales]");
        m.is_off_topic = true;
        assert_eq!(format_message(&m), "AI: Hi\n  [off-topic]");
        assert_eq!(format_message(&Message::user("q")), "You: q");
    }

    #[test]
    fn test_suggestion_numbering() {
        let out = format_suggestions(&["a".into(), "b".into()]);
        assert_eq!(out, "  1. a\n  2. b\n");
    }
}
