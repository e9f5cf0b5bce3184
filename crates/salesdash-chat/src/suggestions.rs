//! Follow-up suggestion derivation.
//!
//! The displayed list is re-derived from the API's base suggestions and the
//! context of the exchange that produced them; it is never accumulated
//! across exchanges.

use salesdash_core::config::SuggestionConfig;
use salesdash_core::types::SuggestionContext;

/// Suggestions prepended when the query mentions sales.
pub const SALES_FOLLOW_UPS: [&str; 2] = [
    "Show me lowest performing regions",
    "Compare with last month",
];

/// Appended when total sales fall below the threshold.
pub const IMPROVE_SUGGESTION: &str = "How can we improve sales?";

/// Appended when total sales reach the threshold.
pub const SUCCESS_SUGGESTION: &str = "What drove this success?";

/// Derives the bounded suggestion list shown after each exchange.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    max_suggestions: usize,
    sales_threshold: f64,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::from_config(&SuggestionConfig::default())
    }
}

impl SuggestionEngine {
    pub fn new(max_suggestions: usize, sales_threshold: f64) -> Self {
        Self {
            max_suggestions,
            sales_threshold,
        }
    }

    pub fn from_config(config: &SuggestionConfig) -> Self {
        Self::new(config.max_suggestions, config.sales_threshold)
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    /// Derive the ordered, capped suggestion list.
    ///
    /// Contextual sales follow-ups go first, then the base list in its
    /// original order, then one metric-driven suggestion. Entries past the
    /// cap are dropped, later ones first.
    pub fn derive(&self, base: &[String], context: &SuggestionContext) -> Vec<String> {
        let mut derived: Vec<String> = Vec::with_capacity(base.len() + 3);

        if context.last_query.to_lowercase().contains("sales") {
            derived.extend(SALES_FOLLOW_UPS.iter().map(|s| s.to_string()));
        }

        derived.extend(base.iter().cloned());

        if let Some(total) = context.total_sales() {
            let follow_up = if total < self.sales_threshold {
                IMPROVE_SUGGESTION
            } else {
                SUCCESS_SUGGESTION
            };
            derived.push(follow_up.to_string());
        }

        derived.truncate(self.max_suggestions);
        tracing::debug!(count = derived.len(), "Suggestions derived");
        derived
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_core::types::SalesSummary;

    fn context(query: &str, total_sales: Option<f64>) -> SuggestionContext {
        SuggestionContext {
            last_query: query.to_string(),
            query_type: "general".to_string(),
            metrics: total_sales.map(|t| SalesSummary {
                total_sales: Some(t),
                ..Default::default()
            }),
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sales_query_below_threshold() {
        let engine = SuggestionEngine::default();
        let out = engine.derive(
            &strings(&["Show top products"]),
            &context("What were total sales?", Some(50_000.0)),
        );
        assert_eq!(
            out,
            strings(&[
                "Show me lowest performing regions",
                "Compare with last month",
                "Show top products",
                "How can we improve sales?",
            ])
        );
    }

    #[test]
    fn test_threshold_is_inclusive_for_success() {
        let engine = SuggestionEngine::default();
        let out = engine.derive(&[], &context("revenue by city", Some(100_000.0)));
        assert_eq!(out, strings(&["What drove this success?"]));

        let out = engine.derive(&[], &context("revenue by city", Some(99_999.99)));
        assert_eq!(out, strings(&["How can we improve sales?"]));
    }

    #[test]
    fn test_sales_match_is_case_insensitive_substring() {
        let engine = SuggestionEngine::default();
        let out = engine.derive(&[], &context("Show SALESPEOPLE ranking", None));
        assert_eq!(out, strings(&SALES_FOLLOW_UPS));
    }

    #[test]
    fn test_no_context_keeps_base_order() {
        let engine = SuggestionEngine::default();
        let base = strings(&["b", "a", "c"]);
        assert_eq!(engine.derive(&base, &context("top cities", None)), base);
    }

    #[test]
    fn test_truncates_to_cap_dropping_later_entries() {
        let engine = SuggestionEngine::default();
        let base = strings(&["one", "two", "three", "four", "five", "six"]);
        let out = engine.derive(&base, &context("sales by region", Some(1.0)));
        assert_eq!(
            out,
            strings(&[
                "Show me lowest performing regions",
                "Compare with last month",
                "one",
                "two",
                "three",
            ])
        );
    }

    #[test]
    fn test_output_never_exceeds_cap() {
        let engine = SuggestionEngine::default();
        for n in 0..12 {
            let base: Vec<String> = (0..n).map(|i| format!("s{i}")).collect();
            for ctx in [
                context("sales", Some(10.0)),
                context("other", None),
                context("sales", None),
            ] {
                assert!(engine.derive(&base, &ctx).len() <= 5);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let engine = SuggestionEngine::default();
        let base = strings(&["x", "y"]);
        let ctx = context("sales trend", Some(250_000.0));
        assert_eq!(engine.derive(&base, &ctx), engine.derive(&base, &ctx));
    }

    #[test]
    fn test_zero_total_adds_no_metric_suggestion() {
        let engine = SuggestionEngine::default();
        let out = engine.derive(&strings(&["x"]), &context("top cities", Some(0.0)));
        assert_eq!(out, strings(&["x"]));
    }

    #[test]
    fn test_custom_cap_and_threshold() {
        let engine = SuggestionEngine::new(2, 10.0);
        let out = engine.derive(&strings(&["a"]), &context("q", Some(10.0)));
        assert_eq!(out, strings(&["a", "What drove this success?"]));
        let out = engine.derive(&strings(&["a"]), &context("sales", Some(10.0)));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_context_not_mutated() {
        let engine = SuggestionEngine::default();
        let ctx = context("sales", Some(5.0));
        let before = ctx.clone();
        let _ = engine.derive(&[], &ctx);
        assert_eq!(ctx, before);
    }
}
