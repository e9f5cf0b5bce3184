//! Shared domain types: chat messages, dashboard snapshots, filters, and the
//! request/response contract of the remote analytics API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SalesdashError;

/// Text of the synthetic model message appended when a query fails.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Deserialize `null` as the type's default (the API sends `null` arrays).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Messages
// =============================================================================

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(alias = "assistant")]
    Model,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Model => write!(f, "model"),
        }
    }
}

/// A single transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireMessage", into = "WireMessage")]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub function_called: Option<String>,
    pub is_off_topic: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            function_called: None,
            is_off_topic: false,
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            function_called: None,
            is_off_topic: false,
        }
    }

    /// The model reply carried by an API response.
    pub fn from_response(response: &ChatResponse) -> Self {
        Self {
            role: Role::Model,
            text: response.answer.clone(),
            function_called: response.function_called.clone(),
            is_off_topic: response.is_off_topic.unwrap_or(false),
        }
    }

    /// The synthetic reply used when a query fails.
    pub fn error_reply() -> Self {
        Self::model(ERROR_REPLY)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WirePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini-style wire shape: `{ role, parts: [{ text }], functionCalled, isOffTopic }`.
/// Flat `content`/`text` fields are accepted on input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMessage {
    role: Role,
    #[serde(default, deserialize_with = "null_as_default")]
    parts: Vec<WirePart>,
    #[serde(default, skip_serializing)]
    content: Option<String>,
    #[serde(default, skip_serializing)]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_called: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_off_topic: Option<bool>,
}

impl From<WireMessage> for Message {
    fn from(wire: WireMessage) -> Self {
        let text = wire
            .parts
            .into_iter()
            .next()
            .and_then(|p| p.text)
            .or(wire.content)
            .or(wire.text)
            .unwrap_or_default();
        Self {
            role: wire.role,
            text,
            function_called: wire.function_called,
            is_off_topic: wire.is_off_topic.unwrap_or(false),
        }
    }
}

impl From<Message> for WireMessage {
    fn from(msg: Message) -> Self {
        Self {
            role: msg.role,
            parts: vec![WirePart {
                text: Some(msg.text),
            }],
            content: None,
            text: None,
            function_called: msg.function_called,
            is_off_topic: msg.is_off_topic.then_some(true),
        }
    }
}

// =============================================================================
// Dashboard snapshot
// =============================================================================

/// Headline KPIs of a dashboard snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesSummary {
    pub total_sales: Option<f64>,
    pub total_transactions: Option<f64>,
    pub avg_transaction_value: Option<f64>,
    pub location: Option<String>,
}

impl SalesSummary {
    pub fn total_sales_or_zero(&self) -> f64 {
        self.total_sales.unwrap_or(0.0)
    }

    pub fn total_transactions_or_zero(&self) -> f64 {
        self.total_transactions.unwrap_or(0.0)
    }

    pub fn avg_transaction_value_or_zero(&self) -> f64 {
        self.avg_transaction_value.unwrap_or(0.0)
    }

    /// Location label, `None` when absent or blank.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryEntry {
    pub category: Option<String>,
    pub sales: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityEntry {
    pub city: Option<String>,
    pub sales: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSeriesEntry {
    pub date: Option<String>,
    pub sales: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapEntry {
    pub state: Option<String>,
    pub sales: Option<f64>,
}

/// Chart inputs of a dashboard snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartData {
    #[serde(deserialize_with = "null_as_default")]
    pub category_breakdown: Vec<CategoryEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub city_breakdown: Vec<CityEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub time_series: Vec<TimeSeriesEntry>,
}

/// The analytics snapshot returned by the remote service.
///
/// Replaced wholesale on every response that carries one; never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardData {
    pub summary: Option<SalesSummary>,
    pub chart_data: Option<ChartData>,
    #[serde(deserialize_with = "null_as_default")]
    pub map_data: Vec<MapEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub insights: Vec<String>,
}

impl DashboardData {
    /// A snapshot without a summary has nothing to show.
    pub fn has_summary(&self) -> bool {
        self.summary.is_some()
    }

    pub fn chart_data_or_empty(&self) -> ChartData {
        self.chart_data.clone().unwrap_or_default()
    }
}

// =============================================================================
// Suggestion context
// =============================================================================

/// Context the follow-up suggestions are derived from.
///
/// Replaced wholesale after each exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionContext {
    pub last_query: String,
    pub query_type: String,
    pub metrics: Option<SalesSummary>,
}

impl SuggestionContext {
    /// Build the context for the exchange `query` → `response`.
    pub fn from_exchange(query: &str, response: &ChatResponse) -> Self {
        Self {
            last_query: query.to_string(),
            query_type: response
                .function_called
                .clone()
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| "general".to_string()),
            metrics: response
                .dashboard_data
                .as_ref()
                .and_then(|d| d.summary.clone()),
        }
    }

    /// Total sales figure, present only when non-zero.
    pub fn total_sales(&self) -> Option<f64> {
        self.metrics
            .as_ref()
            .and_then(|m| m.total_sales)
            .filter(|v| *v != 0.0 && !v.is_nan())
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Dashboard filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    State,
    Category,
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKey::State => write!(f, "state"),
            FilterKey::Category => write!(f, "category"),
        }
    }
}

impl FromStr for FilterKey {
    type Err = SalesdashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "state" => Ok(FilterKey::State),
            "category" => Ok(FilterKey::Category),
            other => Err(SalesdashError::Config(format!("unknown filter: {other}"))),
        }
    }
}

/// Selected dashboard filters, in the order they were first selected.
///
/// Re-selecting a key keeps its position; removing it and selecting it again
/// moves it to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilters(Vec<(FilterKey, String)>);

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `value` for `key`. An empty value clears the key.
    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.remove(key);
            return;
        }
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: FilterKey) -> Option<String> {
        let pos = self.0.iter().position(|(k, _)| *k == key)?;
        Some(self.0.remove(pos).1)
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Natural-language query asking for the filtered data set.
    pub fn to_query(&self) -> String {
        if self.is_empty() {
            return "Show me all sales data".to_string();
        }
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        format!("Show me sales data for {}", parts.join(", "))
    }
}

// =============================================================================
// API contract
// =============================================================================

/// Body of `POST <chat endpoint>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub query: String,
    pub chat_history: Vec<Message>,
}

/// Response of the chat endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub answer: String,
    pub function_called: Option<String>,
    pub is_off_topic: Option<bool>,
    pub suggestions: Option<Vec<String>>,
    pub dashboard_data: Option<DashboardData>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_serializes_to_parts() {
        let msg = Message::user("What were total sales?");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({"role": "user", "parts": [{"text": "What were total sales?"}]})
        );
    }

    #[test]
    fn test_message_serializes_annotations() {
        let msg = Message {
            role: Role::Model,
            text: "Off topic".into(),
            function_called: Some("get_sales_summary".into()),
            is_off_topic: true,
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["functionCalled"], "get_sales_summary");
        assert_eq!(value["isOffTopic"], true);
    }

    #[test]
    fn test_message_deserializes_flat_content() {
        let msg: Message =
            serde_json::from_value(json!({"role": "model", "content": "hello"})).unwrap();
        assert_eq!(msg.role, Role::Model);
        assert_eq!(msg.text, "hello");
        assert!(!msg.is_off_topic);
    }

    #[test]
    fn test_message_deserializes_missing_text() {
        let msg: Message = serde_json::from_value(json!({"role": "assistant"})).unwrap();
        assert_eq!(msg.role, Role::Model);
        assert_eq!(msg.text, "");
    }

    #[test]
    fn test_dashboard_tolerates_nulls_and_missing_fields() {
        let data: DashboardData = serde_json::from_value(json!({
            "summary": {"totalSales": 1200.5},
            "chartData": {"categoryBreakdown": null},
            "mapData": null
        }))
        .unwrap();
        let summary = data.summary.as_ref().unwrap();
        assert_eq!(summary.total_sales_or_zero(), 1200.5);
        assert_eq!(summary.total_transactions_or_zero(), 0.0);
        assert!(summary.location().is_none());
        assert!(data.chart_data_or_empty().category_breakdown.is_empty());
        assert!(data.map_data.is_empty());
        assert!(data.insights.is_empty());
    }

    #[test]
    fn test_response_parses_full_payload() {
        let resp: ChatResponse = serde_json::from_value(json!({
            "answer": "Total sales were $50,000",
            "functionCalled": "get_sales_summary",
            "isOffTopic": false,
            "suggestions": ["Show top products"],
            "dashboardData": {
                "summary": {"totalSales": 50000, "location": "California"},
                "chartData": {
                    "cityBreakdown": [{"city": "Los Angeles", "sales": 30000}],
                    "timeSeries": [{"date": "2024-01-01", "sales": 100}]
                },
                "insights": ["LA leads"]
            }
        }))
        .unwrap();
        assert_eq!(resp.suggestions.as_deref(), Some(&["Show top products".to_string()][..]));
        let data = resp.dashboard_data.unwrap();
        assert_eq!(data.summary.unwrap().location.as_deref(), Some("California"));
        assert_eq!(data.chart_data.unwrap().city_breakdown.len(), 1);
        assert_eq!(data.insights, vec!["LA leads"]);
    }

    #[test]
    fn test_suggestion_context_from_exchange() {
        let resp = ChatResponse {
            answer: "ok".into(),
            dashboard_data: Some(DashboardData {
                summary: Some(SalesSummary {
                    total_sales: Some(50_000.0),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let ctx = SuggestionContext::from_exchange("What were total sales?", &resp);
        assert_eq!(ctx.last_query, "What were total sales?");
        assert_eq!(ctx.query_type, "general");
        assert_eq!(ctx.total_sales(), Some(50_000.0));
    }

    #[test]
    fn test_zero_total_sales_is_absent() {
        let ctx = SuggestionContext {
            metrics: Some(SalesSummary {
                total_sales: Some(0.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(ctx.total_sales(), None);
    }

    #[test]
    fn test_filters_keep_selection_order() {
        let mut filters = ActiveFilters::new();
        filters.set(FilterKey::State, "Texas");
        filters.set(FilterKey::Category, "Furniture");
        filters.set(FilterKey::State, "Ohio");
        assert_eq!(
            filters.to_query(),
            "Show me sales data for state: Ohio, category: Furniture"
        );

        filters.remove(FilterKey::State);
        filters.set(FilterKey::State, "Utah");
        let keys: Vec<FilterKey> = filters.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![FilterKey::Category, FilterKey::State]);
        assert_eq!(filters.remove(FilterKey::State).as_deref(), Some("Utah"));
        assert!(filters.remove(FilterKey::State).is_none());
    }

    #[test]
    fn test_filters_query_text() {
        let mut filters = ActiveFilters::new();
        assert_eq!(filters.to_query(), "Show me all sales data");

        filters.set(FilterKey::Category, "Furniture");
        filters.set(FilterKey::State, "California");
        assert_eq!(
            filters.to_query(),
            "Show me sales data for category: Furniture, state: California"
        );

        filters.set(FilterKey::State, "");
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get(FilterKey::Category), Some("Furniture"));
        assert_eq!(filters.remove(FilterKey::Category).as_deref(), Some("Furniture"));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_filter_key_parse() {
        assert_eq!("State".parse::<FilterKey>().unwrap(), FilterKey::State);
        assert_eq!("category".parse::<FilterKey>().unwrap(), FilterKey::Category);
        assert!("region".parse::<FilterKey>().is_err());
    }
}
