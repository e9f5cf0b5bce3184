//! Session controller: the single owner of chat and dashboard state.
//!
//! Every state change goes through a transition method on
//! [`SessionController`] and is published as a [`SessionEvent`] to
//! subscribers. Transitions take `&mut self`, so at most one query is in
//! flight per controller.

use tokio::sync::broadcast;
use uuid::Uuid;

use salesdash_core::events::SessionEvent;
use salesdash_core::types::{
    ActiveFilters, DashboardData, FilterKey, Message, SuggestionContext,
};

use crate::client::AnalyticsClient;
use crate::error::ChatError;
use crate::suggestions::SuggestionEngine;
use crate::transcript::{FilteredView, Transcript};

/// Capacity of the event broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Snapshot of everything the chat panel and dashboard display.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    transcript: Transcript,
    suggestions: Vec<String>,
    suggestion_context: SuggestionContext,
    search_query: String,
    last_query_context: String,
    dashboard: Option<DashboardData>,
    filters: ActiveFilters,
    thinking: bool,
}

impl SessionState {
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn suggestion_context(&self) -> &SuggestionContext {
        &self.suggestion_context
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Text of the most recent user query, used to label exports.
    pub fn last_query_context(&self) -> &str {
        &self.last_query_context
    }

    pub fn dashboard(&self) -> Option<&DashboardData> {
        self.dashboard.as_ref()
    }

    pub fn filters(&self) -> &ActiveFilters {
        &self.filters
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// The transcript as currently projected by the search query.
    pub fn filtered(&self) -> FilteredView<'_> {
        self.transcript.filter(&self.search_query)
    }
}

/// How a submitted query ended.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The API answered; the reply was appended.
    Answered(Message),
    /// The request failed; the synthetic error reply was appended.
    Failed(String),
}

/// Owns [`SessionState`] and mutates it in response to user actions.
pub struct SessionController<C: AnalyticsClient> {
    id: Uuid,
    client: C,
    engine: SuggestionEngine,
    state: SessionState,
    events: broadcast::Sender<SessionEvent>,
}

impl<C: AnalyticsClient> SessionController<C> {
    pub fn new(client: C, engine: SuggestionEngine) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            id: Uuid::new_v4(),
            client,
            engine,
            state: SessionState::default(),
            events,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Publish a user-facing notice.
    pub fn notify(&self, notice: impl Into<String>) {
        self.emit(SessionEvent::Notice(notice.into()));
    }

    fn append(&mut self, message: Message) {
        let role = message.role;
        let index = self.state.transcript.append(message);
        self.emit(SessionEvent::MessageAppended { index, role });
    }

    fn set_thinking(&mut self, thinking: bool) {
        self.state.thinking = thinking;
        self.emit(SessionEvent::ThinkingChanged(thinking));
    }

    fn replace_dashboard(&mut self, data: DashboardData) {
        self.state.dashboard = Some(data);
        self.emit(SessionEvent::DashboardReplaced);
    }

    /// Send a chat query.
    ///
    /// Refuses blank input and input while a query is outstanding, with no
    /// side effects. Otherwise the user message is appended, the API is
    /// called with the transcript as it was before this query, and either the
    /// reply or the synthetic error reply is appended.
    pub async fn submit_query(&mut self, input: &str) -> Result<QueryOutcome, ChatError> {
        if input.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if self.state.thinking {
            return Err(ChatError::Busy);
        }

        let history = self.state.transcript.messages().to_vec();
        self.append(Message::user(input));
        self.state.last_query_context = input.to_string();
        self.set_thinking(true);

        let outcome = match self.client.query(input, &history).await {
            Ok(response) => {
                let context = SuggestionContext::from_exchange(input, &response);
                let base = response.suggestions.clone().unwrap_or_default();
                let suggestions = self.engine.derive(&base, &context);
                self.state.suggestion_context = context;

                let reply = Message::from_response(&response);
                self.append(reply.clone());

                self.state.suggestions = suggestions.clone();
                self.emit(SessionEvent::SuggestionsUpdated(suggestions));

                if let Some(data) = response.dashboard_data {
                    self.replace_dashboard(data);
                }

                tracing::info!(
                    session_id = %self.id,
                    function = reply.function_called.as_deref().unwrap_or("general"),
                    off_topic = reply.is_off_topic,
                    "Query answered"
                );
                QueryOutcome::Answered(reply)
            }
            Err(e) => {
                tracing::error!(session_id = %self.id, error = %e, "Query failed");
                self.append(Message::error_reply());
                QueryOutcome::Failed(e.to_string())
            }
        };

        self.set_thinking(false);
        Ok(outcome)
    }

    /// Suggestion at 1-based `position`.
    pub fn suggestion(&self, position: usize) -> Result<&str, ChatError> {
        position
            .checked_sub(1)
            .and_then(|i| self.state.suggestions.get(i))
            .map(String::as_str)
            .ok_or(ChatError::NoSuchSuggestion(position))
    }

    /// Send the suggestion at 1-based `position` as a query.
    pub async fn submit_suggestion(&mut self, position: usize) -> Result<QueryOutcome, ChatError> {
        let query = self.suggestion(position)?.to_string();
        self.submit_query(&query).await
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
        self.emit(SessionEvent::SearchChanged(self.state.search_query.clone()));
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    /// Empty transcript, suggestions, search, and query context together.
    pub fn clear_chat(&mut self) {
        self.state.transcript.clear();
        self.state.suggestions.clear();
        self.state.search_query.clear();
        self.state.last_query_context.clear();
        self.state.suggestion_context = SuggestionContext::default();
        tracing::info!(session_id = %self.id, "Chat cleared");
        self.emit(SessionEvent::Cleared);
    }

    /// Select a filter value and re-query the dashboard.
    ///
    /// Returns whether the dashboard was replaced. A failed re-query keeps
    /// the current dashboard and publishes a notice.
    pub async fn apply_filter(&mut self, key: FilterKey, value: &str) -> bool {
        self.state.filters.set(key, value);
        self.emit(SessionEvent::FiltersChanged(self.state.filters.clone()));
        let query = self.state.filters.to_query();
        self.refresh_dashboard(&query).await
    }

    /// Drop one filter without re-querying.
    pub fn remove_filter(&mut self, key: FilterKey) {
        if self.state.filters.remove(key).is_some() {
            self.emit(SessionEvent::FiltersChanged(self.state.filters.clone()));
        }
    }

    /// Drop all filters and re-query the unfiltered dashboard.
    pub async fn clear_filters(&mut self) -> bool {
        self.state.filters.clear();
        self.emit(SessionEvent::FiltersChanged(ActiveFilters::new()));
        let query = self.state.filters.to_query();
        self.refresh_dashboard(&query).await
    }

    async fn refresh_dashboard(&mut self, query: &str) -> bool {
        match self.client.query(query, &[]).await {
            Ok(response) => match response.dashboard_data {
                Some(data) => {
                    self.replace_dashboard(data);
                    true
                }
                None => {
                    tracing::debug!(query, "Filter query returned no dashboard data");
                    false
                }
            },
            Err(e) => {
                tracing::error!(error = %e, query, "Error applying filter");
                self.notify(format!("Could not refresh dashboard: {e}"));
                false
            }
        }
    }
}
