use serde::{Deserialize, Serialize};

use crate::types::{ActiveFilters, Role};

/// State transitions published by the session controller.
///
/// Consumed by renderers (terminal, chart presenter) through a broadcast
/// subscription instead of implicit re-render triggers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SessionEvent {
    /// A message was appended to the transcript at `index`.
    MessageAppended { index: usize, role: Role },

    /// A query started (`true`) or finished (`false`).
    ThinkingChanged(bool),

    /// The suggestion list was re-derived.
    SuggestionsUpdated(Vec<String>),

    /// A new dashboard snapshot replaced the previous one.
    DashboardReplaced,

    /// The active dashboard filters changed.
    FiltersChanged(ActiveFilters),

    /// The transcript search query changed.
    SearchChanged(String),

    /// Transcript, suggestions, and search were cleared together.
    Cleared,

    /// A user-facing notice (refused export, failed filter, ...).
    Notice(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = SessionEvent::MessageAppended {
            index: 3,
            role: Role::Model,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("MessageAppended"));
        assert!(json.contains("\"model\""));

        let back: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_notice_event() {
        let event = SessionEvent::Notice("No suggestions available to download".into());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["Notice"], "No suggestions available to download");
    }
}
