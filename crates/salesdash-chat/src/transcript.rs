//! Ordered chat transcript with a search projection.
//!
//! Entries are only ever appended; the only removal is a full clear.
//! Searching yields a lazy, restartable view over the stored messages and
//! never touches the underlying order.

use salesdash_core::types::Message;

/// Ordered record of exchanged messages for one session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, returning its index.
    pub fn append(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    /// Case-insensitive substring view. A blank query matches everything.
    pub fn filter<'a>(&'a self, query: &str) -> FilteredView<'a> {
        FilteredView::new(&self.messages, query)
    }
}

/// Lazy view over the messages whose text contains a query.
///
/// Cloning the view restarts iteration from the first message.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    messages: &'a [Message],
    needle: Option<String>,
}

impl<'a> FilteredView<'a> {
    fn new(messages: &'a [Message], query: &str) -> Self {
        let trimmed = query.trim();
        let needle = (!trimmed.is_empty()).then(|| query.to_lowercase());
        Self { messages, needle }
    }

    /// Whether this view is the identity projection.
    pub fn is_identity(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches(&self, message: &Message) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => message.text.to_lowercase().contains(needle.as_str()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Message> + '_ {
        let messages: &'a [Message] = self.messages;
        messages.iter().filter(move |m| self.matches(m))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_vec(&self) -> Vec<Message> {
        self.iter().cloned().collect()
    }
}
