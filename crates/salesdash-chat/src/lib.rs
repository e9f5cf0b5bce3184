//! Chat side of salesdash.
//!
//! Provides the transcript store with its search projection, the follow-up
//! suggestion engine, the analytics API client, and the session controller
//! that owns all chat and dashboard state.

pub mod client;
pub mod controller;
pub mod error;
pub mod suggestions;
pub mod transcript;

pub use client::{AnalyticsClient, HttpAnalyticsClient};
pub use controller::{QueryOutcome, SessionController, SessionState};
pub use error::ChatError;
pub use suggestions::SuggestionEngine;
pub use transcript::{FilteredView, Transcript};
