//! Shared foundation for salesdash: configuration, domain types, session
//! events, and the top-level error type.

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::{Environment, EnvironmentProfile, SalesdashConfig};
pub use error::{Result, SalesdashError};
pub use events::SessionEvent;
pub use types::*;
