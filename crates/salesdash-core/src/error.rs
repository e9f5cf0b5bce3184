use thiserror::Error;

/// Top-level error type for the salesdash system.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for SalesdashError` so that `?` works across
/// crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SalesdashError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for SalesdashError {
    fn from(err: toml::de::Error) -> Self {
        SalesdashError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SalesdashError {
    fn from(err: toml::ser::Error) -> Self {
        SalesdashError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SalesdashError {
    fn from(err: serde_json::Error) -> Self {
        SalesdashError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for salesdash operations.
pub type Result<T> = std::result::Result<T, SalesdashError>;
