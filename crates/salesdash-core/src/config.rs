use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SalesdashError};

/// Environment variable selecting the deployment environment.
pub const ENV_VAR: &str = "SALESDASH_ENV";
/// Environment variable overriding the chat endpoint URL.
pub const API_URL_VAR: &str = "SALESDASH_API_URL";
/// Environment variable overriding the websocket URL.
pub const WS_URL_VAR: &str = "SALESDASH_WS_URL";

// =============================================================================
// Environment resolution
// =============================================================================

/// Deployment environment the client runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
            Environment::Test => write!(f, "test"),
        }
    }
}

impl FromStr for Environment {
    type Err = SalesdashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(SalesdashError::Config(format!(
                "unknown environment: {other}"
            ))),
        }
    }
}

impl Environment {
    /// Resolve an environment from an optional name.
    ///
    /// Unset selects development. Unknown names log a warning and also
    /// select development.
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            None => Environment::Development,
            Some(n) => n.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to development environment");
                Environment::Development
            }),
        }
    }

    /// Resolve from the `SALESDASH_ENV` variable.
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(ENV_VAR).ok().as_deref())
    }

    fn default_api_url(&self) -> &'static str {
        match self {
            Environment::Development | Environment::Test => "http://localhost:5001/chat",
            Environment::Production => "https://your-production-api.com/chat",
        }
    }

    fn default_ws_url(&self) -> &'static str {
        match self {
            Environment::Development | Environment::Test => "ws://localhost:5001",
            Environment::Production => "wss://your-production-api.com",
        }
    }
}

/// Endpoint and debug settings selected by an [`Environment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentProfile {
    pub api_url: String,
    pub ws_url: String,
    pub environment: Environment,
    pub debug: bool,
}

impl EnvironmentProfile {
    /// Build the profile for `environment`, applying URL overrides.
    ///
    /// The test profile is fixed and ignores overrides.
    pub fn resolve(
        environment: Environment,
        api_url_override: Option<&str>,
        ws_url_override: Option<&str>,
    ) -> Self {
        let pick = |over: Option<&str>, default: &str| -> String {
            match (environment, over) {
                (Environment::Test, _) | (_, None) => default.to_string(),
                (_, Some(url)) if url.trim().is_empty() => default.to_string(),
                (_, Some(url)) => url.trim().to_string(),
            }
        };

        Self {
            api_url: pick(api_url_override, environment.default_api_url()),
            ws_url: pick(ws_url_override, environment.default_ws_url()),
            environment,
            debug: !matches!(environment, Environment::Production),
        }
    }

    /// Build the profile from `SALESDASH_API_URL` and `SALESDASH_WS_URL`.
    pub fn from_env(environment: Environment) -> Self {
        let api = std::env::var(API_URL_VAR).ok();
        let ws = std::env::var(WS_URL_VAR).ok();
        Self::resolve(environment, api.as_deref(), ws.as_deref())
    }

    /// Replace the API URL (CLI flag or config file), except in test.
    pub fn with_api_url(mut self, url: Option<&str>) -> Self {
        if let (Some(url), false) = (url, self.environment == Environment::Test) {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }
        self
    }
}

// =============================================================================
// File configuration
// =============================================================================

/// Top-level configuration for salesdash.
///
/// Loaded from `~/.salesdash/config.toml` by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesdashConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl SalesdashConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SalesdashConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is missing
    /// or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Resolve the environment profile: `SALESDASH_ENV` wins over the file,
    /// environment URL variables win over the file's `api_url`.
    pub fn profile(&self) -> EnvironmentProfile {
        let environment = match std::env::var(ENV_VAR) {
            Ok(name) => Environment::resolve(Some(&name)),
            Err(_) => Environment::resolve(self.general.environment.as_deref()),
        };
        let from_env = std::env::var(API_URL_VAR).ok();
        let ws = std::env::var(WS_URL_VAR).ok();
        let api = from_env.or_else(|| self.api.api_url.clone());
        EnvironmentProfile::resolve(environment, api.as_deref(), ws.as_deref())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Environment name; `SALESDASH_ENV` takes precedence.
    pub environment: Option<String>,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            environment: None,
            log_level: "info".to_string(),
        }
    }
}

/// Remote analytics API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Chat endpoint override.
    pub api_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: 30,
        }
    }
}

/// Report export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory generated PDFs are written to.
    pub output_dir: String,
    /// Maximum length of the context fragment embedded in filenames.
    pub context_max_len: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            context_max_len: 20,
        }
    }
}

/// Follow-up suggestion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Cap on the number of displayed suggestions.
    pub max_suggestions: usize,
    /// Total-sales figure separating improvement from success suggestions.
    pub sales_threshold: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 5,
            sales_threshold: 100_000.0,
        }
    }
}

/// Dashboard quick-filter lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub available_states: Vec<String>,
    pub available_categories: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            available_states: ["California", "Texas", "Florida", "New York", "Nevada", "Illinois"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            available_categories: ["Furniture", "Technology", "Office Supplies"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("PRODUCTION".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(" test ".parse::<Environment>().unwrap(), Environment::Test);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_resolve_defaults_to_development() {
        assert_eq!(Environment::resolve(None), Environment::Development);
        assert_eq!(Environment::resolve(Some("staging")), Environment::Development);
        assert_eq!(Environment::resolve(Some("production")), Environment::Production);
    }

    #[test]
    fn test_profile_defaults() {
        let dev = EnvironmentProfile::resolve(Environment::Development, None, None);
        assert_eq!(dev.api_url, "http://localhost:5001/chat");
        assert_eq!(dev.ws_url, "ws://localhost:5001");
        assert!(dev.debug);

        let prod = EnvironmentProfile::resolve(Environment::Production, None, None);
        assert_eq!(prod.api_url, "https://your-production-api.com/chat");
        assert_eq!(prod.ws_url, "wss://your-production-api.com");
        assert!(!prod.debug);
    }

    #[test]
    fn test_profile_override() {
        let prod = EnvironmentProfile::resolve(
            Environment::Production,
            Some("https://analytics.example.com/chat"),
            None,
        );
        assert_eq!(prod.api_url, "https://analytics.example.com/chat");
        assert_eq!(prod.ws_url, "wss://your-production-api.com");
    }

    #[test]
    fn test_profile_blank_override_ignored() {
        let dev = EnvironmentProfile::resolve(Environment::Development, Some("  "), None);
        assert_eq!(dev.api_url, "http://localhost:5001/chat");
    }

    #[test]
    fn test_test_profile_ignores_overrides() {
        let test = EnvironmentProfile::resolve(
            Environment::Test,
            Some("https://elsewhere/chat"),
            Some("wss://elsewhere"),
        );
        assert_eq!(test.api_url, "http://localhost:5001/chat");
        assert_eq!(test.ws_url, "ws://localhost:5001");
        assert!(test.debug);

        let test = test.with_api_url(Some("https://cli/chat"));
        assert_eq!(test.api_url, "http://localhost:5001/chat");
    }

    #[test]
    fn test_with_api_url() {
        let dev = EnvironmentProfile::resolve(Environment::Development, None, None)
            .with_api_url(Some("http://10.0.0.5:5001/chat"));
        assert_eq!(dev.api_url, "http://10.0.0.5:5001/chat");

        let dev = dev.with_api_url(None);
        assert_eq!(dev.api_url, "http://10.0.0.5:5001/chat");
    }

    #[test]
    fn test_default_config() {
        let config = SalesdashConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert!(config.general.environment.is_none());
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.export.output_dir, ".");
        assert_eq!(config.export.context_max_len, 20);
        assert_eq!(config.suggestions.max_suggestions, 5);
        assert_eq!(config.suggestions.sales_threshold, 100_000.0);
        assert_eq!(config.dashboard.available_states.len(), 6);
        assert_eq!(config.dashboard.available_categories.len(), 3);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[general]
environment = "production"

[suggestions]
sales_threshold = 50000.0
"#;
        let file = create_temp_config(content);
        let config = SalesdashConfig::load(file.path()).unwrap();
        assert_eq!(config.general.environment.as_deref(), Some("production"));
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.suggestions.sales_threshold, 50_000.0);
        assert_eq!(config.suggestions.max_suggestions, 5);
        assert_eq!(config.export.context_max_len, 20);
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("[general\nlog_level = ");
        let err = SalesdashConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, SalesdashError::Config(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = SalesdashConfig::load_or_default(Path::new("/nonexistent/salesdash.toml"));
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = SalesdashConfig::default();
        config.api.api_url = Some("http://analytics.local/chat".to_string());
        config.export.output_dir = "/tmp/reports".to_string();
        config.save(&path).unwrap();

        let loaded = SalesdashConfig::load(&path).unwrap();
        assert_eq!(loaded.api.api_url.as_deref(), Some("http://analytics.local/chat"));
        assert_eq!(loaded.export.output_dir, "/tmp/reports");
    }
}
