//! CLI argument definitions for the salesdash binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use salesdash_core::config::{API_URL_VAR, WS_URL_VAR};
use salesdash_core::{Environment, EnvironmentProfile, SalesdashConfig};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_VAR: &str = "SALESDASH_CONFIG";

/// salesdash: chat with the sales analytics API, view the dashboard, export reports.
#[derive(Parser, Debug)]
#[command(name = "salesdash", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Chat endpoint URL, overriding environment and config file.
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Deployment environment (development, production, test).
    #[arg(short = 'e', long = "env", global = true)]
    pub env: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Directory exported reports are written to.
    #[arg(short = 'o', long = "output-dir", global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat session.
    Chat,
    /// Send one query and print the answer, suggestions and dashboard.
    Ask {
        /// The question to ask.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Export the suggestion list after answering.
        #[arg(long)]
        export_suggestions: bool,
        /// Export the transcript after answering.
        #[arg(long)]
        export_transcript: bool,
    },
    /// Build a dashboard snapshot report from a PNG capture.
    Snapshot {
        /// PNG image of the rendered dashboard.
        #[arg(long)]
        image: PathBuf,
        /// Location shown in the file name.
        #[arg(long)]
        location: Option<String>,
        /// Ask this question first and export its dashboard. Without it the
        /// capture is always exported.
        #[arg(long)]
        query: Option<String>,
    },
    /// Print the resolved environment profile.
    Config,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SALESDASH_CONFIG env var > ~/.salesdash/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var(CONFIG_VAR) {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the environment profile.
    ///
    /// Priority for the environment: --env > SALESDASH_ENV > config file.
    /// Priority for the API URL: --api-url > SALESDASH_API_URL > config file.
    pub fn resolve_profile(&self, config: &SalesdashConfig) -> EnvironmentProfile {
        let profile = match self.env.as_deref() {
            Some(name) => {
                let environment = Environment::resolve(Some(name));
                let api = std::env::var(API_URL_VAR)
                    .ok()
                    .or_else(|| config.api.api_url.clone());
                let ws = std::env::var(WS_URL_VAR).ok();
                EnvironmentProfile::resolve(environment, api.as_deref(), ws.as_deref())
            }
            None => config.profile(),
        };
        profile.with_api_url(self.api_url.as_deref())
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value. A debug profile raises
    /// the stock `info` level to `debug`.
    pub fn resolve_log_level(&self, config_level: &str, debug: bool) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        if debug && config_level.eq_ignore_ascii_case("info") {
            return "debug".to_string();
        }
        config_level.to_string()
    }

    /// Resolve the report output directory.
    ///
    /// Priority: --output-dir flag > config file value.
    pub fn resolve_output_dir(&self, config_dir: &str) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(config_dir))
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".salesdash").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".salesdash").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_ask() {
        let cli = parse(&["salesdash", "ask", "total", "sales", "--export-suggestions"]);
        match cli.command {
            Command::Ask {
                query,
                export_suggestions,
                export_transcript,
            } => {
                assert_eq!(query.join(" "), "total sales");
                assert!(export_suggestions);
                assert!(!export_transcript);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["salesdash", "chat", "--env", "prod", "-o", "/tmp/out"]);
        assert_eq!(cli.env.as_deref(), Some("prod"));
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
        assert!(matches!(cli.command, Command::Chat));
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(CliArgs::try_parse_from(["salesdash", "ask"]).is_err());
    }

    #[test]
    fn test_snapshot_args() {
        let cli = parse(&["salesdash", "snapshot", "--image", "d.png", "--location", "Texas"]);
        match cli.command {
            Command::Snapshot {
                image,
                location,
                query,
            } => {
                assert_eq!(image, PathBuf::from("d.png"));
                assert_eq!(location.as_deref(), Some("Texas"));
                assert!(query.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_query_arg() {
        let cli = parse(&["salesdash", "snapshot", "--image", "d.png", "--query", "sales in Ohio"]);
        match cli.command {
            Command::Snapshot { query, location, .. } => {
                assert_eq!(query.as_deref(), Some("sales in Ohio"));
                assert!(location.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_config_path_flag_wins() {
        let cli = parse(&["salesdash", "--config", "/etc/sd.toml", "config"]);
        assert_eq!(cli.resolve_config_path(), PathBuf::from("/etc/sd.toml"));
    }

    #[test]
    fn test_api_url_flag_applies_outside_test() {
        let cli = parse(&[
            "salesdash",
            "--env",
            "production",
            "--api-url",
            "https://example.com/chat",
            "config",
        ]);
        let profile = cli.resolve_profile(&SalesdashConfig::default());
        assert_eq!(profile.environment, Environment::Production);
        assert_eq!(profile.api_url, "https://example.com/chat");
        assert!(!profile.debug);
    }

    #[test]
    fn test_test_profile_ignores_api_url_flag() {
        let cli = parse(&[
            "salesdash",
            "--env",
            "test",
            "--api-url",
            "https://example.com/chat",
            "config",
        ]);
        let profile = cli.resolve_profile(&SalesdashConfig::default());
        assert_eq!(profile.api_url, "http://localhost:5001/chat");
    }

    #[test]
    fn test_resolve_output_dir_and_log_level() {
        let cli = parse(&["salesdash", "config"]);
        assert_eq!(cli.resolve_output_dir("reports"), PathBuf::from("reports"));
        assert_eq!(cli.resolve_log_level("warn", false), "warn");
        assert_eq!(cli.resolve_log_level("warn", true), "warn");
        assert_eq!(cli.resolve_log_level("info", true), "debug");
        assert_eq!(cli.resolve_log_level("info", false), "info");
        let cli = parse(&["salesdash", "-l", "error", "config"]);
        assert_eq!(cli.resolve_log_level("warn", true), "error");
    }
}
