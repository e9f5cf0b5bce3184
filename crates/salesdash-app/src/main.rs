//! salesdash binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Resolve the environment profile (API endpoint, debug flag)
//! 3. Build the analytics client, session controller and report exporter
//! 4. Run the requested command: interactive chat, one-shot query,
//!    dashboard snapshot export, or profile display

mod capture;
mod cli;
mod repl;
mod terminal;

use std::time::Duration;

use chrono::Local;
use clap::Parser;

use salesdash_chat::{HttpAnalyticsClient, SessionController, SuggestionEngine};
use salesdash_core::types::{DashboardData, SalesSummary};
use salesdash_core::{EnvironmentProfile, SalesdashConfig};
use salesdash_report::{ExportError, PdfBackend, ReportExporter};

use crate::capture::PngCapture;
use crate::cli::{CliArgs, Command};
use crate::repl::{ExportTarget, Repl, ReplCommand};

type AppRepl = Repl<HttpAnalyticsClient, PdfBackend>;

fn build_repl(
    config: &SalesdashConfig,
    profile: &EnvironmentProfile,
    exporter: ReportExporter<PdfBackend>,
) -> Result<AppRepl, Box<dyn std::error::Error>> {
    let client = HttpAnalyticsClient::new(
        profile.api_url.clone(),
        Duration::from_secs(config.api.timeout_secs),
    )?;
    let controller =
        SessionController::new(client, SuggestionEngine::from_config(&config.suggestions));
    tracing::info!(
        session_id = %controller.id(),
        api_url = %profile.api_url,
        environment = %profile.environment,
        "Session started"
    );
    Ok(Repl::new(controller, exporter))
}

/// Where the dashboard behind a snapshot comes from.
#[derive(Debug)]
enum SnapshotSource {
    /// A capture with no session behind it; always exportable.
    Standalone,
    /// The dashboard left by a query, if the query produced one.
    Queried(Option<DashboardData>),
}

/// Dashboard data handed to the snapshot export. `--location` overrides the
/// location reported by a queried dashboard.
fn snapshot_data(source: SnapshotSource, location: Option<String>) -> Option<DashboardData> {
    match source {
        SnapshotSource::Standalone => Some(DashboardData {
            summary: Some(SalesSummary {
                location,
                ..Default::default()
            }),
            ..Default::default()
        }),
        SnapshotSource::Queried(data) => data.map(|mut data| {
            if let (Some(summary), Some(location)) = (data.summary.as_mut(), location) {
                summary.location = Some(location);
            }
            data
        }),
    }
}

fn export_snapshot(
    exporter: &ReportExporter<PdfBackend>,
    capture: &PngCapture,
    data: Option<&DashboardData>,
) -> Result<(), ExportError> {
    match exporter.export_dashboard(capture, data, &Local::now()) {
        Ok(path) => {
            println!("Exported {}", path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Error generating PDF");
            Err(e)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliArgs::parse();

    let config_file = cli.resolve_config_path();
    let config = SalesdashConfig::load_or_default(&config_file);

    let profile = cli.resolve_profile(&config);

    // Tracing.
    let log_level = cli.resolve_log_level(&config.general.log_level, profile.debug);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(path = %config_file.display(), "Configuration resolved");

    let output_dir = cli.resolve_output_dir(&config.export.output_dir);
    let exporter = ReportExporter::new(PdfBackend, output_dir, config.export.context_max_len);

    match cli.command {
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&profile)?);
            println!("config file: {}", config_file.display());
        }

        Command::Chat => {
            let mut repl = build_repl(&config, &profile, exporter)?;
            repl.run().await?;
        }

        Command::Ask {
            query,
            export_suggestions,
            export_transcript,
        } => {
            let mut repl = build_repl(&config, &profile, exporter)?;
            println!("{}", repl.execute(ReplCommand::Ask(query.join(" "))).await);
            if repl.controller().state().dashboard().is_some() {
                println!("{}", repl.execute(ReplCommand::Dashboard).await);
            }
            if export_suggestions {
                let target = ReplCommand::Export(ExportTarget::Suggestions);
                println!("{}", repl.execute(target).await);
            }
            if export_transcript {
                let target = ReplCommand::Export(ExportTarget::Transcript);
                println!("{}", repl.execute(target).await);
            }
        }

        Command::Snapshot {
            image,
            location,
            query,
        } => {
            let capture = PngCapture::new(image);
            match query {
                Some(query) => {
                    let mut repl = build_repl(&config, &profile, exporter)?;
                    println!("{}", repl.execute(ReplCommand::Ask(query)).await);
                    let dashboard = repl.controller().state().dashboard().cloned();
                    let data = snapshot_data(SnapshotSource::Queried(dashboard), location);
                    export_snapshot(repl.exporter(), &capture, data.as_ref())?;
                }
                None => {
                    let data = snapshot_data(SnapshotSource::Standalone, location);
                    export_snapshot(&exporter, &capture, data.as_ref())?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_report::{ExportKind, Raster, RecordingBackend, StaticCapture};

    fn queried(location: &str) -> DashboardData {
        DashboardData {
            summary: Some(SalesSummary {
                total_sales: Some(1000.0),
                location: Some(location.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_standalone_snapshot_always_has_summary() {
        let data = snapshot_data(SnapshotSource::Standalone, None).unwrap();
        assert!(data.summary.is_some());
        let data = snapshot_data(SnapshotSource::Standalone, Some("Texas".into())).unwrap();
        assert_eq!(data.summary.unwrap().location.as_deref(), Some("Texas"));
    }

    #[test]
    fn test_queried_snapshot_keeps_or_overrides_location() {
        let data = snapshot_data(SnapshotSource::Queried(Some(queried("Ohio"))), None).unwrap();
        assert_eq!(data.summary.unwrap().location.as_deref(), Some("Ohio"));

        let data = snapshot_data(
            SnapshotSource::Queried(Some(queried("Ohio"))),
            Some("Texas".into()),
        )
        .unwrap();
        assert_eq!(data.summary.unwrap().location.as_deref(), Some("Texas"));
    }

    #[test]
    fn test_query_without_dashboard_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ReportExporter::new(RecordingBackend::default(), dir.path(), 20);
        let capture = StaticCapture(Raster::new(2, 2, vec![255; 12]).unwrap());

        for source in [
            SnapshotSource::Queried(None),
            SnapshotSource::Queried(Some(DashboardData::default())),
        ] {
            let data = snapshot_data(source, Some("Texas".into()));
            let err = exporter
                .export_dashboard(&capture, data.as_ref(), &Local::now())
                .unwrap_err();
            assert!(matches!(err, ExportError::NothingToExport(ExportKind::Dashboard)));
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
