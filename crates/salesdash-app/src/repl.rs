//! Interactive chat loop.

use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;

use salesdash_charts::{ChartPresenter, DashboardView, PresentOutcome};
use salesdash_chat::{AnalyticsClient, QueryOutcome, SessionController};
use salesdash_core::types::FilterKey;
use salesdash_core::SessionEvent;
use salesdash_report::{DocumentBackend, ReportExporter};

use crate::terminal::{format_dashboard_header, format_message, format_suggestions, TerminalRenderer};

pub const HELP: &str = "\
Commands:
  <text>                         ask a question
  /search <text>                 show only matching messages
  /clear-search                  show all messages
  /clear                         clear the conversation
  /filter <state|category> <v>   filter the dashboard
  /unfilter <state|category>     drop one filter
  /clear-filters                 drop all filters and reload
  /suggest <n>                   ask suggestion n
  /export suggestions|transcript export a PDF report
  /dashboard                     show the dashboard
  /help                          show this help
  /quit                          exit";

/// Which text report to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Suggestions,
    Transcript,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Ask(String),
    Search(String),
    ClearSearch,
    Clear,
    Filter(FilterKey, String),
    Unfilter(FilterKey),
    ClearFilters,
    Suggest(usize),
    Export(ExportTarget),
    Dashboard,
    Help,
    Quit,
    Empty,
}

/// Parse an input line. Errors are user-facing messages.
pub fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplCommand::Empty);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(ReplCommand::Ask(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "search" if !arg.is_empty() => Ok(ReplCommand::Search(arg.to_string())),
        "search" | "clear-search" => Ok(ReplCommand::ClearSearch),
        "clear" => Ok(ReplCommand::Clear),
        "filter" => {
            let (key, value) = arg
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: /filter <state|category> <value>".to_string())?;
            let key: FilterKey = key.parse().map_err(|e| format!("{e}"))?;
            Ok(ReplCommand::Filter(key, value.trim().to_string()))
        }
        "unfilter" => {
            let key: FilterKey = arg.parse().map_err(|e| format!("{e}"))?;
            Ok(ReplCommand::Unfilter(key))
        }
        "clear-filters" => Ok(ReplCommand::ClearFilters),
        "suggest" => arg
            .parse::<usize>()
            .map(ReplCommand::Suggest)
            .map_err(|_| "usage: /suggest <number>".to_string()),
        "export" => match arg {
            "suggestions" => Ok(ReplCommand::Export(ExportTarget::Suggestions)),
            "transcript" => Ok(ReplCommand::Export(ExportTarget::Transcript)),
            _ => Err("usage: /export suggestions|transcript".to_string()),
        },
        "dashboard" => Ok(ReplCommand::Dashboard),
        "help" => Ok(ReplCommand::Help),
        "quit" | "exit" => Ok(ReplCommand::Quit),
        other => Err(format!("unknown command: /{other}")),
    }
}

/// Chat session bound to a terminal.
pub struct Repl<C: AnalyticsClient, B: DocumentBackend> {
    controller: SessionController<C>,
    exporter: ReportExporter<B>,
    presenter: ChartPresenter<TerminalRenderer>,
    events: Receiver<SessionEvent>,
}

impl<C: AnalyticsClient, B: DocumentBackend> Repl<C, B> {
    pub fn new(controller: SessionController<C>, exporter: ReportExporter<B>) -> Self {
        let events = controller.subscribe();
        Self {
            controller,
            exporter,
            presenter: ChartPresenter::new(TerminalRenderer::new()),
            events,
        }
    }

    pub fn controller(&self) -> &SessionController<C> {
        &self.controller
    }

    pub fn exporter(&self) -> &ReportExporter<B> {
        &self.exporter
    }

    /// Read commands from stdin until `/quit` or end of input.
    pub async fn run(&mut self) -> std::io::Result<()> {
        println!("Sales analytics chat. Type /help for commands.");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match parse_command(&line) {
                Ok(ReplCommand::Quit) => break,
                Ok(command) => {
                    let output = self.execute(command).await;
                    if !output.is_empty() {
                        println!("{output}");
                    }
                }
                Err(message) => println!("{message}"),
            }
        }
        Ok(())
    }

    /// Apply one command and return the text to show.
    pub async fn execute(&mut self, command: ReplCommand) -> String {
        let mut out = match command {
            ReplCommand::Empty | ReplCommand::Quit => String::new(),
            ReplCommand::Help => HELP.to_string(),
            ReplCommand::Ask(query) => {
                let result = self.controller.submit_query(&query).await;
                self.after_query(result)
            }
            ReplCommand::Suggest(n) => {
                let result = self.controller.submit_suggestion(n).await;
                self.after_query(result)
            }
            ReplCommand::Search(query) => {
                self.controller.set_search(query);
                self.format_transcript()
            }
            ReplCommand::ClearSearch => {
                self.controller.clear_search();
                self.format_transcript()
            }
            ReplCommand::Clear => {
                self.controller.clear_chat();
                "Conversation cleared.".to_string()
            }
            ReplCommand::Filter(key, value) => {
                if self.controller.apply_filter(key, &value).await {
                    self.format_dashboard()
                } else {
                    String::new()
                }
            }
            ReplCommand::Unfilter(key) => {
                self.controller.remove_filter(key);
                format!("Removed {key} filter.")
            }
            ReplCommand::ClearFilters => {
                if self.controller.clear_filters().await {
                    self.format_dashboard()
                } else {
                    String::new()
                }
            }
            ReplCommand::Export(target) => self.export(target),
            ReplCommand::Dashboard => self.format_dashboard(),
        };

        for notice in self.drain_notices() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&notice);
        }
        out
    }

    fn after_query(&self, result: Result<QueryOutcome, salesdash_chat::ChatError>) -> String {
        match result {
            Ok(QueryOutcome::Answered(reply)) => {
                let mut out = format_message(&reply);
                let suggestions = self.controller.state().suggestions();
                if !suggestions.is_empty() {
                    out.push_str("\nSuggestions:\n");
                    out.push_str(&format_suggestions(suggestions));
                }
                out
            }
            Ok(QueryOutcome::Failed(reason)) => {
                tracing::debug!(reason, "Query failed");
                let transcript = self.controller.state().transcript();
                transcript
                    .messages()
                    .last()
                    .map(format_message)
                    .unwrap_or_default()
            }
            Err(e) => e.to_string(),
        }
    }

    fn format_transcript(&self) -> String {
        let view = self.controller.state().filtered();
        if view.is_empty() {
            return "No messages found.".to_string();
        }
        view.iter().map(format_message).collect::<Vec<_>>().join("\n")
    }

    fn format_dashboard(&mut self) -> String {
        let view = DashboardView::from_snapshot(self.controller.state().dashboard());
        let mut out = format_dashboard_header(&view);
        if let PresentOutcome::Drawn { failed, .. } = self.presenter.present(view) {
            out.push_str(&self.presenter.renderer_mut().take_output());
            for (kind, reason) in failed {
                out.push_str(&format!("\n{kind} chart unavailable: {reason}"));
            }
        }
        out
    }

    fn export(&self, target: ExportTarget) -> String {
        let state = self.controller.state();
        let now = Local::now();
        let result = match target {
            ExportTarget::Suggestions => {
                let context = Some(state.last_query_context()).filter(|c| !c.is_empty());
                self.exporter
                    .export_suggestions(state.suggestions(), context, &now)
            }
            ExportTarget::Transcript => {
                let messages = state.filtered().to_vec();
                let search = Some(state.search_query()).filter(|s| !s.trim().is_empty());
                self.exporter.export_transcript(&messages, search, &now)
            }
        };
        match result {
            Ok(path) => format!("Exported {}", path.display()),
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                format!("Export failed: {e}")
            }
        }
    }

    fn drain_notices(&mut self) -> Vec<String> {
        let mut notices = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(SessionEvent::Notice(notice)) => notices.push(notice),
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Session events lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        notices
    }
}
