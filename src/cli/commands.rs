use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::api::{HistoryApi, HttpHistoryApi};
use crate::config::{ConsoleConfig, log_dir};
use crate::console::Console;
use crate::context::SearchOutcome;
use crate::controllers::{Confirmer, DeleteOutcome};
use crate::dashboard::{DashboardView, DataSource, FetchOutcome};
use crate::store::ListView;
use crate::tui;
use crate::utils::{escape_single_line, escape_text};

#[derive(Parser)]
#[command(name = "assistant-console")]
#[command(version)]
#[command(
    about = "Operator console for the voice assistant history and usage dashboard",
    long_about = None
)]
pub struct Cli {
    /// Assistant server URL (overrides ASSISTANT_CONSOLE_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Request timeout in seconds (overrides ASSISTANT_CONSOLE_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List history records, optionally filtered by text
    List {
        /// Text to search for
        query: Option<String>,
    },
    /// Show usage statistics
    Stats,
    /// Download the detailed dashboard report as JSON
    Report {
        /// Directory to write into (overrides ASSISTANT_CONSOLE_DOWNLOAD_DIR)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Generate a PDF report and print its URL
    Pdf,
    /// Delete a history record
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let _guard = init_logging(cli.command.is_none());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let api: Arc<dyn HistoryApi> =
        Arc::new(HttpHistoryApi::new(&config).context("Failed to build HTTP client")?);

    match cli.command {
        None => tui::run_interactive(api, &config, runtime.handle().clone()),
        Some(command) => runtime.block_on(run_command(command, api, &config)),
    }
}

fn resolve_config(cli: &Cli) -> Result<ConsoleConfig> {
    let mut config = ConsoleConfig::from_env().context("Invalid configuration")?;
    if let Some(url) = &cli.url {
        config = config.with_base_url(url).context("Invalid --url")?;
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout_secs(secs);
    }
    Ok(config)
}

/// The TUI owns the terminal, so interactive sessions log to a file; subcommands log to
/// stderr. `RUST_LOG` overrides the default level either way.
fn init_logging(interactive: bool) -> Option<WorkerGuard> {
    if interactive {
        let dir = log_dir()?;
        std::fs::create_dir_all(&dir).ok()?;
        let appender = tracing_appender::rolling::never(dir, "console.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("assistant_console=info")),
            )
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(io::stderr)
            .init();
        None
    }
}

async fn run_command(command: Commands, api: Arc<dyn HistoryApi>, config: &ConsoleConfig) -> Result<()> {
    let assume_yes = matches!(command, Commands::Delete { yes: true, .. });
    let mut console = Console::new(api, Arc::new(PromptConfirmer { assume_yes }));

    match command {
        Commands::List { query } => list_records(&mut console, query.as_deref().unwrap_or("")).await,
        Commands::Stats => show_stats(&mut console).await,
        Commands::Report { dir } => {
            let dir = dir.unwrap_or_else(|| config.download_dir.clone());
            let path = console.download_report(&dir).await?;
            println!("Report saved to {}", path.display());
            Ok(())
        }
        Commands::Pdf => {
            let url = console.generate_pdf().await?;
            println!("{}", url);
            Ok(())
        }
        Commands::Delete { id, .. } => match console.delete(id).await? {
            DeleteOutcome::Deleted(message) => {
                println!("{}", escape_single_line(&message));
                Ok(())
            }
            DeleteOutcome::Declined => {
                println!("Cancelled");
                Ok(())
            }
        },
    }
}

async fn list_records(console: &mut Console, query: &str) -> Result<()> {
    if console.search(query).await != SearchOutcome::Applied {
        anyhow::bail!("{}", failure_message(console));
    }

    match console.context().records().view() {
        ListView::Records(records) => {
            for record in records {
                println!(
                    "#{} | {} | {}",
                    record.id,
                    escape_single_line(&record.timestamp_label),
                    escape_single_line(&record.command_label())
                );
                println!("  User:      {}", escape_text(&record.user_utterance));
                println!("  Assistant: {}", escape_text(&record.assistant_response));
            }
            println!();
            println!("{} record(s)", records.len());
        }
        _ => println!("No records found"),
    }
    Ok(())
}

fn failure_message(console: &Console) -> String {
    console
        .context()
        .notifications()
        .current()
        .map(|n| n.message.clone())
        .unwrap_or_else(|| "Request failed".to_string())
}

async fn show_stats(console: &mut Console) -> Result<()> {
    if console.refresh_dashboard().await == FetchOutcome::Stale {
        anyhow::bail!("Statistics request was superseded");
    }
    let view = console.context().dashboard().view().context("No statistics available")?;
    print_dashboard(view);
    Ok(())
}

fn print_dashboard(view: &DashboardView) {
    if view.source == DataSource::Sample {
        println!("SAMPLE DATA: statistics server unavailable, showing built-in example");
        println!();
    }

    println!("Assistant Usage Statistics");
    println!("==========================");
    println!("Total commands: {}", view.summary.total_commands);
    println!("Success rate:   {}", view.summary.success_rate);
    println!("Growth:         {}", view.summary.growth.text);
    println!("Last used:      {}", escape_single_line(&view.summary.last_used));
    println!("Top command:    {}", escape_single_line(&view.summary.top_command));
    println!("Peak hour:      {}", escape_single_line(&view.summary.peak_hour));

    println!();
    println!("Popular commands");
    if view.popular_commands.is_empty() {
        println!("  No data");
    }
    for row in &view.popular_commands {
        println!("  {}", escape_single_line(&row.cells().join(" | ")));
    }

    println!();
    println!("By weekday");
    if view.weekday_stats.is_empty() {
        println!("  No data");
    }
    for row in &view.weekday_stats {
        println!("  {:<10} {:>5}", row.label, row.count);
    }

    for series in [&view.last_7_days, &view.by_hour] {
        println!();
        println!("{}", series.title);
        if series.is_empty() {
            println!("  No data");
        }
        for (label, value) in series.labels.iter().zip(&series.values) {
            println!("  {:<10} {:>5}", escape_single_line(label), value);
        }
    }
}

/// Asks on stdin unless `--yes` was given
struct PromptConfirmer {
    assume_yes: bool,
}

#[async_trait]
impl Confirmer for PromptConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || {
            eprint!("{} [y/N] ", prompt);
            let _ = io::stderr().flush();
            let mut answer = String::new();
            if io::stdin().lock().read_line(&mut answer).is_err() {
                return false;
            }
            matches!(answer.trim(), "y" | "Y" | "yes")
        })
        .await
        .unwrap_or(false)
    }
}
