//! Backlog sync CLI - uploads the sprint backlog to a project-management
//! platform, or exports it to CSV.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use backlog_sync::{adapters, schedule, Platform, SyncConfig, SyncDriver, SyncOutcome};

/// Upload the sprint backlog to Jira, GitHub, or Azure DevOps, or export
/// it to a CSV file for manual import.
#[derive(Parser)]
#[command(name = "backlog-sync")]
#[command(about = "Sprint backlog upload automation")]
#[command(version)]
struct Cli {
    /// Destination platform
    #[arg(long, value_enum, default_value = "csv")]
    platform: Platform,

    /// Configuration file with platform credentials
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Schedule file (accepted for compatibility; the built-in schedule
    /// is used regardless of its content)
    #[arg(long, default_value = "sprint_backlog.md")]
    markdown: PathBuf,

    /// Output file for the CSV platform
    #[arg(long, default_value = "backlog.csv")]
    output: PathBuf,

    /// Write a template configuration file with placeholder credentials
    /// and exit
    #[arg(long)]
    create_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("backlog_sync=debug,info")
    } else {
        EnvFilter::new("backlog_sync=info,warn")
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    if cli.create_config {
        SyncConfig::write_template(&cli.config)?;
        println!(
            "Template written to {}. Fill in your credentials before running a sync.",
            cli.config.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let config = SyncConfig::load(&cli.config);

    tracing::debug!(
        markdown = %cli.markdown.display(),
        "Schedule file ignored, using the built-in schedule"
    );
    let tasks = schedule::produce_tasks();
    println!("Loaded {} tasks from the schedule", tasks.len());

    let adapter = adapters::for_platform(cli.platform, &config, &cli.output)?;
    let driver = SyncDriver::new(adapter);
    let outcome = driver.run(&tasks).await;

    match outcome {
        SyncOutcome::Success { created } => {
            println!("Backlog sync completed successfully ({created} issues created)");
            Ok(ExitCode::SUCCESS)
        }
        SyncOutcome::Failure {
            task_id,
            attempted,
            error,
        } => {
            eprintln!("Backlog sync failed at {task_id} (after {attempted} submissions): {error}");
            Ok(ExitCode::FAILURE)
        }
    }
}
