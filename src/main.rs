use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod ui;

use app::App;
use onboard::api::HttpSubmissionClient;
use onboard::config::Config;
use onboard::persistence::FormPersistenceGuard;
use onboard::wizard::WizardSession;
use onboard::{logging, persistence_guard};

#[derive(Parser)]
#[command(name = "onboard")]
#[command(about = "Brand onboarding wizard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Keep answers in memory only (nothing is saved or restored)
    #[arg(long)]
    no_persist: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the wizard steps
    Steps,

    /// Show progress of the saved answers
    Status,

    /// Validate every step of the saved answers
    Validate,

    /// Submit the saved answers without opening the wizard
    Submit {
        /// Validate and print the payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Erase the saved answers
    Reset,

    /// Write the default config to .onboard/config.toml
    InitConfig {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Steps) => cmd_steps(),
        Some(Commands::Status) => cmd_status(&config, cli.no_persist),
        Some(Commands::Validate) => cmd_validate(&config, cli.no_persist),
        Some(Commands::Submit { dry_run }) => cmd_submit(&config, cli.no_persist, dry_run).await,
        Some(Commands::Reset) => cmd_reset(&config, cli.no_persist),
        Some(Commands::InitConfig { force }) => cmd_init_config(force),
        None => run_tui(config, cli.no_persist, logging_handle.log_file_path).await,
    }
}

async fn run_tui(config: Config, no_persist: bool, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config, no_persist)?;
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

/// Session over the saved answers, positioned at the first step
fn load_session(config: &Config, no_persist: bool) -> WizardSession {
    WizardSession::brand_onboarding(persistence_guard(config, no_persist), config.identity())
}

fn cmd_steps() -> Result<()> {
    let session = WizardSession::brand_onboarding(FormPersistenceGuard::in_memory(), None);

    println!("Onboarding Steps ({})", session.steps().len());
    println!("{}", "─".repeat(60));

    for (i, step) in session.steps().iter().enumerate() {
        let optional = if step.optional { " (optional)" } else { "" };
        println!(
            "{:>2}. {:<22} {:<12} {}{}",
            i + 1,
            step.id,
            step.kind.label(),
            step.title,
            optional
        );
    }

    Ok(())
}

fn cmd_status(config: &Config, no_persist: bool) -> Result<()> {
    let session = load_session(config, no_persist);
    let total = session.steps().len();

    match session.first_incomplete() {
        Some(audit) => {
            let percent = onboard::wizard::progress_percent(audit.index, total);
            let title = session
                .steps()
                .get(audit.index)
                .map(|s| s.title)
                .unwrap_or(audit.step_id);
            println!("Progress: {percent:.0}%");
            println!("Next step: {} ({}/{})", title, audit.index + 1, total);
            if let Some(error) = audit.outcome.error {
                println!("  {error}");
            }
        }
        None => {
            println!("Progress: 100%");
            println!("All steps complete. Run 'onboard submit' to finish.");
        }
    }

    Ok(())
}

fn cmd_validate(config: &Config, no_persist: bool) -> Result<()> {
    let session = load_session(config, no_persist);
    let audit = session.audit();
    let mut failures = 0;

    for entry in &audit {
        let title = session
            .steps()
            .get(entry.index)
            .map(|s| s.title)
            .unwrap_or(entry.step_id);
        match &entry.outcome.error {
            None => println!("✓ {title}"),
            Some(error) => {
                failures += 1;
                println!("✗ {title}: {error}");
            }
        }
    }

    if failures > 0 {
        println!();
        println!("{failures} step(s) need attention");
        std::process::exit(1);
    }

    println!();
    println!("All {} steps valid", audit.len());
    Ok(())
}

async fn cmd_submit(config: &Config, no_persist: bool, dry_run: bool) -> Result<()> {
    let mut session = load_session(config, no_persist);

    if let Some(audit) = session.first_incomplete() {
        let error = audit.outcome.error.unwrap_or_default();
        bail!("Step '{}' is incomplete: {}", audit.step_id, error);
    }

    if dry_run {
        // Leaves the saved answers in place
        println!("{}", serde_json::to_string_pretty(session.form())?);
        return Ok(());
    }

    let client = HttpSubmissionClient::new(&config.submission)?;
    session.submit(&client).await?;
    println!("Onboarding submitted to {}", client.endpoint());
    Ok(())
}

fn cmd_reset(config: &Config, no_persist: bool) -> Result<()> {
    persistence_guard(config, no_persist).clear()?;
    println!("Saved onboarding answers erased");
    Ok(())
}

fn cmd_init_config(force: bool) -> Result<()> {
    let path = Config::local_config_path();
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let written = Config::default().save()?;
    println!("Wrote {}", written.display());
    Ok(())
}
