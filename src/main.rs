//! sparkmon - Spark application monitor for the local job-history shim

mod display;
mod formatting;
mod models;
mod shim;
mod tui;

use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing_subscriber::EnvFilter;

use models::MonitorConfig;
use shim::ShimClient;

#[derive(Parser)]
#[command(name = "sparkmon")]
#[command(about = "Spark application monitor for the local job-history shim", long_about = None)]
#[command(version)]
struct Cli {
    /// Port the shim listens on (http://localhost:{port}/)
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Cluster name forwarded on eclipse-sourced sessions
    #[arg(long, global = true)]
    cluster_name: Option<String>,

    /// Hosting environment: "intellij" or "eclipse"
    #[arg(long, global = true)]
    source: Option<String>,

    /// Engine behind the shim (informational)
    #[arg(long, global = true)]
    engine_type: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List Spark applications known to the shim
    Apps {
        /// Watch mode: refresh every N seconds
        #[arg(short, long, value_name = "SECONDS", default_value = "0")]
        watch: f64,
    },

    /// Show detailed information for a specific application
    App {
        /// Application ID to inspect
        app_id: String,
    },

    /// Launch interactive TUI mode
    #[command(alias = "ui")]
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, warnings) = MonitorConfig::load();
    apply_cli_overrides(&mut config, &cli);

    let tui_mode = matches!(cli.command, Some(Commands::Tui) | None);
    init_tracing(tui_mode);
    tracing::debug!(
        source = %config.shim.source_type,
        engine = ?config.shim.engine_type,
        "shim profile"
    );

    match cli.command {
        Some(Commands::Apps { watch }) => {
            for warning in &warnings {
                eprintln!("Warning: {}", warning);
            }
            let client = Arc::new(build_client(&config)?);
            let rt = tokio::runtime::Runtime::new()?;
            let name_max = config.display.app_name_max_length;
            let cluster = config.shim.cluster_name.clone();

            if watch > 0.0 {
                watch_loop(watch, || {
                    let apps = rt.block_on(client.fetch_applications())?;
                    let mut output = String::new();
                    if let Some(name) = &cluster {
                        output.push_str(&format!("Cluster: {}\n", name));
                    }
                    output.push_str(&display::format_applications(&apps, name_max));
                    Ok(output)
                })?;
            } else {
                let apps = rt.block_on(client.fetch_applications())?;
                if let Some(name) = &cluster {
                    println!("Cluster: {}", name);
                }
                println!("{}", display::format_applications(&apps, name_max));
            }
        }
        Some(Commands::App { app_id }) => {
            for warning in &warnings {
                eprintln!("Warning: {}", warning);
            }
            let client = build_client(&config)?;
            let rt = tokio::runtime::Runtime::new()?;
            let output = rt.block_on(handle_app_command(&client, &app_id))?;
            println!("{}", output);
        }
        Some(Commands::Tui) | None => {
            tui::run(config, warnings)?;
        }
    }

    Ok(())
}

fn apply_cli_overrides(config: &mut MonitorConfig, cli: &Cli) {
    if let Some(port) = cli.port {
        config.shim.port = Some(port);
    }
    if let Some(name) = &cli.cluster_name {
        config.shim.cluster_name = Some(name.clone());
    }
    if let Some(source) = &cli.source {
        config.shim.source_type = source.clone();
    }
    if let Some(engine) = &cli.engine_type {
        config.shim.engine_type = Some(engine.clone());
    }
}

fn build_client(config: &MonitorConfig) -> Result<ShimClient> {
    let Some(port) = config.shim.port else {
        bail!(
            "No shim port configured.\n\
             Hint: Pass --port, set SPARKMON_PORT, or add port to the config file."
        );
    };
    ShimClient::new(port, Duration::from_secs(config.shim.timeout_secs))
        .context("failed to create shim client")
}

/// Set up tracing. One-shot commands log to stderr; the TUI logs to a file
/// so diagnostics do not corrupt the alternate screen.
fn init_tracing(tui_mode: bool) {
    let filter = EnvFilter::try_from_env("SPARKMON_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if tui_mode {
        let log_path = std::env::temp_dir().join("sparkmon.log");
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();
        }
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

async fn handle_app_command(client: &ShimClient, app_id: &str) -> Result<String> {
    let app = client
        .fetch_application(app_id)
        .await
        .with_context(|| format!("failed to fetch application {}", app_id))?;

    // Secondary regions degrade independently; a failure leaves the
    // section out rather than failing the whole command.
    let jobs = client.fetch_jobs(app_id).await.ok();
    let stages = client.fetch_stages(app_id).await.ok();
    let executors = {
        let attempt_id = app
            .attempt_matching(None)
            .and_then(|a| a.attempt_id)
            .unwrap_or(0);
        client.fetch_attempt_executors(app_id, attempt_id).await.ok()
    };

    Ok(display::format_application_detail(
        &app,
        jobs.as_deref(),
        stages.as_deref(),
        executors.as_deref(),
    ))
}

/// Watch loop that repeatedly executes a command with flicker-free updates
fn watch_loop<F>(interval: f64, command: F) -> Result<()>
where
    F: Fn() -> Result<String>,
{
    // Set up Ctrl+C handler
    let running = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, std::sync::atomic::Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    // Enter alternate screen buffer and hide cursor for clean display
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let cleanup = || -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, Show, LeaveAlternateScreen)?;
        Ok(())
    };

    let result = (|| -> Result<()> {
        while running.load(std::sync::atomic::Ordering::SeqCst) {
            let now = chrono::Local::now();
            let timestamp = now.format("%Y-%m-%d %H:%M:%S");

            let output = match command() {
                Ok(s) => s,
                Err(e) => format!("Error: {}", e),
            };

            // Build complete screen content in memory
            let screen_content = format!(
                "{}\n\nLast updated: {} | Refreshing every {}s | Press Ctrl+C to exit",
                output, timestamp, interval
            );

            // Write everything at once with synchronized update (DEC private mode)
            // This prevents the terminal from rendering until the full frame is written
            write!(stdout, "\x1B[?2026h")?;
            write!(stdout, "\x1B[H{}\x1B[J", screen_content)?;
            write!(stdout, "\x1B[?2026l")?;
            stdout.flush()?;

            thread::sleep(Duration::from_secs_f64(interval));
        }
        Ok(())
    })();

    // Always clean up terminal state
    cleanup()?;

    println!("Watch mode stopped.");

    result
}
