//! Stick Trail - fighting-game stick input display
//!
//! Opens an overlay window showing each player's stick, a decaying trail of
//! recent directions and button press glyphs.

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stick_trail::config::{AppConfig, ConfigWatcher};
use stick_trail::input::gamepad::diagnostics::print_gamepad_diagnostics;
use stick_trail::paths::AppPaths;
use stick_trail::viewer;

/// Stick Trail - fighting-game stick input display
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (default: detected portable/installed location)
    #[arg(short, long, env = "STICK_TRAIL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Also write logs to a daily rolling file in the logs directory
    #[arg(long)]
    log_file: bool,

    /// Log as JSON lines instead of text
    #[arg(long)]
    log_json: bool,

    /// List connected gamepads and exit
    #[arg(long)]
    list_gamepads: bool,

    /// Seconds to wait for gamepads with --list-gamepads
    #[arg(long, default_value = "3")]
    scan_secs: u64,

    /// Validate the configuration file and exit
    #[arg(long)]
    check_config: bool,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    write_default_config: bool,

    /// Do not reload the configuration when the file changes
    #[arg(long)]
    no_watch: bool,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let paths = match &args.config {
        Some(config) => AppPaths::with_config(config.clone()),
        None => AppPaths::detect(),
    };

    let log_dir = args.log_file.then_some(paths.logs_dir.as_path());
    let _log_guard = init_logging(&args.log_level, args.log_json, log_dir)?;

    info!("Starting Stick Trail v{}...", env!("CARGO_PKG_VERSION"));
    info!("Configuration file: {}", paths.config.display());

    if args.list_gamepads {
        print_gamepad_diagnostics(Duration::from_secs(args.scan_secs));
        return Ok(());
    }

    if args.write_default_config {
        return write_default_config(&paths.config);
    }

    if args.check_config {
        return check_config(&paths.config);
    }

    paths.ensure_directories()?;

    let (watcher, config) = if !paths.config.exists() {
        warn!(
            "Config file {} not found, using built-in defaults",
            paths.config.display()
        );
        (None, AppConfig::default())
    } else if args.no_watch {
        (None, AppConfig::load(&paths.config)?)
    } else {
        let (watcher, config) = ConfigWatcher::new(&paths.config)?;
        info!("Configuration loaded successfully with hot-reload enabled");
        (Some(watcher), config)
    };

    viewer::run_viewer(config, watcher)?;

    info!("Stick Trail closed");
    Ok(())
}

/// Console logging plus an optional daily log file
///
/// The returned guard flushes the file writer and must live until exit.
fn init_logging(level: &str, json: bool, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create logs directory: {}", dir.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("stick-trail")
                .filename_suffix("log")
                .build(dir)
                .context("Failed to open log file")?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        },
        None => (None, None),
    };

    let (text_layer, json_layer) = if json {
        (None, Some(tracing_subscriber::fmt::layer().json()))
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false);
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "{} already exists, remove it first to write the defaults",
            path.display()
        );
    }

    AppConfig::default().save(path)?;
    println!(
        "{} Default configuration written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    println!("\n{}", "=== Checking Configuration ===".bold().cyan());
    println!("  File: {}", path.display());

    let config = match AppConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            println!("\n{} {:#}", "✗".red().bold(), e);
            bail!("Configuration is invalid");
        },
    };

    println!(
        "  Tick rate: {} Hz, trail window: {}s, history: {} entries",
        config.timing.tick_rate.to_string().green(),
        config.trail.window.to_string().green(),
        config.trail.history_capacity.to_string().green()
    );
    println!(
        "  Gradient: {}",
        config
            .trail
            .gradient
            .stops()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" → ")
    );

    println!("\n{}", "Players:".bold());
    for player in &config.players {
        let keys = &player.keys;
        println!(
            "  {} at ({}, {}) {}x{}, keys {}/{}/{}/{}",
            player.name.yellow().bold(),
            player.board.x,
            player.board.y,
            player.board.width,
            player.board.height,
            keys.up,
            keys.left,
            keys.down,
            keys.right
        );

        match &player.gamepad {
            Some(pad) => println!(
                "    gamepad: {} (analog {})",
                pad.product_match.as_deref().unwrap_or("any"),
                if pad.use_analog { "on" } else { "off" }
            ),
            None => println!("    gamepad: {}", "none".dimmed()),
        }

        for action in &player.actions {
            println!(
                "    {:<8} {:<3} {} key={} button={}",
                action.id,
                action.label.bold(),
                action.color,
                action.key.as_deref().unwrap_or("-"),
                action.gamepad_button.as_deref().unwrap_or("-")
            );
        }
    }

    println!("\n{} Configuration is valid", "✓".green().bold());
    Ok(())
}
