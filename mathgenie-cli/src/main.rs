//! CLI entrypoint for MathGenie
//!
//! Wires the settings store, app config and quiz client together and runs
//! one command.

mod cli;
mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use mathgenie_core::{AppConfig, SqliteSettingsStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

const LOCAL_CONFIG_FILE: &str = "mathgenie.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let app = load_app_config(cli.config.as_deref())?;
    init_logging(cli.verbose, &app.general.log_level, app.general.log_json);

    let output = match cli.command {
        Command::Topics => render::format_catalogue(),
        Command::Settings(command) => {
            let store = open_store(cli.settings, &app)?;
            commands::settings(command, &store)?
        }
        Command::Generate(args) => {
            let store = open_store(cli.settings, &app)?;
            let client = commands::build_client(&app)?;
            commands::generate(args, &app, &store, &client).await?
        }
    };

    print!("{output}");
    Ok(())
}

/// Explicit `--config`, else `./mathgenie.toml` if present, else defaults.
fn load_app_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return AppConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()));
    }

    let local = Path::new(LOCAL_CONFIG_FILE);
    if local.exists() {
        return AppConfig::from_file(local)
            .with_context(|| format!("failed to load config from {}", local.display()));
    }

    Ok(AppConfig::default())
}

fn open_store(explicit: Option<PathBuf>, app: &AppConfig) -> Result<SqliteSettingsStore> {
    let path = explicit.unwrap_or_else(|| PathBuf::from(&app.general.settings_path));
    debug!(path = %path.display(), "Opening settings store");
    SqliteSettingsStore::open(&path)
        .with_context(|| format!("failed to open settings store at {}", path.display()))
}

/// `-v` flags win, then `RUST_LOG`, then `general.log_level`.
fn init_logging(verbose: u8, configured_level: &str, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
