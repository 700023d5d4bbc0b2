use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use tracing_subscriber::EnvFilter;

use backoffice::{Config, Console, UiOptions};

#[derive(Debug, Parser)]
#[command(
    name = "backoffice",
    version,
    about = "Terminal console for managing users and address books"
)]
struct Cli {
    /// Root URL of the backend API
    #[arg(long = "base-url", value_name = "URL", env = "BACKOFFICE_BASE_URL")]
    base_url: Option<String>,

    /// Read settings from this file instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for the persisted session token
    #[arg(long = "state-dir", value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    timeout: Option<u64>,

    /// Append logs to this file; RUST_LOG controls the filter
    #[arg(long = "log", value_name = "PATH")]
    log: Option<PathBuf>,

    /// Hide the key help line
    #[arg(long = "no-help")]
    no_help: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // The terminal is taken over by the UI, so logs only go to a file.
    if let Some(path) = &cli.log {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path).map_err(Report::msg)?,
        None => Config::load().map_err(Report::msg)?,
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(state_dir) = cli.state_dir {
        config.state_dir = Some(state_dir);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    let options = UiOptions::default().with_help(!cli.no_help);
    Console::new(config)
        .with_options(options)
        .run()
        .map_err(Report::msg)?;

    Ok(())
}
