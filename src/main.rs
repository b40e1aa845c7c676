//! supplies-rs server binary

#![allow(missing_docs)]

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use supplies_rs::{Config, server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Procurement and logistics backend
#[derive(Parser, Debug)]
#[command(name = "supplies", version, about)]
struct Args {
    /// Configuration file; defaults and environment are used if it is missing
    #[arg(
        short,
        long,
        default_value = "config/supplies.yaml",
        env = "SUPPLIES_CONFIG"
    )]
    config: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "SUPPLIES_LOG_FORMAT")]
    log_format: LogFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.log_format);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let config = match Config::load(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line messages readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
