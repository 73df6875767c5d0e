//! pulsemon receiver binary
//!
//! Listens for a single sender connection and appends each received
//! heartbeat to the log file given on the command line.

#![allow(unused_crate_dependencies)]

use clap::Parser;
use pulsemon_core::{load_monitor_from_toml_path, utils, ReceiverConfig};
use receiver::Receiver;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "receiver")]
#[command(about = "Logs heartbeats from a single TCP sender")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the heartbeat log file
    log_file: PathBuf,

    /// Optional TOML monitor configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Listen address (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Give up if no sender connects within this many seconds
    #[arg(long)]
    accept_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit 1 per the documented contract; --help and
            // --version still exit 0.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = utils::init_tracing("info") {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        error!("Receiver failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> receiver::Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_monitor_from_toml_path(path)?.receiver,
        None => ReceiverConfig::default(),
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(secs) = cli.accept_timeout_secs {
        config.accept_timeout_secs = Some(secs);
    }

    Receiver::new(config, cli.log_file).run().await
}
