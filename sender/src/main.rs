//! pulsemon sender binary
//!
//! Sends the requested number of timestamped heartbeats to the receiver
//! over a single TCP connection, then closes it.

#![allow(unused_crate_dependencies)]

use clap::Parser;
use pulsemon_core::{load_monitor_from_toml_path, utils, SenderConfig};
use sender::Sender;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "sender")]
#[command(about = "Sends timestamped heartbeats to the receiver over TCP")]
#[command(version = "0.1.0")]
struct Cli {
    /// Number of heartbeats to send
    count: Option<u64>,

    /// Optional TOML monitor configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Receiver host (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Receiver port (overrides the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Seconds to sleep between heartbeats (overrides the config file)
    #[arg(long)]
    interval_secs: Option<u64>,
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
        error!("Sender failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> sender::Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_monitor_from_toml_path(path)?.sender,
        None => SenderConfig::default(),
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(secs) = cli.interval_secs {
        config.interval_secs = secs;
    }
    if let Some(count) = cli.count {
        config.count = count;
    }

    let sender = Sender::new(config);

    // Ctrl-C requests a graceful stop; the send loop closes the connection
    let interrupt = sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping");
            interrupt.stop();
        }
    });

    let sent = sender.run().await?;
    info!("Done, {} heartbeats sent", sent);
    Ok(())
}
