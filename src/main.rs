use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use isegame_client::client::{
    ClientConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL, DEFAULT_URL,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// WebSocket address of the game server
    #[arg(short, long, default_value = DEFAULT_URL)]
    url: String,

    /// Milliseconds between checks while a send waits for the connection
    #[arg(long, default_value_t = DEFAULT_RETRY_INTERVAL.as_millis() as u64)]
    retry_interval_ms: u64,

    /// Checks a send makes before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Write logs to this file; the terminal belongs to the UI
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    let config = ClientConfig::default()
        .with_retry_interval(Duration::from_millis(args.retry_interval_ms))
        .with_max_attempts(args.max_attempts);

    if let Err(e) = isegame_client::run(args.url, config).await {
        eprintln!("Error running client: {}", e);
        std::process::exit(1);
    }
}

/// Log filter comes from `RUST_LOG`, defaulting to `info`.
fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .init();
        }
    }
    Ok(())
}
