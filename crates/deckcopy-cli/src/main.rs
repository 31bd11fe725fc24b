//! Copy every note of one Anki deck into another via AnkiConnect.
//!
//! Defaults copy `NEW-JLPT` into `print-jlpt` and switch the copies to the
//! `print-JLPT` note type when it exists.

mod console;

use std::time::Duration;

use clap::Parser;
use deckcopy_engine::transfer::{
    DEFAULT_DESTINATION_DECK, DEFAULT_PROGRESS_INTERVAL, DEFAULT_SOURCE_DECK, DEFAULT_TARGET_MODEL,
};
use deckcopy_engine::{ClientBuilder, Engine, TransferConfig};
use tracing::info;

/// Copy every note of one Anki deck into another via AnkiConnect.
#[derive(Parser, Debug)]
#[command(name = "deckcopy")]
#[command(version, about, long_about = None)]
struct Args {
    /// AnkiConnect host address
    #[arg(long, default_value = "localhost")]
    host: String,

    /// AnkiConnect port
    #[arg(long, default_value_t = 8765)]
    port: u16,

    /// Deck to copy notes from
    #[arg(long, default_value = DEFAULT_SOURCE_DECK)]
    source: String,

    /// Deck to copy notes into (created if missing)
    #[arg(long, default_value = DEFAULT_DESTINATION_DECK)]
    destination: String,

    /// Note type for the copies, used only if it exists
    #[arg(long, default_value = DEFAULT_TARGET_MODEL)]
    target_model: String,

    /// Keep each note's own note type instead of switching to --target-model
    #[arg(long, default_value_t = false)]
    keep_models: bool,

    /// Print progress every N notes (0 disables)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_every: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn transfer_config(&self) -> TransferConfig {
        TransferConfig {
            source_deck: self.source.clone(),
            destination_deck: self.destination.clone(),
            target_model: (!self.keep_models).then(|| self.target_model.clone()),
            progress_interval: self.progress_every,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = args.transfer_config();
    info!(
        host = %args.host,
        port = args.port,
        source = %config.source_deck,
        destination = %config.destination_deck,
        target_model = ?config.target_model,
        "Starting deck copy"
    );

    println!("{}", console::banner(&config));

    let client = match ClientBuilder::new()
        .endpoint(&args.host, args.port)
        .timeout(Duration::from_secs(args.timeout_secs))
        .try_build()
    {
        Ok(client) => client,
        Err(e) => {
            println!("\nProgram error: {}", e);
            return Ok(());
        }
    };
    let engine = Engine::from_client(client);

    let transfer = engine.transfer();
    tokio::select! {
        result = transfer.copy_deck(&config, console::print_event) => {
            println!("{}", console::render_outcome(&config, &result));
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nOperation cancelled by user");
        }
    }

    Ok(())
}
