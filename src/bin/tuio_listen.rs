//! UDP listener that prints one line per TUIO frame.
//!
//! Usage:
//!   cargo run --bin tuio-listen -- --bind 0.0.0.0:3333

use std::net::UdpSocket;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tuio_tracker::{FrameEvent, TrackedEntity, TrackerPipeline, TuioConfig, TuioEvent, load_config};

/// Receive TUIO over UDP and report per-frame deltas.
#[derive(Parser)]
#[command(name = "tuio-listen", about = "Track TUIO cursors, tokens and blobs from a UDP sender")]
struct Cli {
    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Address:port to bind the UDP listener to (overrides the config file).
    #[arg(long)]
    bind: Option<String>,

    /// Force a frame once this many dead sessions are pending (0 = never).
    #[arg(long)]
    max_pending_dead: Option<usize>,

    /// Enable verbose debug output
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<TuioConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TuioConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind = bind.clone();
    }
    if let Some(max) = cli.max_pending_dead {
        config.tracker.max_pending_dead = max;
    }
    Ok(config)
}

fn summarize<E: TrackedEntity>(frame: &FrameEvent<E>) {
    let seq = frame
        .frame_seq
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    println!(
        "[{} fseq:{seq}] active={} pressed={} moved={} released={}",
        E::KIND,
        frame.active.len(),
        frame.pressed().count(),
        frame.moved().count(),
        frame.dead.len(),
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    let socket = UdpSocket::bind(&config.listener.bind)
        .with_context(|| format!("cannot bind to {}", config.listener.bind))?;
    tracing::info!(bind = %config.listener.bind, "listening for TUIO");

    let mut pipeline =
        TrackerPipeline::with_buffer_size(socket, config.tracker, config.listener.buffer_size);

    loop {
        let events = match pipeline.process_next() {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(error = %e, "recv error");
                continue;
            }
        };

        for event in &events {
            match event {
                TuioEvent::Cursor(frame) => summarize(frame),
                TuioEvent::Token(frame) => summarize(frame),
                TuioEvent::Blob(frame) => summarize(frame),
            }
        }
    }
}
