mod render;

use clap::Parser;
use hotspot_core::config::Config;
use hotspot_core::panel::Panel;
use hotspot_core::status_client::HttpStatusClient;
use hotspot_core::{HotspotRecord, Status};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors reading the selected record from disk
#[derive(Error, Debug)]
enum RecordError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Show a detection record's metadata and optionally change its review status.
#[derive(Parser)]
#[command(name = "hotspot-panel")]
struct Args {
    /// JSON file holding the selected record. Omit for an empty selection.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Detection server base URL (overrides the config file).
    #[arg(long, env = "HOTSPOT_SERVER_URL")]
    server: Option<String>,

    /// Status to submit for the selected record (e.g. viewed, not-viewed).
    #[arg(long)]
    status: Option<Status>,

    /// Show the detection overlay instead of the raw RGB photo.
    #[arg(long)]
    toggle_overlay: bool,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn load_record(path: &Path) -> Result<HotspotRecord, RecordError> {
    let content = std::fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| RecordError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        error!("failed to load config: {e}");
        std::process::exit(1);
    });
    if let Some(server) = args.server {
        config.server_url = server;
        if let Err(e) = config.validate() {
            error!("invalid --server: {e}");
            std::process::exit(1);
        }
    }
    info!("using server {}", config.server_base());

    let selection = args.record.as_deref().map(load_record).transpose().unwrap_or_else(|e| {
        error!("{e}");
        std::process::exit(1);
    });

    let client = HttpStatusClient::new(&config).unwrap_or_else(|e| {
        error!("failed to build HTTP client: {e}");
        std::process::exit(1);
    });

    let mut panel = Panel::new(&config, selection, || info!("panel closed"));

    if args.toggle_overlay {
        if panel.overlay_available() {
            panel.toggle_overlay();
        } else {
            warn!("no detection overlay for this selection");
        }
    }

    print!("{}", render::render(&panel));

    if let Some(status) = args.status {
        panel.stage_candidate(status);
        if !panel.confirm(&client).await {
            warn!("nothing submitted: no record selected");
        }
        println!();
        print!("{}", render::render(&panel));
    }
}
