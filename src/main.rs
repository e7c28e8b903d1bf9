//! remote-config command line.
//!
//! ```text
//! remote-config [--config settings.toml] [--source URL] [--local-root DIR] [--debug]
//!     get <file>                    print the document
//!     merge <file> <override-json>  print the document with an override layered on top
//!     watch <file>...               load documents and keep refreshing until Ctrl-C
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;

use remote_config::config::{load_config, validation::validate_config, StoreConfig};
use remote_config::error::SettingsError;
use remote_config::lifecycle::signals::{shutdown_signal, ReloadSignal};
use remote_config::lifecycle::Shutdown;
use remote_config::observability::{logging, metrics};
use remote_config::store::{ConfigStore, Refresher};

#[derive(Parser)]
#[command(name = "remote-config")]
#[command(about = "Fetch, cache and refresh remote JSON configuration", long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source root that file names are resolved against
    #[arg(short, long)]
    source: Option<String>,

    /// Directory mirroring fetched documents
    #[arg(short, long)]
    local_root: Option<PathBuf>,

    /// Surface every failure instead of keeping stale content
    #[arg(short, long)]
    debug: bool,

    /// Serve Prometheus metrics on this address
    #[arg(long)]
    metrics_address: Option<SocketAddr>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a document
    Get { file: String },
    /// Print a document with an override layered on top
    Merge { file: String, overlay: String },
    /// Load documents and keep them fresh until interrupted
    Watch {
        #[arg(required = true)]
        files: Vec<String>,

        /// Seconds between refresh cycles (defaults to the settings file)
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging(logging::DEFAULT_FILTER);

    let cli = Cli::parse();
    let settings = settings_from(&cli)?;

    if let Some(addr) = cli.metrics_address {
        metrics::init_metrics(addr)?;
    } else if settings.observability.metrics_enabled {
        metrics::init_metrics(settings.observability.metrics_address.parse()?)?;
    }

    let refresh = settings.refresh.clone();
    let store = Arc::new(ConfigStore::new(settings)?);

    match cli.command {
        Commands::Get { file } => {
            let entry = store.get(&file).await?;
            println!("{}", serde_json::to_string_pretty(entry.content().as_ref())?);
        }
        Commands::Merge { file, overlay } => {
            let overlay: Value = serde_json::from_str(&overlay)?;
            let entry = store.get(&file).await?;
            println!("{}", serde_json::to_string_pretty(&entry.merged_with(&overlay))?);
        }
        Commands::Watch { files, interval } => {
            for file in &files {
                let entry = store.get(file).await?;
                tracing::info!(url = %entry.url(), "Watching");
            }

            let shutdown = Shutdown::new();
            let refresher = match interval {
                Some(secs) => Refresher::new(store.clone(), std::time::Duration::from_secs(secs)),
                None => Refresher::from_config(store.clone(), &refresh),
            };
            let task = tokio::spawn(refresher.run(shutdown.subscribe()));

            let mut reload = ReloadSignal::new()?;
            loop {
                tokio::select! {
                    result = shutdown_signal() => {
                        result?;
                        break;
                    }
                    _ = reload.recv() => {
                        tracing::info!("Reload requested");
                        match store.invalidate_all().await {
                            Ok(all_updated) => tracing::info!(all_updated, "Reload complete"),
                            Err(e) => tracing::error!(error = %e, "Reload failed"),
                        }
                    }
                }
            }

            shutdown.trigger();
            task.await?;
            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}

/// Settings file (or defaults) with command line overrides applied.
fn settings_from(cli: &Cli) -> Result<StoreConfig, SettingsError> {
    let mut settings = match &cli.config {
        Some(path) => load_config(path)?,
        None => StoreConfig::default(),
    };

    if let Some(source) = &cli.source {
        settings.source_root = source.clone();
    }
    if let Some(root) = &cli.local_root {
        settings.local_root = Some(root.clone());
    }
    if cli.debug {
        settings.debug = true;
    }

    validate_config(&settings).map_err(SettingsError::Validation)?;
    Ok(settings)
}
