//! source-sapreadtable CLI
//!
//! Runs one protocol command and writes its messages to stdout as JSON
//! lines. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use sapread_connect::config::load_document;
use sapread_connect::prelude::*;
use sapread_connect::{Message, MessageWriter};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "source-sapreadtable")]
#[command(about = "SAP table source connector (DuckDB + ERPL)")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the connector specification
    Spec,
    /// Test the connection to the SAP system
    Check {
        /// Connection configuration (JSON or YAML)
        #[arg(long)]
        config: PathBuf,
    },
    /// List tables matching table_selection as streams
    Discover {
        /// Connection configuration (JSON or YAML)
        #[arg(long)]
        config: PathBuf,
    },
    /// Read every row of the configured streams
    Read {
        /// Connection configuration (JSON or YAML)
        #[arg(long)]
        config: PathBuf,
        /// Configured catalog selecting the streams to read
        #[arg(long)]
        catalog: PathBuf,
        /// State from a previous sync (accepted, not used)
        #[arg(long)]
        state: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = std::io::stdout();
    let mut writer = MessageWriter::new(stdout.lock());

    let outcome = run(cli.command, &mut writer).await;
    let code = match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let trace = match e.downcast_ref::<ConnectorError>() {
                Some(err) => Message::error_trace(err),
                None => Message::trace("config_error", format!("{:#}", e)),
            };
            if let Err(write_err) = writer.write(&trace) {
                error!("Failed to write trace message: {}", write_err);
            }
            ExitCode::FAILURE
        }
    };

    if let Err(e) = writer.flush() {
        error!("Failed to flush stdout: {}", e);
        return ExitCode::FAILURE;
    }
    code
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run<W: Write>(command: Commands, writer: &mut MessageWriter<W>) -> Result<()> {
    let source = SapReadTableSource::new();

    match command {
        Commands::Spec => {
            let spec = SapReadTableSource::spec();
            writer.write(&Message::Spec {
                spec: spec.to_protocol(),
            })?;
        }
        Commands::Check { config } => {
            let status = match load_config(&config) {
                Ok(config) => source.check(&config).await,
                Err(e) => CheckResult::failure(format!("ERPL connection test failed: {:#}", e)),
            };
            info!("{}", status);
            writer.write(&Message::ConnectionStatus {
                connection_status: status,
            })?;
        }
        Commands::Discover { config } => {
            let config = load_config(&config)?;
            let catalog = source.discover(&config).await?;
            info!(streams = catalog.streams.len(), "Discovery complete");
            writer.write(&Message::Catalog { catalog })?;
        }
        Commands::Read {
            config,
            catalog,
            state,
        } => {
            let config = load_config(&config)?;
            let catalog: ConfiguredCatalog = load_document(&catalog)
                .with_context(|| format!("Failed to load catalog from {}", catalog.display()))?;
            let state: Option<State> = state
                .map(|path| {
                    load_document(&path)
                        .with_context(|| format!("Failed to load state from {}", path.display()))
                })
                .transpose()?;

            let mut records = source.read(&config, &catalog, state).await?;
            while let Some(record) = records.next().await {
                writer.write(&Message::Record { record: record? })?;
            }
            info!(messages = writer.written(), "Read complete");
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<SapReadTableConfig> {
    load_document(path).with_context(|| format!("Failed to load config from {}", path.display()))
}
