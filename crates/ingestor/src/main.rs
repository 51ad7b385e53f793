//! Ingestor - two-stream firehose to warehouse ingestion
//!
//! # Usage
//!
//! ```bash
//! # Run with the default config
//! ingestor
//! ingestor --config configs/config.toml
//!
//! # Replay a recorded capture through the in-memory warehouse
//! ingestor --config configs/local.toml < capture.jsonl
//! ```
//!
//! Wires one pipeline per named stream (`sample`, `user`) against a
//! shared warehouse client, plus the joint progress reporter, and blocks
//! until both pipelines stop or Ctrl-C is received.

use anyhow::{Context, Result};
use clap::Parser;
use hydrant_config::{Config, StreamConfig, WarehouseMode};
use hydrant_metrics::ProgressAggregator;
use hydrant_pipeline::{
    BatchInserter, ErrorSink, Supervisor, Windower, DEFAULT_SOURCE_CHANNEL_SIZE,
};
use hydrant_protocol::StreamName;
use hydrant_sinks::{
    ErrorTable, HttpErrorTable, HttpWarehouse, HttpWarehouseConfig, MemoryErrorTable,
    MemoryWarehouse, Warehouse,
};
use hydrant_sources::{open_reader, JsonlSource};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Ingestor - firehose to warehouse ingestion
#[derive(Parser, Debug)]
#[command(name = "ingestor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "configs/config.toml")]
    config: std::path::PathBuf,

    /// Log level override (defaults to the config's [logging] level)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_file(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level)?;

    run(config).await
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}

async fn run(config: Config) -> Result<()> {
    let cancel = CancellationToken::new();

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            signal_cancel.cancel();
        }
    });

    match config.warehouse.mode {
        WarehouseMode::Http => {
            let mut http = HttpWarehouseConfig::default()
                .with_base_url(config.warehouse.base_url.clone())
                .with_request_timeout(config.warehouse.request_timeout);

            if let Some(ref var) = config.warehouse.auth_token_env {
                let token = std::env::var(var)
                    .with_context(|| format!("reading warehouse auth token from ${}", var))?;
                http = http.with_auth_token(token);
            }

            let warehouse = Arc::new(HttpWarehouse::new(http.clone())?);
            let errors = Arc::new(HttpErrorTable::new(
                http,
                config.warehouse.error_table.clone(),
            )?);
            run_pipelines(config, warehouse, errors, cancel).await
        }
        WarehouseMode::Memory => {
            tracing::warn!("running against the in-memory warehouse; nothing is durable");
            let warehouse = Arc::new(MemoryWarehouse::new());
            let errors = Arc::new(MemoryErrorTable::new());
            run_pipelines(config, warehouse, errors, cancel).await
        }
    }
}

/// Handles for one running stream pipeline
struct StreamTasks {
    source: tokio::task::JoinHandle<()>,
    supervisor: tokio::task::JoinHandle<u64>,
}

async fn run_pipelines<W, T>(
    config: Config,
    warehouse: Arc<W>,
    errors: Arc<T>,
    cancel: CancellationToken,
) -> Result<()>
where
    W: Warehouse + 'static,
    T: ErrorTable + 'static,
{
    let (sample_progress, sample_watch) = watch::channel(0);
    let (user_progress, user_watch) = watch::channel(0);

    let sample = spawn_stream(
        StreamName::Sample,
        &config,
        &config.streams.sample,
        Arc::clone(&warehouse),
        Arc::clone(&errors),
        sample_progress,
        &cancel,
    )
    .await?;

    let user = spawn_stream(
        StreamName::User,
        &config,
        &config.streams.user,
        warehouse,
        errors,
        user_progress,
        &cancel,
    )
    .await?;

    let aggregator = ProgressAggregator::new(config.progress.clone(), sample_watch, user_watch);
    let reporter = tokio::spawn(aggregator.run(cancel.clone()));

    // The blocking wait: both pipelines must reach Stopped.
    let sample_committed = sample
        .supervisor
        .await
        .context("sample pipeline task failed")?;
    let user_committed = user.supervisor.await.context("user pipeline task failed")?;

    // Both progress senders are gone now, so the reporter winds down on
    // its own; the sources stop once their receivers are dropped.
    reporter.await.context("progress reporter task failed")?;
    sample.source.await.context("sample source task failed")?;
    user.source.await.context("user source task failed")?;

    tracing::info!(
        sample = sample_committed,
        user = user_committed,
        total = sample_committed + user_committed,
        "ingestion finished"
    );

    Ok(())
}

async fn spawn_stream<W, T>(
    stream: StreamName,
    config: &Config,
    stream_config: &StreamConfig,
    warehouse: Arc<W>,
    errors: Arc<T>,
    progress: watch::Sender<u64>,
    cancel: &CancellationToken,
) -> Result<StreamTasks>
where
    W: Warehouse + 'static,
    T: ErrorTable + 'static,
{
    let reader = open_reader(&stream_config.source)
        .await
        .with_context(|| format!("opening source '{}' for {}", stream_config.source, stream))?;

    let (tx, rx) = mpsc::channel(DEFAULT_SOURCE_CHANNEL_SIZE);
    let source = JsonlSource::new(stream.as_str(), reader, tx);

    let source_cancel = cancel.clone();
    let source_handle = tokio::spawn(async move {
        if let Err(e) = source.run(source_cancel).await {
            tracing::error!(stream = %stream, error = %e, "source failed");
        }
    });

    let windower = Windower::new(rx, config.window.max_count, config.window.max_window);
    let inserter = BatchInserter::new(
        warehouse,
        stream_config.table.clone(),
        config.retry.to_policy(),
    );
    let error_sink = ErrorSink::new(stream, errors);

    let supervisor = Supervisor::new(stream, windower, inserter, error_sink, progress);
    let supervisor_handle = tokio::spawn(supervisor.run(cancel.clone()));

    Ok(StreamTasks {
        source: source_handle,
        supervisor: supervisor_handle,
    })
}
