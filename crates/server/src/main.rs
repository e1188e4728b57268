//! Skill analysis HTTP server

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use skill_analysis::UciLauncher;
use skill_server::{build_router, AppConfig, AppState, UploadStore};

#[derive(Parser)]
#[command(name = "skill-server")]
#[command(about = "Serve game uploads, skill reports and study guides over HTTP")]
struct Args {
    /// TOML config file with [server], [engine] and [thresholds] tables
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply_env();
    config.validate()?;

    let uploads = UploadStore::open(&config.server.upload_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create upload dir {}",
                config.server.upload_dir.display()
            )
        })?;
    if !config.server.guides_dir.is_dir() {
        tracing::warn!(
            guides_dir = %config.server.guides_dir.display(),
            "guides directory does not exist; guide downloads will fail"
        );
    }

    tracing::info!(
        "starting skill server: bind_addr={} engine={} think_ms={} max_upload_bytes={}",
        config.server.bind,
        config.analysis.engine.program.display(),
        config.analysis.engine.think_time_ms,
        config.server.max_upload_bytes
    );

    let state = AppState {
        uploads: Arc::new(uploads),
        launcher: Arc::new(UciLauncher::new(config.analysis.engine.clone())),
        thresholds: config.analysis.thresholds,
        guides_dir: config.server.guides_dir.clone(),
        max_upload_bytes: config.server.max_upload_bytes,
    };

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
