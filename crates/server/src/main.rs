//! School Notice Generator server
//!
//! Serves `POST /generate-notice`, which turns structured event fields into a
//! formatted HTML notice through a Gemini model.

mod app;
mod error;
mod generator;

use anyhow::Context;
use app::{build_app, AppState};
use clap::Parser;
use generator::NoticeGenerator;
use notice_core::config::Overrides;
use notice_core::{logging, AppConfig, ResponseFormat};
use notice_llm::{create_client, LlmClient};
use notice_prompt::load_catalog;
use std::path::PathBuf;
use std::sync::Arc;

/// School Notice Generator - HTML school notices from structured fields
#[derive(Parser, Debug)]
#[command(name = "notice-server")]
#[command(about = "HTTP service that drafts school notices with a language model", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, env = "NOTICE_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address (e.g., 127.0.0.1:8000)
    #[arg(short, long, env = "NOTICE_BIND")]
    bind: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (gemini)
    #[arg(short, long, env = "NOTICE_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, env = "NOTICE_MODEL")]
    model: Option<String>,

    /// Response format (json, html)
    #[arg(long, env = "NOTICE_RESPONSE_FORMAT")]
    response_format: Option<String>,

    /// Wrap every notice in a standalone HTML document
    #[arg(long)]
    wrap_document: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let response_format = cli
        .response_format
        .as_deref()
        .map(str::parse::<ResponseFormat>)
        .transpose()?;

    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(Overrides {
        bind: cli.bind,
        provider: cli.provider,
        model: cli.model,
        log_level: cli.log_level,
        response_format,
        wrap_document: cli.wrap_document,
        verbose: cli.verbose,
        no_color: cli.no_color,
    });

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;
    config.validate()?;

    tracing::info!("School Notice Generator starting");
    tracing::debug!("Config file: {:?}", config.config_file);
    tracing::debug!("Provider: {}", config.llm.provider);
    tracing::debug!("Model: {}", config.llm.model);

    let catalog = load_catalog(config.notice.catalog_file.as_deref())?;
    tracing::debug!(
        "Notice types ({}): {}",
        catalog.len(),
        catalog.labels().collect::<Vec<_>>().join(", ")
    );

    let llm = build_client(&config)?;
    let generator = NoticeGenerator::new(&config, Arc::new(catalog), llm);

    let state = AppState {
        generator: Arc::new(generator),
        response_format: config.notice.response_format,
    };
    let app = build_app(state, &config.server.allowed_origins);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// The client, or `None` when no API key is set. Requests then fail with a
/// configuration error instead of the server refusing to start.
fn build_client(config: &AppConfig) -> anyhow::Result<Option<Arc<dyn LlmClient>>> {
    let Some(api_key) = config.resolve_api_key() else {
        tracing::warn!("{}", config.missing_key_message());
        return Ok(None);
    };

    let client = create_client(
        &config.llm.provider,
        config.llm.endpoint.as_deref(),
        Some(&api_key),
    )?;
    Ok(Some(client))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
