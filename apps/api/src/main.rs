mod config;
mod errors;
mod generation;
mod intake;
mod llm_client;
mod records;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::records::{drain_writer, CsvRecordStore, RecordSchema, RecordWriter};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Dream Chaser v{} ({} form)",
        env!("CARGO_PKG_VERSION"),
        config.variant.as_str()
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Start the record writer (owns the CSV file for the life of the process)
    let store = CsvRecordStore::new(
        config.records_path.clone(),
        RecordSchema::for_form(config.variant.form_schema()),
    );
    let (records, writer) = RecordWriter::spawn(store)?;
    info!("Recording submissions to {}", config.records_path.display());

    if config.admin_secret_key.is_none() {
        info!("ADMIN_SECRET_KEY not set, admin CSV download is disabled");
    }

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;

    // Build app state
    let state = AppState {
        config: Arc::new(config),
        generator: Arc::new(llm),
        records,
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and every RecordWriter sender in it) is gone; flush what is queued.
    drain_writer(writer).await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}
