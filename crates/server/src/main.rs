//! Everwyn server binary.
//!
//! ```bash
//! # Serve the API (JWT_SECRET is required)
//! JWT_SECRET=change-me cargo run -p everwyn-server
//!
//! # Create the development account testuser/password123
//! JWT_SECRET=change-me cargo run -p everwyn-server -- seed
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use everwyn_server::{ServerConfig, logging, router, seed, store};
use runtime::Runtime;

/// Everwyn virtual pet server
#[derive(Parser)]
#[command(name = "everwyn")]
#[command(about = "Virtual pet backend", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Parser)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,

    /// Create the development user if it does not exist
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = ServerConfig::from_env()?;
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Seed => run_seed(config).await,
    }
}

async fn build_runtime(config: &ServerConfig) -> Result<Runtime> {
    let store = store::open_store(config)?;
    Runtime::builder()
        .config(config.runtime.clone())
        .shared_store(store)
        .jwt_secret(config.jwt_secret.clone())
        .build()
        .await
        .context("failed to start runtime")
}

async fn serve(config: ServerConfig) -> Result<()> {
    tracing::info!("Starting Everwyn server");
    tracing::info!(
        "Decay: enabled={} amount={} every {:?}",
        config.runtime.decay.enabled,
        config.runtime.decay.amount,
        config.runtime.decay.period
    );

    let runtime = build_runtime(&config).await?;
    let app = router(runtime.service());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("HTTP server stopped, shutting down runtime");
    runtime.shutdown().await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn run_seed(mut config: ServerConfig) -> Result<()> {
    config.runtime.decay.enabled = false;
    let runtime = build_runtime(&config).await?;
    seed::seed(&runtime.service()).await?;
    runtime.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
