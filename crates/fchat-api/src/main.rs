//! fchat REST API entry point.
//!
//! Binary name: `fchat`
//!
//! Parses CLI arguments, loads `.env` and settings, wires the credential
//! store and the LLM provider, then serves the HTTP API until Ctrl+C or
//! SIGTERM.

mod http;
mod state;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fchat_infra::config::Settings;
use state::AppState;

/// Streaming chat backend with flat-file registration and login.
#[derive(Parser)]
#[command(name = "fchat", version, about, long_about = None)]
struct Cli {
    /// Host to bind to.
    #[arg(long, env = "FCHAT_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(short, long, env = "FCHAT_PORT", default_value_t = 8088)]
    port: u16,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` must be in the environment before clap resolves env-backed
    // arguments and before settings are read.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,fchat_api=debug,fchat_core=debug,fchat_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let settings = Settings::from_env()?;
    let cors_origin: HeaderValue = settings
        .cors_origin
        .parse()
        .context("FCHAT_CORS_ORIGIN is not a valid header value")?;

    let state = AppState::init(&settings).await?;

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "fchat API listening");

    let router = http::router::build_router(state, cors_origin);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
