//! Pony Express REST API entry point.
//!
//! Binary name: `ponyd`
//!
//! Parses CLI arguments, initializes the database and services, then serves
//! the HTTP API until interrupted.

mod http;
mod state;

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pony_infra::config::ServerConfig;
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "ponyd", version, about = "Pony Express chat API server")]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "PONY_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log errors only.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,pony=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::init(&config).await?;

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    tracing::info!(addr = %cli.bind, "listening");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

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
