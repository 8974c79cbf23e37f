mod cli;

use axum::Router;
use backend::Settings;
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Loads `KEY=value` pairs into the environment without overriding variables
/// that are already set. With no path, `.env` is searched for upwards from
/// the working directory.
fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenv::from_path(path).ok().map(|_| path.to_path_buf()),
        None => dotenv::dotenv().ok(),
    }
}

fn log_filter(var: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new("info"))
}

async fn bind(port: u16) -> std::io::Result<TcpListener> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    Ok(listener)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Before the subscriber, so RUST_LOG may come from .env too.
    let env_file = load_env_file(None);
    tracing_subscriber::registry()
        .with(log_filter(EnvFilter::DEFAULT_ENV))
        .with(tracing_subscriber::fmt::layer())
        .init();
    if let Some(path) = env_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    let cli = cli::Cli::parse();

    // Without a key there is nothing to serve; stop before binding.
    let settings = Settings::load(&cli.secrets_file).inspect_err(|e| {
        tracing::error!("{}", e);
    })?;

    let router = Router::new().fallback_service(ServeDir::new(&cli.dist_dir));
    let listener = bind(cli.port).await.inspect_err(|e| {
        tracing::error!("Failed to bind port {}: {}", cli.port, e);
    })?;
    let router = backend::init(router, &settings);
    axum::serve(listener, router).await?;
    Ok(())
}
