use std::path::PathBuf;

use mock_server::{load_seed, run_with, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = std::env::var("DATA_PATH").ok().map(PathBuf::from);
    let records = match &data_path {
        Some(path) => load_seed(path).await?,
        None => Vec::new(),
    };
    info!(count = records.len(), "loaded medicines");

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    run_with(listener, AppState::new(records, data_path)).await?;
    Ok(())
}
