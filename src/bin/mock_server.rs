use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use maintenance_hub::{
    config,
    logging::{self, LoggerConfig},
    mock::{self, MockStore},
};

#[derive(Parser)]
#[command(
    name = "mock-server",
    about = "In-memory maintenance REST API for local development",
    version
)]
struct Args {
    #[arg(long, help = "JSON file with initial records keyed by resource")]
    seed: Option<PathBuf>,
    #[arg(long, help = "Bind host (defaults to mock_host from config)")]
    host: Option<String>,
    #[arg(long, help = "Bind port (defaults to mock_port from config)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = config::load_config().context("failed to load application config")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    if let Some(host) = args.host {
        cfg.mock_host = host;
    }
    if let Some(port) = args.port {
        cfg.mock_port = port;
    }

    let store = match &args.seed {
        Some(path) => MockStore::load_seed(path)
            .with_context(|| format!("failed to seed from {}", path.display()))?,
        None => MockStore::new(),
    };

    let logger = logging::setup_logger(&LoggerConfig::from(&cfg));
    // Serve under the same path prefix the client is configured with.
    let prefix = url::Url::parse(&cfg.api_base_url)
        .map(|u| u.path().to_string())
        .unwrap_or_default();
    let app = mock::app(Arc::new(store), logger, &prefix);

    let addr = cfg.mock_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Mock maintenance API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down mock server");
        })
        .await
        .context("mock server failed")?;
    Ok(())
}
