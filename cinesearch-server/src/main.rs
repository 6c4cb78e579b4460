use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use cinesearch::config::{CinesearchConfig, ConfigLoader, load_dotenv};
use tokio::net::TcpListener;
use tracing::{info, warn};

use cinesearch_server::cli::CliArgs;
use cinesearch_server::config::ServerConfig;
use cinesearch_server::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Variables from .env feed the CLI defaults and every config layer
    let dotenv_path = load_dotenv()?;

    // Parse command line arguments
    let cli_args = CliArgs::parse();

    // Set up logging
    let filter = if let Some(ref level) = cli_args.log_level {
        tracing_subscriber::EnvFilter::new(level)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Cinesearch server v{}", cinesearch::VERSION);
    if let Some(path) = &dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    // Load configuration from CLI arguments and environment variables
    let server_config = ServerConfig::from_cli_and_env(cli_args)?;
    info!("Server configuration loaded");

    let config = match &server_config.config_file_path {
        Some(path) => load_config_file(path)?,
        None => {
            info!("No config file provided, using default locations and environment");
            ConfigLoader::new()
                .load_default_files()
                .load_env()
                .load_meili_env()
                .extract()?
        }
    };

    let search = config.search.clone();
    let reranker = cinesearch::init(config)?;

    match reranker.health().await {
        Ok(()) => info!("Search index is reachable"),
        Err(e) => warn!("Search index is not reachable yet: {}", e),
    }

    let app_state = Arc::new(AppState::new(reranker, search, server_config.clone()));

    // Create the router with all API endpoints
    let app = create_router(app_state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("API documentation available at http://{}/docs", addr);

    if server_config.allows_any_origin() {
        info!("CORS: any origin allowed");
    } else {
        info!("CORS: allowed origins {:?}", server_config.cors_origins);
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load the configuration file, falling back to defaults and environment if it
/// cannot be read or parsed.
fn load_config_file(path: &Path) -> Result<CinesearchConfig> {
    info!("Loading configuration from: {}", path.display());

    let mut loader = ConfigLoader::new();
    let loaded = loader
        .load_file(path)
        .map(|loader| loader.load_env().load_meili_env().extract());

    match loaded {
        Ok(Ok(config)) => {
            info!("Successfully loaded configuration from {}", path.display());
            Ok(config)
        }
        Ok(Err(e)) | Err(e) => {
            warn!(
                "Failed to load config file {}: {}. Using defaults.",
                path.display(),
                e
            );
            Ok(ConfigLoader::new().load_env().load_meili_env().extract()?)
        }
    }
}
