use std::error::Error;

use tracing::info;
use tracing::level_filters::LevelFilter;

use overwork_tracker::api::{AppState, create_router};
use overwork_tracker::config::ConfigLoader;
use overwork_tracker::logging::enable_logging;

const CONFIG_ENV: &str = "OVERWORK_CONFIG";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    enable_logging(LevelFilter::INFO)?;

    let config_dir = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    let bind_address = config.config().settings().bind_address.clone();

    info!(
        config_dir = %config_dir,
        tracker = %config.config().settings().name,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Listening");

    axum::serve(listener, router).await?;
    Ok(())
}
