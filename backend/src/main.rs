use tokio::net::TcpListener;
use tracing::info;

mod app;
mod config;
mod logging;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup()?;

    let config = ServerConfig::from_env()?;
    info!("Serving pages from {:?}", config.frontend_dir);
    if let Some(base) = &config.api_base_url {
        info!("Advertising API base {}", base);
    }

    let app = app::router(&config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
