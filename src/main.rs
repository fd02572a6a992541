use std::sync::Arc;

use cyberdesk::config::AppConfig;
use cyberdesk::services::desk::PaperDesk;
use cyberdesk::{routes, state};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let addr = config.socket_addr();
    let urls = routes::urlconf()?;
    for (path, route) in urls.iter() {
        tracing::debug!(%path, name = route.name, "route registered");
    }

    let state = state::AppState::new(config, urls, Arc::new(PaperDesk::new()));
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, "cyberdesk listening");
    axum::serve(listener, app).await?;
    Ok(())
}
