use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod browser;
mod classifier;
mod composer;
mod constants;
mod feed;
mod layers;
mod server;
mod settings;
mod transform;

use server::{start_server, AppState};
use settings::Settings;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quakemap=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    info!("QuakeMap v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load().context("Failed to load settings")?;
    info!(
        earthquakes = %settings.earthquakes_url,
        boundaries = %settings.boundaries_url,
        timeout_secs = settings.fetch_timeout_secs,
        "Feeds configured"
    );

    let state = AppState::from_settings(settings).context("Failed to initialize application state")?;
    start_server(state).await?;

    info!("Server stopped");
    Ok(())
}
