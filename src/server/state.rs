use anyhow::Context;
use std::sync::Arc;

use crate::composer::MapComposer;
use crate::feed::FeedClient;
use crate::settings::Settings;

// Application state shared by all handlers; immutable after startup
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub feeds: FeedClient,
    pub composer: MapComposer,
}

impl AppState {
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let feeds = FeedClient::new(
            settings.earthquakes_url.clone(),
            settings.boundaries_url.clone(),
            settings.fetch_timeout(),
        )
        .context("Failed to build feed HTTP client")?;
        let composer = MapComposer::new(settings.access_token.clone().unwrap_or_default());

        Ok(Self {
            settings: Arc::new(settings),
            feeds,
            composer,
        })
    }
}
