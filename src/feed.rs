use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while downloading or decoding one of the GeoJSON feeds.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to parse GeoJSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

// Only the parts of a USGS feature this crate reads; everything else is ignored.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    // Decoded one by one so a single mistyped feature cannot reject the feed
    #[serde(default)]
    features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    properties: Option<Properties>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    mag: Option<f64>,
    place: Option<String>,
    time: Option<f64>,
}

/// One earthquake event as read from the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeRecord {
    pub longitude: f64,
    pub latitude: f64,
    pub depth: Option<f64>,
    pub magnitude: f64,
    pub place: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: Option<i64>,
}

/// Plate boundary data, kept as raw GeoJSON and handed to the renderer as is.
pub type BoundaryGeometry = serde_json::Value;

impl Feature {
    fn into_record(self) -> Option<EarthquakeRecord> {
        let coordinates = self.geometry?.coordinates;
        let longitude = coordinates.first().copied().flatten()?;
        let latitude = coordinates.get(1).copied().flatten()?;
        let depth = coordinates.get(2).copied().flatten();
        let properties = self.properties.unwrap_or_default();
        let magnitude = properties.mag?;

        Some(EarthquakeRecord {
            longitude,
            latitude,
            depth,
            magnitude,
            place: properties.place,
            timestamp: properties
                .time
                .filter(|t| t.is_finite())
                .map(|t| t as i64),
        })
    }
}

/// Decodes an earthquake FeatureCollection. Features that fail to decode or
/// lack a usable coordinate pair or magnitude are dropped; the rest keep feed
/// order.
pub fn parse_earthquakes(body: &[u8]) -> Result<Vec<EarthquakeRecord>, serde_json::Error> {
    let collection: FeatureCollection = serde_json::from_slice(body)?;
    let total = collection.features.len();

    let records: Vec<EarthquakeRecord> = collection
        .features
        .into_iter()
        .filter_map(|value| serde_json::from_value::<Feature>(value).ok())
        .filter_map(Feature::into_record)
        .collect();

    if records.len() < total {
        warn!(
            skipped = total - records.len(),
            total, "Skipped malformed earthquake features"
        );
    }
    Ok(records)
}

pub fn parse_boundaries(body: &[u8]) -> Result<BoundaryGeometry, serde_json::Error> {
    serde_json::from_slice(body)
}

/// HTTP client for the earthquake and plate boundary feeds.
#[derive(Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    earthquakes_url: String,
    boundaries_url: String,
}

impl FeedClient {
    pub fn new(
        earthquakes_url: impl Into<String>,
        boundaries_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            earthquakes_url: earthquakes_url.into(),
            boundaries_url: boundaries_url.into(),
        })
    }

    pub async fn fetch_earthquakes(&self) -> Result<Vec<EarthquakeRecord>, FeedError> {
        let url = &self.earthquakes_url;
        let body = self.get(url).await?;
        let records = parse_earthquakes(&body).map_err(|source| FeedError::Parse {
            url: url.clone(),
            source,
        })?;
        info!(count = records.len(), "Loaded earthquakes");
        Ok(records)
    }

    pub async fn fetch_boundaries(&self) -> Result<BoundaryGeometry, FeedError> {
        let url = &self.boundaries_url;
        let body = self.get(url).await?;
        let geometry = parse_boundaries(&body).map_err(|source| FeedError::Parse {
            url: url.clone(),
            source,
        })?;
        info!("Loaded plate boundaries");
        Ok(geometry)
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        debug!(%url, "Fetching feed");
        let http_err = |source| FeedError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response.bytes().await.map_err(http_err)?;
        debug!(%url, bytes = bytes.len(), "Feed downloaded");
        Ok(bytes.to_vec())
    }
}
