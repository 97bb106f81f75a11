use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use rust_embed::RustEmbed;
use tracing::{error, info};

use crate::composer::{Legend, MapView};
use crate::layers::{
    assemble_boundary_overlay, assemble_earthquake_overlay, BoundaryOverlay, EarthquakeOverlay,
};

use super::state::AppState;

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct Asset;

fn embedded(path: &str, content_type: &'static str) -> Response {
    match Asset::get(path) {
        Some(file) => ([(header::CONTENT_TYPE, content_type)], file.data.into_owned()).into_response(),
        None => {
            error!(%path, "Embedded asset missing");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub async fn index_html() -> Response {
    match Asset::get("index.html") {
        Some(file) => Html(file.data.into_owned()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn style_css() -> Response {
    embedded("style.css", "text/css")
}

pub async fn script_js() -> Response {
    embedded("script.js", "application/javascript")
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn get_legend() -> Json<Legend> {
    Json(Legend::magnitudes())
}

/// Fetches both feeds, builds the overlays and returns the composed view.
/// A failed feed leaves its overlay empty and sets the view's notice.
pub async fn get_map(State(state): State<AppState>) -> Result<Json<MapView>, StatusCode> {
    let (earthquakes, boundaries) = tokio::join!(
        state.feeds.fetch_earthquakes(),
        state.feeds.fetch_boundaries()
    );

    let mut problems = Vec::new();

    let records = earthquakes.unwrap_or_else(|e| {
        error!("Earthquake feed failed: {}", e);
        problems.push("earthquake data");
        Vec::new()
    });

    let boundary_overlay = match boundaries {
        Ok(geometry) => assemble_boundary_overlay(geometry),
        Err(e) => {
            error!("Plate boundary feed failed: {}", e);
            problems.push("plate boundaries");
            BoundaryOverlay::empty()
        }
    };

    // Large feeds are transformed on rayon; keep that off the async workers
    let earthquake_overlay: EarthquakeOverlay =
        tokio::task::spawn_blocking(move || assemble_earthquake_overlay(&records))
            .await
            .map_err(|e| {
                error!("Marker transform task failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;

    info!(
        markers = earthquake_overlay.markers.len(),
        failed_feeds = problems.len(),
        "Composed map view"
    );

    let notice = if problems.is_empty() {
        None
    } else {
        Some(format!("Could not load {}.", problems.join(" or ")))
    };

    let view = state
        .composer
        .compose(earthquake_overlay, boundary_overlay)
        .with_notice(notice);
    Ok(Json(view))
}
