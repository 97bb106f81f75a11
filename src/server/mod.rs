use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod handlers;
pub mod state;

pub use self::state::AppState;
use handlers::{get_legend, get_map, health, index_html, script_js, style_css};

// Create the main application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/style.css", get(style_css))
        .route("/script.js", get(script_js))
        .route("/api/map", get(get_map))
        .route("/api/legend", get(get_legend))
        .route("/api/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState) -> Result<()> {
    let addr = SocketAddr::from((state.settings.bind_address, state.settings.port));
    let map_url = state.settings.map_url();
    let auto_open = state.settings.auto_open_browser;

    let app = create_app(state);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server started at {}", map_url);

    if auto_open {
        crate::browser::open_in_browser(&map_url);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::routing::get;
    use std::time::Duration;
    use tower::ServiceExt;

    const QUAKES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "mag": 5.2, "place": "Off the coast", "time": 0 },
              "geometry": { "type": "Point", "coordinates": [142.0, 38.0, 30.0] } },
            { "type": "Feature", "properties": { "mag": 0.0, "place": "Nearby", "time": 1000 },
              "geometry": { "type": "Point", "coordinates": [-120.0, 36.0, 2.0] } },
            { "type": "Feature", "properties": { "mag": null },
              "geometry": { "type": "Point", "coordinates": [0.0, 0.0, 0.0] } }
        ]
    }"#;

    const PLATES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "Name": "PA-NA" },
              "geometry": { "type": "LineString", "coordinates": [[-120.0, 35.0], [-121.0, 36.0]] } }
        ]
    }"#;

    const EMPTY: &str = r#"{ "type": "FeatureCollection", "features": [] }"#;

    /// Serves fixture feeds on an ephemeral local port and returns its base URL.
    async fn fixture_feeds(quakes: &'static str) -> String {
        let feeds = Router::new()
            .route("/quakes.geojson", get(move || async move { quakes }))
            .route("/plates.json", get(|| async { PLATES }))
            .route("/broken.json", get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }))
            .route(
                "/slow.json",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    PLATES
                }),
            );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, feeds).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn app(base: &str, quakes_path: &str, plates_path: &str) -> Router {
        app_with_timeout(base, quakes_path, plates_path, 5)
    }

    fn app_with_timeout(base: &str, quakes_path: &str, plates_path: &str, timeout_secs: u64) -> Router {
        let settings = Settings {
            earthquakes_url: format!("{}{}", base, quakes_path),
            boundaries_url: format!("{}{}", base, plates_path),
            fetch_timeout_secs: timeout_secs,
            access_token: Some("pk.test".to_string()),
            ..Settings::default()
        };
        create_app(AppState::from_settings(settings).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn map_view_combines_both_feeds() {
        let base = fixture_feeds(QUAKES).await;
        let (status, json) = get_json(app(&base, "/quakes.geojson", "/plates.json"), "/api/map").await;

        assert_eq!(status, StatusCode::OK);
        let markers = json["overlays"]["earthquakes"]["markers"].as_array().unwrap();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0]["position"]["lat"], 38.0);
        assert_eq!(markers[0]["position"]["lon"], 142.0);
        assert_eq!(markers[0]["color"], "#d73027");
        let radius = markers[0]["radius"].as_f64().unwrap();
        assert!((radius - 182000.0).abs() < 1e-6, "radius {radius}");
        assert_eq!(markers[1]["color"], "#1a9850");
        assert_eq!(markers[1]["radius"], 0.0);

        let plates: serde_json::Value = serde_json::from_str(PLATES).unwrap();
        assert_eq!(json["overlays"]["boundaries"]["geometry"], plates);
        assert_eq!(json["overlays"]["boundaries"]["style"]["color"], "orange");
        assert_eq!(json["base_layers"][0]["access_token"], "pk.test");
        assert_eq!(json["notice"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn empty_earthquake_feed_still_renders_boundaries() {
        let base = fixture_feeds(EMPTY).await;
        let (status, json) = get_json(app(&base, "/quakes.geojson", "/plates.json"), "/api/map").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["overlays"]["earthquakes"]["markers"], serde_json::json!([]));
        assert_eq!(
            json["overlays"]["boundaries"]["geometry"]["features"].as_array().unwrap().len(),
            1
        );
        assert_eq!(json["notice"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn failed_feed_sets_notice_and_keeps_the_other_overlay() {
        let base = fixture_feeds(QUAKES).await;
        let (status, json) = get_json(app(&base, "/quakes.geojson", "/broken.json"), "/api/map").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["overlays"]["earthquakes"]["markers"].as_array().unwrap().len(), 2);
        assert_eq!(json["overlays"]["boundaries"]["geometry"]["features"], serde_json::json!([]));
        assert_eq!(json["notice"], "Could not load plate boundaries.");
    }

    #[tokio::test]
    async fn slow_feed_times_out_into_a_notice() {
        let base = fixture_feeds(QUAKES).await;
        let app = app_with_timeout(&base, "/quakes.geojson", "/slow.json", 1);
        let (status, json) = get_json(app, "/api/map").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["overlays"]["earthquakes"]["markers"].as_array().unwrap().len(), 2);
        assert_eq!(json["overlays"]["boundaries"]["geometry"]["features"], serde_json::json!([]));
        assert_eq!(json["notice"], "Could not load plate boundaries.");
    }

    #[tokio::test]
    async fn mistyped_earthquake_feature_does_not_blank_the_layer() {
        const MIXED: &str = r#"{
            "type": "FeatureCollection",
            "features": [
                { "properties": { "mag": "5.2", "place": "Typed as text", "time": 0 },
                  "geometry": { "coordinates": [142.0, 38.0, 30.0] } },
                { "properties": { "mag": 3.1, "place": "Kept", "time": 0 },
                  "geometry": { "coordinates": [-120.0, 36.0, 2.0] } }
            ]
        }"#;
        let base = fixture_feeds(MIXED).await;
        let (status, json) = get_json(app(&base, "/quakes.geojson", "/plates.json"), "/api/map").await;

        assert_eq!(status, StatusCode::OK);
        let markers = json["overlays"]["earthquakes"]["markers"].as_array().unwrap();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0]["color"], "#fee08b");
        assert_eq!(json["notice"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn both_feeds_failing_is_reported_once() {
        let base = fixture_feeds(QUAKES).await;
        let (_, json) = get_json(app(&base, "/missing", "/broken.json"), "/api/map").await;
        assert_eq!(json["notice"], "Could not load earthquake data or plate boundaries.");
    }

    #[tokio::test]
    async fn legend_and_health_endpoints() {
        let app = app("http://127.0.0.1:9", "/q", "/p");
        let (status, legend) = get_json(app.clone(), "/api/legend").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(legend["title"], "Magnitudes");
        assert_eq!(legend["entries"].as_array().unwrap().len(), 6);
        assert_eq!(legend["entries"][5]["label"], "5+");

        let (status, health) = get_json(app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], "ok");
    }

    #[tokio::test]
    async fn serves_embedded_frontend() {
        let app = app("http://127.0.0.1:9", "/q", "/p");
        for (uri, content_type) in [
            ("/", "text/html; charset=utf-8"),
            ("/style.css", "text/css"),
            ("/script.js", "application/javascript"),
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(response.headers()[header::CONTENT_TYPE], content_type, "{uri}");
        }
    }
}
