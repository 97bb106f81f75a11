use serde::Serialize;

use crate::classifier::{color_for, MagnitudeBand};
use crate::constants::{
    EARTHQUAKES_LABEL, FAULT_LINES_LABEL, MAP_CENTER, MAP_CONTAINER_ID, MAP_ZOOM,
    TILE_ATTRIBUTION, TILE_MAX_ZOOM, TILE_URL_TEMPLATE,
};
use crate::layers::{BoundaryOverlay, EarthquakeOverlay};

/// Imagery styles offered as base layers, in layer-control order.
const BASE_LAYERS: [(&str, &str); 3] = [
    ("satellite", "mapbox.satellite"),
    ("grayscale", "mapbox.light"),
    ("outdoors", "mapbox.outdoors"),
];
const DEFAULT_BASE_LAYER: &str = "satellite";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub name: &'static str,
    pub id: &'static str,
    pub url_template: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub container: &'static str,
    pub center: [f64; 2],
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerControl {
    pub collapsed: bool,
    pub base_layers: Vec<&'static str>,
    pub overlays: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: &'static str,
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Header followed by one swatch row per magnitude band, lowest band first.
    pub fn magnitudes() -> Self {
        let entries = MagnitudeBand::ASCENDING
            .iter()
            .map(|band| LegendEntry {
                label: band.label(),
                color: color_for(band.lower_bound()),
            })
            .collect();

        Legend {
            position: "bottomright",
            title: "Magnitudes",
            entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlays {
    pub earthquakes: EarthquakeOverlay,
    pub boundaries: BoundaryOverlay,
}

/// A complete interactive view, ready for the frontend to mount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub view: ViewState,
    pub base_layers: Vec<TileLayer>,
    pub default_base_layer: &'static str,
    pub overlays: Overlays,
    pub overlay_labels: [&'static str; 2],
    pub visible_overlays: Vec<&'static str>,
    pub layer_control: LayerControl,
    pub legend: Legend,
    /// Banner text shown over the map when part of the data could not be loaded.
    pub notice: Option<String>,
}

/// Builds map views around a fixed imagery credential.
#[derive(Debug, Clone)]
pub struct MapComposer {
    access_token: String,
}

impl MapComposer {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn base_layers(&self) -> Vec<TileLayer> {
        BASE_LAYERS
            .iter()
            .map(|&(name, id)| TileLayer {
                name,
                id,
                url_template: TILE_URL_TEMPLATE,
                attribution: TILE_ATTRIBUTION,
                max_zoom: TILE_MAX_ZOOM,
                access_token: self.access_token.clone(),
            })
            .collect()
    }

    pub fn compose(&self, earthquakes: EarthquakeOverlay, boundaries: BoundaryOverlay) -> MapView {
        let base_layers = self.base_layers();
        let overlay_labels = [EARTHQUAKES_LABEL, FAULT_LINES_LABEL];

        MapView {
            view: ViewState {
                container: MAP_CONTAINER_ID,
                center: MAP_CENTER,
                zoom: MAP_ZOOM,
            },
            layer_control: LayerControl {
                collapsed: false,
                base_layers: base_layers.iter().map(|layer| layer.name).collect(),
                overlays: overlay_labels.to_vec(),
            },
            base_layers,
            default_base_layer: DEFAULT_BASE_LAYER,
            overlays: Overlays {
                earthquakes,
                boundaries,
            },
            overlay_labels,
            visible_overlays: overlay_labels.to_vec(),
            legend: Legend::magnitudes(),
            notice: None,
        }
    }
}

impl MapView {
    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }
}
