use rayon::prelude::*;
use serde::Serialize;

use crate::feed::{BoundaryGeometry, EarthquakeRecord};
use crate::transform::{transform, MarkerDescriptor};

/// Circle style shared by every earthquake marker; color and radius vary per marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub stroke: bool,
    pub fill_opacity: f64,
}

pub const EARTHQUAKE_MARKER_STYLE: MarkerStyle = MarkerStyle {
    stroke: false,
    fill_opacity: 0.9,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryStyle {
    pub color: &'static str,
    pub fill_color: &'static str,
    pub weight: u32,
}

pub const BOUNDARY_STYLE: BoundaryStyle = BoundaryStyle {
    color: "orange",
    fill_color: "none",
    weight: 2,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeOverlay {
    pub style: MarkerStyle,
    pub markers: Vec<MarkerDescriptor>,
}

impl EarthquakeOverlay {
    pub fn empty() -> Self {
        Self {
            style: EARTHQUAKE_MARKER_STYLE,
            markers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryOverlay {
    pub style: BoundaryStyle,
    pub geometry: BoundaryGeometry,
}

impl BoundaryOverlay {
    pub fn empty() -> Self {
        assemble_boundary_overlay(serde_json::json!({
            "type": "FeatureCollection",
            "features": []
        }))
    }
}

/// Transforms every record into a marker, in input order.
pub fn assemble_earthquake_overlay(records: &[EarthquakeRecord]) -> EarthquakeOverlay {
    // par_iter over a slice is indexed, so collect keeps input order
    let markers: Vec<MarkerDescriptor> = records.par_iter().map(transform).collect();
    EarthquakeOverlay {
        style: EARTHQUAKE_MARKER_STYLE,
        markers,
    }
}

pub fn assemble_boundary_overlay(geometry: BoundaryGeometry) -> BoundaryOverlay {
    BoundaryOverlay {
        style: BOUNDARY_STYLE,
        geometry,
    }
}
