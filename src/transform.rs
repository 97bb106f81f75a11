use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classifier::{color_for, radius_for};
use crate::feed::EarthquakeRecord;

const UNKNOWN_PLACE: &str = "Unknown location";
const INVALID_DATE: &str = "Invalid Date";
// Range a browser Date accepts, in epoch milliseconds
const MAX_DATE_MILLIS: i64 = 8_640_000_000_000_000;

/// Marker position in render order: latitude, longitude, depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    pub depth: Option<f64>,
}

/// Everything the renderer needs to draw one earthquake circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDescriptor {
    pub position: Position,
    pub magnitude: f64,
    pub color: &'static str,
    pub radius: f64,
    pub popup_text: String,
}

pub fn transform(record: &EarthquakeRecord) -> MarkerDescriptor {
    MarkerDescriptor {
        position: Position {
            lat: record.latitude,
            lon: record.longitude,
            depth: record.depth,
        },
        magnitude: record.magnitude,
        color: color_for(record.magnitude),
        radius: radius_for(record.magnitude),
        popup_text: popup_text(record.place.as_deref(), record.timestamp),
    }
}

/// Popup markup: place heading, a rule, then the event time.
pub fn popup_text(place: Option<&str>, timestamp: Option<i64>) -> String {
    let place = place.map(escape_html).unwrap_or_else(|| UNKNOWN_PLACE.to_string());
    format!("<h3>{}</h3><hr><p>{}</p>", place, format_timestamp(timestamp))
}

/// Renders epoch milliseconds as e.g. `Tue Nov 14 2023 22:13:20 UTC`.
pub fn format_timestamp(timestamp: Option<i64>) -> String {
    timestamp
        .filter(|ms| (-MAX_DATE_MILLIS..=MAX_DATE_MILLIS).contains(ms))
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%a %b %d %Y %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
