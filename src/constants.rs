// Port configuration
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_BIND_ADDRESS: [u8; 4] = [127, 0, 0, 1];

// Feeds: all earthquakes from the past seven days, and PB2002 plate boundaries
pub const EARTHQUAKES_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";
pub const BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

// Imagery credential is read from the environment first, then from the INI file
pub const ACCESS_TOKEN_ENV: &str = "QUAKEMAP_ACCESS_TOKEN";

// Tile imagery
pub const TILE_URL_TEMPLATE: &str =
    "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}";
pub const TILE_ATTRIBUTION: &str = "Map data &copy; <a href=\"https://www.openstreetmap.org/\">OpenStreetMap</a> contributors, <a href=\"https://creativecommons.org/licenses/by-sa/2.0/\">CC-BY-SA</a>, Imagery © <a href=\"https://www.mapbox.com/\">Mapbox</a>";
pub const TILE_MAX_ZOOM: u8 = 18;

// Initial view
pub const MAP_CONTAINER_ID: &str = "map";
pub const MAP_CENTER: [f64; 2] = [37.0902, -95.7129];
pub const MAP_ZOOM: u8 = 3;

// Overlay labels, as shown in the layer control
pub const EARTHQUAKES_LABEL: &str = "Earthquakes";
pub const FAULT_LINES_LABEL: &str = "Fault Lines";
