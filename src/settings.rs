use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::{
    ACCESS_TOKEN_ENV, BOUNDARIES_URL, DEFAULT_BIND_ADDRESS, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_PORT, EARTHQUAKES_URL,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub port: u16,
    pub bind_address: [u8; 4],
    pub earthquakes_url: String,
    pub boundaries_url: String,
    pub fetch_timeout_secs: u64,
    pub access_token: Option<String>,
    pub auto_open_browser: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS,
            earthquakes_url: EARTHQUAKES_URL.to_string(),
            boundaries_url: BOUNDARIES_URL.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            access_token: None,
            auto_open_browser: false,
        }
    }
}

impl Settings {
    /// Loads `quakemap.ini` if present, then applies the environment credential.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            debug!(path = %config_path.display(), "Loaded settings file");
            Self::from_ini_str(&content)
        } else {
            Settings::default()
        };

        settings.apply_env_token(std::env::var(ACCESS_TOKEN_ENV).ok());
        if settings.access_token.is_none() {
            warn!(
                "No imagery access token configured; set {} or access_token in {}. Base map tiles will not load.",
                ACCESS_TOKEN_ENV,
                config_path.display()
            );
        }
        Ok(settings)
    }

    /// Parses `key = value` lines; `#` starts a comment. Unknown keys and
    /// unparsable values keep their defaults.
    pub fn from_ini_str(content: &str) -> Self {
        let mut settings = Settings::default();
        let mut config_map = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim(), value.trim().trim_matches('"'));
            }
        }

        if let Some(port) = config_map.get("port").and_then(|v| v.parse::<u16>().ok()) {
            settings.port = port;
        }
        if let Some(addr) = config_map.get("bind_address").and_then(|v| parse_ipv4(v)) {
            settings.bind_address = addr;
        }
        if let Some(url) = config_map.get("earthquakes_url").filter(|v| !v.is_empty()) {
            settings.earthquakes_url = url.to_string();
        }
        if let Some(url) = config_map.get("boundaries_url").filter(|v| !v.is_empty()) {
            settings.boundaries_url = url.to_string();
        }
        if let Some(secs) = config_map
            .get("fetch_timeout_secs")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
        {
            settings.fetch_timeout_secs = secs;
        }
        if let Some(token) = config_map.get("access_token").filter(|v| !v.is_empty()) {
            settings.access_token = Some(token.to_string());
        }
        if let Some(auto_open) = config_map
            .get("auto_open_browser")
            .and_then(|v| v.parse::<bool>().ok())
        {
            settings.auto_open_browser = auto_open;
        }

        settings
    }

    /// The environment credential wins over the file one.
    pub fn apply_env_token(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.access_token = Some(token.trim().to_string());
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn map_url(&self) -> String {
        let [a, b, c, d] = self.bind_address;
        format!("http://{}.{}.{}.{}:{}", a, b, c, d, self.port)
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push("quakemap.ini");
        path
    }
}

fn parse_ipv4(value: &str) -> Option<[u8; 4]> {
    value.parse::<std::net::Ipv4Addr>().ok().map(|ip| ip.octets())
}
