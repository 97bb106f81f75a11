use std::process::Command;
use tracing::{info, warn};

/// Opens `url` in the user's default browser. Failure is logged, not fatal.
pub fn open_in_browser(url: &str) {
    let result = {
        #[cfg(target_os = "windows")]
        {
            // Empty title argument so "start" does not treat the URL as the window title
            Command::new("cmd").args(["/C", "start", "", url]).spawn()
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("open").arg(url).spawn()
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            Command::new("xdg-open").arg(url).spawn()
        }
    };

    match result {
        Ok(_) => info!(%url, "Opened map in browser"),
        Err(e) => warn!(%url, "Failed to open browser: {}", e),
    }
}
