//! Site Configuration
//!
//! Optional `window.NOVEL_SITE_CONFIG` object, read once at startup.
//! Every field may be omitted; missing fields take the defaults below.

use serde::Deserialize;
use touch_carousel::{CarouselOptions, DEFAULT_AUTOPLAY_MS, DEFAULT_CARD_MARGIN_PX};
use wasm_bindgen::JsValue;

/// Endpoint value shipped in the page template. Leaving it in place enables demo mode.
pub const PLACEHOLDER_API_URL: &str = "YOUR_GOOGLE_APPS_SCRIPT_URL_HERE";

const CONFIG_GLOBAL: &str = "NOVEL_SITE_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    /// Counters web app URL
    pub api_url: String,
    /// Header turns "scrolled" strictly above this offset
    pub scroll_threshold: f64,
    /// Carousel autoplay period, 0 disables
    pub autoplay_ms: u32,
    /// Simulated chapter fetch latency
    pub chapter_delay_ms: u32,
    pub card_margin_px: f64,
    pub log_level: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_url: PLACEHOLDER_API_URL.to_string(),
            scroll_threshold: 50.0,
            autoplay_ms: DEFAULT_AUTOPLAY_MS,
            chapter_delay_ms: 500,
            card_margin_px: DEFAULT_CARD_MARGIN_PX,
            log_level: None,
        }
    }
}

impl SiteConfig {
    /// Read the config global. Absent means defaults; malformed is an error.
    pub fn from_window(window: &web_sys::Window) -> Result<Self, String> {
        let raw = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str(CONFIG_GLOBAL))
            .map_err(|e| format!("{:?}", e))?;
        if raw.is_undefined() || raw.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(raw).map_err(|e| e.to_string())
    }

    /// True when no real endpoint is configured
    pub fn is_demo(&self) -> bool {
        let url = self.api_url.trim();
        url.is_empty() || url == PLACEHOLDER_API_URL
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or_else(default_log_level)
    }

    pub fn carousel_options(&self) -> CarouselOptions {
        CarouselOptions {
            card_margin_px: self.card_margin_px,
            autoplay_ms: (self.autoplay_ms > 0).then_some(self.autoplay_ms),
        }
    }
}

pub fn default_log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert!(config.is_demo());
        assert_eq!(config.scroll_threshold, 50.0);
        assert_eq!(config.autoplay_ms, 5_000);
        assert_eq!(config.chapter_delay_ms, 500);
        assert_eq!(config.card_margin_px, 16.0);
    }

    #[test]
    fn test_partial_config() {
        let config: SiteConfig = serde_json::from_str(
            r#"{"apiUrl": "https://script.example.com/exec", "autoplayMs": 8000}"#,
        )
        .unwrap();
        assert!(!config.is_demo());
        assert_eq!(config.autoplay_ms, 8_000);
        assert_eq!(config.chapter_delay_ms, 500);
    }

    #[test]
    fn test_blank_url_is_demo() {
        let config = SiteConfig {
            api_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.is_demo());
    }

    #[test]
    fn test_log_level() {
        let mut config = SiteConfig::default();
        assert_eq!(config.log_level(), default_log_level());
        config.log_level = Some("warn".to_string());
        assert_eq!(config.log_level(), log::Level::Warn);
        config.log_level = Some("loud".to_string());
        assert_eq!(config.log_level(), default_log_level());
    }

    #[test]
    fn test_autoplay_disabled() {
        let config = SiteConfig {
            autoplay_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.carousel_options().autoplay_ms, None);
        assert_eq!(SiteConfig::default().carousel_options(), CarouselOptions::default());
    }
}
