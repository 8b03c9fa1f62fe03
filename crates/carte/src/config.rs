//! Page behaviour constants.
//!
//! Every section deserializes with `#[serde(default)]`, so a config file only
//! needs the values it overrides.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::timeline::{DEFAULT_SETTLE_MS, DEFAULT_STAGGER_MS, RevealTiming};

pub const DEFAULT_CATEGORY: &str = "burger";
pub const DEFAULT_WHATSAPP_URL: &str = "https://wa.me/+963996222278";
pub const DEFAULT_FALLBACK_ITEM_NAME: &str = "المنتج المحدد";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub filter: FilterConfig,
    pub nav: NavConfig,
    pub scroll: ScrollConfig,
    pub model: ModelConfig,
    pub order: OrderConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub default_category: Category,
    pub stagger_ms: u64,
    pub settle_ms: u64,
}

impl FilterConfig {
    pub fn timing(&self) -> RevealTiming {
        RevealTiming {
            stagger_ms: self.stagger_ms,
            settle_ms: self.settle_ms,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            default_category: Category::new(DEFAULT_CATEGORY),
            stagger_ms: DEFAULT_STAGGER_MS,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Height of the fixed navbar, subtracted from scroll targets.
    pub navbar_offset: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig { navbar_offset: 80.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub navbar_solid_threshold: f64,
    pub navbar_hide_threshold: f64,
    pub cta_threshold: f64,
    /// Distance below the viewport top used to pick the active section.
    pub active_marker_offset: f64,
    /// A scroll burst ends after this long without scroll events.
    pub quiet_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            navbar_solid_threshold: 100.0,
            navbar_hide_threshold: 200.0,
            cta_threshold: 500.0,
            active_marker_offset: 100.0,
            quiet_ms: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub tick_ms: u64,
    /// Largest simulated increment per tick, in percent.
    pub max_step: f64,
    /// Simulated progress never passes this until the model really loads.
    pub simulated_cap: f64,
    /// Pause between reaching 100% and hiding the loading overlay.
    pub reveal_delay_ms: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            tick_ms: 200,
            max_step: 15.0,
            simulated_cap: 90.0,
            reveal_delay_ms: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    pub whatsapp_url: String,
    pub fallback_item_name: String,
    /// Length of the button press animation.
    pub press_ms: u64,
}

impl Default for OrderConfig {
    fn default() -> Self {
        OrderConfig {
            whatsapp_url: DEFAULT_WHATSAPP_URL.to_string(),
            fallback_item_name: DEFAULT_FALLBACK_ITEM_NAME.to_string(),
            press_ms: 150,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page() {
        let config = SiteConfig::default();
        assert_eq!(config.filter.default_category.as_str(), "burger");
        assert_eq!(config.filter.timing(), RevealTiming::default());
        assert_eq!(config.scroll.cta_threshold, 500.0);
        assert_eq!(config.order.whatsapp_url, "https://wa.me/+963996222278");
    }

    #[test]
    fn partial_override() {
        let config: SiteConfig = serde_json::from_str(
            r#"{
                "filter": { "default_category": "pizza", "stagger_ms": 50 },
                "nav": { "navbar_offset": 64 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.filter.default_category.as_str(), "pizza");
        assert_eq!(config.filter.stagger_ms, 50);
        assert_eq!(config.filter.settle_ms, 100);
        assert_eq!(config.nav.navbar_offset, 64.0);
        assert_eq!(config.model, ModelConfig::default());
    }
}
