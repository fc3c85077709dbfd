use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::InteractionError;
use crate::locale::LocaleSettings;
use crate::motion::Easing;

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_SCRIPT_ID: &str = "site-interactions-config";

#[cfg(debug_assertions)]
pub fn default_log_level() -> String {
    "debug".to_string() // Chatty while developing locally
}

#[cfg(not(debug_assertions))]
pub fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub header: HeaderConfig,
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub parallax: ParallaxConfig,
    pub tilt: TiltConfig,
    pub anchor: AnchorConfig,
    pub marquee: MarqueeConfig,
    pub locale: LocaleSettings,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header: HeaderConfig::default(),
            reveal: RevealConfig::default(),
            counter: CounterConfig::default(),
            parallax: ParallaxConfig::default(),
            tilt: TiltConfig::default(),
            anchor: AnchorConfig::default(),
            marquee: MarqueeConfig::default(),
            locale: LocaleSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, InteractionError> {
        if raw.trim().is_empty() {
            return Ok(SiteConfig::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.trim().parse().unwrap_or(LevelFilter::Info)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub selector: String,
    /// Pixels scrolled before the header counts as scrolled.
    pub threshold: f64,
    pub scrolled_class: String,
    pub progress_property: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            selector: "header".to_string(),
            threshold: 8.0,
            scrolled_class: "is-scrolled".to_string(),
            progress_property: "--scroll".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub threshold: f64,
    pub root_margin: String,
    pub visible_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: "[data-reveal]".to_string(),
            threshold: 0.14,
            root_margin: "0px 0px -10% 0px".to_string(),
            visible_class: "is-visible".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub selector: String,
    pub threshold: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            selector: "[data-counter]".to_string(),
            threshold: 0.6,
            duration_ms: 1000.0,
            easing: Easing::QuadInOut,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub attribute: String,
    pub default_factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            attribute: "data-parallax-y".to_string(),
            default_factor: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    pub selector: String,
    pub max_deg: f64,
    pub perspective_px: f64,
    pub active_class: String,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            selector: "[data-tilt]".to_string(),
            max_deg: 6.0,
            perspective_px: 800.0,
            active_class: "is-tilting".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    /// Frame-by-frame progression driven by this crate.
    #[default]
    Animated,
    /// Hand the scroll to the browser's own `behavior: smooth`.
    Native,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub gap_px: f64,
    pub duration_ms: f64,
    pub easing: Easing,
    pub mode: ScrollMode,
    pub update_hash: bool,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            gap_px: 12.0,
            duration_ms: 600.0,
            easing: Easing::QuadInOut,
            mode: ScrollMode::Animated,
            update_hash: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    pub selector: String,
    pub track_selector: String,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            selector: "[data-marquee]".to_string(),
            track_selector: ".marquee".to_string(),
        }
    }
}

/// Counter parameters read from `data-target`, `data-duration` and `data-easing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterSettings {
    pub target: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl CounterSettings {
    pub fn from_attributes(
        target: Option<&str>,
        duration: Option<&str>,
        easing: Option<&str>,
        defaults: &CounterConfig,
    ) -> Self {
        let target = parse_number(target).unwrap_or(0.0);
        let duration_ms = parse_number(duration)
            .map(|ms| ms.max(0.0))
            .unwrap_or(defaults.duration_ms);
        let easing = easing
            .and_then(Easing::from_name)
            .unwrap_or(defaults.easing);
        Self {
            target,
            duration_ms,
            easing,
        }
    }
}

pub const PARALLAX_FACTOR_LIMIT: f64 = 2.0;

/// Parallax factor from `data-parallax-y`. Missing, garbage and zero all mean the default.
pub fn parallax_factor(raw: Option<&str>, default_factor: f64) -> f64 {
    parse_number(raw)
        .filter(|factor| *factor != 0.0)
        .unwrap_or(default_factor)
        .clamp(-PARALLAX_FACTOR_LIMIT, PARALLAX_FACTOR_LIMIT)
}

/// Finite number from an attribute, or None.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Fallback;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_or_partial_json_keeps_defaults() {
        assert_eq!(SiteConfig::from_json("  ").unwrap(), SiteConfig::default());

        let config = SiteConfig::from_json(
            r#"{
                "anchor": { "gap_px": 72, "mode": "native" },
                "counter": { "easing": "cubic-out" },
                "locale": { "fallback": "prefix" },
                "log_level": "warn"
            }"#,
        )
        .unwrap();

        assert_eq!(config.anchor.gap_px, 72.0);
        assert_eq!(config.anchor.mode, ScrollMode::Native);
        assert_eq!(config.anchor.duration_ms, 600.0);
        assert_eq!(config.counter.easing, Easing::CubicOut);
        assert_eq!(config.counter.threshold, 0.6);
        assert_eq!(config.locale.fallback, Fallback::Prefix);
        assert_eq!(config.locale.secondary_root, "/es/");
        assert_eq!(config.level_filter(), LevelFilter::Warn);
    }

    #[test]
    fn custom_routes_replace_site_table() {
        let config = SiteConfig::from_json(
            r#"{ "locale": { "routes": [["/", "/es/"], ["/team.html", "/es/equipo.html"]] } }"#,
        )
        .unwrap();
        assert_eq!(config.locale.routes.len(), 2);
        assert_eq!(config.locale.routes[1].1, "/es/equipo.html");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SiteConfig::from_json(r#"{ "anchor": { "gap_px": "wide" } }"#).unwrap_err();
        assert!(matches!(err, InteractionError::Config(_)));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = SiteConfig {
            log_level: "chatty".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn counter_attributes_are_validated() {
        let defaults = CounterConfig::default();

        let parsed = CounterSettings::from_attributes(Some("1200"), Some(" 2500 "), Some("linear"), &defaults);
        assert_eq!(
            parsed,
            CounterSettings {
                target: 1200.0,
                duration_ms: 2500.0,
                easing: Easing::Linear,
            }
        );

        let garbage = CounterSettings::from_attributes(Some("lots"), Some("NaN"), Some("wobble"), &defaults);
        assert_eq!(garbage.target, 0.0);
        assert_eq!(garbage.duration_ms, 1000.0);
        assert_eq!(garbage.easing, Easing::QuadInOut);

        let instant = CounterSettings::from_attributes(Some("40"), Some("-300"), None, &defaults);
        assert_eq!(instant.duration_ms, 0.0);
    }

    #[test]
    fn parallax_factor_defaults_and_clamps() {
        assert_eq!(parallax_factor(None, 0.15), 0.15);
        assert_eq!(parallax_factor(Some("abc"), 0.15), 0.15);
        assert_eq!(parallax_factor(Some("0"), 0.15), 0.15);
        assert_eq!(parallax_factor(Some("-0.3"), 0.15), -0.3);
        assert_eq!(parallax_factor(Some("inf"), 0.15), 0.15);
        assert_eq!(parallax_factor(Some("40"), 0.15), PARALLAX_FACTOR_LIMIT);
    }
}
