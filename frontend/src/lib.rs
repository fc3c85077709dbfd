use log::{debug, info, warn, Level};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod dom;
pub mod error;
pub mod format;
pub mod geometry;
pub mod locale;
pub mod motion;

pub mod features {
    pub mod anchor;
    pub mod counter;
    pub mod header;
    pub mod marquee;
    pub mod parallax;
    pub mod reveal;
    pub mod switcher;
    pub mod tilt;
}

use config::SiteConfig;
use dom::PageContext;
use error::InteractionError;
use locale::{resolve, LocaleRouteTable};

type Installer = fn(&PageContext) -> Result<(), InteractionError>;

const FEATURES: [(&str, Installer); 8] = [
    ("header", features::header::install),
    ("reveal", features::reveal::install),
    ("marquee", features::marquee::install),
    ("parallax", features::parallax::install),
    ("counter", features::counter::install),
    ("tilt", features::tilt::install),
    ("anchor", features::anchor::install),
    ("switcher", features::switcher::install),
];

#[wasm_bindgen(start)]
pub fn start() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging; Err only means a logger is already set
    let _ = console_log::init_with_level(Level::Trace);
    log::set_max_level(log::LevelFilter::Info);

    info!("Starting site interactions");
    let ctx = match PageContext::from_window() {
        Ok(ctx) => ctx,
        Err(err) => {
            warn!("Site interactions disabled: {}", err);
            return;
        }
    };
    log::set_max_level(ctx.config.level_filter());

    install_all(&ctx);
}

/// Installs every feature on its own; one failing never stops the rest.
pub fn install_all(ctx: &PageContext) -> usize {
    let mut installed = 0;
    for (name, install) in FEATURES {
        match install(ctx) {
            Ok(()) => installed += 1,
            Err(err) if err.is_skip() => debug!("Skipping {}: {}", name, err),
            Err(err) => warn!("Feature {} failed: {}", name, err),
        }
    }
    info!("{} of {} features active", installed, FEATURES.len());
    installed
}

/// Switcher targets for `path` using the built-in route table, for page scripts
/// that build their own language menu.
#[wasm_bindgen(js_name = localeLinks)]
pub fn locale_links(path: &str) -> Result<JsValue, JsValue> {
    let config = SiteConfig::default();
    let table = LocaleRouteTable::from(&config.locale);
    let links = resolve(path, &table, &config.locale);
    serde_wasm_bindgen::to_value(&links).map_err(JsValue::from)
}
