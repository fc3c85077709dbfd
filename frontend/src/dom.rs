use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::{AddEventListenerOptions, Document, Element, HtmlElement, Window};

use crate::config::{SiteConfig, CONFIG_SCRIPT_ID};
use crate::error::InteractionError;
use crate::motion::FrameScheduler;

/// Everything a feature needs from the page, built once at startup and
/// handed to each installer.
#[derive(Clone)]
pub struct PageContext {
    pub window: Window,
    pub document: Document,
    pub root: Element,
    pub config: Rc<SiteConfig>,
    /// BCP 47 tag used for number formatting: the `lang` attribute, or the
    /// primary locale when the page has none.
    pub lang: String,
    pub reduced_motion: bool,
}

impl PageContext {
    pub fn from_window() -> Result<Self, InteractionError> {
        let window = web_sys::window().ok_or(InteractionError::Unsupported("window"))?;
        let config = load_config(&window);
        Self::new(window, config)
    }

    pub fn new(window: Window, config: SiteConfig) -> Result<Self, InteractionError> {
        let document = window
            .document()
            .ok_or(InteractionError::MissingElement("document"))?;
        let root = document
            .document_element()
            .ok_or(InteractionError::MissingElement("html"))?;
        let lang = root
            .get_attribute("lang")
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| config.locale.primary.code().to_string());
        let reduced_motion = prefers_reduced_motion(&window);

        Ok(Self {
            window,
            document,
            root,
            config: Rc::new(config),
            lang,
            reduced_motion,
        })
    }

    pub fn scheduler(&self) -> RafScheduler {
        RafScheduler {
            window: self.window.clone(),
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.window
            .scroll_y()
            .unwrap_or_else(|_| f64::from(self.root.scroll_top()))
    }

    pub fn query_all(&self, selector: &str) -> Result<Vec<Element>, InteractionError> {
        query_all(&self.document, selector)
    }

    /// Whether the global object exposes a constructor such as `IntersectionObserver`.
    pub fn supports(&self, name: &str) -> bool {
        Reflect::has(&self.window, &JsValue::from_str(name)).unwrap_or(false)
    }

    /// Attaches a listener for the lifetime of the page.
    pub fn listen(
        &self,
        target: &web_sys::EventTarget,
        event: &str,
        passive: bool,
        callback: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Result<(), InteractionError> {
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        // Page-lifetime listener; nothing ever removes it.
        callback.forget();
        Ok(())
    }
}

/// `requestAnimationFrame` as a [`FrameScheduler`].
#[derive(Clone)]
pub struct RafScheduler {
    window: Window,
}

impl FrameScheduler for RafScheduler {
    fn request(&self, callback: Box<dyn FnOnce(f64)>) -> bool {
        let frame = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        match self.window.request_animation_frame(frame.unchecked_ref()) {
            Ok(_) => true,
            Err(err) => {
                warn!("requestAnimationFrame failed: {:?}", err);
                false
            }
        }
    }
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, InteractionError> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn query_all_within(parent: &Element, selector: &str) -> Result<Vec<Element>, InteractionError> {
    let nodes = parent.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn as_html(element: &Element) -> Option<&HtmlElement> {
    element.dyn_ref::<HtmlElement>()
}

pub fn set_style_property(element: &Element, name: &str, value: &str) {
    if let Some(html) = as_html(element) {
        let _ = html.style().set_property(name, value);
    }
}

pub fn prefers_reduced_motion(window: &Window) -> bool {
    match window.match_media("(prefers-reduced-motion: reduce)") {
        Ok(Some(query)) => query.matches(),
        _ => false,
    }
}

/// Reads the JSON config block if the page has one. Bad JSON is logged and ignored.
pub fn load_config(window: &Window) -> SiteConfig {
    let raw = window
        .document()
        .and_then(|document| document.get_element_by_id(CONFIG_SCRIPT_ID))
        .and_then(|script| script.text_content());

    match raw {
        None => SiteConfig::default(),
        Some(raw) => match SiteConfig::from_json(&raw) {
            Ok(config) => {
                debug!("Loaded config from #{}", CONFIG_SCRIPT_ID);
                config
            }
            Err(err) => {
                warn!("Ignoring #{}: {}", CONFIG_SCRIPT_ID, err);
                SiteConfig::default()
            }
        },
    }
}
