use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, ScrollBehavior, ScrollToOptions};

use crate::config::ScrollMode;
use crate::dom::PageContext;
use crate::error::InteractionError;
use crate::geometry::anchor_destination;
use crate::motion::{run_exclusive, Latest, Progression};

/// In-page `#anchor` links scroll smoothly instead of jumping.
pub fn install(ctx: &PageContext) -> Result<(), InteractionError> {
    let click_ctx = ctx.clone();
    // One window scroll at a time; a new click retires the running one.
    let latest = Latest::new();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(hash) = anchor_hash(&event) else {
            return;
        };
        event.prevent_default();
        scroll_to_hash(&click_ctx, &hash, &latest);
    });
    ctx.listen(&ctx.document, "click", false, on_click)?;

    info!("Smooth anchor scrolling installed");
    Ok(())
}

/// The `#fragment` of the clicked same-page link, if there is one worth handling.
fn anchor_hash(event: &Event) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let link = target.closest("a[href^=\"#\"]").ok().flatten()?;
    let hash = link.get_attribute("href")?;
    (hash.len() > 1).then_some(hash)
}

pub fn scroll_to_hash(ctx: &PageContext, hash: &str, latest: &Latest) {
    // `#1-intro` and friends are not valid selectors; treat them as missing.
    let destination = match ctx.document.query_selector(hash) {
        Ok(Some(element)) => element,
        _ => {
            debug!("No anchor target for {}", hash);
            return;
        }
    };

    let config = &ctx.config.anchor;
    let ticket = latest.claim();
    let start = ctx.scroll_y();
    let end = anchor_destination(
        destination.get_bounding_client_rect().top(),
        start,
        config.gap_px,
    );

    if ctx.reduced_motion {
        ctx.window.scroll_to_with_x_and_y(0.0, end);
    } else {
        match config.mode {
            ScrollMode::Native => {
                let options = ScrollToOptions::new();
                options.set_top(end);
                options.set_behavior(ScrollBehavior::Smooth);
                ctx.window.scroll_to_with_scroll_to_options(&options);
            }
            ScrollMode::Animated => {
                let window = ctx.window.clone();
                run_exclusive(
                    ctx.scheduler(),
                    Progression::new(start, end, config.duration_ms, config.easing),
                    ticket,
                    move |y| window.scroll_to_with_x_and_y(0.0, y),
                    None,
                );
            }
        }
    }

    if config.update_hash {
        if let Ok(history) = ctx.window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(hash));
        }
    }
}
