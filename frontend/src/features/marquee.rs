use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use crate::dom::{query_all_within, PageContext};
use crate::error::InteractionError;
use crate::geometry::marquee_needs_clone;
use crate::motion::OnceSet;

/// Duplicates short marquee tracks so the CSS loop has no visible gap.
/// Widths are only final after images load, so this waits for `load`.
pub fn install(ctx: &PageContext) -> Result<(), InteractionError> {
    let wrappers = ctx.query_all(&ctx.config.marquee.selector)?;
    if wrappers.is_empty() {
        return Err(InteractionError::MissingElement("[data-marquee]"));
    }

    let done = Rc::new(RefCell::new(OnceSet::new()));
    if ctx.document.ready_state() == "complete" {
        enhance(ctx, &wrappers, &done);
    } else {
        let load_ctx = ctx.clone();
        let on_load = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            enhance(&load_ctx, &wrappers, &done);
        });
        ctx.listen(&ctx.window, "load", false, on_load)?;
    }

    info!("Marquee enhancer installed");
    Ok(())
}

fn enhance(ctx: &PageContext, wrappers: &[Element], done: &Rc<RefCell<OnceSet<Element>>>) {
    for wrapper in wrappers {
        if !done.borrow_mut().first(wrapper) {
            continue;
        }
        if let Err(err) = clone_track(ctx, wrapper) {
            debug!("Marquee left as is: {}", err);
        }
    }
}

fn clone_track(ctx: &PageContext, wrapper: &Element) -> Result<(), InteractionError> {
    let track = wrapper
        .query_selector(&ctx.config.marquee.track_selector)?
        .ok_or(InteractionError::MissingElement(".marquee"))?;

    let children = track.children();
    let widths: Vec<f64> = (0..children.length())
        .filter_map(|i| children.item(i))
        .map(|child| child.get_bounding_client_rect().width())
        .collect();
    let viewport = wrapper.get_bounding_client_rect().width();
    if !marquee_needs_clone(&widths, viewport) {
        return Ok(());
    }

    let parent = track
        .parent_node()
        .ok_or(InteractionError::MissingElement("marquee parent"))?;
    let copy = track.clone_node_with_deep(true)?;
    if let Some(copy) = copy.dyn_ref::<Element>() {
        copy.set_attribute("aria-hidden", "true")?;
        // Reveal targets inside the copy are never observed.
        for nested in query_all_within(copy, "[data-reveal]")? {
            let _ = nested.class_list().add_1(&ctx.config.reveal.visible_class);
        }
    }
    parent.append_child(&copy)?;
    Ok(())
}
