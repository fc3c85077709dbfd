use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::PageContext;
use crate::error::InteractionError;
use crate::motion::OnceSet;

/// Adds the visible class to `[data-reveal]` elements the first time they scroll into view.
pub fn install(ctx: &PageContext) -> Result<(), InteractionError> {
    let config = &ctx.config.reveal;
    let targets = ctx.query_all(&config.selector)?;
    if targets.is_empty() {
        return Err(InteractionError::MissingElement("[data-reveal]"));
    }

    // Without an observer (or with motion reduced) nothing may stay hidden.
    if ctx.reduced_motion || !ctx.supports("IntersectionObserver") {
        debug!("Revealing {} elements up front", targets.len());
        for target in &targets {
            let _ = target.class_list().add_1(&config.visible_class);
        }
        return Ok(());
    }

    let visible_class = config.visible_class.clone();
    observe_once(
        &targets,
        config.threshold,
        Some(config.root_margin.as_str()),
        move |element| {
            let _ = element.class_list().add_1(&visible_class);
        },
    )?;

    info!("Reveal observing {} elements", targets.len());
    Ok(())
}

/// Observes `targets` and calls `on_enter` at most once per element, on its
/// first intersection. The element is unobserved right after.
pub fn observe_once(
    targets: &[Element],
    threshold: f64,
    root_margin: Option<&str>,
    on_enter: impl Fn(&Element) + 'static,
) -> Result<IntersectionObserver, InteractionError> {
    let fired: Rc<RefCell<OnceSet<Element>>> = Rc::new(RefCell::new(OnceSet::new()));

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let element = entry.target();
                if entry.is_intersecting() {
                    observer.unobserve(&element);
                }
                if enters_first_time(&mut fired.borrow_mut(), &element, entry.is_intersecting()) {
                    on_enter(&element);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    // The observer holds the only reference to the callback from here on.
    callback.forget();

    for target in targets {
        observer.observe(target);
    }
    Ok(observer)
}

/// True only for the first intersecting entry of `target`. Leaving the
/// viewport and coming back never fires again.
fn enters_first_time<T>(fired: &mut OnceSet<T>, target: &T, is_intersecting: bool) -> bool
where
    T: PartialEq + Clone,
{
    is_intersecting && fired.first(target)
}
