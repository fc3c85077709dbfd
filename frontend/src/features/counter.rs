use log::{debug, info};
use web_sys::Element;

use crate::config::CounterSettings;
use crate::dom::PageContext;
use crate::error::InteractionError;
use crate::features::reveal::observe_once;
use crate::format::counter_text;
use crate::motion::{run, Progression};

/// Counts `[data-counter]` elements up from zero once they are mostly in view.
pub fn install(ctx: &PageContext) -> Result<(), InteractionError> {
    let config = &ctx.config.counter;
    let counters = ctx.query_all(&config.selector)?;
    if counters.is_empty() {
        return Err(InteractionError::MissingElement("[data-counter]"));
    }

    if ctx.reduced_motion || !ctx.supports("IntersectionObserver") {
        debug!("Writing final values for {} counters", counters.len());
        for counter in &counters {
            let settings = settings_for(counter, ctx);
            write_value(counter, settings.target, &ctx.lang);
        }
        return Ok(());
    }

    let ctx_for_start = ctx.clone();
    observe_once(&counters, config.threshold, None, move |element| {
        start(&ctx_for_start, element.clone());
    })?;

    info!("Counters waiting on {} elements", counters.len());
    Ok(())
}

pub fn settings_for(element: &Element, ctx: &PageContext) -> CounterSettings {
    CounterSettings::from_attributes(
        element.get_attribute("data-target").as_deref(),
        element.get_attribute("data-duration").as_deref(),
        element.get_attribute("data-easing").as_deref(),
        &ctx.config.counter,
    )
}

/// Runs one counter animation to completion.
pub fn start(ctx: &PageContext, element: Element) {
    let settings = settings_for(&element, ctx);
    let lang = ctx.lang.clone();
    debug!(
        "Counter to {} over {}ms",
        settings.target, settings.duration_ms
    );
    run(
        ctx.scheduler(),
        Progression::new(0.0, settings.target, settings.duration_ms, settings.easing),
        move |value| write_value(&element, value, &lang),
        None,
    );
}

fn write_value(element: &Element, value: f64, lang: &str) {
    // Removed from the page mid-animation: keep quiet until the task ends.
    if !element.is_connected() {
        return;
    }
    element.set_text_content(Some(&counter_text(value, lang)));
}
