use std::rc::Rc;

use log::info;
use wasm_bindgen::closure::Closure;
use web_sys::Element;

use crate::config::parallax_factor;
use crate::dom::{set_style_property, PageContext};
use crate::error::InteractionError;
use crate::geometry::parallax_transform;
use crate::motion::FrameGate;

pub fn install(ctx: &PageContext) -> Result<(), InteractionError> {
    if ctx.reduced_motion {
        return Err(InteractionError::Unsupported("motion (reduced motion requested)"));
    }

    let config = &ctx.config.parallax;
    let selector = format!("[{}]", config.attribute);
    // Factors are read once; the markup is static.
    let layers: Rc<Vec<(Element, f64)>> = Rc::new(
        ctx.query_all(&selector)?
            .into_iter()
            .map(|element| {
                let factor = parallax_factor(
                    element.get_attribute(&config.attribute).as_deref(),
                    config.default_factor,
                );
                (element, factor)
            })
            .collect(),
    );
    if layers.is_empty() {
        return Err(InteractionError::MissingElement("[data-parallax-y]"));
    }

    let update = {
        let ctx = ctx.clone();
        let layers = layers.clone();
        move || {
            let y = ctx.scroll_y();
            for (element, factor) in layers.iter() {
                set_style_property(element, "transform", &parallax_transform(y, *factor));
            }
        }
    };
    update();

    let gate = FrameGate::new();
    let scheduler = ctx.scheduler();
    let on_scroll = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        if gate.is_pending() {
            return;
        }
        let update = update.clone();
        gate.schedule(&scheduler, move |_| update());
    });
    ctx.listen(&ctx.window, "scroll", true, on_scroll)?;

    info!("Parallax on {} layers", layers.len());
    Ok(())
}
