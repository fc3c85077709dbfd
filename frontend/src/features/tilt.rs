use std::cell::Cell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

use crate::dom::{set_style_property, PageContext};
use crate::error::InteractionError;
use crate::geometry::{tilt_angles, Rect};
use crate::motion::FrameGate;

pub fn install(ctx: &PageContext) -> Result<(), InteractionError> {
    if ctx.reduced_motion {
        return Err(InteractionError::Unsupported("motion (reduced motion requested)"));
    }

    let cards = ctx.query_all(&ctx.config.tilt.selector)?;
    if cards.is_empty() {
        return Err(InteractionError::MissingElement("[data-tilt]"));
    }
    for card in &cards {
        attach(ctx, card)?;
    }

    info!("Tilt on {} cards", cards.len());
    Ok(())
}

fn attach(ctx: &PageContext, card: &Element) -> Result<(), InteractionError> {
    let config = &ctx.config.tilt;
    let transform = format!(
        "perspective({}px) rotateX(calc(var(--rx) * 1deg)) rotateY(calc(var(--ry) * 1deg))",
        config.perspective_px
    );
    // A frame queued just before mouseleave must not re-tilt the card.
    let hovering = Rc::new(Cell::new(false));

    let on_move = {
        let card = card.clone();
        let max_deg = config.max_deg;
        let active_class = config.active_class.clone();
        let gate = FrameGate::new();
        let scheduler = ctx.scheduler();
        let hovering = hovering.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let r = card.get_bounding_client_rect();
            let rect = Rect {
                left: r.left(),
                top: r.top(),
                width: r.width(),
                height: r.height(),
            };
            let Some(tilt) = tilt_angles(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                &rect,
                max_deg,
            ) else {
                return;
            };
            hovering.set(true);
            set_style_property(&card, "--rx", &tilt.rx_property());
            set_style_property(&card, "--ry", &tilt.ry_property());

            let card = card.clone();
            let transform = transform.clone();
            let active_class = active_class.clone();
            let hovering = hovering.clone();
            gate.schedule(&scheduler, move |_| {
                if !hovering.get() {
                    return;
                }
                set_style_property(&card, "transform", &transform);
                let _ = card.class_list().add_1(&active_class);
            });
        })
    };
    ctx.listen(card, "mousemove", true, on_move)?;

    let on_leave = {
        let card = card.clone();
        let active_class = config.active_class.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            hovering.set(false);
            set_style_property(&card, "transform", "translateZ(0)");
            let _ = card.class_list().remove_1(&active_class);
        })
    };
    ctx.listen(card, "mouseleave", true, on_leave)?;

    Ok(())
}
