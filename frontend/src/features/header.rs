use log::info;
use wasm_bindgen::closure::Closure;

use crate::dom::PageContext;
use crate::error::InteractionError;
use crate::geometry::scroll_fraction;
use crate::motion::FrameGate;

/// Sticky header state plus the `--scroll` progress property on `<body>`.
pub fn install(ctx: &PageContext) -> Result<(), InteractionError> {
    let header = ctx.document.query_selector(&ctx.config.header.selector)?;
    let body = ctx
        .document
        .body()
        .ok_or(InteractionError::MissingElement("body"))?;

    let update = {
        let ctx = ctx.clone();
        move || {
            let config = &ctx.config.header;
            let y = ctx.scroll_y();
            if let Some(header) = header.as_ref() {
                let _ = header
                    .class_list()
                    .toggle_with_force(&config.scrolled_class, y > config.threshold);
            }
            let progress = scroll_fraction(
                f64::from(ctx.root.scroll_top()),
                f64::from(ctx.root.scroll_height()),
                f64::from(ctx.root.client_height()),
            );
            let _ = body
                .style()
                .set_property(&config.progress_property, &format!("{:.4}", progress));
        }
    };

    // Initial check
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

    info!("Header scroll state installed");
    Ok(())
}
