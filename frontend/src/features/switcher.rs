use log::{debug, info};
use web_sys::Document;

use crate::dom::PageContext;
use crate::error::InteractionError;
use crate::locale::{active_locale, resolve, LocaleLinks, LocaleRouteTable, LocaleSettings};

/// Points the two language links at the current page's counterparts and
/// marks the active one.
pub fn install(ctx: &PageContext) -> Result<(), InteractionError> {
    let settings = &ctx.config.locale;
    let table = LocaleRouteTable::from(settings);
    for (from, to) in table.aliases() {
        debug!("{} shares {} with an earlier route", from, to);
    }

    let path = ctx.window.location().pathname()?;
    let lang = ctx.root.get_attribute("lang");
    let links = resolve(&path, &table, settings);
    apply(&ctx.document, settings, &links, lang.as_deref())?;

    info!(
        "Language switcher: {} -> {}",
        path, links.other_locale_url
    );
    Ok(())
}

/// Writes hrefs and the active class onto whichever switcher links exist.
pub fn apply(
    document: &Document,
    settings: &LocaleSettings,
    links: &LocaleLinks,
    lang: Option<&str>,
) -> Result<(), InteractionError> {
    let primary = document.get_element_by_id(&settings.primary_link_id);
    let secondary = document.get_element_by_id(&settings.secondary_link_id);
    if primary.is_none() && secondary.is_none() {
        return Err(InteractionError::MissingElement("#to-en / #to-es"));
    }

    if let Some(link) = primary.as_ref() {
        link.set_attribute("href", &links.primary_href)?;
    }
    if let Some(link) = secondary.as_ref() {
        link.set_attribute("href", &links.secondary_href)?;
    }

    let active = if active_locale(lang, links, settings) == settings.secondary {
        secondary
    } else {
        primary
    };
    if let Some(link) = active {
        link.class_list().add_1(&settings.active_class)?;
    }
    Ok(())
}
