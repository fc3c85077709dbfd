//! English/Spanish page mapping for the language switcher.
//!
//! Every English page has at most one Spanish counterpart, declared in a
//! static [`LocaleRouteTable`]. Spanish pages live under a path prefix
//! (`/es/`), which is what decides the locale of an arbitrary path; the table
//! only decides where the *other* link points.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Es,
}

impl Locale {
    /// Reads a `lang` attribute value such as `es-MX` or `en`.
    /// Anything that is not Spanish is treated as English.
    pub fn from_lang(lang: &str) -> Self {
        if lang.trim().to_ascii_lowercase().starts_with("es") {
            Locale::Es
        } else {
            Locale::En
        }
    }

    /// Language tag for number formatting when the page declares none.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }
}

/// What to link to when a page has no declared counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// The other locale's home page.
    #[default]
    Root,
    /// The same path with the locale segment added or removed.
    Prefix,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleSettings {
    pub primary: Locale,
    pub secondary: Locale,
    /// Path segment that marks secondary-locale pages, without trailing slash.
    pub secondary_prefix: String,
    pub primary_root: String,
    pub secondary_root: String,
    pub fallback: Fallback,
    pub routes: Vec<(String, String)>,
    pub primary_link_id: String,
    pub secondary_link_id: String,
    pub active_class: String,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            primary: Locale::En,
            secondary: Locale::Es,
            secondary_prefix: "/es".to_string(),
            primary_root: "/".to_string(),
            secondary_root: "/es/".to_string(),
            fallback: Fallback::Root,
            routes: SITE_ROUTES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            primary_link_id: "to-en".to_string(),
            secondary_link_id: "to-es".to_string(),
            active_class: "is-active".to_string(),
        }
    }
}

const SITE_ROUTES: [(&str, &str); 7] = [
    ("/", "/es/"),
    ("/index.html", "/es/"),
    ("/about.html", "/es/acerca.html"),
    ("/services.html", "/es/servicios.html"),
    ("/work.html", "/es/trabajos.html"),
    ("/blog.html", "/es/blog.html"),
    ("/contact.html", "/es/contacto.html"),
];

/// Bidirectional path table, built once and read-only afterwards.
/// Lookups match on normalized paths and return paths as authored.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleRouteTable {
    mapping: Vec<(String, String)>,
    forward: HashMap<String, usize>,
    reverse: HashMap<String, usize>,
}

impl LocaleRouteTable {
    /// The first entry for a source path wins, and the first source declared
    /// for a target becomes its reverse, so `/` and `/index.html` can both
    /// point at `/es/` while `/es/` still leads back to `/`.
    pub fn new<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut mapping = Vec::new();
        let mut forward = HashMap::new();
        let mut reverse = HashMap::new();

        for (from, to) in pairs {
            let (from, to) = (from.as_ref().trim(), to.as_ref().trim());
            let key = normalize_path(from);
            if forward.contains_key(&key) {
                continue;
            }
            let index = mapping.len();
            forward.insert(key, index);
            reverse.entry(normalize_path(to)).or_insert(index);
            mapping.push((from.to_string(), to.to_string()));
        }

        Self {
            mapping,
            forward,
            reverse,
        }
    }

    pub fn forward(&self, path: &str) -> Option<&str> {
        self.forward
            .get(&normalize_path(path))
            .map(|&index| self.mapping[index].1.as_str())
    }

    pub fn reverse(&self, path: &str) -> Option<&str> {
        self.reverse
            .get(&normalize_path(path))
            .map(|&index| self.mapping[index].0.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mapping.iter().map(|(from, to)| (from.as_str(), to.as_str()))
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Entries that do not survive a forward-then-reverse trip because an
    /// earlier source already claimed their target.
    pub fn aliases(&self) -> Vec<(&str, &str)> {
        self.mapping
            .iter()
            .enumerate()
            .filter(|(index, (_, to))| self.reverse.get(&normalize_path(to)) != Some(index))
            .map(|(_, (from, to))| (from.as_str(), to.as_str()))
            .collect()
    }
}

impl Default for LocaleRouteTable {
    fn default() -> Self {
        LocaleRouteTable::new(SITE_ROUTES)
    }
}

impl From<&LocaleSettings> for LocaleRouteTable {
    fn from(settings: &LocaleSettings) -> Self {
        LocaleRouteTable::new(settings.routes.iter().map(|(a, b)| (a.as_str(), b.as_str())))
    }
}

/// Result of resolving the current page against the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleLinks {
    pub primary_href: String,
    pub secondary_href: String,
    pub other_locale_url: String,
    pub is_secondary: bool,
}

/// Drops query and fragment, collapses trailing slashes. Root stays `/`.
pub fn normalize_path(path: &str) -> String {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Structural test: is this path under the secondary-locale prefix?
pub fn is_secondary_path(path: &str, settings: &LocaleSettings) -> bool {
    let path = normalize_path(path);
    let prefix = normalize_path(&settings.secondary_prefix);
    if prefix == "/" {
        return false;
    }
    path == prefix
        || path
            .strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Computes both switcher targets for `path`. Never fails; unknown paths
/// fall back per `settings.fallback`.
pub fn resolve(path: &str, table: &LocaleRouteTable, settings: &LocaleSettings) -> LocaleLinks {
    let current = normalize_path(path);
    let is_secondary = is_secondary_path(&current, settings);
    let prefix = normalize_path(&settings.secondary_prefix);

    if is_secondary {
        let primary = table
            .reverse(&current)
            .map(str::to_string)
            .unwrap_or_else(|| match settings.fallback {
                Fallback::Root => settings.primary_root.clone(),
                Fallback::Prefix => strip_prefix_path(&current, &prefix),
            });
        let secondary = if current == prefix {
            settings.secondary_root.clone()
        } else {
            current
        };
        LocaleLinks {
            other_locale_url: primary.clone(),
            primary_href: primary,
            secondary_href: secondary,
            is_secondary: true,
        }
    } else {
        let secondary = table
            .forward(&current)
            .map(str::to_string)
            .unwrap_or_else(|| match settings.fallback {
                Fallback::Root => settings.secondary_root.clone(),
                Fallback::Prefix => add_prefix_path(&current, &prefix, &settings.secondary_root),
            });
        LocaleLinks {
            other_locale_url: secondary.clone(),
            primary_href: current,
            secondary_href: secondary,
            is_secondary: false,
        }
    }
}

/// Locale to highlight: the document's `lang` when present, else the path.
pub fn active_locale(lang: Option<&str>, links: &LocaleLinks, settings: &LocaleSettings) -> Locale {
    match lang.map(str::trim).filter(|lang| !lang.is_empty()) {
        Some(lang) => Locale::from_lang(lang),
        None if links.is_secondary => settings.secondary,
        None => settings.primary,
    }
}

fn strip_prefix_path(path: &str, prefix: &str) -> String {
    let rest = path.strip_prefix(prefix).unwrap_or(path);
    normalize_path(rest)
}

fn add_prefix_path(path: &str, prefix: &str, secondary_root: &str) -> String {
    if path == "/" {
        return secondary_root.to_string();
    }
    format!("{}{}", prefix, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn site() -> (LocaleRouteTable, LocaleSettings) {
        (LocaleRouteTable::default(), LocaleSettings::default())
    }

    #[test]
    fn every_site_route_round_trips() {
        let table = LocaleRouteTable::default();
        let aliases = table.aliases();
        for (from, to) in table.entries().filter(|entry| !aliases.contains(entry)) {
            assert_eq!(table.reverse(to), Some(from), "reverse of {}", to);
        }
        assert_eq!(table.reverse("/es/servicios.html"), Some("/services.html"));
    }

    #[test]
    fn index_alias_shares_spanish_home() {
        let table = LocaleRouteTable::default();
        assert_eq!(table.forward("/index.html"), Some("/es/"));
        assert_eq!(table.reverse("/es/"), Some("/"));
    }

    #[test]
    fn only_index_alias_breaks_the_round_trip() {
        assert_eq!(LocaleRouteTable::default().aliases(), vec![("/index.html", "/es/")]);

        let table = LocaleRouteTable::new([
            ("/a.html", "/es/a.html"),
            ("/b.html", "/es/b.html"),
            ("/c.html", "/es/b.html/"),
        ]);
        assert_eq!(table.aliases(), vec![("/c.html", "/es/b.html/")]);
        assert_eq!(table.reverse("/es/b.html"), Some("/b.html"));
    }

    #[test]
    fn duplicate_sources_keep_first_entry() {
        let table = LocaleRouteTable::new([("/a.html", "/es/a.html"), ("/a.html/", "/es/z.html")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.forward("/a.html"), Some("/es/a.html"));
    }

    #[test]
    fn normalizes_trailing_slashes_queries_and_fragments() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("///"), "/");
        assert_eq!(normalize_path("/es/"), "/es");
        assert_eq!(normalize_path("/about.html?ref=nav#team"), "/about.html");
        assert_eq!(normalize_path("work.html"), "/work.html");
    }

    #[test]
    fn root_maps_to_spanish_root_and_back() {
        let (table, settings) = site();

        let from_root = resolve("/", &table, &settings);
        assert_eq!(from_root.other_locale_url, "/es/");
        assert!(!from_root.is_secondary);

        let from_es = resolve("/es/", &table, &settings);
        assert_eq!(from_es.other_locale_url, "/");
        assert_eq!(from_es.secondary_href, "/es/");
        assert!(from_es.is_secondary);

        let bare = resolve("/es", &table, &settings);
        assert_eq!(bare, from_es);
    }

    #[test]
    fn known_pages_link_both_ways() {
        let (table, settings) = site();

        let en = resolve("/services.html", &table, &settings);
        assert_eq!(
            en,
            LocaleLinks {
                primary_href: "/services.html".to_string(),
                secondary_href: "/es/servicios.html".to_string(),
                other_locale_url: "/es/servicios.html".to_string(),
                is_secondary: false,
            }
        );

        let es = resolve("/es/servicios.html/", &table, &settings);
        assert_eq!(es.primary_href, "/services.html");
        assert_eq!(es.secondary_href, "/es/servicios.html");
        assert!(es.is_secondary);
    }

    #[test]
    fn unknown_pages_fall_back_to_the_other_root() {
        let (table, settings) = site();
        assert_eq!(resolve("/nonexistent.html", &table, &settings).other_locale_url, "/es/");
        assert_eq!(resolve("/es/nada.html", &table, &settings).other_locale_url, "/");
    }

    #[test]
    fn prefix_fallback_adds_or_strips_segment() {
        let table = LocaleRouteTable::default();
        let settings = LocaleSettings {
            fallback: Fallback::Prefix,
            ..LocaleSettings::default()
        };
        assert_eq!(resolve("/pricing.html", &table, &settings).other_locale_url, "/es/pricing.html");
        assert_eq!(resolve("/es/precios.html", &table, &settings).other_locale_url, "/precios.html");

        let empty_table = LocaleRouteTable::new(Vec::<(String, String)>::new());
        assert_eq!(resolve("/", &empty_table, &settings).other_locale_url, "/es/");
        assert_eq!(resolve("/es/", &empty_table, &settings).other_locale_url, "/");
    }

    #[test]
    fn prefix_test_needs_a_whole_segment() {
        let settings = LocaleSettings::default();
        assert!(is_secondary_path("/es", &settings));
        assert!(is_secondary_path("/es/blog.html", &settings));
        assert!(!is_secondary_path("/essays.html", &settings));
        assert!(!is_secondary_path("/", &settings));
    }

    #[test]
    fn active_locale_prefers_document_lang() {
        let (table, settings) = site();
        let es_page = resolve("/es/acerca.html", &table, &settings);
        let en_page = resolve("/about.html", &table, &settings);

        assert_eq!(active_locale(Some("es-MX"), &en_page, &settings), Locale::Es);
        assert_eq!(active_locale(Some("EN"), &es_page, &settings), Locale::En);
        assert_eq!(active_locale(Some("  "), &es_page, &settings), Locale::Es);
        assert_eq!(active_locale(None, &en_page, &settings), Locale::En);
        assert_eq!(Locale::from_lang(Locale::Es.code()), Locale::Es);
    }

    #[test]
    fn links_serialize_for_javascript_callers() {
        let (table, settings) = site();
        let json = serde_json::to_value(resolve("/work.html", &table, &settings)).unwrap();
        assert_eq!(json["otherLocaleUrl"], "/es/trabajos.html");
        assert_eq!(json["isSecondary"], false);
    }
}
