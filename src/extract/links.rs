use crate::result::Links;
use crate::url::{authority, is_same_site, resolve_link};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts and classifies the anchors of the page
///
/// # Link Extraction Rules
///
/// - Every `<a href="...">` is considered
/// - Fragment-only (`#...`) and `javascript:` links are skipped
/// - Relative links are resolved against the page URL
/// - Same authority as the page, or no authority at all → internal;
///   anything else → external
/// - Each set is deduplicated, keeping first-seen order
///
/// `total` is the size of both sets together; `broken` is left empty.
pub fn extract_links(document: &Html, base_url: &Url) -> Links {
    let base_authority = authority(base_url);
    let mut internal = Vec::new();
    let mut external = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Some(resolved) = resolve_link(href, base_url) else {
                continue;
            };

            let absolute = resolved.to_string();
            if !seen.insert(absolute.clone()) {
                continue;
            }

            if is_same_site(&resolved, base_authority.as_deref()) {
                internal.push(absolute);
            } else {
                external.push(absolute);
            }
        }
    }

    let total = internal.len() + external.len();
    Links {
        internal,
        external,
        broken: Vec::new(),
        total,
    }
}
