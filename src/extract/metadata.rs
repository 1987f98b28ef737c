use crate::result::Metadata;
use scraper::{Html, Selector};

/// Extracts page metadata
///
/// For every field the first matching tag wins. There are no fallback chains:
/// a missing `<title>` is not replaced by `og:title`.
pub fn extract_metadata(document: &Html) -> Metadata {
    Metadata {
        title: extract_title(document),
        description: first_attr(document, "meta[name='description']", "content")
            .filter(|content| !content.is_empty()),
        og_title: first_attr(document, "meta[property='og:title']", "content"),
        og_description: first_attr(document, "meta[property='og:description']", "content"),
        og_image: first_attr(document, "meta[property='og:image']", "content"),
        twitter_card: first_attr(document, "meta[name='twitter:card']", "content"),
        twitter_title: first_attr(document, "meta[name='twitter:title']", "content"),
        twitter_description: first_attr(document, "meta[name='twitter:description']", "content"),
        canonical: first_attr(document, "link[rel~='canonical']", "href"),
        lang: first_attr(document, "html", "lang"),
    }
}

/// Extracts the page title from the first `<title>` element
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Reads an attribute from the first element matching `css`
///
/// Only the first match is consulted; if it lacks the attribute the field is
/// absent even when a later element carries it.
fn first_attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::to_string)
}
