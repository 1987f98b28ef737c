use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

fn responsive_class_pattern() -> &'static Regex {
    static RESPONSIVE: OnceLock<Regex> = OnceLock::new();
    RESPONSIVE.get_or_init(|| {
        Regex::new(r"(?i)container|responsive|mobile|col-|grid")
            .expect("invalid responsive class regex")
    })
}

/// Heuristic mobile-friendliness check
///
/// A page is mobile-friendly when it has a `viewport` meta tag whose content
/// mentions `width`, and either the content also sets `initial-scale` or some
/// element carries a class from a responsive layout framework
/// (`container`, `responsive`, `mobile`, `col-*`, `grid`).
pub fn is_mobile_friendly(document: &Html) -> bool {
    let Some(viewport) = viewport_content(document) else {
        return false;
    };

    if !viewport.contains("width") {
        return false;
    }

    viewport.contains("initial-scale") || has_responsive_classes(document)
}

/// Lowercased content of the first viewport meta tag
fn viewport_content(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name='viewport']").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.value().attr("content").unwrap_or("").to_lowercase())
}

fn has_responsive_classes(document: &Html) -> bool {
    let Ok(selector) = Selector::parse("[class]") else {
        return false;
    };

    document.select(&selector).any(|element| {
        element
            .value()
            .attr("class")
            .is_some_and(|class| responsive_class_pattern().is_match(class))
    })
}
