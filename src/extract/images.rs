use crate::result::{ImageInfo, Images};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Builds the image inventory of the page
///
/// # Rules
///
/// - Source: `src`, falling back to the lazy-load `data-src`, else empty
/// - Non-empty sources are resolved against the page URL
/// - `width`/`height` are integers, `None` when absent or non-numeric
/// - An image counts as missing alt text when `alt` is absent or exactly
///   empty; whitespace-only alt text is kept as provided
pub fn extract_images(document: &Html, base_url: &Url) -> Images {
    let mut list = Vec::new();
    let mut without_alt = 0;

    if let Ok(img_selector) = Selector::parse("img") {
        for element in document.select(&img_selector) {
            let alt = element.value().attr("alt").unwrap_or("");
            if alt.is_empty() {
                without_alt += 1;
            }

            list.push(ImageInfo {
                src: image_source(&element, base_url),
                alt: alt.to_string(),
                width: dimension(&element, "width"),
                height: dimension(&element, "height"),
            });
        }
    }

    Images {
        total: list.len(),
        without_alt,
        list,
    }
}

/// Picks the image source and resolves it against the page URL
fn image_source(element: &ElementRef<'_>, base_url: &Url) -> String {
    let raw = ["src", "data-src"]
        .iter()
        .filter_map(|attr| element.value().attr(attr))
        .find(|value| !value.is_empty())
        .unwrap_or("");

    if raw.is_empty() {
        return String::new();
    }

    match base_url.join(raw) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Parses a numeric dimension attribute
fn dimension(element: &ElementRef<'_>, attr: &str) -> Option<i64> {
    element
        .value()
        .attr(attr)
        .and_then(|value| value.trim().parse::<i64>().ok())
}
