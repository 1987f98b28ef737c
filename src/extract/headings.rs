use crate::result::Headings;
use scraper::{Html, Selector};

/// Collects the trimmed text of every `h1`..`h6`, in document order
///
/// Headings whose text is empty after trimming are dropped.
pub fn extract_headings(document: &Html) -> Headings {
    let mut headings = Headings::default();

    for level in 1..=6u8 {
        let Ok(selector) = Selector::parse(&format!("h{}", level)) else {
            continue;
        };
        let Some(texts) = headings.level_mut(level) else {
            continue;
        };

        texts.extend(
            document
                .select(&selector)
                .map(|element| element.text().collect::<String>().trim().to_string())
                .filter(|text| !text.is_empty()),
        );
    }

    headings
}
