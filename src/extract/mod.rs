//! Page extraction module
//!
//! Pure functions from a parsed document and the page URL to the structured
//! facets of a scan:
//! - Metadata (title, description, Open Graph, Twitter, canonical, language)
//! - Heading structure
//! - Image inventory
//! - Internal and external links
//! - Keyword density
//! - Mobile-friendliness
//!
//! Nothing here touches the network; link resolution is string joining only.

mod headings;
mod images;
mod keywords;
mod links;
mod metadata;
mod mobile;

pub use headings::extract_headings;
pub use images::extract_images;
pub use keywords::{extract_keywords, TOP_KEYWORDS};
pub use links::extract_links;
pub use metadata::extract_metadata;
pub use mobile::is_mobile_friendly;

use crate::result::{Headings, Images, Keywords, Links, Metadata};
use scraper::Html;
use url::Url;

/// Every facet the extractor derives from one document
#[derive(Debug, Clone, PartialEq)]
pub struct PageFacets {
    pub metadata: Metadata,
    pub headings: Headings,
    pub images: Images,
    /// Link inventory; `broken` is left empty for the link checker to fill
    pub links: Links,
    pub keywords: Keywords,
    pub mobile_friendly: bool,
}

/// Parses raw HTML into a queryable document
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Runs every extractor over a parsed document
///
/// # Example
///
/// ```
/// use seo_scan::extract::{extract_facets, parse_document};
/// use url::Url;
///
/// let html = r#"<html><head><title>Home</title></head><body><h1>Hi</h1><a href="/a">A</a></body></html>"#;
/// let document = parse_document(html);
/// let facets = extract_facets(&document, &Url::parse("https://example.com/").unwrap());
/// assert_eq!(facets.metadata.title.as_deref(), Some("Home"));
/// assert_eq!(facets.headings.h1, vec!["Hi".to_string()]);
/// assert_eq!(facets.links.internal, vec!["https://example.com/a".to_string()]);
/// ```
pub fn extract_facets(document: &Html, base_url: &Url) -> PageFacets {
    PageFacets {
        metadata: extract_metadata(document),
        headings: extract_headings(document),
        images: extract_images(document, base_url),
        links: extract_links(document, base_url),
        keywords: extract_keywords(document),
        mobile_friendly: is_mobile_friendly(document),
    }
}
