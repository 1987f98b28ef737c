use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root aggregate of a single scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    /// Composite score, always within 0..=100
    pub score: u8,
    pub metadata: Metadata,
    pub headings: Headings,
    pub links: Links,
    pub images: Images,
    pub performance: Option<Performance>,
    pub keywords: Keywords,
    pub mobile_friendly: bool,
    /// URL of the sitemap file, when one was found
    pub sitemap: Option<String>,
    /// URL of the robots.txt file, when one was found
    pub robots_txt: Option<String>,
    /// Causes of a fatal short-circuit, in order of occurrence
    pub errors: Vec<String>,
}

impl ScanResult {
    /// Builds the degraded result returned when a scan cannot proceed
    ///
    /// All facets are empty, the score is 0 and `errors` carries the cause.
    pub fn degraded(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timestamp: Utc::now(),
            score: 0,
            metadata: Metadata::default(),
            headings: Headings::default(),
            links: Links::default(),
            images: Images::default(),
            performance: None,
            keywords: Keywords::default(),
            mobile_friendly: false,
            sitemap: None,
            robots_txt: None,
            errors: vec![error.into()],
        }
    }

    /// Returns true when the scan hit a fatal failure
    pub fn is_degraded(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Page metadata; every field is independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub canonical: Option<String>,
    pub lang: Option<String>,
}

/// Heading texts per level, in document order, without empty entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl Headings {
    /// Returns the headings of a given level (1-6)
    pub fn level(&self, level: u8) -> &[String] {
        match level {
            1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            4 => &self.h4,
            5 => &self.h5,
            6 => &self.h6,
            _ => &[],
        }
    }

    pub(crate) fn level_mut(&mut self, level: u8) -> Option<&mut Vec<String>> {
        match level {
            1 => Some(&mut self.h1),
            2 => Some(&mut self.h2),
            3 => Some(&mut self.h3),
            4 => Some(&mut self.h4),
            5 => Some(&mut self.h5),
            6 => Some(&mut self.h6),
            _ => None,
        }
    }
}

/// Outcome of a link check that did not come back live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// The page load failed, timed out, or answered with status >= 400
    Broken,
    /// The check itself could not be carried out
    Error,
}

/// A sampled internal link that failed its liveness check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub url: String,
    pub status: LinkStatus,
}

/// Link inventory of the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Deduplicated same-site links, in first-seen order
    pub internal: Vec<String>,
    /// Deduplicated off-site links, in first-seen order
    pub external: Vec<String>,
    pub broken: Vec<BrokenLink>,
    /// `internal.len() + external.len()`
    pub total: usize,
}

/// A single `<img>` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Absolute image URL, or empty when the element had no source
    pub src: String,
    pub alt: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// Image inventory of the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Images {
    pub total: usize,
    pub without_alt: usize,
    pub list: Vec<ImageInfo>,
}

/// Load performance of the main page, in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub load_time: f64,
    pub dom_content_loaded: Option<f64>,
    pub first_contentful_paint: Option<f64>,
    pub largest_contentful_paint: Option<f64>,
    pub time_to_interactive: Option<f64>,
    pub total_blocking_time: Option<f64>,
    /// Unitless layout shift score
    pub cumulative_layout_shift: Option<f64>,
}

/// Frequency of a single keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStat {
    pub word: String,
    pub count: usize,
    /// Percentage of all counted words
    pub density: f64,
}

/// Keyword density table of the page text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keywords {
    pub density: BTreeMap<String, f64>,
    /// Most frequent words, highest count first
    pub top_keywords: Vec<KeywordStat>,
}
