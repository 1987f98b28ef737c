//! Scanner module: the scan pipeline
//!
//! This module contains the core scanning logic, including:
//! - Page fetching through the browser with load timing
//! - Liveness sampling of internal links
//! - Sitemap and robots.txt probes
//! - Overall scan orchestration and scoring

mod coordinator;
mod fetcher;
mod link_checker;
mod probes;

pub use coordinator::{ScanOutcome, Scanner};
pub use fetcher::{fetch_page, get_performance_metrics, FetchedPage, PageMetrics};
pub use link_checker::{check_link, check_links, LinkCheck};
pub use probes::{build_http_client, find_robots_txt, find_sitemap, SITEMAP_PATHS};

use crate::url::normalize_target_url;
use crate::ScanError;
use url::Url;

/// Upper bound on sampled internal links, and on concurrent link checks
pub const MAX_LINK_CHECKS: usize = 10;

/// Accepted crawl depth range
pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 3;

/// A validated request to scan one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    url: Url,
    depth: u8,
    include_external: bool,
}

impl ScanRequest {
    /// Builds a request for `url` with depth 1 and internal links only
    pub fn new(url: &str) -> Result<Self, ScanError> {
        Ok(Self {
            url: normalize_target_url(url)?,
            depth: MIN_DEPTH,
            include_external: false,
        })
    }

    /// Sets the crawl depth hint (1-3)
    ///
    /// The depth is accepted and recorded; only the given page is scanned.
    pub fn with_depth(mut self, depth: u8) -> Result<Self, ScanError> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            return Err(ScanError::InvalidRequest(format!(
                "depth must be between {} and {}, got {}",
                MIN_DEPTH, MAX_DEPTH, depth
            )));
        }
        self.depth = depth;
        Ok(self)
    }

    /// Sets the include-external hint
    ///
    /// Recorded only; link sampling always draws from internal links.
    pub fn with_include_external(mut self, include_external: bool) -> Self {
        self.include_external = include_external;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn include_external(&self) -> bool {
        self.include_external
    }
}
