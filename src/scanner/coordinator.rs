//! Scan coordinator - single-page scan orchestration
//!
//! Drives one scan through its stages:
//! - Fetching the page through the browser (with timing data)
//! - Parsing and extracting SEO facets
//! - Sampling internal links and probing for sitemap/robots.txt concurrently
//! - Scoring and assembling the result
//!
//! A fatal failure while fetching or parsing short-circuits into a degraded
//! result. Nothing past parsing can fail the scan.

use crate::browser::Browser;
use crate::config::{Config, ScannerConfig};
use crate::extract::{extract_facets, parse_document, PageFacets};
use crate::result::ScanResult;
use crate::scanner::fetcher::fetch_page;
use crate::scanner::link_checker::check_links;
use crate::scanner::probes::{build_http_client, find_robots_txt, find_sitemap};
use crate::scanner::ScanRequest;
use crate::scoring::{calculate_score, ScoreInputs};
use crate::state::{ScanStage, StageTracker};
use crate::url::normalize_target_url;
use crate::ScanError;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Result of a scan, tagged with whether it completed
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Every stage ran
    Complete(ScanResult),
    /// Fetching or parsing failed; the result is empty apart from `errors`
    Degraded(ScanResult),
}

impl ScanOutcome {
    pub fn result(&self) -> &ScanResult {
        match self {
            Self::Complete(result) | Self::Degraded(result) => result,
        }
    }

    pub fn into_result(self) -> ScanResult {
        match self {
            Self::Complete(result) | Self::Degraded(result) => result,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Runs scans against a shared browser
pub struct Scanner {
    browser: Arc<dyn Browser>,
    client: Client,
    config: ScannerConfig,
}

impl Scanner {
    /// Creates a new scanner
    ///
    /// # Arguments
    ///
    /// * `browser` - Browser used for the page fetch and link checks
    /// * `config` - Scanner configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Scanner)` - Ready to scan
    /// * `Err(ScanError)` - The probe HTTP client could not be built
    pub fn new(browser: Arc<dyn Browser>, config: &Config) -> Result<Self, ScanError> {
        let client = build_http_client(&config.user_agent, config.scanner.probe_timeout())?;
        Ok(Self::with_client(browser, client, config.scanner.clone()))
    }

    /// Creates a scanner around an already-built probe client
    pub fn with_client(browser: Arc<dyn Browser>, client: Client, config: ScannerConfig) -> Self {
        Self {
            browser,
            client,
            config,
        }
    }

    /// Normalizes `raw_url` and scans it with default options
    ///
    /// An unusable URL yields a degraded result instead of an error.
    pub async fn scan_url(&self, raw_url: &str) -> ScanOutcome {
        match ScanRequest::new(raw_url) {
            Ok(request) => self.scan(&request).await,
            Err(e) => {
                warn!("Rejected scan target {:?}: {}", raw_url, e);
                let url = normalize_target_url(raw_url)
                    .map(|u| u.to_string())
                    .unwrap_or_else(|_| raw_url.to_string());
                ScanOutcome::Degraded(ScanResult::degraded(url, e.to_string()))
            }
        }
    }

    /// Scans one page
    ///
    /// Never fails: fatal problems are reported through
    /// [`ScanOutcome::Degraded`].
    pub async fn scan(&self, request: &ScanRequest) -> ScanOutcome {
        let url = request.url();
        let url_str = url.to_string();
        let mut tracker = StageTracker::new(url_str.as_str());

        info!("Starting SEO scan for {}", url_str);
        debug!(
            "Scan options for {}: depth={}, include_external={}",
            url_str,
            request.depth(),
            request.include_external()
        );

        let fetched = match fetch_page(
            self.browser.as_ref(),
            &url_str,
            self.config.page_timeout(),
            self.config.network_idle(),
        )
        .await
        {
            Ok(fetched) => fetched,
            Err(e) => return fail(&mut tracker, &url_str, e),
        };

        enter(&mut tracker, ScanStage::Parsing);
        if fetched.html.trim().is_empty() {
            return fail(
                &mut tracker,
                &url_str,
                ScanError::EmptyContent {
                    url: url_str.clone(),
                },
            );
        }

        // The parsed document is not Send, so it must be gone before the next await
        let facets: PageFacets = {
            let document = parse_document(&fetched.html);
            enter(&mut tracker, ScanStage::Extracting);
            extract_facets(&document, url)
        };
        let PageFacets {
            metadata,
            headings,
            images,
            mut links,
            keywords,
            mobile_friendly,
        } = facets;

        enter(&mut tracker, ScanStage::LinkChecking);
        let link_checks = check_links(
            self.browser.as_ref(),
            &links.internal,
            self.config.max_link_checks,
            self.config.link_check_timeout(),
        );
        // Link checks and probes run together under one join; the Probing
        // stage is entered once both are scheduled, not after link checks end
        enter(&mut tracker, ScanStage::Probing);
        debug!(
            "{}: checking links and probing sitemap/robots.txt concurrently",
            url_str
        );
        let probes = async {
            tokio::join!(
                find_sitemap(&self.client, url),
                find_robots_txt(&self.client, url)
            )
        };
        let (broken, (sitemap, robots_txt)) = tokio::join!(link_checks, probes);

        enter(&mut tracker, ScanStage::Scoring);
        links.broken = broken;
        let performance = fetched.performance;
        let score = calculate_score(&ScoreInputs {
            metadata: &metadata,
            headings: &headings,
            images: &images,
            links: &links,
            mobile_friendly,
            performance: Some(&performance),
            has_sitemap: sitemap.is_some(),
            has_robots_txt: robots_txt.is_some(),
        });

        enter(&mut tracker, ScanStage::Done);
        info!(
            "SEO scan completed for {}. Score: {} ({} broken of {} internal links)",
            url_str,
            score,
            links.broken.len(),
            links.internal.len()
        );

        ScanOutcome::Complete(ScanResult {
            url: url_str,
            timestamp: Utc::now(),
            score,
            metadata,
            headings,
            links,
            images,
            performance: Some(performance),
            keywords,
            mobile_friendly,
            sitemap,
            robots_txt,
            errors: Vec::new(),
        })
    }
}

fn enter(tracker: &mut StageTracker, stage: ScanStage) {
    if let Err(e) = tracker.advance(stage) {
        warn!("{}", e);
    }
}

fn fail(tracker: &mut StageTracker, url: &str, error: ScanError) -> ScanOutcome {
    if error.is_fatal() {
        warn!(
            "SEO scan of {} aborted while {}: {}",
            url,
            tracker.stage(),
            error
        );
    } else {
        error!(
            "Unexpected error during SEO scan of {} while {}: {}",
            url,
            tracker.stage(),
            error
        );
    }
    enter(tracker, ScanStage::Failed);
    ScanOutcome::Degraded(ScanResult::degraded(url, error.to_string()))
}
