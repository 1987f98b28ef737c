//! Page fetcher
//!
//! Loads the target page in a fresh browser page, waits for network idle,
//! captures the rendered HTML and the page's timing data, then releases the
//! page. The page handle never outlives [`fetch_page`].

use crate::browser::{close_quietly, Browser, BrowserError, Page, WaitUntil};
use crate::result::Performance;
use crate::ScanError;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Result of a successful fetch
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Rendered HTML after scripts ran
    pub html: String,
    /// Wall-clock time of the navigation, in milliseconds
    pub load_time_ms: f64,
    /// Timing data read from the page before it was closed
    pub performance: Performance,
}

/// Timing metrics read from a loaded page, in seconds (layout shift is unitless)
///
/// Every field is optional: a browser may not report a given metric.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageMetrics {
    pub dom_content_loaded: Option<f64>,
    pub first_contentful_paint: Option<f64>,
    pub largest_contentful_paint: Option<f64>,
    pub time_to_interactive: Option<f64>,
    pub total_blocking_time: Option<f64>,
    pub cumulative_layout_shift: Option<f64>,
}

impl PageMetrics {
    /// Combines the metrics with the measured load time into a [`Performance`]
    pub fn into_performance(self, load_time_ms: f64) -> Performance {
        Performance {
            load_time: load_time_ms / 1000.0,
            dom_content_loaded: self.dom_content_loaded,
            first_contentful_paint: self.first_contentful_paint,
            largest_contentful_paint: self.largest_contentful_paint,
            time_to_interactive: self.time_to_interactive,
            total_blocking_time: self.total_blocking_time,
            cumulative_layout_shift: self.cumulative_layout_shift,
        }
    }

    /// Maps one browser-reported metric onto the matching field
    ///
    /// Names are matched by substring. Unknown names are ignored.
    fn record(&mut self, name: &str, value: f64) {
        if !value.is_finite() {
            return;
        }

        if name.contains("FirstContentfulPaint") {
            self.first_contentful_paint = Some(value / 1000.0);
        } else if name.contains("LargestContentfulPaint") {
            self.largest_contentful_paint = Some(value / 1000.0);
        } else if name.contains("TimeToInteractive") {
            self.time_to_interactive = Some(value / 1000.0);
        } else if name.contains("TotalBlockingTime") {
            self.total_blocking_time = Some(value / 1000.0);
        } else if name.contains("CumulativeLayoutShift") {
            self.cumulative_layout_shift = Some(value);
        }
    }
}

/// Fetches a page's rendered HTML
///
/// # Arguments
///
/// * `browser` - Browser used to open the page
/// * `url` - Absolute URL to load
/// * `timeout` - Maximum time allowed for the navigation
/// * `network_idle` - Quiet period that counts as "network idle"
///
/// # Returns
///
/// * `Ok(FetchedPage)` - The page loaded with a status below 400
/// * `Err(ScanError::FetchTimeout)` - The navigation did not settle in time
/// * `Err(ScanError::HttpError)` - The main document returned 400 or above
/// * `Err(ScanError::Browser)` - The browser failed for another reason
///
/// The page is closed before this function returns, on every path.
pub async fn fetch_page(
    browser: &dyn Browser,
    url: &str,
    timeout: Duration,
    network_idle: Duration,
) -> Result<FetchedPage, ScanError> {
    let mut page = browser.new_page().await?;
    let outcome = load(page.as_mut(), url, timeout, network_idle).await;
    close_quietly(page.as_mut(), url).await;
    outcome
}

async fn load(
    page: &mut dyn Page,
    url: &str,
    timeout: Duration,
    network_idle: Duration,
) -> Result<FetchedPage, ScanError> {
    let started = Instant::now();
    let navigation = match page
        .goto(url, WaitUntil::NetworkIdle(network_idle), timeout)
        .await
    {
        Ok(navigation) => navigation,
        Err(BrowserError::Timeout { .. }) => {
            return Err(ScanError::FetchTimeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
        Err(e) => return Err(e.into()),
    };
    let load_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    if let Some(status) = navigation.status {
        if status >= 400 {
            return Err(ScanError::HttpError {
                url: url.to_string(),
                status,
            });
        }
    }

    let html = page.content().await?;
    debug!("Fetched {} ({} bytes) in {:.0}ms", url, html.len(), load_time_ms);

    let performance = get_performance_metrics(page).await.into_performance(load_time_ms);

    Ok(FetchedPage {
        html,
        load_time_ms,
        performance,
    })
}

/// Reads timing metrics from a loaded page
///
/// Best-effort: any metric the browser cannot supply is left as `None`, and
/// a failing read is logged rather than returned.
pub async fn get_performance_metrics(page: &mut dyn Page) -> PageMetrics {
    let mut metrics = PageMetrics::default();

    match page.navigation_timing().await {
        Ok(timing) => {
            metrics.dom_content_loaded = timing
                .dom_content_loaded_ms
                .filter(|ms| ms.is_finite() && *ms >= 0.0)
                .map(|ms| ms / 1000.0);
        }
        Err(e) => warn!("Navigation timing unavailable: {}", e),
    }

    match page.performance_metrics().await {
        Ok(reported) => {
            for (name, value) in reported {
                metrics.record(&name, value);
            }
        }
        Err(e) => warn!("Performance metrics unavailable: {}", e),
    }

    metrics
}
