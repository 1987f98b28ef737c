//! Internal link liveness sampling
//!
//! A bounded sample of internal links is loaded concurrently, each in its own
//! browser page. Only links that fail are reported.

use crate::browser::{close_quietly, Browser, WaitUntil};
use crate::result::{BrokenLink, LinkStatus};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::debug;

/// Outcome of checking a single link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCheck {
    /// Loaded with a status below 400
    Live,
    /// Loaded with a status of 400 or above, or failed to load
    Broken,
    /// The check itself could not be carried out
    Error,
}

impl LinkCheck {
    fn status(self) -> Option<LinkStatus> {
        match self {
            Self::Live => None,
            Self::Broken => Some(LinkStatus::Broken),
            Self::Error => Some(LinkStatus::Error),
        }
    }
}

/// Checks one link by loading it until DOM content is ready
///
/// The page opened for the check is always closed.
pub async fn check_link(browser: &dyn Browser, url: &str, timeout: Duration) -> LinkCheck {
    let mut page = match browser.new_page().await {
        Ok(page) => page,
        Err(e) => {
            debug!("Could not open page to check {}: {}", url, e);
            return LinkCheck::Error;
        }
    };

    let check = match page.goto(url, WaitUntil::DomContentLoaded, timeout).await {
        Ok(navigation) => match navigation.status {
            Some(status) if status >= 400 => LinkCheck::Broken,
            _ => LinkCheck::Live,
        },
        Err(e) => {
            debug!("Link {} failed to load: {}", url, e);
            LinkCheck::Broken
        }
    };

    close_quietly(page.as_mut(), url).await;
    check
}

/// Checks the first `max_checks` links and returns the ones that failed
///
/// # Arguments
///
/// * `browser` - Browser used to open one page per link
/// * `links` - Candidate links, in discovery order
/// * `max_checks` - Sample size, also the concurrency bound
/// * `timeout` - Per-link load timeout
///
/// # Returns
///
/// Broken links in the same order as `links`. Links past the sample are
/// never loaded and never reported.
pub async fn check_links(
    browser: &dyn Browser,
    links: &[String],
    max_checks: usize,
    timeout: Duration,
) -> Vec<BrokenLink> {
    if max_checks == 0 || links.is_empty() {
        return Vec::new();
    }

    let checked: Vec<(&String, LinkCheck)> = stream::iter(links.iter().take(max_checks))
        .map(|link| async move { (link, check_link(browser, link, timeout).await) })
        .buffered(max_checks)
        .collect()
        .await;

    checked
        .into_iter()
        .filter_map(|(link, check)| {
            check.status().map(|status| BrokenLink {
                url: link.clone(),
                status,
            })
        })
        .collect()
}
