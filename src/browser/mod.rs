//! Browser capability interface
//!
//! The scanner never talks to a browser implementation directly. It goes
//! through two narrow traits:
//!
//! - [`Browser`] opens pages (one tab per page)
//! - [`Page`] loads a URL, returns the rendered HTML, exposes timing data and
//!   is closed explicitly
//!
//! [`ChromeBrowser`] implements them on top of headless Chrome. Tests use a
//! scripted implementation instead.

mod chrome;

pub use chrome::ChromeBrowser;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a browser implementation
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Script evaluation failed: {0}")]
    Evaluation(String),

    #[error("Page is already closed")]
    Closed,

    #[error("Browser task failed: {0}")]
    Task(String),
}

/// When a page load counts as finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// No new network activity for the given quiet period
    NetworkIdle(Duration),
    /// Initial HTML parsed; subresources may still be loading
    DomContentLoaded,
}

/// Outcome of a completed navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigation {
    /// HTTP status of the main document, when the browser reports it
    pub status: Option<u16>,
}

/// Navigation Timing API readings, in milliseconds since navigation start
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NavigationTiming {
    pub dom_content_loaded_ms: Option<f64>,
}

/// A browser able to open pages
#[async_trait]
pub trait Browser: Send + Sync {
    /// Opens a new page (tab)
    ///
    /// The caller owns the page and must call [`Page::close`] on every path.
    async fn new_page(&self) -> Result<Box<dyn Page>, BrowserError>;
}

/// A single browser page
#[async_trait]
pub trait Page: Send {
    /// Loads `url` and waits according to `wait`, failing after `timeout`
    async fn goto(
        &mut self,
        url: &str,
        wait: WaitUntil,
        timeout: Duration,
    ) -> Result<Navigation, BrowserError>;

    /// Returns the rendered HTML of the current document
    async fn content(&mut self) -> Result<String, BrowserError>;

    /// Reads the Navigation Timing API of the current document
    async fn navigation_timing(&mut self) -> Result<NavigationTiming, BrowserError>;

    /// Reads the browser's internal performance metrics as `(name, value)` pairs
    async fn performance_metrics(&mut self) -> Result<Vec<(String, f64)>, BrowserError>;

    /// Closes the page; closing twice is a no-op
    async fn close(&mut self) -> Result<(), BrowserError>;
}

/// Closes a page, logging instead of failing
pub async fn close_quietly(page: &mut dyn Page, url: &str) {
    if let Err(e) = page.close().await {
        tracing::debug!("Failed to close page for {}: {}", url, e);
    }
}
