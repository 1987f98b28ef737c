//! Scriptable in-memory browser for driving the scanner in tests

#![allow(dead_code)]

use async_trait::async_trait;
use seo_scan::browser::{Browser, BrowserError, Navigation, NavigationTiming, Page, WaitUntil};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a URL does when loaded
#[derive(Debug, Clone)]
pub enum Response {
    /// Loads with the given status and HTML
    Page { status: u16, html: String },
    /// Navigation times out
    Timeout,
    /// Navigation fails outright (DNS, connection reset, ...)
    NavigationError,
}

impl Response {
    pub fn ok(html: impl Into<String>) -> Self {
        Self::Page {
            status: 200,
            html: html.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Page {
            status,
            html: "<html><body>error</body></html>".to_string(),
        }
    }
}

#[derive(Default)]
struct Counters {
    opened: AtomicUsize,
    closed: AtomicUsize,
    live: AtomicUsize,
    peak: AtomicUsize,
    visited: Mutex<Vec<String>>,
}

/// Fake browser serving scripted responses per URL
///
/// Unknown URLs load as an empty 200 page.
pub struct FakeBrowser {
    routes: Arc<HashMap<String, Response>>,
    counters: Arc<Counters>,
    /// `new_page` fails once this many pages were opened
    page_limit: Option<usize>,
    load_delay: Duration,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self {
            routes: Arc::new(HashMap::new()),
            counters: Arc::new(Counters::default()),
            page_limit: None,
            load_delay: Duration::from_millis(5),
        }
    }

    pub fn route(mut self, url: impl Into<String>, response: Response) -> Self {
        Arc::make_mut(&mut self.routes).insert(url.into(), response);
        self
    }

    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = Some(limit);
        self
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    /// Pages successfully opened
    pub fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    /// Pages closed (each page counted once)
    pub fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    /// Highest number of pages open at the same time
    pub fn peak_open(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }

    /// URLs passed to `goto`, in call order
    pub fn visited(&self) -> Vec<String> {
        self.counters.visited.lock().unwrap().clone()
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn new_page(&self) -> Result<Box<dyn Page>, BrowserError> {
        if let Some(limit) = self.page_limit {
            if self.opened() >= limit {
                return Err(BrowserError::Task("page limit reached".to_string()));
            }
        }

        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        let live = self.counters.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(live, Ordering::SeqCst);

        Ok(Box::new(FakePage {
            routes: Arc::clone(&self.routes),
            counters: Arc::clone(&self.counters),
            load_delay: self.load_delay,
            current: None,
            closed: false,
        }))
    }
}

struct FakePage {
    routes: Arc<HashMap<String, Response>>,
    counters: Arc<Counters>,
    load_delay: Duration,
    current: Option<String>,
    closed: bool,
}

#[async_trait]
impl Page for FakePage {
    async fn goto(
        &mut self,
        url: &str,
        _wait: WaitUntil,
        timeout: Duration,
    ) -> Result<Navigation, BrowserError> {
        if self.closed {
            return Err(BrowserError::Closed);
        }
        self.counters.visited.lock().unwrap().push(url.to_string());
        tokio::time::sleep(self.load_delay).await;

        match self.routes.get(url) {
            Some(Response::Page { status, html }) => {
                self.current = Some(html.clone());
                Ok(Navigation {
                    status: Some(*status),
                })
            }
            Some(Response::Timeout) => Err(BrowserError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
            Some(Response::NavigationError) => Err(BrowserError::Navigation(format!(
                "net::ERR_NAME_NOT_RESOLVED at {}",
                url
            ))),
            None => {
                self.current = Some(String::from("<html><body></body></html>"));
                Ok(Navigation { status: Some(200) })
            }
        }
    }

    async fn content(&mut self) -> Result<String, BrowserError> {
        self.current
            .clone()
            .ok_or_else(|| BrowserError::Evaluation("no document loaded".to_string()))
    }

    async fn navigation_timing(&mut self) -> Result<NavigationTiming, BrowserError> {
        Ok(NavigationTiming {
            dom_content_loaded_ms: Some(250.0),
        })
    }

    async fn performance_metrics(&mut self) -> Result<Vec<(String, f64)>, BrowserError> {
        Ok(vec![
            ("FirstContentfulPaint".to_string(), 800.0),
            ("CumulativeLayoutShift".to_string(), 0.05),
            ("JSHeapUsedSize".to_string(), 1_048_576.0),
        ])
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if !self.closed {
            self.closed = true;
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
            self.counters.live.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
