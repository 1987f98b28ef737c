//! Headless Chrome implementation of the browser traits
//!
//! `headless_chrome` is a blocking library, so every call runs on the tokio
//! blocking pool.

use crate::browser::{Browser, BrowserError, Navigation, NavigationTiming, Page, WaitUntil};
use crate::config::BrowserConfig;
use async_trait::async_trait;
use headless_chrome::protocol::cdp::Performance;
use headless_chrome::{LaunchOptions, Tab};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Interval between network-idle and ready-state polls
const POLL_INTERVAL: Duration = Duration::from_millis(100);

// The resource timing buffer holds 250 entries by default; once full the
// count would stop growing and the page would look idle
const RESOURCE_COUNT_JS: &str = "(performance.setResourceTimingBufferSize(100000), \
    performance.getEntriesByType('resource').length)";

// A fresh tab reports `complete` for about:blank before navigation starts
const DOM_READY_JS: &str =
    "location.href !== 'about:blank' && document.readyState !== 'loading'";

const STATUS_JS: &str = r#"JSON.stringify((() => {
    const entry = performance.getEntriesByType('navigation')[0];
    return entry && entry.responseStatus ? entry.responseStatus : null;
})())"#;

const TIMING_JS: &str = r#"JSON.stringify((() => {
    const t = window.performance.timing;
    return {
        domContentLoaded: t.domContentLoadedEventEnd - t.navigationStart
    };
})())"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTiming {
    dom_content_loaded: Option<f64>,
}

/// Headless Chrome driven over the DevTools protocol
pub struct ChromeBrowser {
    browser: Arc<headless_chrome::Browser>,
    user_agent: String,
}

impl ChromeBrowser {
    /// Launches a Chrome process
    ///
    /// # Arguments
    ///
    /// * `config` - Launch options (headless, sandbox, executable path)
    /// * `user_agent` - User agent string applied to every page
    pub async fn launch(config: &BrowserConfig, user_agent: &str) -> Result<Self, BrowserError> {
        let options = LaunchOptions {
            headless: config.headless,
            sandbox: config.sandbox,
            path: config.executable.as_ref().map(PathBuf::from),
            ..Default::default()
        };

        let browser = run_blocking(move || {
            headless_chrome::Browser::new(options).map_err(|e| BrowserError::Launch(e.to_string()))
        })
        .await?;

        tracing::debug!("Launched headless Chrome");

        Ok(Self {
            browser: Arc::new(browser),
            user_agent: user_agent.to_string(),
        })
    }
}

#[async_trait]
impl Browser for ChromeBrowser {
    async fn new_page(&self) -> Result<Box<dyn Page>, BrowserError> {
        let browser = Arc::clone(&self.browser);
        let user_agent = self.user_agent.clone();

        let tab = run_blocking(move || {
            let tab = browser
                .new_tab()
                .map_err(|e| BrowserError::Launch(format!("Failed to open tab: {}", e)))?;
            if let Err(e) = tab.set_user_agent(&user_agent, None, None) {
                let _ = tab.close(false);
                return Err(BrowserError::Launch(format!(
                    "Failed to set user agent: {}",
                    e
                )));
            }
            Ok(tab)
        })
        .await?;

        Ok(Box::new(ChromePage { tab, closed: false }))
    }
}

/// A Chrome tab
pub struct ChromePage {
    tab: Arc<Tab>,
    closed: bool,
}

impl ChromePage {
    fn tab(&self) -> Result<Arc<Tab>, BrowserError> {
        if self.closed {
            return Err(BrowserError::Closed);
        }
        Ok(Arc::clone(&self.tab))
    }
}

#[async_trait]
impl Page for ChromePage {
    async fn goto(
        &mut self,
        url: &str,
        wait: WaitUntil,
        timeout: Duration,
    ) -> Result<Navigation, BrowserError> {
        let tab = self.tab()?;
        let url = url.to_string();

        run_blocking(move || {
            let started = Instant::now();
            tab.set_default_timeout(timeout);

            tab.navigate_to(&url)
                .map_err(|e| navigation_error(e, started, timeout))?;

            match wait {
                WaitUntil::DomContentLoaded => wait_for_dom(&tab, started, timeout)?,
                WaitUntil::NetworkIdle(quiet) => {
                    tab.wait_until_navigated()
                        .map_err(|e| navigation_error(e, started, timeout))?;
                    wait_for_network_idle(&tab, quiet, started, timeout)?;
                }
            }

            let status = evaluate_json(&tab, STATUS_JS)?
                .as_u64()
                .and_then(|status| u16::try_from(status).ok());

            Ok(Navigation { status })
        })
        .await
    }

    async fn content(&mut self) -> Result<String, BrowserError> {
        let tab = self.tab()?;
        run_blocking(move || {
            tab.get_content()
                .map_err(|e| BrowserError::Evaluation(e.to_string()))
        })
        .await
    }

    async fn navigation_timing(&mut self) -> Result<NavigationTiming, BrowserError> {
        let tab = self.tab()?;
        run_blocking(move || {
            let raw: RawTiming = serde_json::from_value(evaluate_json(&tab, TIMING_JS)?)
                .map_err(|e| BrowserError::Evaluation(e.to_string()))?;
            Ok(NavigationTiming {
                dom_content_loaded_ms: raw.dom_content_loaded,
            })
        })
        .await
    }

    async fn performance_metrics(&mut self) -> Result<Vec<(String, f64)>, BrowserError> {
        let tab = self.tab()?;
        run_blocking(move || {
            tab.call_method(Performance::Enable { time_domain: None })
                .map_err(|e| BrowserError::Evaluation(e.to_string()))?;
            let response = tab
                .call_method(Performance::GetMetrics(None))
                .map_err(|e| BrowserError::Evaluation(e.to_string()))?;
            let _ = tab.call_method(Performance::Disable(None));

            Ok(response
                .metrics
                .into_iter()
                .map(|metric| (metric.name, metric.value))
                .collect())
        })
        .await
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let tab = Arc::clone(&self.tab);
        run_blocking(move || {
            tab.close(false)
                .map(|_| ())
                .map_err(|e| BrowserError::Task(format!("Failed to close tab: {}", e)))
        })
        .await
    }
}

/// Runs a blocking driver call on the blocking pool
async fn run_blocking<T, F>(f: F) -> Result<T, BrowserError>
where
    F: FnOnce() -> Result<T, BrowserError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BrowserError::Task(e.to_string()))?
}

fn navigation_error(error: anyhow::Error, started: Instant, timeout: Duration) -> BrowserError {
    if started.elapsed() >= timeout {
        timeout_error(timeout)
    } else {
        BrowserError::Navigation(error.to_string())
    }
}

fn timeout_error(timeout: Duration) -> BrowserError {
    BrowserError::Timeout {
        timeout_ms: timeout.as_millis() as u64,
    }
}

/// Evaluates an expression; JSON-encoded string results are decoded
fn evaluate_json(tab: &Tab, expression: &str) -> Result<serde_json::Value, BrowserError> {
    let remote = tab
        .evaluate(expression, false)
        .map_err(|e| BrowserError::Evaluation(e.to_string()))?;

    match remote.value {
        Some(serde_json::Value::String(raw)) => match serde_json::from_str(&raw) {
            Ok(decoded) => Ok(decoded),
            Err(_) => Ok(serde_json::Value::String(raw)),
        },
        Some(value) => Ok(value),
        None => Ok(serde_json::Value::Null),
    }
}

/// Polls until the new document has left the `loading` state
///
/// Evaluation errors are expected while the old document is torn down and
/// are retried until the deadline.
fn wait_for_dom(tab: &Tab, started: Instant, timeout: Duration) -> Result<(), BrowserError> {
    loop {
        match evaluate_json(tab, DOM_READY_JS) {
            Ok(serde_json::Value::Bool(true)) => return Ok(()),
            Ok(_) => {}
            Err(e) => tracing::trace!("DOM ready check failed: {}", e),
        }
        if started.elapsed() >= timeout {
            return Err(timeout_error(timeout));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Polls the resource timing buffer until it stops growing for `quiet`
fn wait_for_network_idle(
    tab: &Tab,
    quiet: Duration,
    started: Instant,
    timeout: Duration,
) -> Result<(), BrowserError> {
    let mut last_count = None;
    let mut last_change = Instant::now();

    loop {
        let count = evaluate_json(tab, RESOURCE_COUNT_JS)?.as_u64();
        if count != last_count {
            last_count = count;
            last_change = Instant::now();
        } else if last_change.elapsed() >= quiet {
            return Ok(());
        }

        if started.elapsed() >= timeout {
            return Err(timeout_error(timeout));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}
