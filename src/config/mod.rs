//! Configuration module for SEO Scan
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every field has a default, so scanning works without any configuration file.
//!
//! # Example
//!
//! ```no_run
//! use seo_scan::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-scan.toml")).unwrap();
//! println!("Page timeout: {}ms", config.scanner.page_timeout_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrowserConfig, Config, ScannerConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
