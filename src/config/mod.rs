//! Configuration module for RAT
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file section falls back to the defaults
//! that target `https://www.reddit.com`.
//!
//! # Example
//!
//! ```no_run
//! use rat::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("rat.toml")).unwrap();
//! println!("Base URL: {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
