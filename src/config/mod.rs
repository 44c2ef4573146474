//! Configuration module for Sumi-Gleaner
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a crawl can run without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use sumi_gleaner::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("gleaner.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    parse_capabilities, parse_page_types, Config, CrawlerConfig, FetcherConfig, OutputConfig,
    ProxyConfig, ScopeConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
