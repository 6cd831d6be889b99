//! Configuration module for Sitescribe
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every field has a default, so the CLI also runs without a config
//! file.
//!
//! # Example
//!
//! ```no_run
//! use sitescribe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Page cap: {}", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
pub use validation::validate;
