//! Configuration module for Catalogue Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; missing keys fall back to the defaults in [`types`].
//!
//! # Example
//!
//! ```no_run
//! use catalogue_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Writing output to: {}", config.output.root_dir);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

use crate::ConfigError;
use url::Url;

/// Site settings with URLs parsed, ready for link resolution
#[derive(Debug, Clone)]
pub struct Site {
    pub base_url: Url,
    pub root_url: Url,
    pub catalogue_path: String,
    pub currency_symbol: String,
}

impl Site {
    /// Resolves a validated [`SiteConfig`] into parsed URLs
    pub fn from_config(config: &SiteConfig) -> Result<Self, ConfigError> {
        let base_url = parse_url(&config.base_url)?;
        let root_url = match &config.root_url {
            Some(root) => parse_url(root)?,
            None => base_url.clone(),
        };

        Ok(Self {
            base_url,
            root_url,
            catalogue_path: config.catalogue_path.clone(),
            currency_symbol: config.currency_symbol.clone(),
        })
    }
}

fn parse_url(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", value, e)))
}
