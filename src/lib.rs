//! Catalogue Scraper: a sequential catalogue crawler
//!
//! This crate walks a catalogue website category by category, follows each
//! category's "next page" links, extracts a fixed-schema record from every
//! item page and writes the records as CSV alongside the downloaded images.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Catalogue Scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failures while retrieving a page or an image
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Giving up on {url} after {attempts} attempts: {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        last: String,
    },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: ::url::ParseError,
    },
}

impl FetchError {
    /// Returns true if retrying the same request may succeed
    ///
    /// Server errors, rate limiting and network failures are transient;
    /// other 4xx responses and malformed URLs are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Network { .. } => true,
            Self::Exhausted { .. } | Self::InvalidUrl { .. } => false,
        }
    }
}

/// Failures while mapping a fetched document to data
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Missing {element} on {url}")]
    MissingElement { url: String, element: &'static str },

    #[error("Cannot resolve link '{href}': {source}")]
    InvalidUrl {
        href: String,
        #[source]
        source: ::url::ParseError,
    },
}

/// Failures while persisting output
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Catalogue Scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, Site};
pub use crawler::{Category, Scraper};
pub use extract::{assemble_record, ItemRecord, ReviewRating, CSV_HEADERS};
pub use output::{CategoryReport, RunReport};
