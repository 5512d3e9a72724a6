//! Crawler module for catalogue page fetching and traversal
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with bounded retries
//! - Listing page and navigation parsing
//! - Category discovery and pagination
//! - Overall run coordination

mod coordinator;
mod discovery;
mod fetcher;
mod pagination;
mod parser;

pub use coordinator::{run_scrape, Scraper};
pub use discovery::{discover_categories, filter_categories, Category};
pub use fetcher::{build_http_client, Fetcher};
pub use pagination::{walk_category, PaginationCursor};
pub use parser::{parse_category_nav, parse_listing, ListingPage};
