//! URL handling module for Catalogue Scraper
//!
//! Catalogue pages link with relative hrefs that climb out of the current
//! directory (`../../../item_1/index.html`). This module turns those hrefs
//! into absolute URLs against either the page they were found on or the
//! configured site base.

mod resolve;

pub use resolve::{resolve_item_url, resolve_link};
