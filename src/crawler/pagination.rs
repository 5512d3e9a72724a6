//! Category pagination walker
//!
//! Follows a category's "next page" links from its first listing page until
//! a page without one is reached, collecting item URLs along the way.

use crate::config::Site;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{parse_listing, ListingPage};
use crate::ScrapeError;
use url::Url;

/// Transient progress through one category's listing pages
#[derive(Debug, Clone)]
pub struct PaginationCursor {
    current: Url,
    item_urls: Vec<Url>,
    pages: usize,
}

impl PaginationCursor {
    /// Creates a cursor positioned on a category's first page
    pub fn new(start: Url) -> Self {
        Self {
            current: start,
            item_urls: Vec::new(),
            pages: 0,
        }
    }

    /// The page the walker fetches next
    pub fn current(&self) -> &Url {
        &self.current
    }

    /// Number of listing pages consumed so far
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn item_urls(&self) -> &[Url] {
        &self.item_urls
    }

    /// Consumes a parsed listing page
    ///
    /// Appends the page's items and moves to the next page. Returns false
    /// once a page without a next link has been consumed.
    pub fn advance(&mut self, listing: ListingPage) -> bool {
        self.pages += 1;
        self.item_urls.extend(listing.item_urls);

        match listing.next_url {
            Some(next) => {
                self.current = next;
                true
            }
            None => false,
        }
    }

    /// Finishes the walk, returning the collected item URLs
    pub fn into_item_urls(self) -> Vec<Url> {
        self.item_urls
    }
}

/// Walks every listing page of a category
///
/// Item URLs are returned in page order, then in-page order, without
/// deduplication. The walk ends only when a page has no next link; a page
/// that still fails after the fetcher's bounded retries aborts the walk.
///
/// # Arguments
///
/// * `fetcher` - The shared fetcher
/// * `site` - Site settings for link resolution
/// * `start` - The category's first listing page
///
/// # Returns
///
/// * `Ok(PaginationCursor)` - The exhausted cursor
/// * `Err(ScrapeError)` - A listing page could not be fetched or resolved
pub async fn walk_category(
    fetcher: &Fetcher,
    site: &Site,
    start: &Url,
) -> Result<PaginationCursor, ScrapeError> {
    let mut cursor = PaginationCursor::new(start.clone());

    loop {
        let page_url = cursor.current().clone();
        let body = fetcher.fetch_text(page_url.as_str()).await?;
        let listing = parse_listing(&body, &page_url, site)?;

        tracing::debug!(
            "Listing page {} ({}) has {} items",
            cursor.pages() + 1,
            page_url,
            listing.item_urls.len()
        );

        if !cursor.advance(listing) {
            break;
        }
    }

    Ok(cursor)
}
