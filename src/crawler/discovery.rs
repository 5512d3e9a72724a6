//! Category discovery from the site root

use crate::config::Site;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::parse_category_nav;
use crate::ScrapeError;
use url::Url;

/// A catalogue category found in the root navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Display name, also used for the output folder
    pub name: String,

    /// First listing page of the category
    pub url: Url,
}

/// Fetches the root page and lists its categories in navigation order
///
/// Every later step depends on this list, so any failure here is returned
/// to the caller rather than yielding a partial list.
pub async fn discover_categories(fetcher: &Fetcher, site: &Site) -> Result<Vec<Category>, ScrapeError> {
    tracing::info!("Discovering categories from {}", site.root_url);

    let body = fetcher.fetch_text(site.root_url.as_str()).await?;
    let categories = parse_category_nav(&body, &site.root_url)?;

    tracing::info!("Found {} categories", categories.len());
    Ok(categories)
}

/// Keeps only the categories whose names are listed (case-insensitive)
///
/// An empty name list keeps everything.
pub fn filter_categories(categories: Vec<Category>, names: &[String]) -> Vec<Category> {
    if names.is_empty() {
        return categories;
    }

    for name in names {
        if !categories.iter().any(|c| c.name.eq_ignore_ascii_case(name.trim())) {
            tracing::warn!("Requested category '{}' not found on site", name);
        }
    }

    categories
        .into_iter()
        .filter(|c| names.iter().any(|n| c.name.eq_ignore_ascii_case(n.trim())))
        .collect()
}
