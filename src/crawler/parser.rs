//! HTML parser for listing and navigation pages
//!
//! This module handles parsing catalogue pages to extract:
//! - Item links and the optional "next page" link of a category listing
//! - The category list from the root page's side navigation

use crate::config::Site;
use crate::crawler::discovery::Category;
use crate::url::{resolve_item_url, resolve_link};
use crate::ParseError;
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from one page of a category listing
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// Item detail URLs, in document order
    pub item_urls: Vec<Url>,

    /// The following listing page, if the page links to one
    pub next_url: Option<Url>,
}

/// Parses a category listing page
///
/// Item links are the anchors inside `<h3>` headings; the next page link is
/// the anchor inside `<li class="next">`. Item links are resolved against
/// the site base, the next link against the current page.
///
/// # Arguments
///
/// * `html` - The listing page body
/// * `page_url` - The URL the page was fetched from
/// * `site` - Site settings for item link resolution
///
/// # Example
///
/// ```
/// use catalogue_scraper::config::{Site, SiteConfig};
/// use catalogue_scraper::crawler::parse_listing;
/// use url::Url;
///
/// let site = Site::from_config(&SiteConfig::default()).unwrap();
/// let page = Url::parse("http://books.toscrape.com/catalogue/category/books/travel_2/index.html").unwrap();
/// let html = r#"<h3><a href="../../../its-only-the-himalayas_981/index.html">It's Only the Himalayas</a></h3>"#;
///
/// let listing = parse_listing(html, &page, &site).unwrap();
/// assert_eq!(listing.item_urls.len(), 1);
/// assert!(listing.next_url.is_none());
/// ```
pub fn parse_listing(html: &str, page_url: &Url, site: &Site) -> Result<ListingPage, ParseError> {
    let document = Html::parse_document(html);

    let item_urls = extract_item_links(&document)
        .iter()
        .map(|href| resolve_item_url(href, site))
        .collect::<Result<Vec<_>, _>>()?;

    let next_url = extract_next_link(&document)
        .map(|href| resolve_link(&href, page_url))
        .transpose()?;

    Ok(ListingPage {
        item_urls,
        next_url,
    })
}

/// Parses the root page's side navigation into categories
///
/// Categories are the entries of the list nested inside the
/// `.side_categories` list (the outer entry is the catalogue-wide "Books"
/// link). A root page without that nested list is rejected.
pub fn parse_category_nav(html: &str, root_url: &Url) -> Result<Vec<Category>, ParseError> {
    let document = Html::parse_document(html);
    let missing = || ParseError::MissingElement {
        url: root_url.to_string(),
        element: "category navigation",
    };

    let nested_list = Selector::parse(".side_categories ul ul").map_err(|_| missing())?;
    let list = document.select(&nested_list).next().ok_or_else(missing)?;

    let (Ok(item_selector), Ok(link_selector)) = (Selector::parse("li"), Selector::parse("a[href]"))
    else {
        return Err(missing());
    };

    let mut categories = Vec::new();
    for item in list.select(&item_selector) {
        let Some(link) = item.select(&link_selector).next() else {
            tracing::debug!("Skipping category entry without a link");
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        categories.push(Category {
            name: link.text().collect::<String>().trim().to_string(),
            url: resolve_link(href, root_url)?,
        });
    }

    Ok(categories)
}

fn extract_item_links(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("h3 a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

fn extract_next_link(document: &Html) -> Option<String> {
    let selector = Selector::parse("li.next a[href]").ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}
