use crate::config::Site;
use crate::ParseError;
use url::Url;

/// Resolves an href against a base URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use catalogue_scraper::url::resolve_link;
///
/// let page = Url::parse("http://example.com/catalogue/category/index.html").unwrap();
/// let next = resolve_link("page-2.html", &page).unwrap();
/// assert_eq!(next.as_str(), "http://example.com/catalogue/category/page-2.html");
/// ```
pub fn resolve_link(href: &str, base: &Url) -> Result<Url, ParseError> {
    base.join(href.trim()).map_err(|source| ParseError::InvalidUrl {
        href: href.to_string(),
        source,
    })
}

/// Resolves an item link found on a listing page
///
/// Listing pages sit at varying depths, so the href is flattened: every
/// `../` is removed and the remainder is placed under the site's catalogue
/// path before joining against the base URL.
///
/// # Examples
///
/// ```
/// use catalogue_scraper::config::{Site, SiteConfig};
/// use catalogue_scraper::url::resolve_item_url;
///
/// let site = Site::from_config(&SiteConfig::default()).unwrap();
/// let url = resolve_item_url("../../../its-only-the-himalayas_981/index.html", &site).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "http://books.toscrape.com/catalogue/its-only-the-himalayas_981/index.html"
/// );
/// ```
pub fn resolve_item_url(href: &str, site: &Site) -> Result<Url, ParseError> {
    let cleaned = href.trim().replace("../", "");
    let path = format!("{}{}", site.catalogue_path, cleaned.trim_start_matches('/'));
    resolve_link(&path, &site.base_url)
}
