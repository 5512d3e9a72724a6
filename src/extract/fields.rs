//! Single-field extractors for item detail pages
//!
//! Every extractor takes the parsed document and returns `Option`: `None`
//! means the element it reads is absent. Whether absence is fatal or
//! defaulted is decided by the record assembler, not here.

use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// Review rating of an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewRating {
    /// A recognised star count between 0 and 5
    Stars(u8),
    /// A rating label outside `Zero`..`Five`, kept verbatim
    Unrecognized(String),
}

impl ReviewRating {
    /// Returns the star count if the label was recognised
    pub fn stars(&self) -> Option<u8> {
        match self {
            Self::Stars(n) => Some(*n),
            Self::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for ReviewRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stars(n) => write!(f, "{}", n),
            Self::Unrecognized(label) => write!(f, "{}", label),
        }
    }
}

/// Maps a word-form rating label to a star count
///
/// # Examples
///
/// ```
/// use catalogue_scraper::extract::{parse_rating, ReviewRating};
///
/// assert_eq!(parse_rating("Four"), ReviewRating::Stars(4));
/// assert_eq!(parse_rating("Six"), ReviewRating::Unrecognized("Six".to_string()));
/// ```
pub fn parse_rating(label: &str) -> ReviewRating {
    match label {
        "Zero" => ReviewRating::Stars(0),
        "One" => ReviewRating::Stars(1),
        "Two" => ReviewRating::Stars(2),
        "Three" => ReviewRating::Stars(3),
        "Four" => ReviewRating::Stars(4),
        "Five" => ReviewRating::Stars(5),
        other => ReviewRating::Unrecognized(other.to_string()),
    }
}

/// Extracts the primary heading
pub fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;

    document
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Extracts the paragraph that follows the description anchor
pub fn extract_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("div#product_description").ok()?;
    let anchor = document.select(&selector).next()?;

    anchor
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "p")
        .map(element_text)
}

/// Extracts the category name from the breadcrumb trail
///
/// The trail is `Home > Books > <category> > <item>`, and only the first
/// three entries are links, so the category is the third link.
pub fn extract_category(document: &Html) -> Option<String> {
    let selector = Selector::parse("ul.breadcrumb a").ok()?;

    document
        .select(&selector)
        .nth(2)
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Extracts the raw rating label (e.g. `"Three"`)
///
/// The label is the second class token of the third paragraph inside the
/// main product block (`<p class="star-rating Three">`).
pub fn extract_rating_label(document: &Html) -> Option<String> {
    let selector = Selector::parse(".product_main p").ok()?;
    let paragraph = document.select(&selector).nth(2)?;

    paragraph
        .value()
        .attr("class")?
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
}

/// Extracts the `src` of the first image on the page, unresolved
pub fn extract_image_src(document: &Html) -> Option<String> {
    let selector = Selector::parse("img").ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
