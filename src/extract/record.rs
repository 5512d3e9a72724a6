//! Item record assembly
//!
//! Combines the field extractors into the fixed ten-column record written
//! to CSV.

use crate::config::Site;
use crate::extract::fields::{
    extract_category, extract_description, extract_image_src, extract_rating_label,
    extract_title, parse_rating, ReviewRating,
};
use crate::extract::table::{extract_product_info, ProductField};
use crate::url::resolve_link;
use crate::ParseError;
use scraper::Html;

/// CSV column names, in record order
pub const CSV_HEADERS: [&str; 10] = [
    "product_page_url",
    "title",
    "product_description",
    "category",
    "universal_product_code",
    "price_excluding_tax",
    "price_include_tax",
    "number_available",
    "review_rating",
    "image_url",
];

/// Written when an item page has no description block
pub const DESCRIPTION_PLACEHOLDER: &str = "No description found";

/// Written when an item page has no usable image source
pub const IMAGE_PLACEHOLDER: &str = "No image URL found";

/// One catalogue item, as written to a CSV row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub product_page_url: String,
    pub title: String,
    pub product_description: String,
    pub category: String,
    pub universal_product_code: String,
    pub price_excluding_tax: String,
    pub price_including_tax: String,
    pub number_available: String,
    pub review_rating: ReviewRating,
    pub image_url: String,
}

impl ItemRecord {
    /// Returns the record's values in [`CSV_HEADERS`] order
    pub fn to_csv_row(&self) -> [String; 10] {
        [
            self.product_page_url.clone(),
            self.title.clone(),
            self.product_description.clone(),
            self.category.clone(),
            self.universal_product_code.clone(),
            self.price_excluding_tax.clone(),
            self.price_including_tax.clone(),
            self.number_available.clone(),
            self.review_rating.to_string(),
            self.image_url.clone(),
        ]
    }

    /// Returns true if the image column holds a downloadable URL
    pub fn has_image(&self) -> bool {
        self.image_url != IMAGE_PLACEHOLDER
    }
}

/// Builds a record from a parsed item page
///
/// Title, category and rating are required: if any is missing the page is
/// rejected with [`ParseError::MissingElement`]. Description and image fall
/// back to their placeholders, and absent table rows become empty strings.
///
/// # Arguments
///
/// * `document` - The parsed item detail page
/// * `page_url` - The URL the page was fetched from
/// * `site` - Site settings used to resolve the image URL and strip currency
pub fn assemble_record(
    document: &Html,
    page_url: &str,
    site: &Site,
) -> Result<ItemRecord, ParseError> {
    let missing = |element: &'static str| ParseError::MissingElement {
        url: page_url.to_string(),
        element,
    };

    let title = extract_title(document).ok_or_else(|| missing("primary heading"))?;
    let category = extract_category(document).ok_or_else(|| missing("breadcrumb category"))?;
    let rating_label = extract_rating_label(document).ok_or_else(|| missing("star rating"))?;

    let review_rating = parse_rating(&rating_label);
    match review_rating.stars() {
        Some(stars) => tracing::trace!("{} rated {} stars", page_url, stars),
        None => tracing::warn!("Unrecognized rating '{}' on {}", review_rating, page_url),
    }

    let product_description =
        extract_description(document).unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string());

    let image_url = match extract_image_src(document) {
        Some(src) => resolve_link(&src, &site.base_url)?.to_string(),
        None => IMAGE_PLACEHOLDER.to_string(),
    };

    let info = extract_product_info(document, &site.currency_symbol);

    Ok(ItemRecord {
        product_page_url: page_url.to_string(),
        title,
        product_description,
        category,
        universal_product_code: info.get_or_empty(ProductField::Upc),
        price_excluding_tax: info.get_or_empty(ProductField::PriceExcludingTax),
        price_including_tax: info.get_or_empty(ProductField::PriceIncludingTax),
        number_available: info.get_or_empty(ProductField::Availability),
        review_rating,
        image_url,
    })
}

/// Parses an item page body and assembles its record
pub fn parse_item_page(body: &str, page_url: &str, site: &Site) -> Result<ItemRecord, ParseError> {
    let document = Html::parse_document(body);
    assemble_record(&document, page_url, site)
}
