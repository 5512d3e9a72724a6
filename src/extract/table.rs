//! Product information table extraction
//!
//! The item page carries a two-column table (`<th>` label, `<td>` value).
//! Rows are matched by label, so reordered or extra rows do not shift
//! values into the wrong fields.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;

/// Known rows of the product information table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Upc,
    ProductType,
    PriceExcludingTax,
    PriceIncludingTax,
    Tax,
    Availability,
    NumberOfReviews,
}

impl ProductField {
    /// Every row the record uses, in table order
    pub const ALL: [ProductField; 7] = [
        Self::Upc,
        Self::ProductType,
        Self::PriceExcludingTax,
        Self::PriceIncludingTax,
        Self::Tax,
        Self::Availability,
        Self::NumberOfReviews,
    ];

    /// Looks up a field by its row label
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "UPC" => Some(Self::Upc),
            "Product Type" => Some(Self::ProductType),
            "Price (excl. tax)" => Some(Self::PriceExcludingTax),
            "Price (incl. tax)" => Some(Self::PriceIncludingTax),
            "Tax" => Some(Self::Tax),
            "Availability" => Some(Self::Availability),
            "Number of reviews" => Some(Self::NumberOfReviews),
            _ => None,
        }
    }

    /// Returns the row label as it appears on the page
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upc => "UPC",
            Self::ProductType => "Product Type",
            Self::PriceExcludingTax => "Price (excl. tax)",
            Self::PriceIncludingTax => "Price (incl. tax)",
            Self::Tax => "Tax",
            Self::Availability => "Availability",
            Self::NumberOfReviews => "Number of reviews",
        }
    }
}

/// Cleaned values of the product information table
#[derive(Debug, Clone, Default)]
pub struct ProductInfo {
    values: HashMap<ProductField, String>,
}

impl ProductInfo {
    /// Returns the cleaned value of a field, if its row was present
    pub fn get(&self, field: ProductField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Returns the cleaned value of a field, or an empty string
    pub fn get_or_empty(&self, field: ProductField) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Reads the product information table by row label
///
/// Rows with unknown labels are ignored. Every value goes through
/// [`clean_value`].
pub fn extract_product_info(document: &Html, currency_symbol: &str) -> ProductInfo {
    let mut info = ProductInfo::default();

    let (Ok(row_selector), Ok(th_selector), Ok(td_selector)) = (
        Selector::parse("table tr"),
        Selector::parse("th"),
        Selector::parse("td"),
    ) else {
        return info;
    };

    for row in document.select(&row_selector) {
        let Some(label) = row.select(&th_selector).next() else {
            continue;
        };
        let Some(value) = row.select(&td_selector).next() else {
            continue;
        };

        let label = label.text().collect::<String>();
        match ProductField::from_label(&label) {
            Some(field) => {
                let raw = value.text().collect::<String>();
                info.values
                    .entry(field)
                    .or_insert_with(|| clean_value(&raw, currency_symbol));
            }
            None => tracing::trace!("Ignoring product table row '{}'", label.trim()),
        }
    }

    for field in ProductField::ALL {
        if info.get(field).is_none() {
            tracing::debug!("Product table has no '{}' row", field.label());
        }
    }

    info
}

/// Strips the currency symbol and reduces stock text to its count
///
/// # Examples
///
/// ```
/// use catalogue_scraper::extract::clean_value;
///
/// assert_eq!(clean_value("£51.77", "£"), "51.77");
/// assert_eq!(clean_value("In stock (3 available)", "£"), "3");
/// ```
pub fn clean_value(raw: &str, currency_symbol: &str) -> String {
    let without_currency = raw.replace(currency_symbol, "");
    AVAILABILITY_REGEX
        .replace_all(&without_currency, "$1")
        .trim()
        .to_string()
}

lazy_static! {
    // "In stock (22 available)" -> "22"
    static ref AVAILABILITY_REGEX: Regex = Regex::new(r"In stock \((\d+) available\)").unwrap();
}
