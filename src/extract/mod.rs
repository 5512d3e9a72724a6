//! HTML extraction for item detail pages
//!
//! This module maps a parsed item page to an [`ItemRecord`]:
//! - Single-field extractors (title, description, category, rating, image)
//! - The product information table, read by row label
//! - Record assembly in fixed CSV column order

mod fields;
mod record;
mod table;


pub use fields::{
    extract_category, extract_description, extract_image_src, extract_rating_label,
    extract_title, parse_rating, ReviewRating,
};
pub use record::{
    assemble_record, parse_item_page, ItemRecord, CSV_HEADERS, DESCRIPTION_PLACEHOLDER,
    IMAGE_PLACEHOLDER,
};
pub use table::{clean_value, extract_product_info, ProductField, ProductInfo};
