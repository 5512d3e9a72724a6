//! Output module for scraped records and run reports
//!
//! This module handles:
//! - Writing one CSV file per category
//! - Naming and downloading item images
//! - Summarising a run on the console and as markdown

mod csv_writer;
mod images;
mod markdown;
mod report;
pub mod stats;

pub use csv_writer::{category_dir_name, csv_file_name, CategoryWriter};
pub use images::{download_image, image_path, sanitize_title};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use report::{CategoryReport, Failure, RunReport};
pub use stats::print_report;
