//! Item image naming and download

use crate::crawler::Fetcher;
use crate::{ScrapeError, WriteError};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};

/// File stem used when a title sanitizes to nothing
const UNTITLED: &str = "untitled";

/// Turns an item title into a file name stem
///
/// Keeps the text before the first colon, drops everything that is neither
/// a word character nor whitespace, then lowercases and replaces spaces
/// with hyphens.
///
/// # Examples
///
/// ```
/// use catalogue_scraper::output::sanitize_title;
///
/// assert_eq!(sanitize_title("Title: The Subtitle!"), "title");
/// assert_eq!(sanitize_title("A B C"), "a-b-c");
/// ```
pub fn sanitize_title(title: &str) -> String {
    let head = title.split(':').next().unwrap_or_default();
    let cleaned = NON_WORD_REGEX.replace_all(head, "");
    let stem = cleaned.trim().replace(' ', "-").to_lowercase();

    if stem.is_empty() {
        UNTITLED.to_string()
    } else {
        stem
    }
}

/// Path of an item's image inside its category folder
pub fn image_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{}.jpg", sanitize_title(title)))
}

/// Downloads an image and writes it to `path`
pub async fn download_image(fetcher: &Fetcher, url: &str, path: &Path) -> Result<(), ScrapeError> {
    let bytes = fetcher.fetch_bytes(url).await?;

    tokio::fs::write(path, &bytes)
        .await
        .map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(())
}

lazy_static! {
    static ref NON_WORD_REGEX: Regex = Regex::new(r"[^\w\s]").unwrap();
}
