//! Run report types
//!
//! A [`RunReport`] collects what happened to every category of a run so the
//! caller can print or persist a summary once the run ends.

use crate::crawler::Category;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// A URL that could not be processed, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub url: String,
    pub reason: String,
}

/// Outcome of scraping one category
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub name: String,
    pub url: String,

    /// CSV file written for the category, if it got that far
    pub csv_path: Option<PathBuf>,

    /// Listing pages walked
    pub pages: usize,

    /// Item URLs found across all listing pages
    pub items_found: usize,

    /// Rows written to the CSV file
    pub items_written: usize,

    /// Item pages skipped because they could not be fetched or parsed
    pub item_failures: Vec<Failure>,

    pub images_downloaded: usize,
    pub image_failures: Vec<Failure>,

    /// Set when the category was aborted
    pub error: Option<String>,
}

impl CategoryReport {
    /// Creates an empty report for a category
    pub fn new(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            url: category.url.to_string(),
            csv_path: None,
            pages: 0,
            items_found: 0,
            items_written: 0,
            item_failures: Vec::new(),
            images_downloaded: 0,
            image_failures: Vec::new(),
            error: None,
        }
    }

    /// Returns true if the category was aborted
    pub fn is_aborted(&self) -> bool {
        self.error.is_some()
    }

    /// Returns true if every item and image succeeded
    pub fn is_clean(&self) -> bool {
        !self.is_aborted() && self.item_failures.is_empty() && self.image_failures.is_empty()
    }
}

/// Summary of a whole run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub categories: Vec<CategoryReport>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReport {
    /// Starts a report timestamped now
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            categories: Vec::new(),
        }
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    pub fn total_items_found(&self) -> usize {
        self.categories.iter().map(|c| c.items_found).sum()
    }

    pub fn total_items_written(&self) -> usize {
        self.categories.iter().map(|c| c.items_written).sum()
    }

    pub fn total_item_failures(&self) -> usize {
        self.categories.iter().map(|c| c.item_failures.len()).sum()
    }

    pub fn total_images_downloaded(&self) -> usize {
        self.categories.iter().map(|c| c.images_downloaded).sum()
    }

    pub fn total_image_failures(&self) -> usize {
        self.categories.iter().map(|c| c.image_failures.len()).sum()
    }

    /// Categories that were aborted
    pub fn aborted_categories(&self) -> impl Iterator<Item = &CategoryReport> {
        self.categories.iter().filter(|c| c.is_aborted())
    }

    /// Returns true if anything at all failed
    pub fn has_failures(&self) -> bool {
        self.categories.iter().any(|c| !c.is_clean())
    }

    /// Percentage of found items that were written
    pub fn success_rate(&self) -> f64 {
        let found = self.total_items_found();
        if found == 0 {
            return 0.0;
        }
        (self.total_items_written() as f64 / found as f64) * 100.0
    }
}
