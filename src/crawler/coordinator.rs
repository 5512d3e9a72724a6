//! Scrape coordinator - main orchestration logic
//!
//! This module sequences a run:
//! - Discovering categories from the root navigation
//! - Walking each category's listing pages
//! - Fetching and extracting every item page
//! - Writing CSV rows and downloading images
//! - Recording outcomes in a run report

use crate::config::{Config, Site};
use crate::crawler::discovery::{discover_categories, filter_categories, Category};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::pagination::walk_category;
use crate::extract::{parse_item_page, ItemRecord};
use crate::output::{
    download_image, generate_markdown_summary, image_path, CategoryReport, CategoryWriter,
    Failure, RunReport,
};
use crate::ScrapeError;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use url::Url;

/// Main scraper structure
///
/// Holds the configuration and the HTTP client reused by every request of
/// a run. Work is strictly sequential: one category, one item, one image at
/// a time.
pub struct Scraper {
    config: Config,
    site: Site,
    fetcher: Fetcher,
    run_date: NaiveDate,
}

impl Scraper {
    /// Creates a new scraper instance
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Successfully created scraper
    /// * `Err(ScrapeError)` - Invalid site URLs or HTTP client failure
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let site = Site::from_config(&config.site)?;
        let fetcher = Fetcher::new(&config.http)?;

        Ok(Self {
            config,
            site,
            fetcher,
            run_date: Local::now().date_naive(),
        })
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Discovers the categories this run will scrape
    ///
    /// Applies the configured category filter to the discovered list.
    pub async fn discover(&self) -> Result<Vec<Category>, ScrapeError> {
        let categories = discover_categories(&self.fetcher, &self.site).await?;
        Ok(filter_categories(categories, &self.config.site.categories))
    }

    /// Runs the whole scrape
    ///
    /// Discovery failure aborts the run. Failures inside a category are
    /// recorded in its report and the run moves on to the next category.
    /// A summary file that cannot be written is logged, not returned.
    pub async fn run(&self) -> Result<RunReport, ScrapeError> {
        let mut report = RunReport::new();
        let categories = self.discover().await?;

        for (index, category) in categories.iter().enumerate() {
            tracing::info!(
                "[{}/{}] Scraping category {}",
                index + 1,
                categories.len(),
                category.name
            );
            report.categories.push(self.scrape_category(category).await);
        }

        report.finish();
        tracing::info!(
            "Run finished: {} items written, {} skipped, {} categories aborted",
            report.total_items_written(),
            report.total_item_failures(),
            report.aborted_categories().count()
        );

        // The summary is optional output; scraped data is already on disk
        if let Some(summary_path) = &self.config.output.summary_path {
            match generate_markdown_summary(&report, Path::new(summary_path)) {
                Ok(()) => tracing::info!("Summary written to {}", summary_path),
                Err(e) => tracing::error!("Failed to write summary {}: {}", summary_path, e),
            }
        }

        Ok(report)
    }

    /// Scrapes one category into its output folder
    ///
    /// Never fails: an aborted category carries its error in the report.
    pub async fn scrape_category(&self, category: &Category) -> CategoryReport {
        let mut report = CategoryReport::new(category);

        let cursor = match walk_category(&self.fetcher, &self.site, &category.url).await {
            Ok(cursor) => cursor,
            Err(e) => {
                tracing::error!("Aborting category {}: {}", category.name, e);
                report.error = Some(e.to_string());
                return report;
            }
        };

        report.pages = cursor.pages();
        let item_urls = cursor.into_item_urls();
        report.items_found = item_urls.len();
        tracing::info!(
            "Category {}: {} items across {} pages",
            category.name,
            report.items_found,
            report.pages
        );

        match self.scrape_items(category, &item_urls, &mut report).await {
            Ok(csv_path) => report.csv_path = Some(csv_path),
            Err(e) => {
                tracing::error!("Aborting category {}: {}", category.name, e);
                report.error = Some(e.to_string());
            }
        }

        report
    }

    /// Fetches every item, writing rows and images as it goes
    ///
    /// Item and image failures are logged and recorded; only output errors
    /// on the CSV file abort the category.
    async fn scrape_items(
        &self,
        category: &Category,
        item_urls: &[Url],
        report: &mut CategoryReport,
    ) -> Result<PathBuf, ScrapeError> {
        let date = self.config.output.date_stamp.then_some(self.run_date);
        let mut writer =
            CategoryWriter::create(Path::new(&self.config.output.root_dir), &category.name, date)?;

        for item_url in item_urls {
            let record = match self.fetch_record(item_url).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Skipping item {}: {}", item_url, e);
                    report.item_failures.push(Failure {
                        url: item_url.to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            writer.write_record(&record)?;
            report.items_written += 1;

            if self.config.output.download_images {
                self.save_image(&record, writer.dir(), report).await;
            }
        }

        tracing::debug!(
            "Wrote {} rows to {}",
            writer.rows(),
            writer.csv_path().display()
        );
        Ok(writer.finish()?)
    }

    async fn fetch_record(&self, item_url: &Url) -> Result<ItemRecord, ScrapeError> {
        let body = self.fetcher.fetch_text(item_url.as_str()).await?;
        Ok(parse_item_page(&body, item_url.as_str(), &self.site)?)
    }

    async fn save_image(&self, record: &ItemRecord, dir: &Path, report: &mut CategoryReport) {
        if !record.has_image() {
            tracing::warn!("No image for {}", record.product_page_url);
            report.image_failures.push(Failure {
                url: record.product_page_url.clone(),
                reason: "no image URL".to_string(),
            });
            return;
        }

        let path = image_path(dir, &record.title);
        match download_image(&self.fetcher, &record.image_url, &path).await {
            Ok(()) => {
                tracing::debug!("Image saved to {}", path.display());
                report.images_downloaded += 1;
            }
            Err(e) => {
                tracing::warn!("Image download failed for {}: {}", record.image_url, e);
                report.image_failures.push(Failure {
                    url: record.image_url.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// Runs a complete scrape with the given configuration
///
/// # Example
///
/// ```no_run
/// use catalogue_scraper::config::Config;
/// use catalogue_scraper::crawler::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_scrape(Config::default()).await?;
/// println!("{} items written", report.total_items_written());
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: Config) -> Result<RunReport, ScrapeError> {
    Scraper::new(config)?.run().await
}
