use serde::Deserialize;

/// Main configuration structure for Catalogue Scraper
///
/// Every section falls back to defaults matching the public demo catalogue,
/// so an empty file (or no file at all) is a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL that item links and image sources are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Page holding the category navigation (defaults to the base URL)
    #[serde(rename = "root-url")]
    pub root_url: Option<String>,

    /// Path prefix prepended to item links after `../` segments are removed
    #[serde(rename = "catalogue-path")]
    pub catalogue_path: String,

    /// Currency symbol stripped from every tabular value
    #[serde(rename = "currency-symbol")]
    pub currency_symbol: String,

    /// Category display names to restrict the run to (empty means all)
    pub categories: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://books.toscrape.com".to_string(),
            root_url: None,
            catalogue_path: "/catalogue/".to_string(),
            currency_symbol: "£".to_string(),
            categories: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Points the scrape at another site
    ///
    /// Any root URL is dropped so discovery follows the new base URL instead
    /// of a page on the previous host.
    pub fn set_base_url(&mut self, base_url: String) {
        self.base_url = base_url;
        self.root_url = None;
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Retries after the first attempt for transient failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Pause between attempts (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("catalogue-scraper/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding one folder per category
    #[serde(rename = "root-dir")]
    pub root_dir: String,

    /// Append the run date to CSV file names
    #[serde(rename = "date-stamp")]
    pub date_stamp: bool,

    #[serde(rename = "download-images")]
    pub download_images: bool,

    /// Optional path of a markdown run report
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: "bookscrap_files".to_string(),
            date_stamp: true,
            download_images: true,
            summary_path: None,
        }
    }
}
