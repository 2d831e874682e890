use std::path::PathBuf;

/// Runtime configuration for a crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog origin, e.g. `https://www.avtovitrin.com`.
    pub base_url: String,
    /// Path of the paginated index, queried as `{index_path}?page=N`.
    pub index_path: String,
    /// Highest index page number to visit (pages `1..=max_pages`).
    pub max_pages: u32,
    /// Substring an `href` must contain to count as a detail-page link.
    pub detail_path_marker: String,
    /// Currency token that marks a price string.
    pub currency_marker: String,
    pub log_level: String,
    pub labels_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub output_stem: String,
    pub scraper_user_agent: String,
    pub scraper_request_timeout_secs: u64,
    /// Pause after every index page.
    pub scraper_index_delay_ms: u64,
    /// Pause between consecutive detail pages.
    pub scraper_detail_delay_ms: u64,
}
