//! Index-page crawl: walks pages `1..=max_pages` and collects the unique
//! detail-page URLs they link to.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use carscrape_core::AppConfig;
use scraper::Html;

use crate::error::ScraperError;
use crate::fetch::PageFetcher;
use crate::page::{LINK_WITH_HREF, LISTING_ITEM};
use crate::urls::{index_page_url, resolve_and_canonicalize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    pub base_url: String,
    pub index_path: String,
    pub max_pages: u32,
    pub detail_path_marker: String,
    /// Pause after each index page.
    pub delay: Duration,
}

impl DiscoveryConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            index_path: config.index_path.clone(),
            max_pages: config.max_pages,
            detail_path_marker: config.detail_path_marker.clone(),
            delay: Duration::from_millis(config.scraper_index_delay_ms),
        }
    }
}

/// Seen set, pages still to visit, and the URLs kept so far in first-seen
/// order. Lives only for one crawl.
struct CrawlState {
    seen: HashSet<String>,
    pending: VecDeque<u32>,
    urls: Vec<String>,
}

impl CrawlState {
    fn new(max_pages: u32) -> Self {
        Self {
            seen: HashSet::new(),
            pending: (1..=max_pages).collect(),
            urls: Vec::new(),
        }
    }

    /// Keeps the URLs not seen before; returns how many were new.
    fn absorb(&mut self, links: Vec<String>) -> usize {
        let before = self.urls.len();
        for link in links {
            if self.seen.insert(link.clone()) {
                self.urls.push(link);
            }
        }
        self.urls.len() - before
    }
}

/// Crawls the index pages in ascending order and returns the deduplicated
/// detail URLs in first-seen order.
///
/// A page that fails to fetch is logged and skipped.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if the configured base URL and index
/// path do not form a valid URL. Fetch failures are never returned.
pub async fn discover_listing_urls<F: PageFetcher>(
    fetcher: &F,
    config: &DiscoveryConfig,
) -> Result<Vec<String>, ScraperError> {
    let mut state = CrawlState::new(config.max_pages);

    while let Some(page) = state.pending.pop_front() {
        let url = index_page_url(&config.base_url, &config.index_path, page)?;

        match fetcher.fetch(&url).await {
            Ok(body) => {
                let links =
                    extract_detail_links(&body, &config.base_url, &config.detail_path_marker);
                let found = links.len();
                let new = state.absorb(links);
                tracing::info!(
                    page,
                    found,
                    new,
                    total = state.urls.len(),
                    "index page crawled"
                );
            }
            Err(e) => {
                tracing::warn!(page, url = %url, error = %e, "index page failed; skipping");
            }
        }

        if !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
    }

    tracing::info!(total = state.urls.len(), "discovery complete");
    Ok(state.urls)
}

/// Detail links on one index page: every `a[href]` inside a `div.cars__item`
/// whose `href` contains `marker`, resolved against `base_url` and
/// canonicalized. Duplicates within the page are kept.
#[must_use]
pub fn extract_detail_links(html: &str, base_url: &str, marker: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&LISTING_ITEM)
        .flat_map(|item| item.select(&LINK_WITH_HREF))
        .filter_map(|link| link.value().attr("href"))
        .filter(|href| href.contains(marker))
        .filter_map(|href| resolve_and_canonicalize(href, base_url))
        .collect()
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
