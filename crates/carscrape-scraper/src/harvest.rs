//! Detail-page harvest: one record per URL, failures isolated per record.

use std::time::Duration;

use carscrape_core::{AppConfig, Field, ListingRecord};

use crate::extract::Extractor;
use crate::fetch::PageFetcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestConfig {
    /// Pause between consecutive detail pages.
    pub delay: Duration,
}

impl HarvestConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.scraper_detail_delay_ms),
        }
    }
}

/// Fetches and extracts one detail page. A fetch failure becomes an
/// error-tagged record.
pub async fn harvest_one<F: PageFetcher>(
    fetcher: &F,
    extractor: &Extractor,
    url: &str,
) -> ListingRecord {
    match fetcher.fetch(url).await {
        Ok(body) => extractor.extract(url, &body),
        Err(e) => ListingRecord::failed(url, e.to_string()),
    }
}

/// Harvests `urls` sequentially, returning exactly one record per URL in
/// input order.
pub async fn harvest<F: PageFetcher>(
    fetcher: &F,
    extractor: &Extractor,
    urls: &[String],
    config: HarvestConfig,
) -> Vec<ListingRecord> {
    let total = urls.len();
    let mut records = Vec::with_capacity(total);

    for (i, url) in urls.iter().enumerate() {
        let record = harvest_one(fetcher, extractor, url).await;
        log_progress(i + 1, total, &record);
        records.push(record);

        if i + 1 < total && !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
    }

    records
}

fn log_progress(position: usize, total: usize, record: &ListingRecord) {
    if let Some(error) = record.error() {
        tracing::warn!(position, total, url = record.url(), error, "listing failed");
        return;
    }

    let filled = record.filled_count();
    tracing::info!(
        position,
        total,
        phone = %truncate_chars(record.get(Field::Phone), 15),
        owner = %truncate_chars(record.get(Field::Owner), 10),
        brand = record.get(Field::Brand),
        model = record.get(Field::Model),
        price = record.get(Field::Price),
        completeness = %format!(
            "{filled}/{} ({:.1}%)",
            Field::ALL.len(),
            record.completeness() * 100.0
        ),
        "listing extracted"
    );
}

/// First `max` characters of `s`, never splitting a code point.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "harvest_test.rs"]
mod tests;
