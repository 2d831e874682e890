pub mod anchor;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod harvest;
pub mod page;
pub mod stats;
pub mod strategy;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_support;

pub use discovery::{discover_listing_urls, extract_detail_links, DiscoveryConfig};
pub use error::ScraperError;
pub use extract::Extractor;
pub use fetch::{HttpFetcher, PageFetcher};
pub use harvest::{harvest, harvest_one, HarvestConfig};
pub use stats::{CompletionStats, FieldFill};
