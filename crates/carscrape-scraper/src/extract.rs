use carscrape_core::{AppConfig, LabelConfig, ListingRecord};
use scraper::Html;

use crate::anchor::resolve_labels;
use crate::page::{CellIndex, ValuePolicy, CONTACT_BLOCK};
use crate::strategy::{PageContext, CHAINS};

/// Turns one detail page into a [`ListingRecord`].
///
/// Resolution order: page labels, then the price/owner/phone chains, then the
/// contact-block labels. Extraction is pure; the same page always yields the
/// same record.
#[derive(Debug, Clone)]
pub struct Extractor {
    labels: LabelConfig,
    currency_marker: String,
}

impl Extractor {
    #[must_use]
    pub fn new(labels: LabelConfig, currency_marker: impl Into<String>) -> Self {
        Self {
            labels,
            currency_marker: currency_marker.into(),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig, labels: LabelConfig) -> Self {
        Self::new(labels, config.currency_marker.clone())
    }

    #[must_use]
    pub fn extract(&self, url: &str, html: &str) -> ListingRecord {
        let document = Html::parse_document(html);
        let mut record = ListingRecord::new(url);

        let page_index = CellIndex::build(document.root_element());
        resolve_labels(
            &page_index,
            &self.labels.fields,
            ValuePolicy::PreferLink,
            &mut record,
        );

        let contact = document.select(&CONTACT_BLOCK).next();
        let ctx = PageContext {
            document: &document,
            contact,
            currency_marker: &self.currency_marker,
        };
        for chain in CHAINS {
            chain.apply(&ctx, &mut record);
        }

        if let Some(contact) = contact {
            let contact_index = CellIndex::build(contact);
            resolve_labels(
                &contact_index,
                &self.labels.contact,
                ValuePolicy::CellText,
                &mut record,
            );
        }

        record
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(LabelConfig::default(), "AZN")
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
