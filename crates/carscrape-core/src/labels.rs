//! Label dictionary: source-page label tokens mapped to schema fields.
//!
//! Labels are exact, case-sensitive substrings of the source markup. The
//! built-in default targets the Azerbaijani catalog layout; a YAML file can
//! replace it without recompiling.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Field};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub label: String,
    pub field: Field,
}

impl LabelEntry {
    fn new(label: &str, field: Field) -> Self {
        Self {
            label: label.to_string(),
            field,
        }
    }
}

/// The full label dictionary for one run.
///
/// `fields` is anchored against the whole page; `contact` is anchored only
/// inside the seller contact block. Order is significant: entries are
/// resolved first to last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub fields: Vec<LabelEntry>,
    #[serde(default)]
    pub contact: Vec<LabelEntry>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            fields: vec![
                LabelEntry::new("Şəhər", Field::City),
                LabelEntry::new("Marka", Field::Brand),
                LabelEntry::new("Model", Field::Model),
                LabelEntry::new("Buraxılış ili", Field::Year),
                LabelEntry::new("Ban növü", Field::BodyType),
                LabelEntry::new("Rəng", Field::Color),
                LabelEntry::new("Mühərrikin həcmi", Field::EngineVolume),
                LabelEntry::new("Mühərrikin gücü", Field::EnginePower),
                LabelEntry::new("Yanacaq növü", Field::FuelType),
                LabelEntry::new("Yürüş", Field::Mileage),
                LabelEntry::new("Sürətlər qutusu", Field::Transmission),
                LabelEntry::new("Ötürücü", Field::Drivetrain),
                LabelEntry::new("Yeni", Field::IsNew),
                LabelEntry::new("Kredit", Field::CreditAvailable),
                LabelEntry::new("Barter mümkündür", Field::BarterPossible),
            ],
            contact: vec![
                LabelEntry::new("Baxışların sayı", Field::Views),
                LabelEntry::new("Yeniləndi", Field::Updated),
                LabelEntry::new("nömrəsi", Field::ListingId),
            ],
        }
    }
}

/// Load and validate a label dictionary from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_labels(path: &Path) -> Result<LabelConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LabelsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_labels(&content)
}

/// Parse and validate a label dictionary from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text does not parse or fails validation.
pub fn parse_labels(content: &str) -> Result<LabelConfig, ConfigError> {
    let labels: LabelConfig = serde_yaml::from_str(content)?;
    validate_labels(&labels)?;
    Ok(labels)
}

/// Checks the dictionary invariants: non-empty labels, one label per field,
/// page labels never target chain-resolved or contact fields, and contact
/// labels only target contact fields.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] naming the first offending entry.
pub fn validate_labels(labels: &LabelConfig) -> Result<(), ConfigError> {
    let mut seen_fields = HashSet::new();

    for entry in labels.fields.iter().chain(&labels.contact) {
        if entry.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "label for field '{}' must be non-empty",
                entry.field
            )));
        }
        if !seen_fields.insert(entry.field) {
            return Err(ConfigError::Validation(format!(
                "field '{}' is mapped by more than one label",
                entry.field
            )));
        }
    }

    for entry in &labels.fields {
        if entry.field.is_chain_resolved() || entry.field.is_contact() {
            return Err(ConfigError::Validation(format!(
                "field '{}' cannot be anchored by page label '{}'",
                entry.field, entry.label
            )));
        }
    }

    for entry in &labels.contact {
        if !entry.field.is_contact() {
            return Err(ConfigError::Validation(format!(
                "contact label '{}' targets non-contact field '{}'",
                entry.label, entry.field
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "labels_test.rs"]
mod tests;
