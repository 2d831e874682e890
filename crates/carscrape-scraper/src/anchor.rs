//! Label anchoring: applies a label dictionary to a [`CellIndex`].

use carscrape_core::{LabelEntry, ListingRecord};

use crate::page::{CellIndex, ValuePolicy};

/// Resolves every entry in order and stores the value into `record`.
///
/// A field that already holds a value is never overwritten. Returns the number
/// of fields filled by this call.
pub fn resolve_labels(
    index: &CellIndex,
    entries: &[LabelEntry],
    policy: ValuePolicy,
    record: &mut ListingRecord,
) -> usize {
    let mut filled = 0;
    for entry in entries {
        if record.is_filled(entry.field) {
            continue;
        }
        let Some(value) = index.resolve(&entry.label, policy) else {
            continue;
        };
        if record.set_if_empty(entry.field, value) {
            tracing::debug!(field = %entry.field, label = %entry.label, "label anchored");
            filled += 1;
        }
    }
    filled
}
