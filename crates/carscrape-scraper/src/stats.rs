//! Aggregate completeness over a finished harvest.

use carscrape_core::{Field, ListingRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldFill {
    pub field: Field,
    pub filled: usize,
    /// Percentage of successful records with this field filled.
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Percentage of records without an error.
    pub success_rate: f64,
    /// One entry per data field, in column order.
    pub fields: Vec<FieldFill>,
    /// Percentage of filled cells across every data field of every
    /// successful record.
    pub overall_fill_pct: f64,
}

impl CompletionStats {
    /// Computes statistics over `records`. Every rate is `0.0` when its
    /// denominator is zero.
    #[must_use]
    pub fn compute(records: &[ListingRecord]) -> Self {
        let total = records.len();
        let successful: Vec<&ListingRecord> = records.iter().filter(|r| !r.is_failed()).collect();
        let ok = successful.len();

        let fields: Vec<FieldFill> = Field::ALL
            .iter()
            .map(|&field| {
                let filled = successful.iter().filter(|r| r.is_filled(field)).count();
                FieldFill {
                    field,
                    filled,
                    rate: percent(filled, ok),
                }
            })
            .collect();

        let filled_cells: usize = fields.iter().map(|f| f.filled).sum();

        Self {
            total,
            successful: ok,
            failed: total - ok,
            success_rate: percent(ok, total),
            overall_fill_pct: percent(filled_cells, ok * Field::ALL.len()),
            fields,
        }
    }

    #[must_use]
    pub fn field(&self, field: Field) -> Option<&FieldFill> {
        self.fields.iter().find(|f| f.field == field)
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
