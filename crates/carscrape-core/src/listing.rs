//! The fixed output schema: one [`ListingRecord`] per detail page.
//!
//! Every data field is always present (empty when unresolved). A record that
//! failed to fetch carries only its `url` and an `error` message.

use serde::{Deserialize, Serialize};

/// Output column order shared by every writer. `url` is the record key and
/// is not a [`Field`]; the optional `error` column is appended by writers
/// when at least one record failed.
pub const COLUMNS: [&str; 22] = [
    "phone",
    "owner",
    "url",
    "brand",
    "model",
    "price",
    "city",
    "year",
    "body_type",
    "color",
    "engine_volume",
    "engine_power",
    "fuel_type",
    "mileage",
    "transmission",
    "drivetrain",
    "is_new",
    "credit_available",
    "barter_possible",
    "views",
    "updated",
    "listing_id",
];

/// A resolvable data field of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Phone,
    Owner,
    Brand,
    Model,
    Price,
    City,
    Year,
    BodyType,
    Color,
    EngineVolume,
    EnginePower,
    FuelType,
    Mileage,
    Transmission,
    Drivetrain,
    IsNew,
    CreditAvailable,
    BarterPossible,
    Views,
    Updated,
    ListingId,
}

impl Field {
    /// All data fields in output column order.
    pub const ALL: [Field; 21] = [
        Field::Phone,
        Field::Owner,
        Field::Brand,
        Field::Model,
        Field::Price,
        Field::City,
        Field::Year,
        Field::BodyType,
        Field::Color,
        Field::EngineVolume,
        Field::EnginePower,
        Field::FuelType,
        Field::Mileage,
        Field::Transmission,
        Field::Drivetrain,
        Field::IsNew,
        Field::CreditAvailable,
        Field::BarterPossible,
        Field::Views,
        Field::Updated,
        Field::ListingId,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Phone => "phone",
            Field::Owner => "owner",
            Field::Brand => "brand",
            Field::Model => "model",
            Field::Price => "price",
            Field::City => "city",
            Field::Year => "year",
            Field::BodyType => "body_type",
            Field::Color => "color",
            Field::EngineVolume => "engine_volume",
            Field::EnginePower => "engine_power",
            Field::FuelType => "fuel_type",
            Field::Mileage => "mileage",
            Field::Transmission => "transmission",
            Field::Drivetrain => "drivetrain",
            Field::IsNew => "is_new",
            Field::CreditAvailable => "credit_available",
            Field::BarterPossible => "barter_possible",
            Field::Views => "views",
            Field::Updated => "updated",
            Field::ListingId => "listing_id",
        }
    }

    /// Fields resolved by a strategy chain rather than label anchoring.
    #[must_use]
    pub const fn is_chain_resolved(self) -> bool {
        matches!(self, Field::Price | Field::Phone | Field::Owner)
    }

    /// Fields anchored inside the seller contact block.
    #[must_use]
    pub const fn is_contact(self) -> bool {
        matches!(self, Field::Views | Field::Updated | Field::ListingId)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the output dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    url: String,
    values: [String; 21],
    error: Option<String>,
}

impl ListingRecord {
    /// Creates an empty record keyed by `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            values: Default::default(),
            error: None,
        }
    }

    /// Creates an error-tagged record. All data fields stay empty.
    #[must_use]
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(url)
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    #[must_use]
    pub fn is_filled(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    /// Stores `value` for `field` unless the field already holds a value,
    /// the value is empty, or the record is error-tagged.
    ///
    /// Returns `true` when the value was stored.
    pub fn set_if_empty(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.is_failed() || self.is_filled(field) {
            return false;
        }
        let value = value.into();
        if value.is_empty() {
            return false;
        }
        self.values[field.index()] = value;
        true
    }

    /// Number of non-empty data fields.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_empty()).count()
    }

    /// Fraction of data fields that are filled, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completeness(&self) -> f64 {
        self.filled_count() as f64 / Field::ALL.len() as f64
    }

    /// Cell values in [`COLUMNS`] order.
    #[must_use]
    pub fn row(&self) -> Vec<&str> {
        let mut row = Vec::with_capacity(COLUMNS.len());
        row.push(self.get(Field::Phone));
        row.push(self.get(Field::Owner));
        row.push(self.url());
        row.extend(Field::ALL[2..].iter().map(|f| self.get(*f)));
        row
    }
}

impl Serialize for ListingRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let extra = usize::from(self.error.is_some());
        let mut map = serializer.serialize_map(Some(COLUMNS.len() + extra))?;
        for (column, value) in COLUMNS.iter().zip(self.row()) {
            map.serialize_entry(column, value)?;
        }
        if let Some(error) = &self.error {
            map.serialize_entry("error", error)?;
        }
        map.end()
    }
}
