//! Equipment model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Availability state of an equipment item.
///
/// `InStorage` and `InUse` are driven by the movement log; `Faulty` and
/// `Scrapped` are administrative overrides set through a direct update.
/// Stored in the DB as the snake_case text code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum EquipmentStatus {
    InStorage,
    InUse,
    Faulty,
    Scrapped,
}

impl EquipmentStatus {
    /// Return the stored string code for this status
    pub fn as_code(&self) -> &'static str {
        match self {
            EquipmentStatus::InStorage => "in_storage",
            EquipmentStatus::InUse => "in_use",
            EquipmentStatus::Faulty => "faulty",
            EquipmentStatus::Scrapped => "scrapped",
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Category name; matched by equality against the category registry
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    /// Manufacturer serial number, unique when present
    pub serial_number: Option<String>,
    /// Inventory barcode, unique when present
    pub barcode: Option<String>,
    pub status: EquipmentStatus,
    pub notes: Option<String>,
    pub acquisition_date: Option<DateTime<Utc>>,
    pub acquisition_price: Option<Decimal>,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create equipment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEquipment {
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub barcode: Option<String>,
    /// Defaults to `in_storage` when omitted
    pub status: Option<EquipmentStatus>,
    pub notes: Option<String>,
    /// ISO-8601 date-time, trailing `Z` accepted
    pub acquisition_date: Option<String>,
    pub acquisition_price: Option<Decimal>,
    pub supplier: Option<String>,
}

/// Update equipment request.
///
/// Nullable fields are double-wrapped so that an absent key (leave as-is)
/// and an explicit `null` (clear the value) deserialize differently.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEquipment {
    pub category: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub brand: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub model: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub serial_number: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub barcode: Option<Option<String>>,
    pub status: Option<EquipmentStatus>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
    /// ISO-8601 date-time, trailing `Z` accepted
    #[serde(default, with = "serde_with::rust::double_option")]
    pub acquisition_date: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub acquisition_price: Option<Option<Decimal>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub supplier: Option<Option<String>>,
}

/// Equipment listing filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Exact category name
    pub category: Option<String>,
    /// Exact status code
    pub status: Option<EquipmentStatus>,
    /// Case-insensitive substring over brand, model, serial number and barcode
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_distinguishes_absent_from_null() {
        let update: UpdateEquipment = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(update.notes, Some(None));
        assert_eq!(update.brand, None);

        let update: UpdateEquipment = serde_json::from_str(r#"{"brand": "Dell"}"#).unwrap();
        assert_eq!(update.brand, Some(Some("Dell".to_string())));
        assert_eq!(update.notes, None);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(EquipmentStatus::InStorage.as_code(), "in_storage");
        let status: EquipmentStatus = serde_json::from_str(r#""in_use""#).unwrap();
        assert_eq!(status, EquipmentStatus::InUse);
        assert!(serde_json::from_str::<EquipmentStatus>(r#""lost""#).is_err());
    }
}
