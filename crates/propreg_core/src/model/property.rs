//! Stored property record and ownership model.
//!
//! # Responsibility
//! - Define the persisted shape of a property listing (opaque JSON text plus
//!   its document type discriminant).
//! - Define the ownership row linking a listing to a user and catalog refs.
//!
//! # Invariants
//! - `PropertyDocument::json` is stored verbatim; this crate never rewrites it
//!   except through whole-document replacement.
//! - A listing without an ownership row has `owner == None`.

use crate::model::catalog::CatalogId;
use serde::{Deserialize, Serialize};

/// Storage id of a property listing.
pub type PropertyId = i64;

/// Id of a registered user (owner or requester).
pub type UserId = i64;

/// Discriminant of the stored document's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Hotel-like shape; the only one the navigator understands.
    HotelJson,
    HostelJson,
    GuestHouseJson,
    MotelJson,
}

impl DocumentType {
    /// Stable storage/wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HotelJson => "HOTEL_JSON",
            Self::HostelJson => "HOSTEL_JSON",
            Self::GuestHouseJson => "GUEST_HOUSE_JSON",
            Self::MotelJson => "MOTEL_JSON",
        }
    }

    /// Parses a storage/wire value. Exact match only.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "HOTEL_JSON" => Some(Self::HotelJson),
            "HOSTEL_JSON" => Some(Self::HostelJson),
            "GUEST_HOUSE_JSON" => Some(Self::GuestHouseJson),
            "MOTEL_JSON" => Some(Self::MotelJson),
            _ => None,
        }
    }
}

/// Opaque property document as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDocument {
    /// Raw JSON text.
    pub json: String,
    pub doc_type: DocumentType,
}

impl PropertyDocument {
    pub fn new(json: impl Into<String>, doc_type: DocumentType) -> Self {
        Self {
            json: json.into(),
            doc_type,
        }
    }
}

/// Ownership row of one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyOwner {
    /// Catalog property type id (`getPropertyTypes` key).
    pub property_type_id: CatalogId,
    /// Catalog property category id (`getPropertyCategory` key).
    pub category_id: CatalogId,
    /// Registered owner.
    pub user_id: UserId,
}

/// Full stored listing as read from the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProperty {
    pub id: PropertyId,
    pub document: PropertyDocument,
    pub is_active: bool,
    pub owner: Option<PropertyOwner>,
}

/// Registration input for a new listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProperty {
    pub document: PropertyDocument,
    pub owner: PropertyOwner,
}

/// Whole-document replacement requested by an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyUpdate {
    pub document: PropertyDocument,
}

#[cfg(test)]
mod tests {
    use super::DocumentType;

    #[test]
    fn document_type_round_trips_through_storage_value() {
        for doc_type in [
            DocumentType::HotelJson,
            DocumentType::HostelJson,
            DocumentType::GuestHouseJson,
            DocumentType::MotelJson,
        ] {
            assert_eq!(DocumentType::parse(doc_type.as_str()), Some(doc_type));
        }
        assert_eq!(DocumentType::parse("hotel_json"), None);
    }

    #[test]
    fn document_type_serializes_as_screaming_snake_case() {
        let value = serde_json::to_value(DocumentType::GuestHouseJson).unwrap();
        assert_eq!(value, "GUEST_HOUSE_JSON");
    }
}
