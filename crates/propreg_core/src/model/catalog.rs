//! Catalog reference entities.
//!
//! # Responsibility
//! - Mirror the external catalog's read model (countries, cities, property
//!   types/categories, room types/names).
//!
//! # Invariants
//! - Entities are read-only to this crate; nothing here is persisted locally.
//! - `display_name` is already translated for the language the listing was
//!   fetched with.

use serde::{Deserialize, Serialize};

/// Integer key of any catalog entity.
pub type CatalogId = i64;

/// Returns whether a reference id points at a catalog entity.
///
/// `None`, `0` and negative ids all mean "no reference".
pub fn is_set_reference(id: Option<CatalogId>) -> bool {
    matches!(id, Some(value) if value > 0)
}

/// Country reference entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: CatalogId,
    pub display_name: String,
}

/// City reference entity, scoped under one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: CatalogId,
    pub display_name: String,
}

/// Room name nested under a [`RoomType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomName {
    pub id: CatalogId,
    pub display_name: String,
}

/// Room type with its nested room names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub id: CatalogId,
    pub display_name: String,
    #[serde(default)]
    pub room_names: Vec<RoomName>,
}

/// Category classification of a property (hotel, hostel, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    Hotel,
    Hostel,
    GuestHouse,
    Motel,
    Apartment,
}

impl CategoryType {
    /// Stable wire value, e.g. `GUEST_HOUSE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hotel => "HOTEL",
            Self::Hostel => "HOSTEL",
            Self::GuestHouse => "GUEST_HOUSE",
            Self::Motel => "MOTEL",
            Self::Apartment => "APARTMENT",
        }
    }

    /// Parses a wire value, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HOTEL" => Some(Self::Hotel),
            "HOSTEL" => Some(Self::Hostel),
            "GUEST_HOUSE" => Some(Self::GuestHouse),
            "MOTEL" => Some(Self::Motel),
            "APARTMENT" => Some(Self::Apartment),
            _ => None,
        }
    }
}

/// Property category entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCategory {
    pub id: CatalogId,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub category_type: CategoryType,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Top-level property kind a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyKind {
    Accommodation,
    Apartment,
    House,
    Alternative,
}

/// Property type entity (parent of categories).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    pub id: CatalogId,
    pub display_name: String,
    pub property_kind: PropertyKind,
}

fn default_active() -> bool {
    true
}
