//! Catalog client contract and implementations.
//!
//! # Responsibility
//! - Define the read-only accessor the engine uses for reference data.
//! - Provide a caching decorator and an in-memory snapshot client.
//!
//! # Invariants
//! - `lang == None` means "use the catalog's default language".
//! - Calls are synchronous and side-effect free from the engine's view;
//!   timeouts surface as `CatalogError::Transient` and are never retried here.

use crate::model::catalog::{
    CatalogId, City, Country, PropertyCategory, PropertyType, RoomType,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod cached;
mod snapshot;

pub use cached::CachedCatalogClient;
pub use snapshot::SnapshotCatalog;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure reported by a catalog client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog answered that the property category does not exist.
    ///
    /// Only `property_category` reports this; listing calls return empty
    /// vectors instead.
    CategoryNotFound(CatalogId),
    /// The catalog could not be reached or timed out.
    Transient(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CategoryNotFound(id) => write!(f, "catalog property category not found: {id}"),
            Self::Transient(message) => write!(f, "catalog unavailable: {message}"),
        }
    }
}

impl Error for CatalogError {}

/// Read-only accessor for catalog reference data.
pub trait CatalogClient: Send + Sync {
    fn property_types(&self) -> CatalogResult<Vec<PropertyType>>;
    fn property_categories(
        &self,
        property_type_id: CatalogId,
    ) -> CatalogResult<Vec<PropertyCategory>>;
    /// Fails with `CategoryNotFound` when the category is absent.
    fn property_category(&self, category_id: CatalogId) -> CatalogResult<PropertyCategory>;
    fn property_room_types(
        &self,
        category_id: CatalogId,
        lang: Option<&str>,
    ) -> CatalogResult<Vec<RoomType>>;
    fn all_countries(&self, lang: Option<&str>) -> CatalogResult<Vec<Country>>;
    fn all_cities(&self, country_id: CatalogId, lang: Option<&str>) -> CatalogResult<Vec<City>>;
}

impl<C: CatalogClient + ?Sized> CatalogClient for &C {
    fn property_types(&self) -> CatalogResult<Vec<PropertyType>> {
        (**self).property_types()
    }

    fn property_categories(
        &self,
        property_type_id: CatalogId,
    ) -> CatalogResult<Vec<PropertyCategory>> {
        (**self).property_categories(property_type_id)
    }

    fn property_category(&self, category_id: CatalogId) -> CatalogResult<PropertyCategory> {
        (**self).property_category(category_id)
    }

    fn property_room_types(
        &self,
        category_id: CatalogId,
        lang: Option<&str>,
    ) -> CatalogResult<Vec<RoomType>> {
        (**self).property_room_types(category_id, lang)
    }

    fn all_countries(&self, lang: Option<&str>) -> CatalogResult<Vec<Country>> {
        (**self).all_countries(lang)
    }

    fn all_cities(&self, country_id: CatalogId, lang: Option<&str>) -> CatalogResult<Vec<City>> {
        (**self).all_cities(country_id, lang)
    }
}

impl<C: CatalogClient + ?Sized> CatalogClient for Arc<C> {
    fn property_types(&self) -> CatalogResult<Vec<PropertyType>> {
        (**self).property_types()
    }

    fn property_categories(
        &self,
        property_type_id: CatalogId,
    ) -> CatalogResult<Vec<PropertyCategory>> {
        (**self).property_categories(property_type_id)
    }

    fn property_category(&self, category_id: CatalogId) -> CatalogResult<PropertyCategory> {
        (**self).property_category(category_id)
    }

    fn property_room_types(
        &self,
        category_id: CatalogId,
        lang: Option<&str>,
    ) -> CatalogResult<Vec<RoomType>> {
        (**self).property_room_types(category_id, lang)
    }

    fn all_countries(&self, lang: Option<&str>) -> CatalogResult<Vec<Country>> {
        (**self).all_countries(lang)
    }

    fn all_cities(&self, country_id: CatalogId, lang: Option<&str>) -> CatalogResult<Vec<City>> {
        (**self).all_cities(country_id, lang)
    }
}
