//! In-memory catalog backed by a fixed snapshot.
//!
//! Used by the CLI (snapshot loaded from a JSON file) and by tests. Unknown
//! languages fall back to the snapshot's default language.

use super::{CatalogClient, CatalogError, CatalogResult};
use crate::model::catalog::{
    CatalogId, City, Country, PropertyCategory, PropertyType, RoomType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog snapshot keyed by language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCatalog {
    default_language: String,
    #[serde(default)]
    property_types: Vec<PropertyType>,
    #[serde(default)]
    categories: Vec<ScopedCategory>,
    #[serde(default)]
    languages: BTreeMap<String, LanguagePack>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScopedCategory {
    property_type_id: CatalogId,
    #[serde(flatten)]
    category: PropertyCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguagePack {
    #[serde(default)]
    countries: Vec<Country>,
    /// Cities keyed by owning country id.
    #[serde(default)]
    cities: BTreeMap<CatalogId, Vec<City>>,
    /// Room types keyed by property category id.
    #[serde(default)]
    room_types: BTreeMap<CatalogId, Vec<RoomType>>,
}

impl SnapshotCatalog {
    /// Creates an empty snapshot whose `None` language maps to `default_language`.
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
            property_types: Vec::new(),
            categories: Vec::new(),
            languages: BTreeMap::new(),
        }
    }

    /// Parses a snapshot from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn with_property_type(mut self, property_type: PropertyType) -> Self {
        self.property_types.push(property_type);
        self
    }

    pub fn with_category(mut self, property_type_id: CatalogId, category: PropertyCategory) -> Self {
        self.categories.push(ScopedCategory {
            property_type_id,
            category,
        });
        self
    }

    pub fn with_country(mut self, lang: &str, country: Country) -> Self {
        self.pack_mut(lang).countries.push(country);
        self
    }

    pub fn with_city(mut self, lang: &str, country_id: CatalogId, city: City) -> Self {
        self.pack_mut(lang)
            .cities
            .entry(country_id)
            .or_default()
            .push(city);
        self
    }

    pub fn with_room_type(mut self, lang: &str, category_id: CatalogId, room_type: RoomType) -> Self {
        self.pack_mut(lang)
            .room_types
            .entry(category_id)
            .or_default()
            .push(room_type);
        self
    }

    fn pack_mut(&mut self, lang: &str) -> &mut LanguagePack {
        self.languages.entry(lang.to_string()).or_default()
    }

    fn pack(&self, lang: Option<&str>) -> Option<&LanguagePack> {
        let requested = lang.unwrap_or(self.default_language.as_str());
        self.languages
            .get(requested)
            .or_else(|| self.languages.get(self.default_language.as_str()))
    }
}

impl CatalogClient for SnapshotCatalog {
    fn property_types(&self) -> CatalogResult<Vec<PropertyType>> {
        Ok(self.property_types.clone())
    }

    fn property_categories(
        &self,
        property_type_id: CatalogId,
    ) -> CatalogResult<Vec<PropertyCategory>> {
        Ok(self
            .categories
            .iter()
            .filter(|scoped| scoped.property_type_id == property_type_id)
            .map(|scoped| scoped.category.clone())
            .collect())
    }

    fn property_category(&self, category_id: CatalogId) -> CatalogResult<PropertyCategory> {
        self.categories
            .iter()
            .find(|scoped| scoped.category.id == category_id)
            .map(|scoped| scoped.category.clone())
            .ok_or(CatalogError::CategoryNotFound(category_id))
    }

    fn property_room_types(
        &self,
        category_id: CatalogId,
        lang: Option<&str>,
    ) -> CatalogResult<Vec<RoomType>> {
        Ok(self
            .pack(lang)
            .and_then(|pack| pack.room_types.get(&category_id))
            .cloned()
            .unwrap_or_default())
    }

    fn all_countries(&self, lang: Option<&str>) -> CatalogResult<Vec<Country>> {
        Ok(self
            .pack(lang)
            .map(|pack| pack.countries.clone())
            .unwrap_or_default())
    }

    fn all_cities(&self, country_id: CatalogId, lang: Option<&str>) -> CatalogResult<Vec<City>> {
        Ok(self
            .pack(lang)
            .and_then(|pack| pack.cities.get(&country_id))
            .cloned()
            .unwrap_or_default())
    }
}
