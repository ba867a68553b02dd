//! Read-through caching decorator over any [`CatalogClient`].
//!
//! # Invariants
//! - Each operation is memoized by its full argument tuple; `lang == None` is
//!   its own key and never aliases a concrete language.
//! - Failed calls are not cached.

use super::{CatalogClient, CatalogResult};
use crate::model::catalog::{
    CatalogId, City, Country, PropertyCategory, PropertyType, RoomType,
};
use log::debug;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

type LangKey = Option<String>;

/// Caching wrapper injected by callers that want memoized catalog reads.
pub struct CachedCatalogClient<C: CatalogClient> {
    inner: C,
    property_types: RwLock<HashMap<(), Vec<PropertyType>>>,
    property_categories: RwLock<HashMap<CatalogId, Vec<PropertyCategory>>>,
    property_category: RwLock<HashMap<CatalogId, PropertyCategory>>,
    room_types: RwLock<HashMap<(CatalogId, LangKey), Vec<RoomType>>>,
    countries: RwLock<HashMap<LangKey, Vec<Country>>>,
    cities: RwLock<HashMap<(CatalogId, LangKey), Vec<City>>>,
}

impl<C: CatalogClient> CachedCatalogClient<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            property_types: RwLock::new(HashMap::new()),
            property_categories: RwLock::new(HashMap::new()),
            property_category: RwLock::new(HashMap::new()),
            room_types: RwLock::new(HashMap::new()),
            countries: RwLock::new(HashMap::new()),
            cities: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the wrapped client.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Drops every memoized entry.
    pub fn invalidate(&self) {
        clear(&self.property_types);
        clear(&self.property_categories);
        clear(&self.property_category);
        clear(&self.room_types);
        clear(&self.countries);
        clear(&self.cities);
        debug!("event=catalog_cache module=catalog status=invalidated");
    }
}

impl<C: CatalogClient> CatalogClient for CachedCatalogClient<C> {
    fn property_types(&self) -> CatalogResult<Vec<PropertyType>> {
        read_through(&self.property_types, "property_types", (), || {
            self.inner.property_types()
        })
    }

    fn property_categories(
        &self,
        property_type_id: CatalogId,
    ) -> CatalogResult<Vec<PropertyCategory>> {
        read_through(
            &self.property_categories,
            "property_categories",
            property_type_id,
            || self.inner.property_categories(property_type_id),
        )
    }

    fn property_category(&self, category_id: CatalogId) -> CatalogResult<PropertyCategory> {
        read_through(
            &self.property_category,
            "property_category",
            category_id,
            || self.inner.property_category(category_id),
        )
    }

    fn property_room_types(
        &self,
        category_id: CatalogId,
        lang: Option<&str>,
    ) -> CatalogResult<Vec<RoomType>> {
        read_through(
            &self.room_types,
            "room_types",
            (category_id, lang.map(str::to_owned)),
            || self.inner.property_room_types(category_id, lang),
        )
    }

    fn all_countries(&self, lang: Option<&str>) -> CatalogResult<Vec<Country>> {
        read_through(&self.countries, "countries", lang.map(str::to_owned), || {
            self.inner.all_countries(lang)
        })
    }

    fn all_cities(&self, country_id: CatalogId, lang: Option<&str>) -> CatalogResult<Vec<City>> {
        read_through(
            &self.cities,
            "cities",
            (country_id, lang.map(str::to_owned)),
            || self.inner.all_cities(country_id, lang),
        )
    }
}

fn read_through<K, V, F>(
    table: &RwLock<HashMap<K, V>>,
    table_name: &'static str,
    key: K,
    fetch: F,
) -> CatalogResult<V>
where
    K: Eq + Hash,
    V: Clone,
    F: FnOnce() -> CatalogResult<V>,
{
    {
        let guard = table.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = guard.get(&key) {
            return Ok(hit.clone());
        }
    }

    debug!("event=catalog_cache module=catalog status=miss table={table_name}");
    let value = fetch()?;
    table
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key, value.clone());
    Ok(value)
}

fn clear<K, V>(table: &RwLock<HashMap<K, V>>) {
    table
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}
