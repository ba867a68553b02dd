//! Query filter execution.

use super::LocationFilter;
use crate::catalog::CatalogClient;
use crate::error::{PropertyError, PropertyResult};
use crate::lookup::LookupResolver;
use crate::model::catalog::{CatalogId, CategoryType};
use crate::model::property::{DocumentType, StoredProperty};
use crate::model::view::PropertyView;
use crate::navigator::HotelDocument;
use crate::view::{BatchRunner, ViewComposer};
use log::{debug, info};
use std::time::Instant;

/// Filters stored listings by location and category type.
pub struct QueryFilter<'a, C: CatalogClient> {
    composer: &'a ViewComposer<C>,
    runner: &'a BatchRunner,
}

/// Catalog ids a location expression resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub country_id: CatalogId,
    /// `None` when the expression carried no city segment.
    pub city_id: Option<CatalogId>,
}

impl<'a, C: CatalogClient> QueryFilter<'a, C> {
    pub fn new(composer: &'a ViewComposer<C>, runner: &'a BatchRunner) -> Self {
        Self { composer, runner }
    }

    /// Returns the views of `documents` located at `location_expr` whose
    /// category type equals `category_type` (any type when `None`).
    ///
    /// `documents` are expected newest first; the order is kept.
    ///
    /// # Catalog calls
    /// - One country listing (default language) unless the country is blank.
    /// - One city listing (default language) when a non-blank city is given.
    /// - One `property_category` per location-matched listing.
    /// - The lookups of `compose_view` per returned listing.
    ///
    /// # Errors
    /// - `UnknownOwner` for a location-matched listing without owner.
    /// - `UnsupportedCategory` when its category no longer resolves.
    /// - `MalformedDocument` / `UnsupportedDocumentShape` for any hotel
    ///   listing whose address cannot be read.
    /// - Catalog failures, unchanged.
    pub fn filter(
        &self,
        documents: &[StoredProperty],
        location_expr: &str,
        category_type: Option<CategoryType>,
        lang: Option<&str>,
    ) -> PropertyResult<Vec<PropertyView>> {
        match self.resolve_location(location_expr)? {
            Some(location) => self.select(documents, location, category_type, lang),
            None => Ok(Vec::new()),
        }
    }

    /// Resolves `location_expr` to catalog ids in the catalog default
    /// language; `None` when the country or a given city does not resolve.
    pub fn resolve_location(&self, location_expr: &str) -> PropertyResult<Option<ResolvedLocation>> {
        let location = LocationFilter::parse(location_expr);
        let resolver = LookupResolver::new(self.composer.catalog());

        let Some(country_id) = resolver.country_id_by_name(&location.country, None)? else {
            info!(
                "event=query_views module=query status=ok reason=country_unresolved results=0"
            );
            return Ok(None);
        };

        let city_id = match location.city.as_deref() {
            None => None,
            Some(city) => match resolver.city_id_by_name(country_id, city, None)? {
                Some(city_id) => Some(city_id),
                None => {
                    info!(
                        "event=query_views module=query status=ok reason=city_unresolved country_id={} results=0",
                        country_id
                    );
                    return Ok(None);
                }
            },
        };

        Ok(Some(ResolvedLocation {
            country_id,
            city_id,
        }))
    }

    /// Views of `documents` at an already resolved location.
    pub fn select(
        &self,
        documents: &[StoredProperty],
        location: ResolvedLocation,
        category_type: Option<CategoryType>,
        lang: Option<&str>,
    ) -> PropertyResult<Vec<PropertyView>> {
        let started_at = Instant::now();

        let mut candidates = Vec::new();
        for property in documents {
            if located_at(property, location)? {
                candidates.push(property);
            }
        }

        let matched = self.runner.try_map(&candidates, |property| {
            self.view_if_category_matches(property, category_type, lang)
        })?;
        let views: Vec<PropertyView> = matched.into_iter().flatten().collect();

        info!(
            "event=query_views module=query status=ok scanned={} candidates={} results={} duration_ms={}",
            documents.len(),
            candidates.len(),
            views.len(),
            started_at.elapsed().as_millis()
        );
        Ok(views)
    }

    fn view_if_category_matches(
        &self,
        property: &StoredProperty,
        category_type: Option<CategoryType>,
        lang: Option<&str>,
    ) -> PropertyResult<Option<PropertyView>> {
        let owner = property
            .owner
            .ok_or(PropertyError::UnknownOwner(property.id))?;
        let category = self.composer.catalog().property_category(owner.category_id)?;

        if category_type.is_some_and(|wanted| wanted != category.category_type) {
            return Ok(None);
        }

        self.composer
            .compose_view(property.id, &property.document, owner.category_id, lang)
            .map(Some)
    }
}

/// In-memory location match on the document's embedded ids.
///
/// Listings whose type has no navigable schema cannot carry a location and
/// never match.
fn located_at(property: &StoredProperty, location: ResolvedLocation) -> PropertyResult<bool> {
    if property.document.doc_type != DocumentType::HotelJson {
        debug!(
            "event=query_views module=query status=skip property_id={} document_type={}",
            property.id,
            property.document.doc_type.as_str()
        );
        return Ok(false);
    }

    let address = HotelDocument::parse(&property.document)?.address_ids()?;
    if address.country_id != Some(location.country_id) {
        return Ok(false);
    }
    Ok(match location.city_id {
        Some(city_id) => address.city_id == Some(city_id),
        None => true,
    })
}
