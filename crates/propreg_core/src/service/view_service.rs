//! Public read-side service.
//!
//! # Responsibility
//! - Serve enriched views of single listings, of all listings and of
//!   location/category queries.
//!
//! # Invariants
//! - Listing batches are read newest first and returned in that order.
//! - A missing display language falls back to `EngineConfig::default_language`.

use crate::catalog::CatalogClient;
use crate::config::EngineConfig;
use crate::error::{PropertyError, PropertyResult};
use crate::model::catalog::CategoryType;
use crate::model::property::{PropertyId, StoredProperty};
use crate::model::view::PropertyView;
use crate::query::QueryFilter;
use crate::repo::PropertyRepository;
use crate::view::{BatchRunner, ViewComposer};
use log::info;
use std::time::Instant;

/// Use-case service for anonymous listing display.
pub struct PropertyViewService<R: PropertyRepository, C: CatalogClient> {
    repo: R,
    composer: ViewComposer<C>,
    runner: BatchRunner,
    config: EngineConfig,
}

impl<R: PropertyRepository, C: CatalogClient> PropertyViewService<R, C> {
    pub fn new(repo: R, catalog: C, config: EngineConfig) -> Self {
        Self {
            repo,
            composer: ViewComposer::new(catalog),
            runner: BatchRunner::new(config.worker_threads),
            config,
        }
    }

    /// View of one listing.
    ///
    /// # Errors
    /// - `DocumentNotFound` when no listing has `property_id`.
    /// - `UnknownOwner` when the listing has no ownership row.
    pub fn get_view(
        &self,
        property_id: PropertyId,
        lang: Option<&str>,
    ) -> PropertyResult<PropertyView> {
        let property = self
            .repo
            .find_by_id(property_id)?
            .ok_or(PropertyError::DocumentNotFound(property_id))?;
        compose_stored(&self.composer, &property, self.config.display_language(lang))
    }

    /// Views of every stored listing, newest first.
    pub fn list_views(&self, lang: Option<&str>) -> PropertyResult<Vec<PropertyView>> {
        let started_at = Instant::now();
        let lang = self.config.display_language(lang);
        let properties = self.repo.find_all_newest_first()?;

        let composer = &self.composer;
        let views = self
            .runner
            .try_map(&properties, |property| compose_stored(composer, property, lang))?;

        info!(
            "event=list_views module=service status=ok count={} workers={} duration_ms={}",
            views.len(),
            self.runner.worker_threads(),
            started_at.elapsed().as_millis()
        );
        Ok(views)
    }

    /// Views of listings at `location` (`country[,city]`) of `category_type`.
    ///
    /// A missing or unresolved `location` yields an empty list without
    /// reading storage.
    pub fn query_views(
        &self,
        lang: Option<&str>,
        location: Option<&str>,
        category_type: Option<CategoryType>,
    ) -> PropertyResult<Vec<PropertyView>> {
        let Some(location) = location else {
            return Ok(Vec::new());
        };
        let filter = QueryFilter::new(&self.composer, &self.runner);
        let Some(resolved) = filter.resolve_location(location)? else {
            return Ok(Vec::new());
        };
        let properties = self.repo.find_all_newest_first()?;
        filter.select(
            &properties,
            resolved,
            category_type,
            self.config.display_language(lang),
        )
    }
}

fn compose_stored<C: CatalogClient>(
    composer: &ViewComposer<C>,
    property: &StoredProperty,
    lang: Option<&str>,
) -> PropertyResult<PropertyView> {
    let owner = property
        .owner
        .ok_or(PropertyError::UnknownOwner(property.id))?;
    composer.compose_view(property.id, &property.document, owner.category_id, lang)
}
