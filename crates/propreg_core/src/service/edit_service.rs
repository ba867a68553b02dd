//! Owner-side edit service.
//!
//! # Responsibility
//! - Serve the owner's edit view and listing list.
//! - Apply activation toggles and whole-document replacements.
//!
//! # Invariants
//! - Every single-listing operation loads the listing and verifies ownership
//!   before any catalog call or write.
//! - Updates replace the document as a whole; only navigable types are
//!   accepted.

use super::is_valid_json;
use crate::catalog::CatalogClient;
use crate::config::EngineConfig;
use crate::error::{PropertyError, PropertyResult};
use crate::model::catalog::{CatalogId, PropertyType};
use crate::model::property::{PropertyId, PropertyOwner, PropertyUpdate, StoredProperty, UserId};
use crate::model::view::{PropertyEditItem, PropertyEditView};
use crate::navigator::{ensure_navigable, peek_first_image_url, peek_property_name};
use crate::repo::PropertyRepository;
use crate::view::{ensure_owner, ViewComposer};
use log::{info, warn};

/// Use-case service for listing owners.
pub struct PropertyEditService<R: PropertyRepository, C: CatalogClient> {
    repo: R,
    composer: ViewComposer<C>,
    config: EngineConfig,
}

impl<R: PropertyRepository, C: CatalogClient> PropertyEditService<R, C> {
    pub fn new(repo: R, catalog: C, config: EngineConfig) -> Self {
        Self {
            repo,
            composer: ViewComposer::new(catalog),
            config,
        }
    }

    /// Address-enriched view of an owned listing plus its category.
    ///
    /// # Errors
    /// - `DocumentNotFound`, `UnknownOwner`, `NotOwner` before any catalog
    ///   call.
    /// - `UnsupportedCategory` when the owner's category no longer resolves.
    pub fn get_edit_view(
        &self,
        user_id: UserId,
        property_id: PropertyId,
        lang: Option<&str>,
    ) -> PropertyResult<PropertyEditView> {
        let (property, owner) = self.request_property(user_id, property_id)?;
        self.composer.compose_edit_view(
            &property.document,
            owner.category_id,
            self.config.display_language(lang),
        )
    }

    /// Activates or deactivates an owned listing.
    pub fn set_active(
        &self,
        user_id: UserId,
        property_id: PropertyId,
        active: bool,
    ) -> PropertyResult<()> {
        self.request_property(user_id, property_id)?;
        self.repo.set_active(property_id, active)?;
        info!(
            "event=property_set_active module=service status=ok property_id={} active={}",
            property_id, active
        );
        Ok(())
    }

    /// Replaces the document of an owned listing.
    ///
    /// # Errors
    /// - `InvalidPropertyUpdate` when the new JSON is blank or invalid.
    /// - `UnsupportedDocumentType` unless the new type is navigable.
    pub fn update_property(
        &self,
        user_id: UserId,
        property_id: PropertyId,
        update: &PropertyUpdate,
    ) -> PropertyResult<()> {
        self.request_property(user_id, property_id)?;

        ensure_navigable(update.document.doc_type)?;
        if !is_valid_json(&update.document.json) {
            return Err(PropertyError::InvalidPropertyUpdate(
                "document must be non-blank valid JSON",
            ));
        }

        self.repo.replace_document(property_id, &update.document)?;
        info!(
            "event=property_update module=service status=ok property_id={}",
            property_id
        );
        Ok(())
    }

    /// Short entries of every listing owned by `user_id`, newest first.
    ///
    /// Name and image are read leniently; a broken document yields `None`
    /// for both instead of failing the list.
    ///
    /// # Errors
    /// - `UnsupportedPropertyType` when a listing's property type is absent
    ///   from the catalog.
    /// - `UnsupportedCategory` when a listing's category no longer resolves.
    pub fn list_owned(&self, user_id: UserId) -> PropertyResult<Vec<PropertyEditItem>> {
        let owned = self.repo.find_all_owned_by(user_id)?;
        if owned.is_empty() {
            return Ok(Vec::new());
        }

        let catalog = self.composer.catalog();
        let property_types = catalog.property_types()?;

        let mut items = Vec::with_capacity(owned.len());
        for property in &owned {
            let owner = property
                .owner
                .ok_or(PropertyError::UnknownOwner(property.id))?;
            let property_type = find_property_type(&property_types, owner.property_type_id)?;
            let category = catalog.property_category(owner.category_id)?;

            items.push(PropertyEditItem {
                property_id: property.id,
                property_name: peek_property_name(&property.document.json),
                property_kind: property_type.property_kind,
                category_type: category.category_type,
                image_url: peek_first_image_url(&property.document.json),
                is_active: property.is_active,
            });
        }

        info!(
            "event=list_owned module=service status=ok user_id={} count={}",
            user_id,
            items.len()
        );
        Ok(items)
    }

    fn request_property(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> PropertyResult<(StoredProperty, PropertyOwner)> {
        let property = self
            .repo
            .find_by_id(property_id)?
            .ok_or(PropertyError::DocumentNotFound(property_id))?;

        match ensure_owner(&property, user_id) {
            Ok(owner) => Ok((property, owner)),
            Err(err) => {
                warn!(
                    "event=ownership_check module=service status=rejected property_id={} user_id={} error_code={}",
                    property_id,
                    user_id,
                    err.code()
                );
                Err(err)
            }
        }
    }
}

fn find_property_type(
    property_types: &[PropertyType],
    property_type_id: CatalogId,
) -> PropertyResult<&PropertyType> {
    property_types
        .iter()
        .find(|property_type| property_type.id == property_type_id)
        .ok_or(PropertyError::UnsupportedPropertyType(property_type_id))
}
