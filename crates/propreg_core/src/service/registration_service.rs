//! Listing registration service.
//!
//! # Invariants
//! - Registered documents are valid JSON and every owner reference id is set.
//! - New listings are stored active.

use super::is_valid_json;
use crate::error::{PropertyError, PropertyResult};
use crate::model::catalog::is_set_reference;
use crate::model::property::{NewProperty, PropertyId};
use crate::repo::PropertyRepository;
use log::{info, warn};

/// Use-case service for registering new listings.
pub struct PropertyRegService<R: PropertyRepository> {
    repo: R,
}

impl<R: PropertyRepository> PropertyRegService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new listing with its ownership row.
    ///
    /// # Errors
    /// - `InvalidPropertyData` for blank/invalid JSON or an unset owner
    ///   reference id.
    pub fn add_property(&self, property: &NewProperty) -> PropertyResult<PropertyId> {
        if let Err(err) = validate_new_property(property) {
            warn!(
                "event=property_add module=service status=rejected error_code={} error={}",
                err.code(),
                err
            );
            return Err(err);
        }

        let id = self.repo.insert_property(property)?;
        info!(
            "event=property_add module=service status=ok property_id={} document_type={}",
            id,
            property.document.doc_type.as_str()
        );
        Ok(id)
    }
}

fn validate_new_property(property: &NewProperty) -> PropertyResult<()> {
    if !is_valid_json(&property.document.json) {
        return Err(PropertyError::InvalidPropertyData(
            "document must be non-blank valid JSON",
        ));
    }

    let owner = property.owner;
    if !is_set_reference(Some(owner.property_type_id)) {
        return Err(PropertyError::InvalidPropertyData(
            "property type id must be positive",
        ));
    }
    if !is_set_reference(Some(owner.category_id)) {
        return Err(PropertyError::InvalidPropertyData(
            "category id must be positive",
        ));
    }
    if !is_set_reference(Some(owner.user_id)) {
        return Err(PropertyError::InvalidPropertyData("user id must be positive"));
    }
    Ok(())
}
