//! Public and edit view composition.

use crate::catalog::CatalogClient;
use crate::error::{PropertyError, PropertyResult};
use crate::lookup::LookupResolver;
use crate::model::catalog::CatalogId;
use crate::model::property::{PropertyDocument, PropertyId, PropertyOwner, StoredProperty, UserId};
use crate::model::view::{PropertyEditView, PropertyView};
use crate::navigator::HotelDocument;
use log::debug;

/// Composes views of stored documents against one catalog client.
///
/// Holds no state besides the client, so one composer may serve any number
/// of concurrent requests.
pub struct ViewComposer<C: CatalogClient> {
    catalog: C,
}

impl<C: CatalogClient> ViewComposer<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Fully enriched public view.
    ///
    /// Address and layout sub-trees are both required. Unresolved references
    /// are left without a name; only failures reject the view.
    ///
    /// # Errors
    /// - `UnsupportedDocumentType` before any parsing for non-hotel types.
    /// - `MalformedDocument`, `UnsupportedDocumentShape` from navigation.
    /// - `TransientCatalogFailure` when a lookup could not be answered.
    pub fn compose_view(
        &self,
        property_id: PropertyId,
        document: &PropertyDocument,
        category_id: CatalogId,
        lang: Option<&str>,
    ) -> PropertyResult<PropertyView> {
        let mut hotel = HotelDocument::parse(document)?;
        let address = hotel.address_ids()?;
        let layout = hotel.layout_ids()?;

        let resolver = LookupResolver::new(&self.catalog);
        let country_name = resolver.country_name(address.country_id, lang)?;
        let city_name = resolver.city_name(address.country_id, address.city_id, lang)?;
        let (room_type_name, room_name_name) = resolver.room_names(
            category_id,
            layout.room_type_id,
            layout.room_name_id,
            lang,
        )?;

        debug!(
            "event=compose_view module=view status=ok property_id={} country_resolved={} city_resolved={} room_type_resolved={} room_name_resolved={}",
            property_id,
            country_name.is_some(),
            city_name.is_some(),
            room_type_name.is_some(),
            room_name_name.is_some()
        );

        hotel.set_address_names(country_name, city_name)?;
        hotel.set_layout_names(room_type_name, room_name_name)?;

        Ok(PropertyView {
            id: property_id,
            document: hotel.into_value()?,
            document_type: document.doc_type,
            category_id,
        })
    }

    /// Owner-facing view: address names only, plus the resolved category.
    ///
    /// The layout sub-tree is neither required nor enriched.
    ///
    /// # Errors
    /// - `UnsupportedCategory` when `category_id` no longer resolves.
    /// - Everything `compose_view` reports for the address part.
    pub fn compose_edit_view(
        &self,
        document: &PropertyDocument,
        category_id: CatalogId,
        lang: Option<&str>,
    ) -> PropertyResult<PropertyEditView> {
        let mut hotel = HotelDocument::parse(document)?;
        let address = hotel.address_ids()?;

        let resolver = LookupResolver::new(&self.catalog);
        let country_name = resolver.country_name(address.country_id, lang)?;
        let city_name = resolver.city_name(address.country_id, address.city_id, lang)?;
        hotel.set_address_names(country_name, city_name)?;

        let category = self.catalog.property_category(category_id)?;

        Ok(PropertyEditView {
            document: hotel.into_value()?,
            document_type: document.doc_type,
            category_id: category.id,
            category_type: category.category_type,
        })
    }
}

/// Verifies that `requester_id` owns `property`.
///
/// Performs no I/O; callers run it before any catalog interaction.
pub fn ensure_owner(
    property: &StoredProperty,
    requester_id: UserId,
) -> PropertyResult<PropertyOwner> {
    let owner = property
        .owner
        .ok_or(PropertyError::UnknownOwner(property.id))?;
    if owner.user_id != requester_id {
        return Err(PropertyError::NotOwner {
            property_id: property.id,
            requester_id,
        });
    }
    Ok(owner)
}
