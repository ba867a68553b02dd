//! Linear-scan resolver over catalog listings.

use crate::catalog::{CatalogClient, CatalogResult};
use crate::model::catalog::{
    is_set_reference, CatalogId, City, Country, PropertyCategory, RoomName, RoomType,
};
use log::trace;

/// Catalog entity that can be matched by id or display name.
pub trait Named {
    fn catalog_id(&self) -> CatalogId;
    fn display_name(&self) -> &str;
}

macro_rules! impl_named {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl Named for $entity {
                fn catalog_id(&self) -> CatalogId {
                    self.id
                }

                fn display_name(&self) -> &str {
                    &self.display_name
                }
            }
        )+
    };
}

impl_named!(Country, City, RoomType, RoomName, PropertyCategory);

/// Resolves an id to the display name of the first entity with that id.
///
/// Returns `None` for unset ids (`None` or `<= 0`) and for ids absent from
/// `listing`.
pub fn resolve_name<T: Named>(id: Option<CatalogId>, listing: &[T]) -> Option<String> {
    let id = id.filter(|value| *value > 0)?;
    listing
        .iter()
        .find(|entity| entity.catalog_id() == id)
        .map(|entity| entity.display_name().to_string())
}

/// Resolves a free-text name to the id of the first entity whose display
/// name matches ignoring case.
///
/// Surrounding whitespace is stripped from `name` only; catalog names are
/// compared as stored. Returns `None` for blank names.
pub fn find_id_by_name<T: Named>(name: &str, listing: &[T]) -> Option<CatalogId> {
    let needle = normalize_name(name)?;
    listing
        .iter()
        .find(|entity| entity.display_name().to_lowercase() == needle)
        .map(Named::catalog_id)
}

fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Catalog-backed lookups used by the composer and the query filter.
pub struct LookupResolver<'a, C: CatalogClient> {
    catalog: &'a C,
}

impl<'a, C: CatalogClient> LookupResolver<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Country display name; no catalog call for an unset id.
    pub fn country_name(
        &self,
        country_id: Option<CatalogId>,
        lang: Option<&str>,
    ) -> CatalogResult<Option<String>> {
        if !is_set_reference(country_id) {
            return Ok(None);
        }
        let countries = self.catalog.all_countries(lang)?;
        Ok(resolve_name(country_id, &countries))
    }

    /// City display name; needs both a set country id and a set city id.
    pub fn city_name(
        &self,
        country_id: Option<CatalogId>,
        city_id: Option<CatalogId>,
        lang: Option<&str>,
    ) -> CatalogResult<Option<String>> {
        let (Some(country_id), true) = (
            country_id.filter(|value| *value > 0),
            is_set_reference(city_id),
        ) else {
            return Ok(None);
        };
        let cities = self.catalog.all_cities(country_id, lang)?;
        Ok(resolve_name(city_id, &cities))
    }

    /// Room type and room name display names for one category.
    ///
    /// The room name is searched only inside the matched room type, so it
    /// never resolves when the room type does not.
    pub fn room_names(
        &self,
        category_id: CatalogId,
        room_type_id: Option<CatalogId>,
        room_name_id: Option<CatalogId>,
        lang: Option<&str>,
    ) -> CatalogResult<(Option<String>, Option<String>)> {
        if !is_set_reference(room_type_id) {
            return Ok((None, None));
        }
        let room_types = self.catalog.property_room_types(category_id, lang)?;
        let Some(room_type) = room_types
            .iter()
            .find(|room_type| Some(room_type.id) == room_type_id)
        else {
            trace!(
                "event=lookup module=lookup status=miss entity=room_type category_id={category_id}"
            );
            return Ok((None, None));
        };
        let room_name = resolve_name(room_name_id, &room_type.room_names);
        Ok((Some(room_type.display_name.clone()), room_name))
    }

    /// Country id for a free-text name; no catalog call for a blank name.
    pub fn country_id_by_name(
        &self,
        name: &str,
        lang: Option<&str>,
    ) -> CatalogResult<Option<CatalogId>> {
        if name.trim().is_empty() {
            return Ok(None);
        }
        let countries = self.catalog.all_countries(lang)?;
        Ok(find_id_by_name(name, &countries))
    }

    /// City id for a free-text name scoped to one country.
    pub fn city_id_by_name(
        &self,
        country_id: CatalogId,
        name: &str,
        lang: Option<&str>,
    ) -> CatalogResult<Option<CatalogId>> {
        if country_id <= 0 || name.trim().is_empty() {
            return Ok(None);
        }
        let cities = self.catalog.all_cities(country_id, lang)?;
        Ok(find_id_by_name(name, &cities))
    }
}

#[cfg(test)]
mod tests {
    use super::{find_id_by_name, resolve_name, LookupResolver};
    use crate::catalog::{CatalogClient, SnapshotCatalog};
    use crate::model::catalog::{City, Country, RoomName, RoomType};

    fn country(id: i64, name: &str) -> Country {
        Country {
            id,
            display_name: name.to_string(),
        }
    }

    #[test]
    fn resolve_name_ignores_unset_ids() {
        let listing = vec![country(0, "Nowhere"), country(1, "Poland")];
        assert_eq!(resolve_name(None, &listing), None);
        assert_eq!(resolve_name(Some(0), &listing), None);
        assert_eq!(resolve_name(Some(-1), &listing), None);
        assert_eq!(resolve_name(Some(1), &listing).as_deref(), Some("Poland"));
        assert_eq!(resolve_name(Some(2), &listing), None);
    }

    #[test]
    fn resolve_name_takes_first_match() {
        let listing = vec![country(1, "Poland"), country(1, "Polska")];
        assert_eq!(resolve_name(Some(1), &listing).as_deref(), Some("Poland"));
    }

    #[test]
    fn find_id_by_name_is_case_and_whitespace_insensitive() {
        let listing = vec![country(1, "Ukraine"), country(2, "Poland")];
        assert_eq!(find_id_by_name("  Ukraine  ", &listing), Some(1));
        assert_eq!(find_id_by_name("ukraine", &listing), Some(1));
        assert_eq!(find_id_by_name("UKRAINE", &listing), Some(1));
        assert_eq!(find_id_by_name("Польша", &listing), None);
        assert_eq!(find_id_by_name("   ", &listing), None);
        assert_eq!(find_id_by_name("", &listing), None);
    }

    #[test]
    fn find_id_by_name_compares_catalog_names_as_stored() {
        let listing = vec![country(1, " Ukraine "), country(2, "Poland")];
        assert_eq!(find_id_by_name("Ukraine", &listing), None);
        assert_eq!(find_id_by_name(" poland", &listing), Some(2));
    }

    #[test]
    fn room_name_resolves_only_inside_matched_room_type() {
        let catalog = SnapshotCatalog::new("en")
            .with_room_type(
                "en",
                50,
                RoomType {
                    id: 9,
                    display_name: "family".to_string(),
                    room_names: vec![RoomName {
                        id: 388,
                        display_name: "family view on sea".to_string(),
                    }],
                },
            )
            .with_room_type(
                "en",
                50,
                RoomType {
                    id: 10,
                    display_name: "single".to_string(),
                    room_names: Vec::new(),
                },
            );
        let resolver = LookupResolver::new(&catalog);

        assert_eq!(
            resolver.room_names(50, Some(9), Some(388), Some("en")).unwrap(),
            (
                Some("family".to_string()),
                Some("family view on sea".to_string())
            )
        );
        assert_eq!(
            resolver.room_names(50, Some(10), Some(388), Some("en")).unwrap(),
            (Some("single".to_string()), None)
        );
        assert_eq!(
            resolver.room_names(50, Some(11), Some(388), Some("en")).unwrap(),
            (None, None)
        );
        assert_eq!(
            resolver.room_names(50, Some(0), Some(388), Some("en")).unwrap(),
            (None, None)
        );
    }

    #[test]
    fn city_lookup_requires_set_country() {
        let catalog = SnapshotCatalog::new("en").with_city(
            "en",
            1,
            City {
                id: 10,
                display_name: "Warsaw".to_string(),
            },
        );
        let resolver = LookupResolver::new(&catalog);

        assert_eq!(
            resolver.city_name(Some(1), Some(10), None).unwrap().as_deref(),
            Some("Warsaw")
        );
        assert_eq!(resolver.city_name(Some(0), Some(10), None).unwrap(), None);
        assert_eq!(resolver.city_name(Some(1), None, None).unwrap(), None);
        assert_eq!(resolver.city_id_by_name(1, " warsaw ", None).unwrap(), Some(10));
        assert_eq!(resolver.city_id_by_name(1, "  ", None).unwrap(), None);
        assert!(catalog.all_cities(2, None).unwrap().is_empty());
    }
}
